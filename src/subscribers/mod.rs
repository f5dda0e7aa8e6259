//! # Diagnostic consumers.
//!
//! This module provides the [`Subscriber`] trait - the extension point for
//! plugging diagnostic consumers into the engine - and the [`Action`] a
//! subscriber returns from [`process`](Subscriber::process).
//!
//! ## Architecture
//! ```text
//! Diagnostic flow:
//!   producer ── publish ──► Engine ──► matcher per subscription
//!                                          │ match
//!                                          ▼
//!                                  Subscriber::process(&record)
//!                                          │
//!                                     ┌────┴─────┬─────────┐
//!                                     ▼          ▼         ▼
//!                                  LogWriter  Metrics   Custom ...
//! ```
//!
//! Processing is synchronous: the engine calls each matching subscriber on
//! the publishing thread, in subscription order, holding the engine lock.

mod subscriber;

#[cfg(feature = "logging")]
mod log;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use subscriber::{Action, Subscriber};
