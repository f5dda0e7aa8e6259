//! # diagvisor
//!
//! **Diagvisor** is a lightweight in-process diagnostic bus for Rust.
//!
//! Producers publish typed, identifier-tagged diagnostics; subscribers
//! register wildcard filters over the identifier space and receive only the
//! matching records, synchronously, on the publishing thread. The crate is
//! designed as a building block for firmware-style diagnostics, tracing
//! shims and test probes.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐
//!  │  Descriptor  │  │  Descriptor  │  │  Descriptor  │
//!  │ (static, per │  │              │  │              │
//!  │  diagnostic) │  │              │  │              │
//!  └──────┬───────┘  └──────┬───────┘  └──────┬───────┘
//!         │ publish(args)   │                 │
//!         ▼                 ▼                 ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │  Engine (single lock: publish ⇄ subscribe exclusive)      │
//! │  - RecordArena (byte-budgeted, owns in-flight records)    │
//! │  - Subscriptions (matcher + subscriber, insertion order)  │
//! │  - Fallback consumer (receives unmatched diagnostics)     │
//! └──────┬──────────────────┬──────────────────┬──────────────┘
//!        │ matcher hit      │ matcher hit      │ no hit
//!        ▼                  ▼                  ▼
//!   Subscriber S1      Subscriber S2      fallback.process()
//!   .process(&rec)     .process(&rec)
//! ```
//!
//! ### Publish lifecycle
//! ```text
//! Descriptor ──► Engine::publish(descriptor, args)
//!
//! lock {
//!   ├─► build record: code, monotonic timestamp, unique id, cells
//!   ├─► arena.allocate ── over budget ──► Err(ArenaExhausted)
//!   ├─► walk subscriptions in insertion order
//!   │     ├─ matcher accepts ─► subscriber.process(&record)
//!   │     │     ├─ Err        ─► abort remaining delivery, Err
//!   │     │     └─ Ok(Drop)   ─► stop if record is droppable
//!   │     └─ no match for any ─► fallback consumer, if set
//!   └─► arena.release
//! }
//! ```
//!
//! ## Features
//! | Area            | Description                                              | Key types / traits                  |
//! |-----------------|----------------------------------------------------------|-------------------------------------|
//! | **Codes**       | Compact two-word identifier keys, `const`-constructible. | [`Code`], [`DecodedCode`]           |
//! | **Records**     | Header plus typed argument cells, one allocation.        | [`Diagnostic`], [`Argument`]        |
//! | **Descriptors** | Static identifier/signature bindings; arity is typed.    | [`Descriptor`], [`ArgumentPack`]    |
//! | **Filters**     | Two-wildcard patterns compiled per subscription.         | [`Matcher`], [`compile_pattern`]    |
//! | **Dispatch**    | Locked, synchronous, insertion-ordered delivery.         | [`Engine`], [`Subscriber`]          |
//! | **Errors**      | Typed errors for encoding and publishing.                | [`IdentifierError`], [`PublishError`] |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use diagvisor::{
//!     Action, Descriptor, Diagnostic, Engine, EngineConfig, Subscriber, SubscriberError,
//! };
//!
//! static OUT_OF_RANGE: Descriptor<(f32, f32)> =
//!     Descriptor::new("OUT_OF_RANGE", "Measured value outside limits");
//!
//! struct Printer;
//!
//! impl Subscriber for Printer {
//!     fn process(&self, diagnostic: &Diagnostic) -> Result<Action, SubscriberError> {
//!         let min = diagnostic.argument(0).and_then(|a| a.as_float());
//!         let max = diagnostic.argument(1).and_then(|a| a.as_float());
//!         println!("{}: {min:?}..{max:?}", diagnostic.code());
//!         Ok(Action::Continue)
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "printer"
//!     }
//! }
//!
//! fn main() -> Result<(), diagvisor::PublishError> {
//!     let engine = Engine::new(EngineConfig::default());
//!     engine.subscribe("OUT_*", Arc::new(Printer));
//!
//!     engine.publish(&OUT_OF_RANGE, (10.5f32, 21.6f32))?;
//!     Ok(())
//! }
//! ```
//!
//! ## Concurrency model
//! Plain preemptible threads, one engine-wide lock, no async scheduling.
//! `publish` and `subscribe` are fully mutually exclusive; subscriber
//! callbacks run on the publishing thread with the lock held and are never
//! invoked concurrently. Records are owned by the engine's arena and
//! released before `publish` returns - a subscriber cannot retain one past
//! its `process` call.

mod code;
mod core;
mod diagnostics;
mod error;
mod filters;
mod subscribers;

// ---- Public re-exports ----

pub use code::{Code, DecodedCode};
pub use core::{Engine, EngineConfig};
pub use diagnostics::{Argument, ArgumentKind, ArgumentPack, Descriptor, Diagnostic, UniqueId};
pub use error::{IdentifierError, PublishError, SubscriberError};
pub use filters::{compile_pattern, Matcher, MatcherKind};
pub use subscribers::{Action, Subscriber};

// Optional: expose a simple built-in logging subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
