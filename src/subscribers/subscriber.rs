//! # The subscriber extension point.
//!
//! [`Subscriber`] is how external code consumes diagnostics. The engine
//! invokes [`process`](Subscriber::process) synchronously on the publishing
//! thread with the engine lock held, so implementations must be quick and
//! must not call back into the engine.
//!
//! ## Rules
//! - A slow subscriber blocks the publisher and every other thread using
//!   the engine.
//! - The record reference is only valid for the duration of the call; copy
//!   out whatever must be retained.
//! - Returning an error aborts delivery to the remaining subscribers of
//!   that publish call and surfaces at the publisher. There is no
//!   isolation between subscribers.
//!
//! ## Example
//! ```
//! use diagvisor::{Action, Diagnostic, Subscriber, SubscriberError};
//!
//! struct Printer;
//!
//! impl Subscriber for Printer {
//!     fn process(&self, diagnostic: &Diagnostic) -> Result<Action, SubscriberError> {
//!         println!("{}", diagnostic.code());
//!         Ok(Action::Continue)
//!     }
//!
//!     fn name(&self) -> &'static str { "printer" }
//! }
//! ```

use crate::diagnostics::Diagnostic;
use crate::error::SubscriberError;

/// What a subscriber wants done with a diagnostic after processing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Keep delivering the diagnostic to the remaining subscribers.
    Continue,
    /// Discard the diagnostic: skip the remaining subscribers.
    ///
    /// Honored only for droppable records; for a non-droppable record the
    /// engine ignores this and continues delivery.
    Drop,
}

/// Consumer of dispatched diagnostics.
///
/// Registered with [`Engine::subscribe`](crate::Engine::subscribe) under a
/// filter pattern, or as the engine's fallback consumer for unmatched
/// diagnostics.
pub trait Subscriber: Send + Sync + 'static {
    /// Processes a single matching diagnostic.
    ///
    /// Called on the publishing thread, engine lock held. The returned
    /// [`Action`] may stop further propagation of a droppable record; an
    /// `Err` aborts delivery to the remaining subscribers and propagates to
    /// the publisher.
    fn process(&self, diagnostic: &Diagnostic) -> Result<Action, SubscriberError>;

    /// Returns the subscriber name used in logs and error reports.
    ///
    /// Prefer short, descriptive names (e.g. "printer", "metrics"). The
    /// default uses `type_name::<Self>()`, which can be verbose - override
    /// it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
