//! # Simple logging subscriber for debugging and demos.
//!
//! [`LogWriter`] prints diagnostics to stdout in a human-readable format.
//! This is primarily useful for development, debugging, and examples.
//!
//! ## Output format
//! ```text
//! [diagnostic] code=OUT_OF_RANGE id=7 args=[10.5, 21.6]
//! [diagnostic] code=DISK_FULL id=8 args=["sda1"] non-droppable
//! ```

use crate::diagnostics::Diagnostic;
use crate::error::SubscriberError;
use crate::subscribers::subscriber::{Action, Subscriber};

/// Simple stdout logging subscriber.
///
/// Enabled via the `logging` feature. Prints one human-readable line per
/// diagnostic for debugging and demonstration purposes.
///
/// Not intended for production use - implement a custom [`Subscriber`] for
/// structured logging or metrics collection.
pub struct LogWriter;

impl Subscriber for LogWriter {
    fn process(&self, diagnostic: &Diagnostic) -> Result<Action, SubscriberError> {
        let arguments = diagnostic
            .arguments()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let suffix = if diagnostic.droppable() {
            ""
        } else {
            " non-droppable"
        };
        println!(
            "[diagnostic] code={} id={} args=[{arguments}]{suffix}",
            diagnostic.code(),
            diagnostic.unique_id(),
        );
        Ok(Action::Continue)
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
