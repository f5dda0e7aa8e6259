//! # Engine configuration.
//!
//! Provides [`EngineConfig`] centralized settings for the dispatch engine.
//!
//! ## Sentinel values
//! - `arena_budget = 0` → unbounded (records are never rejected for size)

use std::mem;

use crate::diagnostics::{Argument, Diagnostic};

/// Configuration for the dispatch engine.
///
/// ## Field semantics
/// - `arena_budget`: byte budget for in-flight diagnostic records
///   (`0` = unbounded)
///
/// All fields are public for flexibility. Prefer the helper accessors to
/// avoid sprinkling sentinel checks (`0`) across the codebase.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Byte budget the record arena may hold at once.
    ///
    /// Each in-flight record costs its header size plus one cell size per
    /// argument; a publish whose record does not fit fails with
    /// [`PublishError::ArenaExhausted`](crate::PublishError::ArenaExhausted)
    /// before anything is delivered.
    ///
    /// - `0` = unbounded (no budget enforced)
    /// - `n > 0` = at most `n` bytes of records in flight
    pub arena_budget: usize,
}

impl EngineConfig {
    /// Returns the arena budget as an `Option`.
    ///
    /// - `None` → unbounded
    /// - `Some(n)` → at most `n` bytes of records in flight
    #[inline]
    pub fn budget_limit(&self) -> Option<usize> {
        if self.arena_budget == 0 {
            None
        } else {
            Some(self.arena_budget)
        }
    }
}

impl Default for EngineConfig {
    /// Default configuration:
    ///
    /// - `arena_budget = 64 KiB` (hundreds of in-flight records; publishes
    ///   are synchronous, so the arena rarely holds more than one)
    fn default() -> Self {
        Self {
            arena_budget: 64 * 1024,
        }
    }
}

/// Byte cost of `record` in the arena: header size plus one cell size per
/// argument.
pub(crate) fn record_cost(record: &Diagnostic) -> usize {
    mem::size_of::<Diagnostic>() + record.num_arguments() * mem::size_of::<Argument>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Descriptor;

    static PLAIN: Descriptor<()> = Descriptor::new("PLAIN", "No arguments");
    static PAIR: Descriptor<(f32, f32)> = Descriptor::new("PAIR", "Two floats");

    #[test]
    fn test_zero_budget_means_unbounded() {
        let config = EngineConfig { arena_budget: 0 };
        assert_eq!(config.budget_limit(), None);
        assert_eq!(EngineConfig::default().budget_limit(), Some(64 * 1024));
    }

    #[test]
    fn test_record_cost_grows_with_arity() {
        let plain = Diagnostic::new(&PLAIN, ());
        let pair = Diagnostic::new(&PAIR, (1.0f32, 2.0f32));
        assert_eq!(
            record_cost(&pair) - record_cost(&plain),
            2 * mem::size_of::<Argument>()
        );
    }
}
