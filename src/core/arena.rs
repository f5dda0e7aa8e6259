//! # The record arena: where in-flight diagnostics live.
//!
//! [`RecordArena`] is the engine's allocator. A published record is placed
//! here, dispatched by reference, and released before the publish call
//! returns, so the arena owns every record for its whole (short) life and
//! there is no reclaim ambiguity.
//!
//! Records are keyed by their process-wide unique id, which is monotonic,
//! so a key is never reused. The byte cost charged per record follows the
//! wire-level layout: header size plus one cell size per argument.

use std::collections::HashMap;

use crate::core::config::record_cost;
use crate::diagnostics::{Diagnostic, UniqueId};
use crate::error::PublishError;

/// Byte-budgeted store of in-flight diagnostic records.
pub(crate) struct RecordArena {
    budget: Option<usize>,
    used: usize,
    records: HashMap<UniqueId, Diagnostic>,
}

impl RecordArena {
    /// Creates an arena with the given byte budget (`None` = unbounded).
    pub(crate) fn new(budget: Option<usize>) -> Self {
        Self {
            budget,
            used: 0,
            records: HashMap::new(),
        }
    }

    /// Places `record` into the arena, charging its byte cost.
    ///
    /// Fails with [`PublishError::ArenaExhausted`] when the budget cannot
    /// cover the record; the record is dropped and nothing stays reachable.
    pub(crate) fn allocate(
        &mut self,
        record: Diagnostic,
    ) -> Result<(UniqueId, &Diagnostic), PublishError> {
        let cost = record_cost(&record);
        if let Some(budget) = self.budget {
            let available = budget.saturating_sub(self.used);
            if cost > available {
                return Err(PublishError::ArenaExhausted {
                    requested: cost,
                    available,
                });
            }
        }

        self.used += cost;
        let id = record.unique_id();
        // Ids are minted from a monotonic counter; the slot is always fresh.
        let slot = self.records.entry(id).or_insert(record);
        Ok((id, slot))
    }

    /// Removes the record `id` and returns its byte cost to the budget.
    pub(crate) fn release(&mut self, id: UniqueId) -> Option<Diagnostic> {
        let record = self.records.remove(&id)?;
        self.used -= record_cost(&record);
        Some(record)
    }

    /// Bytes currently charged against the budget.
    #[cfg(test)]
    pub(crate) fn used(&self) -> usize {
        self.used
    }

    /// Number of records currently in flight.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Descriptor;

    static PLAIN: Descriptor<()> = Descriptor::new("PLAIN", "No arguments");
    static PAIR: Descriptor<(f32, f32)> = Descriptor::new("PAIR", "Two floats");

    #[test]
    fn test_allocate_and_release_round_trips_the_budget() {
        let mut arena = RecordArena::new(Some(4096));
        let (id, record) = arena.allocate(Diagnostic::new(&PAIR, (1.0f32, 2.0f32))).unwrap();
        assert_eq!(record.num_arguments(), 2);
        assert!(arena.used() > 0);
        assert_eq!(arena.len(), 1);

        let released = arena.release(id).unwrap();
        assert_eq!(released.unique_id(), id);
        assert_eq!(arena.used(), 0);
        assert_eq!(arena.len(), 0);
        assert!(arena.release(id).is_none());
    }

    #[test]
    fn test_exhausted_arena_rejects_the_record() {
        let mut arena = RecordArena::new(Some(1));
        let err = arena.allocate(Diagnostic::new(&PLAIN, ())).unwrap_err();
        match err {
            PublishError::ArenaExhausted {
                requested,
                available,
            } => {
                assert!(requested > 1);
                assert_eq!(available, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(arena.len(), 0);
        assert_eq!(arena.used(), 0);
    }

    #[test]
    fn test_unbounded_arena_never_rejects() {
        let mut arena = RecordArena::new(None);
        for _ in 0..256 {
            arena.allocate(Diagnostic::new(&PAIR, (0.5f32, 1.5f32))).unwrap();
        }
        assert_eq!(arena.len(), 256);
    }

    #[test]
    fn test_budget_frees_up_after_release() {
        let cost = {
            let mut probe = RecordArena::new(None);
            let (_, record) = probe.allocate(Diagnostic::new(&PLAIN, ())).unwrap();
            let _ = record;
            probe.used()
        };

        let mut arena = RecordArena::new(Some(cost));
        let (first, _) = arena.allocate(Diagnostic::new(&PLAIN, ())).unwrap();
        assert!(arena.allocate(Diagnostic::new(&PLAIN, ())).is_err());
        arena.release(first);
        assert!(arena.allocate(Diagnostic::new(&PLAIN, ())).is_ok());
    }
}
