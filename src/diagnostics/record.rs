//! # Diagnostic records.
//!
//! A [`Diagnostic`] is one published event instance: a header (code,
//! timestamp, unique id, droppable flag) plus its argument cells in one
//! contiguous allocation. Records are immutable once built and are never
//! copied; a record's identity is its arena slot.
//!
//! ## Unique ids
//! Every record is stamped with a process-wide id minted from a global
//! atomic counter, so ids increase monotonically across threads and double
//! as arena keys.
//!
//! ## Droppability
//! Two creation entry points exist. [`Diagnostic::new`] marks the record
//! droppable: a consumer may discard it without side effects.
//! [`Diagnostic::new_non_droppable`] is the only way to clear the flag.

use std::sync::atomic::{AtomicU32, Ordering as AtomicOrdering};
use std::time::Instant;

use crate::code::Code;
use crate::diagnostics::argument::Argument;
use crate::diagnostics::descriptor::{ArgumentPack, Descriptor};

/// Process-wide identifier of a diagnostic record.
pub type UniqueId = u32;

/// Global counter backing [`mint_unique_id`].
static NEXT_UNIQUE_ID: AtomicU32 = AtomicU32::new(0);

/// Mints a fresh process-wide record id.
fn mint_unique_id() -> UniqueId {
    NEXT_UNIQUE_ID.fetch_add(1, AtomicOrdering::Relaxed)
}

/// One published diagnostic: header plus argument cells.
///
/// Constructed through a [`Descriptor`], which fixes the identifier code
/// and the argument signature; the timestamp comes from the monotonic
/// clock and the unique id from the process-wide counter. Deliberately not
/// `Clone`: records live in the engine's arena and are only ever handed out
/// by reference for the duration of a dispatch.
#[derive(Debug)]
pub struct Diagnostic {
    code: Code,
    timestamp: Instant,
    unique_id: UniqueId,
    droppable: bool,
    arguments: Box<[Argument]>,
}

impl Diagnostic {
    /// Creates a droppable record from `descriptor` and `arguments`.
    pub fn new<A: ArgumentPack>(descriptor: &Descriptor<A>, arguments: A) -> Self {
        Self::build(descriptor, arguments, true)
    }

    /// Creates a non-droppable record.
    ///
    /// The only entry point that clears the droppable flag; consumers must
    /// deliver such records to every remaining subscriber regardless of the
    /// [`Action`](crate::Action) returned along the way.
    pub fn new_non_droppable<A: ArgumentPack>(descriptor: &Descriptor<A>, arguments: A) -> Self {
        Self::build(descriptor, arguments, false)
    }

    fn build<A: ArgumentPack>(descriptor: &Descriptor<A>, arguments: A, droppable: bool) -> Self {
        Self {
            code: descriptor.code(),
            timestamp: Instant::now(),
            unique_id: mint_unique_id(),
            droppable,
            arguments: arguments.into_arguments(),
        }
    }

    /// The identifier code of the diagnostic.
    #[inline]
    pub fn code(&self) -> Code {
        self.code
    }

    /// The monotonic creation timestamp.
    #[inline]
    pub fn timestamp(&self) -> Instant {
        self.timestamp
    }

    /// The process-wide unique id.
    #[inline]
    pub fn unique_id(&self) -> UniqueId {
        self.unique_id
    }

    /// Whether a consumer may discard this record.
    #[inline]
    pub fn droppable(&self) -> bool {
        self.droppable
    }

    /// Number of attached arguments.
    #[inline]
    pub fn num_arguments(&self) -> usize {
        self.arguments.len()
    }

    /// The argument cells, in declaration order.
    #[inline]
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// The `index`-th argument, if present.
    #[inline]
    pub fn argument(&self, index: usize) -> Option<&Argument> {
        self.arguments.get(index)
    }
}
