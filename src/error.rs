//! Error types used by the diagvisor bus.
//!
//! This module defines three error enums, split by concern:
//!
//! - [`IdentifierError`] — a diagnostic identifier string cannot be encoded.
//! - [`SubscriberError`] — a subscriber failed while processing a diagnostic.
//! - [`PublishError`] — a `publish` call failed (allocation or subscriber).
//!
//! All types provide `as_label` helpers producing short stable snake_case
//! labels for logs and metrics.

use thiserror::Error;

/// # Errors raised when encoding a diagnostic identifier.
///
/// Identifier codes hold at most 20 characters drawn from the 64-symbol
/// alphabet `-`, `0`–`9`, `A`–`Z`, `_`, `a`–`z`. Construction fails hard for
/// anything else; the input is never truncated or substituted.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierError {
    /// The identifier exceeds the 20-character limit.
    #[error("identifier is {length} characters long; the limit is 20")]
    TooLong {
        /// Length of the rejected identifier, in bytes.
        length: usize,
    },

    /// The identifier contains a character outside the 64-symbol alphabet.
    #[error("invalid character {character:?} at position {position} in identifier")]
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// Zero-based position of the offending character.
        position: usize,
    },
}

impl IdentifierError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use diagvisor::IdentifierError;
    ///
    /// let err = IdentifierError::TooLong { length: 32 };
    /// assert_eq!(err.as_label(), "identifier_too_long");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            IdentifierError::TooLong { .. } => "identifier_too_long",
            IdentifierError::InvalidCharacter { .. } => "identifier_invalid_character",
        }
    }
}

/// # Errors returned by subscribers from [`process`](crate::Subscriber::process).
///
/// A subscriber failure is not isolated: the engine propagates it to the
/// publisher and aborts delivery to the remaining subscribers of that call.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SubscriberError {
    /// Processing failed; the diagnostic may have been partially handled.
    #[error("processing failed: {reason}")]
    Failed {
        /// Human-readable failure description.
        reason: String,
    },
}

impl SubscriberError {
    /// Shorthand for [`SubscriberError::Failed`].
    pub fn failed(reason: impl Into<String>) -> Self {
        SubscriberError::Failed {
            reason: reason.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            SubscriberError::Failed { .. } => "subscriber_failed",
        }
    }
}

/// # Errors raised by the publish path.
///
/// Every operation is attempt-once: both variants surface synchronously to
/// the caller of [`publish`](crate::Engine::publish), never as a deferred
/// notification.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum PublishError {
    /// The record arena cannot cover the requested allocation.
    ///
    /// No partial record is left reachable; nothing was delivered.
    #[error("record arena exhausted: requested {requested} bytes, {available} available")]
    ArenaExhausted {
        /// Bytes needed for the rejected record (header plus argument cells).
        requested: usize,
        /// Bytes still available in the arena budget.
        available: usize,
    },

    /// A subscriber failed while processing the diagnostic.
    ///
    /// Delivery to the remaining subscribers of this publish call was
    /// aborted.
    #[error("subscriber '{subscriber}' failed")]
    Subscriber {
        /// Name of the failing subscriber (see [`Subscriber::name`](crate::Subscriber::name)).
        subscriber: &'static str,
        /// The underlying subscriber error.
        #[source]
        source: SubscriberError,
    },
}

impl PublishError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use diagvisor::PublishError;
    ///
    /// let err = PublishError::ArenaExhausted { requested: 96, available: 0 };
    /// assert_eq!(err.as_label(), "arena_exhausted");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            PublishError::ArenaExhausted { .. } => "arena_exhausted",
            PublishError::Subscriber { .. } => "subscriber_failed",
        }
    }
}
