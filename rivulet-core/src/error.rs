// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for the rivulet operator toolkit.
//!
//! The toolkit deliberately keeps its error surface small: closing an
//! already-closed queue or provider is a safe no-op, not an error, so the
//! only failure modes that remain are queue closure observed by a caller
//! that cares about it, and a panic raised by user-supplied callback code
//! and caught at a task boundary.

use core::any::Any;

/// A panic captured at an operator task boundary.
///
/// Operators catch panics raised by user callbacks (`reduce`, key
/// extraction, delay selection) only when a panic-relay provider is
/// configured; the payload is normalized into this type before it is
/// forwarded. Panics with non-string payloads keep a placeholder message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("task panicked: {message}")]
pub struct PanicPayload {
    /// The panic message, when one could be extracted.
    pub message: String,
}

impl PanicPayload {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Normalizes the payload returned by `catch_unwind`.
    #[must_use]
    pub fn from_any(panic: Box<dyn Any + Send>) -> Self {
        let message = if let Some(message) = panic.downcast_ref::<&str>() {
            (*message).to_owned()
        } else if let Some(message) = panic.downcast_ref::<String>() {
            message.clone()
        } else {
            "non-string panic payload".to_owned()
        };

        Self { message }
    }
}

/// Root error type for rivulet operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The queue (or provider sink) has been closed and drained.
    #[error("queue is closed")]
    Closed,

    /// A user callback panicked and the panic was caught at the owning
    /// task's boundary.
    #[error(transparent)]
    Panic(#[from] PanicPayload),
}

/// Specialized `Result` for rivulet operations.
pub type Result<T> = core::result::Result<T, Error>;

impl<T> From<async_channel::SendError<T>> for Error {
    fn from(_: async_channel::SendError<T>) -> Self {
        Self::Closed
    }
}

impl From<async_channel::RecvError> for Error {
    fn from(_: async_channel::RecvError) -> Self {
        Self::Closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_any_extracts_str_payload() {
        let payload = PanicPayload::from_any(Box::new("boom"));
        assert_eq!(payload.message, "boom");
    }

    #[test]
    fn from_any_extracts_string_payload() {
        let payload = PanicPayload::from_any(Box::new(format!("boom {}", 42)));
        assert_eq!(payload.message, "boom 42");
    }

    #[test]
    fn from_any_keeps_placeholder_for_opaque_payload() {
        let payload = PanicPayload::from_any(Box::new(7_u32));
        assert_eq!(payload.message, "non-string panic payload");
    }

    #[test]
    fn recv_error_maps_to_closed() {
        let error = Error::from(async_channel::RecvError);
        assert!(matches!(error, Error::Closed));
    }
}
