// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The queue abstraction rivulet operators consume and produce.
//!
//! Every operator reads from and writes to a closable, typed, MPMC FIFO.
//! [`async_channel`] provides exactly that contract — bounded or unbounded
//! capacity, a backpressuring `send().await`, a non-blocking `try_recv`, an
//! idempotent `close()`, and a terminal `RecvError` once the queue is closed
//! and drained — so this module re-exports it as the toolkit's queue type
//! and adds the small constructors the operators share.

pub use async_channel::{
    bounded, unbounded, Receiver, RecvError, SendError, Sender, TryRecvError, TrySendError,
};

/// Creates a bounded queue, treating a requested capacity of zero as the
/// minimal capacity of one. The original unbuffered-queue default maps to
/// capacity one here, which is the closest rendezvous analogue the channel
/// offers.
#[must_use]
pub fn channel<T>(capacity: usize) -> (Sender<T>, Receiver<T>) {
    bounded(capacity.max(1))
}

/// Returns a receiver for an already-closed, empty queue.
///
/// Used as the "no stream" sentinel: every `recv` on the returned receiver
/// fails immediately with [`RecvError`].
#[must_use]
pub fn closed<T>() -> Receiver<T> {
    let (tx, rx) = bounded(1);
    tx.close();
    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_receiver_never_yields() {
        let rx = closed::<u32>();
        assert!(rx.is_closed());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let (tx, _rx) = channel::<u32>(0);
        assert!(tx.try_send(1).is_ok());
        assert!(tx.try_send(2).is_err());
    }
}
