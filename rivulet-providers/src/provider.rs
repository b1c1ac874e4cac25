// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_channel::{Receiver, Sender, TrySendError};
use core::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// A close-safe, policy-configurable notification provider.
///
/// Cheap to clone; all clones share the same sink and closed state. See the
/// [crate documentation](crate) for the delivery policies.
pub struct NotifyProvider<T> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    done: CancellationToken,
    sink: Sink<T>,
}

enum Sink<T> {
    Blocking(Sender<T>),
    Dropping(Sender<T>),
    // Unbounded bridge drained by the coalescing forwarder task.
    Coalescing(Sender<T>),
}

impl<T: Send + 'static> NotifyProvider<T> {
    /// Creates a blocking provider: `provide` waits until the sink accepts
    /// the value or the provider is closed concurrently (then returns
    /// `false` without delivering).
    #[must_use]
    pub fn blocking(capacity: usize) -> (Self, Receiver<T>) {
        let (tx, rx) = async_channel::bounded(capacity.max(1));
        (Self::with_sink(Sink::Blocking(tx)), rx)
    }

    /// Creates a dropping provider: a full sink discards the value, and
    /// `provide` still reports success — delivery is best effort.
    #[must_use]
    pub fn dropping(capacity: usize) -> (Self, Receiver<T>) {
        let (tx, rx) = async_channel::bounded(capacity.max(1));
        (Self::with_sink(Sink::Dropping(tx)), rx)
    }

    fn with_sink(sink: Sink<T>) -> Self {
        Self {
            inner: Arc::new(Inner {
                done: CancellationToken::new(),
                sink,
            }),
        }
    }

    /// Publishes a value to the sink according to the provider's policy.
    ///
    /// Returns `false` only when the provider is (or becomes) closed before
    /// the value is handed over; a dropping provider that discards a value
    /// still returns `true`.
    pub async fn provide(&self, value: T) -> bool {
        if self.inner.done.is_cancelled() {
            return false;
        }

        match &self.inner.sink {
            Sink::Blocking(tx) => tokio::select! {
                () = self.inner.done.cancelled() => false,
                sent = tx.send(value) => sent.is_ok(),
            },
            Sink::Dropping(tx) => match tx.try_send(value) {
                Ok(()) | Err(TrySendError::Full(_)) => true,
                Err(TrySendError::Closed(_)) => false,
            },
            // The bridge is unbounded; a failed try_send means the
            // forwarder is gone, which counts as closure.
            Sink::Coalescing(tx) => tx.try_send(value).is_ok(),
        }
    }

    /// Closes the provider and its sink.
    ///
    /// Idempotent and safe to call concurrently with `provide` from other
    /// tasks; neither side ever panics.
    pub fn close(&self) {
        self.inner.done.cancel();
        match &self.inner.sink {
            Sink::Blocking(tx) | Sink::Dropping(tx) | Sink::Coalescing(tx) => {
                tx.close();
            }
        }
    }

    /// Reports whether the provider can no longer deliver, either because
    /// [`close`](Self::close) was called or because the receiving side has
    /// been dropped.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        if self.inner.done.is_cancelled() {
            return true;
        }
        match &self.inner.sink {
            Sink::Blocking(tx) | Sink::Dropping(tx) | Sink::Coalescing(tx) => tx.is_closed(),
        }
    }
}

impl<T: Clone + Send + 'static> NotifyProvider<T> {
    /// Creates a coalescing provider: values submitted while the reader is
    /// not ready are buffered, in arrival order, and delivered as a single
    /// batch the next time the reader is ready.
    ///
    /// Closing the provider drops any buffered batch; a provider whose
    /// handles are all dropped instead flushes the residual batch before
    /// the receiver terminates.
    #[must_use]
    pub fn coalescing(capacity: usize) -> (Self, Receiver<Vec<T>>) {
        let (bridge_tx, bridge_rx) = async_channel::unbounded();
        let (out_tx, out_rx) = async_channel::bounded(capacity.max(1));

        let provider = Self::with_sink(Sink::Coalescing(bridge_tx));
        tokio::spawn(forward_coalesced(
            bridge_rx,
            out_tx,
            provider.inner.done.clone(),
        ));

        (provider, out_rx)
    }
}

/// Drains the bridge into batches, delivering the current batch whenever
/// the output sink has room and appending to it while the sink is full.
async fn forward_coalesced<T: Clone + Send + 'static>(
    bridge: Receiver<T>,
    out: Sender<Vec<T>>,
    done: CancellationToken,
) {
    let mut batch: Vec<T> = Vec::new();

    loop {
        if batch.is_empty() {
            tokio::select! {
                () = done.cancelled() => return,
                next = bridge.recv() => match next {
                    Ok(value) => batch.push(value),
                    Err(_) => return,
                },
            }
        } else {
            let ready = batch.clone();
            tokio::select! {
                () = done.cancelled() => return,
                next = bridge.recv() => match next {
                    Ok(value) => batch.push(value),
                    Err(_) => {
                        // All provider handles dropped: flush the residue.
                        let _ = out.send(core::mem::take(&mut batch)).await;
                        return;
                    }
                },
                sent = out.send(ready) => {
                    if sent.is_err() {
                        return;
                    }
                    batch.clear();
                }
            }
        }
    }
}

impl<T> Clone for NotifyProvider<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for NotifyProvider<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let policy = match self.inner.sink {
            Sink::Blocking(_) => "blocking",
            Sink::Dropping(_) => "dropping",
            Sink::Coalescing(_) => "coalescing",
        };
        f.debug_struct("NotifyProvider")
            .field("policy", &policy)
            .field("closed", &self.inner.done.is_cancelled())
            .finish()
    }
}
