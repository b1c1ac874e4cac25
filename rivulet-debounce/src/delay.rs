// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Per-item timed forwarding.
//!
//! [`delay`] holds every value read from the input for a fixed duration
//! before writing it downstream; [`delay_custom`] lets each item choose its
//! own duration through [`Delayable`]. Unlike the coalescing operators
//! there is no keying and nothing is dropped: every item is held by its own
//! task and forwarded exactly once, so a long hold never blocks a short one
//! behind it. When the input closes, items still being held are flushed
//! immediately and the output closes after the last of them.

use async_channel::{Receiver, Sender};
use core::time::Duration;
use rivulet_core::OperationStats;
use rivulet_providers::{guard, spawn_guarded, NotifyProvider};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::{DelayOptions, PendingCount};

/// An input item carrying its own hold duration.
pub trait Delayable {
    /// How long the item is held before it is forwarded.
    fn delay(&self) -> Duration;
}

/// Holds each item from `input` for its own [`Delayable::delay`] before
/// forwarding it.
///
/// Returns the output queue and a [`PendingCount`] reporting how many items
/// are currently being held. The output closes once the input has closed
/// and every held item has been flushed.
#[must_use]
pub fn delay_custom<T>(input: Receiver<T>, options: DelayOptions) -> (Receiver<T>, PendingCount)
where
    T: Delayable + Send + 'static,
{
    let DelayOptions {
        capacity,
        stats,
        panics,
    } = options;

    let (out_tx, out_rx) = async_channel::bounded(capacity.unwrap_or(1).max(1));
    let held = Arc::new(AtomicUsize::new(0));
    let pending = PendingCount::from_counter(&held);

    spawn_guarded(
        delay_loop(input, out_tx, held, stats, panics.clone()),
        panics,
    );

    (out_rx, pending)
}

/// Holds every item from `input` for a fixed `hold` duration before
/// forwarding it. A zero `hold` forwards without waiting.
#[must_use]
pub fn delay<T>(
    input: Receiver<T>,
    hold: Duration,
    options: DelayOptions,
) -> (Receiver<T>, PendingCount)
where
    T: Send + 'static,
{
    let capacity = options.capacity.unwrap_or(1).max(1);
    let inner_options = DelayOptions {
        capacity: Some(1),
        ..options
    };

    let (bridge_tx, bridge_rx) = async_channel::bounded(1);
    tokio::spawn(async move {
        while let Ok(value) = input.recv().await {
            if bridge_tx.send(HeldItem { value, hold }).await.is_err() {
                break;
            }
        }
        bridge_tx.close();
    });

    let (held_rx, pending) = delay_custom(bridge_rx, inner_options);

    let (out_tx, out_rx) = async_channel::bounded(capacity);
    tokio::spawn(async move {
        while let Ok(item) = held_rx.recv().await {
            if out_tx.send(item.value).await.is_err() {
                break;
            }
        }
        out_tx.close();
    });

    (out_rx, pending)
}

async fn delay_loop<T>(
    input: Receiver<T>,
    out: Sender<T>,
    held: Arc<AtomicUsize>,
    stats: Option<NotifyProvider<OperationStats>>,
    panics: Option<NotifyProvider<rivulet_core::PanicPayload>>,
) where
    T: Delayable + Send + 'static,
{
    let drain = CancellationToken::new();
    let mut in_flight: JoinSet<()> = JoinSet::new();

    while let Ok(item) = input.recv().await {
        held.fetch_add(1, Ordering::SeqCst);

        let hold = hold_item(
            item,
            out.clone(),
            input.clone(),
            stats.clone(),
            drain.clone(),
        );
        let panics = panics.clone();
        let held = Arc::clone(&held);
        in_flight.spawn(async move {
            guard(hold, panics).await;
            // Decremented outside the fail boundary so a panicking item
            // never leaves the count stuck.
            held.fetch_sub(1, Ordering::SeqCst);
        });
    }

    debug!(
        held = held.load(Ordering::SeqCst),
        "input closed; flushing held items"
    );
    drain.cancel();
    while in_flight.join_next().await.is_some() {}
    out.close();
}

/// One item's hold task: waits out the item's delay (or the flush signal)
/// and forwards the item.
async fn hold_item<T>(
    item: T,
    out: Sender<T>,
    input: Receiver<T>,
    stats: Option<NotifyProvider<OperationStats>>,
    drain: CancellationToken,
) where
    T: Delayable + Send + 'static,
{
    let hold = item.delay();
    if !hold.is_zero() {
        tokio::select! {
            () = drain.cancelled() => {}
            () = tokio::time::sleep(hold) => {}
        }
    }

    if out.send(item).await.is_err() {
        return;
    }
    if let Some(stats) = &stats {
        stats
            .provide(OperationStats {
                duration: hold,
                queue_len: input.len(),
            })
            .await;
    }
}

/// Wrapper giving a plain value a fixed hold duration.
struct HeldItem<T> {
    value: T,
    hold: Duration,
}

impl<T> Delayable for HeldItem<T> {
    fn delay(&self) -> Duration {
        self.hold
    }
}
