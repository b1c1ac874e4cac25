// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The per-key state machine shared by every delay-coalescing operator.
//!
//! The key table is the one piece of state in the toolkit touched by more
//! than one task: the consumer loop inserts and reduces entries while each
//! key's own delay task removes them on expiry. Every read-modify-write
//! happens under the table's mutex; the lock is never held across an await
//! point.

use async_channel::{Receiver, Sender};
use core::time::Duration;
use parking_lot::Mutex;
use rivulet_core::{DebounceStats, Keyed};
use rivulet_providers::{guard, spawn_guarded, NotifyProvider};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::{DebounceOptions, PendingCount};

/// An input item carrying its own key, delay and reduction.
pub trait DebounceItem: Keyed {
    /// The delay window started by this item's first arrival for its key.
    fn delay(&self) -> Duration;

    /// Folds a duplicate arrival into the pending value.
    ///
    /// `self` is the currently pending value, `incoming` the new arrival.
    /// The returned value becomes the pending value; the flag reports
    /// whether the incoming item changed it.
    fn reduce(self, incoming: Self) -> (Self, bool)
    where
        Self: Sized;
}

struct PendingEntry<T> {
    // Always occupied outside the reduce critical section.
    value: Option<T>,
    count: u64,
}

type KeyTable<T> = Arc<Mutex<HashMap<<T as Keyed>::Key, PendingEntry<T>>>>;

/// Debounces a queue of [`DebounceItem`]s, with per-item control over
/// keys, delays and reduction.
///
/// Returns the output queue and a [`PendingCount`] handle. The output
/// closes once the input has closed and every outstanding delay task has
/// flushed.
#[must_use]
pub fn debounce_custom<T>(
    input: Receiver<T>,
    options: DebounceOptions,
) -> (Receiver<T>, PendingCount)
where
    T: DebounceItem + Clone + Send + 'static,
{
    let DebounceOptions {
        capacity,
        mode,
        stats,
        panics,
    } = options;

    let (out_tx, out_rx) = async_channel::bounded(capacity.unwrap_or(1).max(1));
    let table: KeyTable<T> = Arc::new(Mutex::new(HashMap::new()));
    let pending = PendingCount::from_table(&table);

    spawn_guarded(
        engine_loop(input, out_tx, table, mode, stats, panics.clone()),
        panics,
    );

    (out_rx, pending)
}

/// [`debounce_custom`] fixed to [`EmitMode::Lead`](crate::EmitMode::Lead):
/// each key's first arrival passes through immediately and later arrivals
/// are suppressed until its delay window ends.
#[must_use]
pub fn throttle_custom<T>(
    input: Receiver<T>,
    options: DebounceOptions,
) -> (Receiver<T>, PendingCount)
where
    T: DebounceItem + Clone + Send + 'static,
{
    let options = DebounceOptions {
        mode: crate::EmitMode::Lead,
        ..options
    };
    debounce_custom(input, options)
}

async fn engine_loop<T>(
    input: Receiver<T>,
    out: Sender<T>,
    table: KeyTable<T>,
    mode: crate::EmitMode,
    stats: Option<NotifyProvider<DebounceStats>>,
    panics: Option<NotifyProvider<rivulet_core::PanicPayload>>,
) where
    T: DebounceItem + Clone + Send + 'static,
{
    let drain = CancellationToken::new();
    let mut timers: JoinSet<()> = JoinSet::new();

    while let Ok(item) = input.recv().await {
        let key = item.key();
        let delay = item.delay();

        // `Some(lead)` marks a first arrival; the lead value is captured
        // before the item is stored so the arriving item (not the reduced
        // value) is what surfaces immediately.
        let first_arrival = {
            let mut entries = table.lock();
            match entries.entry(key.clone()) {
                Entry::Occupied(mut occupied) => {
                    let pending = occupied.get_mut();
                    pending.count += 1;
                    if let Some(current) = pending.value.take() {
                        let (next, replaced) = current.reduce(item);
                        pending.value = Some(next);
                        trace!(replaced, "coalesced arrival into pending entry");
                    }
                    None
                }
                Entry::Vacant(vacant) => {
                    let lead = mode.emits_lead().then(|| item.clone());
                    vacant.insert(PendingEntry {
                        value: Some(item),
                        count: 1,
                    });
                    Some(lead)
                }
            }
        };

        let Some(lead) = first_arrival else {
            continue;
        };

        timers.spawn(guard(
            expire_key(
                Arc::clone(&table),
                out.clone(),
                input.clone(),
                stats.clone(),
                drain.clone(),
                mode,
                key,
                delay,
            ),
            panics.clone(),
        ));

        if let Some(lead_value) = lead {
            if out.send(lead_value).await.is_err() {
                break;
            }
            if let Some(stats) = &stats {
                stats
                    .provide(DebounceStats {
                        delay: Duration::ZERO,
                        count: 1,
                        queue_len: input.len(),
                    })
                    .await;
            }
        }
    }

    debug!(
        pending = table.lock().len(),
        "input closed; draining pending entries"
    );
    drain.cancel();
    while timers.join_next().await.is_some() {}
    out.close();
}

/// One key's delay task: waits out the delay (or the drain signal), takes
/// the key's entry out of the table and emits the reduced value.
#[allow(clippy::too_many_arguments)]
async fn expire_key<T>(
    table: KeyTable<T>,
    out: Sender<T>,
    input: Receiver<T>,
    stats: Option<NotifyProvider<DebounceStats>>,
    drain: CancellationToken,
    mode: crate::EmitMode,
    key: T::Key,
    delay: Duration,
) where
    T: DebounceItem + Clone + Send + 'static,
{
    let started = Instant::now();
    tokio::select! {
        () = drain.cancelled() => {}
        () = tokio::time::sleep(delay) => {}
    }
    let elapsed = started.elapsed();

    let removed = table.lock().remove(&key);
    let Some(entry) = removed else {
        return;
    };
    if !mode.emits_tail() {
        return;
    }
    let Some(value) = entry.value else {
        return;
    };

    if out.send(value).await.is_err() {
        return;
    }
    if let Some(stats) = &stats {
        stats
            .provide(DebounceStats {
                delay: elapsed,
                count: entry.count,
                queue_len: input.len(),
            })
            .await;
    }
}
