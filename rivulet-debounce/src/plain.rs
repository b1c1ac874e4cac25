// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Debounce and throttle over plain comparable values, bridged through the
//! custom engine with an identity-keyed wrapper.

use async_channel::Receiver;
use core::hash::Hash;
use core::time::Duration;
use rivulet_core::Keyed;

use crate::{debounce_custom, DebounceItem, DebounceOptions, EmitMode, PendingCount};

/// Debounces a queue of plain values, keyed by the value itself.
///
/// Each distinct value surfaces at most once per `delay` window, `delay`
/// measured from the first time the value was read. Duplicate arrivals
/// within the window are counted but do not extend it.
#[must_use]
pub fn debounce<T>(
    input: Receiver<T>,
    delay: Duration,
    options: DebounceOptions,
) -> (Receiver<T>, PendingCount)
where
    T: Eq + Hash + Clone + Send + 'static,
{
    let capacity = options.capacity.unwrap_or(1).max(1);
    let inner_options = DebounceOptions {
        capacity: Some(1),
        ..options
    };

    let (bridge_tx, bridge_rx) = async_channel::bounded(1);
    tokio::spawn(async move {
        while let Ok(value) = input.recv().await {
            if bridge_tx.send(ValueItem { value, delay }).await.is_err() {
                break;
            }
        }
        bridge_tx.close();
    });

    let (wrapped_rx, pending) = debounce_custom(bridge_rx, inner_options);

    let (out_tx, out_rx) = async_channel::bounded(capacity);
    tokio::spawn(async move {
        while let Ok(item) = wrapped_rx.recv().await {
            if out_tx.send(item.value).await.is_err() {
                break;
            }
        }
        out_tx.close();
    });

    (out_rx, pending)
}

/// Per-value debouncing: every unique value read from the input starts a
/// delay window for that value, and duplicates read during the window are
/// dropped. Equivalent to [`debounce`] — the name states the intent when
/// the input is a stream of repeating signals rather than updates.
#[must_use]
pub fn debounce_values<T>(
    input: Receiver<T>,
    delay: Duration,
    options: DebounceOptions,
) -> (Receiver<T>, PendingCount)
where
    T: Eq + Hash + Clone + Send + 'static,
{
    debounce(input, delay, options)
}

/// [`debounce`] fixed to lead emission: a value passes through the first
/// time it is read and matching values are suppressed for the following
/// `delay` period.
#[must_use]
pub fn throttle<T>(
    input: Receiver<T>,
    delay: Duration,
    options: DebounceOptions,
) -> (Receiver<T>, PendingCount)
where
    T: Eq + Hash + Clone + Send + 'static,
{
    let options = DebounceOptions {
        mode: EmitMode::Lead,
        ..options
    };
    debounce(input, delay, options)
}

/// Wrapper carrying a fixed delay and keeping the first arrival on reduce;
/// duplicate values are identical anyway, only the count changes.
#[derive(Clone)]
struct ValueItem<T> {
    value: T,
    delay: Duration,
}

impl<T: Eq + Hash + Clone + Send + 'static> Keyed for ValueItem<T> {
    type Key = T;

    fn key(&self) -> T {
        self.value.clone()
    }
}

impl<T: Eq + Hash + Clone + Send + 'static> DebounceItem for ValueItem<T> {
    fn delay(&self) -> Duration {
        self.delay
    }

    fn reduce(self, _incoming: Self) -> (Self, bool) {
        (self, false)
    }
}
