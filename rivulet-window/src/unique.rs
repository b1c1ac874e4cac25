// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_channel::Receiver;
use core::hash::Hash;
use core::time::Duration;
use rivulet_core::Keyed;
use rivulet_providers::spawn_guarded;

use crate::aggregator::{run_window, KeyedWindow};
use crate::BatchOptions;

/// Like [`batch`](crate::batch), but keeps at most one item per key within
/// a window: a later arrival for a key already buffered overwrites it in
/// place, so a window grows only on distinct keys. Items are emitted in
/// first-arrival order.
///
/// # Panics
///
/// Panics if `window_size` is zero.
#[must_use]
pub fn batch_unique<T: Keyed + Send + 'static>(
    input: Receiver<T>,
    window_size: usize,
    max_delay: Duration,
    options: BatchOptions,
) -> Receiver<Vec<T>> {
    assert!(
        window_size > 0,
        "batch_unique: window size must be at least 1"
    );

    let capacity = options.output_capacity(&input, window_size);
    let (out_tx, out_rx) = async_channel::bounded(capacity);

    spawn_guarded(
        run_window(
            input,
            out_tx,
            window_size,
            max_delay,
            KeyedWindow::new(),
            options.stats,
        ),
        options.panics,
    );

    out_rx
}

/// [`batch_unique`] for plain values: the value itself is the key, so a
/// window holds each distinct value once.
///
/// # Panics
///
/// Panics if `window_size` is zero.
#[must_use]
pub fn unique<T>(
    input: Receiver<T>,
    window_size: usize,
    max_delay: Duration,
    options: BatchOptions,
) -> Receiver<Vec<T>>
where
    T: Eq + Hash + Clone + Send + 'static,
{
    assert!(window_size > 0, "unique: window size must be at least 1");

    let capacity = options.output_capacity(&input, window_size);
    let (out_tx, out_rx) = async_channel::bounded(capacity);

    let (bridge_tx, bridge_rx) = async_channel::bounded(1);
    tokio::spawn(async move {
        while let Ok(value) = input.recv().await {
            if bridge_tx.send(ValueKey(value)).await.is_err() {
                break;
            }
        }
        bridge_tx.close();
    });

    let inner = batch_unique(
        bridge_rx,
        window_size,
        max_delay,
        BatchOptions {
            capacity: Some(1),
            stats: options.stats,
            panics: options.panics,
        },
    );
    tokio::spawn(async move {
        while let Ok(window) = inner.recv().await {
            let values = window.into_iter().map(|item| item.0).collect();
            if out_tx.send(values).await.is_err() {
                break;
            }
        }
        out_tx.close();
    });

    out_rx
}

/// Like [`unique`], but waits for the input to close and returns every
/// emitted window.
pub async fn unique_values<T>(
    input: Receiver<T>,
    window_size: usize,
    max_delay: Duration,
    options: BatchOptions,
) -> Vec<Vec<T>>
where
    T: Eq + Hash + Clone + Send + 'static,
{
    let out = unique(input, window_size, max_delay, options);

    let mut windows = Vec::new();
    while let Ok(window) = out.recv().await {
        windows.push(window);
    }
    windows
}

/// Wrapper giving a plain value an identity key.
struct ValueKey<T>(T);

impl<T: Eq + Hash + Clone + Send + 'static> Keyed for ValueKey<T> {
    type Key = T;

    fn key(&self) -> T {
        self.0.clone()
    }
}
