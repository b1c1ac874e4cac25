// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_channel::Receiver;
use core::time::Duration;
use rivulet_providers::spawn_guarded;

use crate::aggregator::{run_window, VecWindow};
use crate::BatchOptions;

/// Accumulates `window_size` items from `input` into one output window.
///
/// A window is emitted when it fills, when `max_delay` elapses after its
/// first item (a zero `max_delay` disables the timer), or — partially —
/// when the input closes. The output closes after the final flush.
///
/// # Panics
///
/// Panics if `window_size` is zero.
#[must_use]
pub fn batch<T: Send + 'static>(
    input: Receiver<T>,
    window_size: usize,
    max_delay: Duration,
    options: BatchOptions,
) -> Receiver<Vec<T>> {
    assert!(window_size > 0, "batch: window size must be at least 1");

    let capacity = options.output_capacity(&input, window_size);
    let (out_tx, out_rx) = async_channel::bounded(capacity);

    spawn_guarded(
        run_window(
            input,
            out_tx,
            window_size,
            max_delay,
            VecWindow::default(),
            options.stats,
        ),
        options.panics,
    );

    out_rx
}

/// Like [`batch`], but waits for the input to close and returns every
/// emitted window.
pub async fn batch_values<T: Send + 'static>(
    input: Receiver<T>,
    window_size: usize,
    max_delay: Duration,
    options: BatchOptions,
) -> Vec<Vec<T>> {
    let out = batch(input, window_size, max_delay, options);

    let mut windows = Vec::new();
    while let Ok(window) = out.recv().await {
        windows.push(window);
    }
    windows
}
