// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_channel::Receiver;
use rivulet_core::{BatchStats, PanicPayload};
use rivulet_providers::NotifyProvider;

/// Configuration for the window aggregator.
///
/// All fields default to off; `..Default::default()` keeps call sites
/// short when only one knob matters.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Output queue capacity. Defaults to the input queue's capacity
    /// divided by the window size (minimum one), or one for unbounded
    /// inputs.
    pub capacity: Option<usize>,
    /// Stats provider notified after every emitted window.
    pub stats: Option<NotifyProvider<BatchStats>>,
    /// Panic relay; without one, a panic in a user callback terminates the
    /// owning operator task.
    pub panics: Option<NotifyProvider<PanicPayload>>,
}

impl BatchOptions {
    pub(crate) fn output_capacity<T>(&self, input: &Receiver<T>, window_size: usize) -> usize {
        self.capacity
            .unwrap_or_else(|| input.capacity().map_or(1, |c| (c / window_size).max(1)))
    }
}
