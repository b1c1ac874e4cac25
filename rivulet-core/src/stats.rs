// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Stats payloads reported through a notification provider.
//!
//! These are plain data carried as the provider's type parameter; the
//! operators fill them in at emission time and never read them back.

use core::time::Duration;

/// Generic per-operation stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OperationStats {
    /// Wall-clock duration of the operation.
    pub duration: Duration,
    /// Backlog of the operator's input queue when the stats were captured.
    pub queue_len: usize,
}

/// Stats reported by the window aggregator after each emitted window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchStats {
    /// Time between the window's first item and its emission.
    pub duration: Duration,
    /// Number of items in the emitted window.
    pub batch_size: usize,
    /// Backlog of the operator's input queue at emission time.
    pub queue_len: usize,
}

/// Stats reported by the delay-coalescing engine after each emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DebounceStats {
    /// Observed delay between the key's first arrival and its emission.
    /// Zero for lead emissions.
    pub delay: Duration,
    /// Number of arrivals coalesced into the emitted value.
    pub count: u64,
    /// Backlog of the operator's input queue at emission time.
    pub queue_len: usize,
}
