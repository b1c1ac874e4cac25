// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # rivulet
//!
//! Composable, backpressure-respecting stream operators over closable
//! async queues.
//!
//! Operators consume one or more input queues and produce output queues,
//! windowing, deduplicating, delaying or fanning-in values while honoring
//! the queue's contract: bounded writes block, closure is explicit and
//! one-time, and a closed, drained queue reads as end-of-stream forever.
//!
//! - [`batch`] / [`batch_unique`] — size- and time-bounded windows
//! - [`debounce`] / [`throttle`] — keyed delay-coalescing
//! - [`delay`] — per-item timed forwarding
//! - [`merge`] — fan-in of many queues through a bounded-arity merge tree
//! - [`NotifyProvider`] — close-safe stats and panic relay
//!
//! ## Quick start
//!
//! ```
//! use rivulet::prelude::*;
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let (tx, rx) = rivulet::queue::bounded(16);
//! for n in 1..=10 {
//!     tx.send(n).await.unwrap();
//! }
//! tx.close();
//!
//! let windows = batch_values(rx, 5, Duration::ZERO, BatchOptions::default()).await;
//! assert_eq!(windows, vec![vec![1, 2, 3, 4, 5], vec![6, 7, 8, 9, 10]]);
//! # }
//! ```

pub use rivulet_core::queue;
pub use rivulet_core::{BatchStats, DebounceStats, Error, Keyed, OperationStats, PanicPayload};
pub use rivulet_debounce::{
    debounce, debounce_custom, debounce_values, delay, delay_custom, throttle, throttle_custom,
    DebounceItem, DebounceOptions, Delayable, DelayOptions, EmitMode, PendingCount,
};
pub use rivulet_merge::merge;
pub use rivulet_providers::NotifyProvider;
pub use rivulet_window::{batch, batch_unique, batch_values, unique, unique_values, BatchOptions};

/// Convenient imports for the common operator surface.
pub mod prelude {
    pub use rivulet_core::Keyed;
    pub use rivulet_debounce::{
        debounce, debounce_custom, debounce_values, delay, delay_custom, throttle,
        throttle_custom, DebounceItem, DebounceOptions, Delayable, DelayOptions, EmitMode,
    };
    pub use rivulet_merge::merge;
    pub use rivulet_providers::NotifyProvider;
    pub use rivulet_window::{
        batch, batch_unique, batch_values, unique, unique_values, BatchOptions,
    };
}
