// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Size- and time-bounded window aggregation.
//!
//! [`batch`] accumulates items from an input queue into windows and emits a
//! window when it reaches `window_size` items, when `max_delay` elapses
//! after the window's first item, or when the input closes with a partial
//! window buffered. [`batch_unique`] keeps at most one item per key within
//! a window, overwriting earlier arrivals in place.
//!
//! A single consumer task owns the buffer and the delay timer, so no
//! locking is involved; a window is cleared synchronously with its emission
//! and can never be flushed twice.
//!
//! ## Example
//!
//! ```
//! use rivulet_window::{batch_values, BatchOptions};
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let (tx, rx) = rivulet_core::queue::bounded(16);
//! for n in 1..=10 {
//!     tx.send(n).await.unwrap();
//! }
//! tx.close();
//!
//! let windows = batch_values(rx, 5, Duration::ZERO, BatchOptions::default()).await;
//! assert_eq!(windows, vec![vec![1, 2, 3, 4, 5], vec![6, 7, 8, 9, 10]]);
//! # }
//! ```

mod aggregator;
mod batch;
mod options;
mod unique;

pub use self::batch::{batch, batch_values};
pub use self::options::BatchOptions;
pub use self::unique::{batch_unique, unique, unique_values};
