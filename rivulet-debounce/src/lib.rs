// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Keyed delay-coalescing operators.
//!
//! [`debounce`] reads values from an input queue and surfaces each key at
//! most once per delay window: the first arrival for a key starts an
//! independent delay task, later arrivals for the same key are folded into
//! the pending value, and the key surfaces when the delay elapses. The
//! delay is anchored to the first arrival and never restarted.
//!
//! [`throttle`] is the same machine fixed to lead emission: the first
//! arrival surfaces immediately and the rest of the window is suppressed.
//! [`debounce_custom`] and [`throttle_custom`] give per-item control over
//! keys, delays and reduction via the [`DebounceItem`] trait.
//!
//! [`delay`] and [`delay_custom`] are the non-coalescing cousins: no
//! keying, no reduction, every item is held for its duration and then
//! forwarded exactly once.
//!
//! Every operator returns the output queue together with a
//! [`PendingCount`] handle reporting how many keys are currently pending.
//!
//! When the input closes, every outstanding delay task is woken through a
//! shared cancellation token and performs its emission as a forced flush;
//! the output closes only after all of them finish, so no value is lost.
//!
//! ## Example
//!
//! ```
//! use rivulet_debounce::{debounce, DebounceOptions};
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread", start_paused = true)]
//! # async fn main() {
//! let (tx, rx) = rivulet_core::queue::bounded(8);
//! let (out, pending) = debounce(rx, Duration::from_millis(5), DebounceOptions::default());
//!
//! tx.send("a").await.unwrap();
//! tx.send("a").await.unwrap();
//! tx.send("b").await.unwrap();
//! tx.close();
//!
//! let mut seen = vec![out.recv().await.unwrap(), out.recv().await.unwrap()];
//! seen.sort_unstable();
//! assert_eq!(seen, vec!["a", "b"]);
//! assert_eq!(pending.get(), 0);
//! # }
//! ```

mod delay;
mod engine;
mod options;
mod pending;
mod plain;

pub use self::delay::{delay, delay_custom, Delayable};
pub use self::engine::{debounce_custom, throttle_custom, DebounceItem};
pub use self::options::{DebounceOptions, DelayOptions, EmitMode};
pub use self::pending::PendingCount;
pub use self::plain::{debounce, debounce_values, throttle};
