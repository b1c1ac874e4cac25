// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A cloneable handle reporting how many items or keys are currently
/// pending inside a delay-based operator.
///
/// For the coalescing operators [`get`](PendingCount::get) takes the
/// engine's key-table lock, so the returned count is exact at the instant
/// of the call and safe to read concurrently with arrivals and
/// expirations; for the timed-forwarding operators it reads an atomic
/// in-flight counter.
#[derive(Clone)]
pub struct PendingCount {
    len: Arc<dyn Fn() -> usize + Send + Sync>,
}

impl PendingCount {
    pub(crate) fn from_table<K, V>(table: &Arc<Mutex<HashMap<K, V>>>) -> Self
    where
        K: Send + 'static,
        V: Send + 'static,
    {
        let table = Arc::clone(table);
        Self {
            len: Arc::new(move || table.lock().len()),
        }
    }

    pub(crate) fn from_counter(counter: &Arc<AtomicUsize>) -> Self {
        let counter = Arc::clone(counter);
        Self {
            len: Arc::new(move || counter.load(Ordering::SeqCst)),
        }
    }

    /// The number of keys or items currently in the pending state.
    #[must_use]
    pub fn get(&self) -> usize {
        (self.len)()
    }
}

impl fmt::Debug for PendingCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingCount")
            .field("pending", &self.get())
            .finish()
    }
}
