// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::hash::Hash;

/// An item that exposes a comparable key.
///
/// Keyed operators (unique-batch windows, the delay-coalescing engine)
/// group items by the value returned from [`key`](Keyed::key). The key is
/// extracted on every arrival, so implementations should keep it cheap —
/// typically a clone of a small field.
pub trait Keyed {
    /// The grouping key.
    type Key: Eq + Hash + Clone + Send + 'static;

    fn key(&self) -> Self::Key;
}
