// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test helpers shared across the rivulet workspace.

use async_channel::{Receiver, Sender};
use core::fmt::Debug;
use core::time::Duration;

pub mod test_data;

/// Returns a closed queue preloaded with `values`, in order.
#[must_use]
pub fn feed<T: Send + 'static>(values: Vec<T>) -> Receiver<T> {
    let (tx, rx) = async_channel::bounded(values.len().max(1));
    for value in values {
        tx.try_send(value).expect("preloaded queue has room");
    }
    tx.close();
    rx
}

/// Sends every value, awaiting backpressure, then leaves the queue open.
pub async fn send_all<T>(tx: &Sender<T>, values: impl IntoIterator<Item = T>) {
    for value in values {
        tx.send(value).await.expect("queue accepts test values");
    }
}

/// Drains the queue until it closes and returns everything received.
pub async fn collect<T>(rx: Receiver<T>) -> Vec<T> {
    let mut items = Vec::new();
    while let Ok(item) = rx.recv().await {
        items.push(item);
    }
    items
}

/// Asserts that no item is emitted within `timeout_ms`. A queue that
/// closes without emitting passes; an emitted item panics.
pub async fn assert_no_item<T: Debug>(rx: &Receiver<T>, timeout_ms: u64) {
    tokio::select! {
        next = rx.recv() => {
            if let Ok(item) = next {
                panic!("unexpected item emitted: {item:?}");
            }
        }
        () = tokio::time::sleep(Duration::from_millis(timeout_ms)) => {}
    }
}
