// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The shared consumer loop behind [`batch`](crate::batch) and
//! [`batch_unique`](crate::batch_unique). The two operators differ only in
//! how the window buffer absorbs an item, captured by [`WindowBuffer`].

use async_channel::{Receiver, Sender};
use core::time::Duration;
use rivulet_core::{BatchStats, Keyed};
use rivulet_providers::NotifyProvider;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tokio::time::Instant;
use tracing::trace;

pub(crate) trait WindowBuffer<T>: Send {
    fn insert(&mut self, item: T);
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Empties the buffer, returning the window's items in insertion order.
    fn take(&mut self) -> Vec<T>;
}

/// Plain append buffer used by `batch`.
pub(crate) struct VecWindow<T> {
    items: Vec<T>,
}

impl<T> Default for VecWindow<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Send> WindowBuffer<T> for VecWindow<T> {
    fn insert(&mut self, item: T) {
        self.items.push(item);
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn take(&mut self) -> Vec<T> {
        core::mem::take(&mut self.items)
    }
}

/// Insert-or-overwrite buffer used by `batch_unique`: one slot per key,
/// first-arrival position preserved on overwrite.
pub(crate) struct KeyedWindow<T: Keyed> {
    index: HashMap<T::Key, usize>,
    items: Vec<T>,
}

impl<T: Keyed> KeyedWindow<T> {
    pub(crate) fn new() -> Self {
        Self {
            index: HashMap::new(),
            items: Vec::new(),
        }
    }
}

impl<T: Keyed + Send> WindowBuffer<T> for KeyedWindow<T> {
    fn insert(&mut self, item: T) {
        match self.index.entry(item.key()) {
            Entry::Occupied(slot) => {
                self.items[*slot.get()] = item;
            }
            Entry::Vacant(slot) => {
                slot.insert(self.items.len());
                self.items.push(item);
            }
        }
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn take(&mut self) -> Vec<T> {
        self.index.clear();
        core::mem::take(&mut self.items)
    }
}

/// The aggregator's consumer loop: waits for the next input item or the
/// delay timer, emits-and-resets on a full window, a timer fire, or input
/// closure with a partial window.
pub(crate) async fn run_window<T, B>(
    input: Receiver<T>,
    out: Sender<Vec<T>>,
    window_size: usize,
    max_delay: Duration,
    mut window: B,
    stats: Option<NotifyProvider<BatchStats>>,
) where
    T: Send + 'static,
    B: WindowBuffer<T>,
{
    let timer = tokio::time::sleep(Duration::ZERO);
    tokio::pin!(timer);
    let mut timer_armed = false;
    let mut window_started = Instant::now();

    loop {
        tokio::select! {
            next = input.recv() => match next {
                Ok(item) => {
                    if window.is_empty() {
                        window_started = Instant::now();
                        if !max_delay.is_zero() {
                            timer.as_mut().reset(Instant::now() + max_delay);
                            timer_armed = true;
                        }
                    }

                    window.insert(item);

                    if window.len() >= window_size {
                        timer_armed = false;
                        if !emit(&mut window, &out, &stats, window_started, input.len()).await {
                            break;
                        }
                    }
                }
                Err(_) => {
                    // Input closed and drained: flush the partial window.
                    let _ = emit(&mut window, &out, &stats, window_started, input.len()).await;
                    break;
                }
            },
            () = &mut timer, if timer_armed => {
                timer_armed = false;
                if !emit(&mut window, &out, &stats, window_started, input.len()).await {
                    break;
                }
            }
        }
    }

    out.close();
}

/// Publishes the buffered window, clears the buffer and reports stats.
/// Empty windows are never emitted. Returns `false` once the output has no
/// remaining consumers.
async fn emit<T, B>(
    window: &mut B,
    out: &Sender<Vec<T>>,
    stats: &Option<NotifyProvider<BatchStats>>,
    window_started: Instant,
    backlog: usize,
) -> bool
where
    T: Send + 'static,
    B: WindowBuffer<T>,
{
    if window.is_empty() {
        return true;
    }

    let items = window.take();
    let batch_size = items.len();
    trace!(batch_size, "emitting window");

    if out.send(items).await.is_err() {
        return false;
    }

    if let Some(stats) = stats {
        stats
            .provide(BatchStats {
                duration: window_started.elapsed(),
                batch_size,
                queue_len: backlog,
            })
            .await;
    }

    true
}
