// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Fan-in merge tree.
//!
//! [`merge`] combines any number of upstream queues into a single
//! downstream queue. Rather than having one task race on all N upstreams,
//! the inputs are grouped into small fixed-arity merge nodes — quaternary
//! nodes first, binary nodes for the remainder, a plain forwarder for a
//! final stray input — each running as an independent task. This keeps the
//! per-node wait-set bounded while the task depth stays O(log₄ N).
//!
//! Ordering within a single source is preserved; ordering across sources
//! is unspecified. The merged output closes once every source has closed
//! and drained.

use async_channel::{Receiver, Sender};
use core::future::pending;
use rivulet_core::queue;
use tokio::task::JoinHandle;
use tracing::debug;

/// Merges `inputs` into a single output queue.
///
/// Degenerate cases: zero inputs yields an already-closed empty receiver
/// (the "no stream" sentinel); a single input is returned unchanged, with
/// no intermediate task or buffering.
#[must_use]
pub fn merge<T: Send + 'static>(mut inputs: Vec<Receiver<T>>) -> Receiver<T> {
    if inputs.is_empty() {
        return queue::closed();
    }
    if inputs.len() == 1 {
        return inputs.remove(0);
    }

    let (out_tx, out_rx) = async_channel::bounded(1);
    let mut nodes: Vec<JoinHandle<()>> = Vec::new();

    while inputs.len() >= 4 {
        // The loop guards make every pop infallible.
        let (Some(a), Some(b), Some(c), Some(d)) =
            (inputs.pop(), inputs.pop(), inputs.pop(), inputs.pop())
        else {
            break;
        };
        nodes.push(tokio::spawn(merge4(out_tx.clone(), a, b, c, d)));
    }
    while inputs.len() >= 2 {
        let (Some(a), Some(b)) = (inputs.pop(), inputs.pop()) else {
            break;
        };
        nodes.push(tokio::spawn(merge2(out_tx.clone(), a, b)));
    }
    if let Some(rest) = inputs.pop() {
        nodes.push(tokio::spawn(forward(out_tx.clone(), rest)));
    }

    debug!(nodes = nodes.len(), "built merge tree");

    // The join task closes the combined output exactly once, after every
    // node has drained its upstream set.
    tokio::spawn(async move {
        for node in nodes {
            if let Err(error) = node.await {
                debug!(%error, "merge node task failed");
            }
        }
        out_tx.close();
    });

    out_rx
}

/// Receives from a live upstream slot, or parks forever on a retired one so
/// the surrounding `select!` ignores it.
async fn slot_recv<T>(slot: Option<&Receiver<T>>) -> Result<T, async_channel::RecvError> {
    match slot {
        Some(rx) => rx.recv().await,
        None => pending().await,
    }
}

async fn merge2<T: Send + 'static>(out: Sender<T>, a: Receiver<T>, b: Receiver<T>) {
    let mut a = Some(a);
    let mut b = Some(b);

    while a.is_some() || b.is_some() {
        tokio::select! {
            next = slot_recv(a.as_ref()) => match next {
                Ok(value) => {
                    if out.send(value).await.is_err() {
                        return;
                    }
                }
                Err(_) => a = None,
            },
            next = slot_recv(b.as_ref()) => match next {
                Ok(value) => {
                    if out.send(value).await.is_err() {
                        return;
                    }
                }
                Err(_) => b = None,
            },
        }
    }
}

async fn merge4<T: Send + 'static>(
    out: Sender<T>,
    a: Receiver<T>,
    b: Receiver<T>,
    c: Receiver<T>,
    d: Receiver<T>,
) {
    let mut a = Some(a);
    let mut b = Some(b);
    let mut c = Some(c);
    let mut d = Some(d);

    while a.is_some() || b.is_some() || c.is_some() || d.is_some() {
        tokio::select! {
            next = slot_recv(a.as_ref()) => match next {
                Ok(value) => {
                    if out.send(value).await.is_err() {
                        return;
                    }
                }
                Err(_) => a = None,
            },
            next = slot_recv(b.as_ref()) => match next {
                Ok(value) => {
                    if out.send(value).await.is_err() {
                        return;
                    }
                }
                Err(_) => b = None,
            },
            next = slot_recv(c.as_ref()) => match next {
                Ok(value) => {
                    if out.send(value).await.is_err() {
                        return;
                    }
                }
                Err(_) => c = None,
            },
            next = slot_recv(d.as_ref()) => match next {
                Ok(value) => {
                    if out.send(value).await.is_err() {
                        return;
                    }
                }
                Err(_) => d = None,
            },
        }
    }
}

async fn forward<T: Send + 'static>(out: Sender<T>, input: Receiver<T>) {
    while let Ok(value) = input.recv().await {
        if out.send(value).await.is_err() {
            return;
        }
    }
}
