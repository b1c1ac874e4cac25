// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The fail boundary placed at every operator task's outermost frame.
//!
//! When a panic-relay provider is configured, a panic raised by user
//! callback code is caught here, normalized into a [`PanicPayload`] and
//! forwarded through the provider. Without a relay the future runs bare
//! and a panic terminates only the owning task.

use core::future::Future;
use futures::future::FutureExt;
use rivulet_core::{Error, PanicPayload};
use std::panic::AssertUnwindSafe;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::NotifyProvider;

/// Runs `future`, relaying a caught panic through `relay` when configured.
///
/// # Errors
///
/// Returns [`Error::Panic`] when the future panicked and the panic was
/// caught and relayed. Without a relay the panic propagates instead.
pub async fn relay_panics<F>(
    future: F,
    relay: Option<NotifyProvider<PanicPayload>>,
) -> Result<(), Error>
where
    F: Future<Output = ()>,
{
    let Some(relay) = relay else {
        future.await;
        return Ok(());
    };

    match AssertUnwindSafe(future).catch_unwind().await {
        Ok(()) => Ok(()),
        Err(panic) => {
            let payload = PanicPayload::from_any(panic);
            relay.provide(payload.clone()).await;
            Err(Error::Panic(payload))
        }
    }
}

/// Like [`relay_panics`], but swallows the returned error after logging it.
/// Suitable for futures whose owner only observes them through a join
/// handle or a task set.
pub async fn guard<F>(future: F, relay: Option<NotifyProvider<PanicPayload>>)
where
    F: Future<Output = ()>,
{
    if let Err(error) = relay_panics(future, relay).await {
        debug!(%error, "task terminated by relayed panic");
    }
}

/// Spawns `future` behind the fail boundary.
pub fn spawn_guarded<F>(future: F, relay: Option<NotifyProvider<PanicPayload>>) -> JoinHandle<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(guard(future, relay))
}
