// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Close-safe notification providers.
//!
//! A [`NotifyProvider`] is a one-to-many publish primitive used by every
//! rivulet operator to report stats or relay recovered panics. Providing a
//! value to a closed provider is a no-op, closing is idempotent, and
//! closing concurrently with an in-flight `provide` never panics.
//!
//! Three delivery policies are available at construction:
//!
//! - **blocking** — `provide` waits until the sink accepts the value or the
//!   provider is closed underneath it;
//! - **coalescing** — values submitted while the reader is busy are
//!   buffered and delivered as one ordered batch the next time the reader
//!   is ready;
//! - **dropping** — a full sink silently discards the value; `provide`
//!   still reports success.
//!
//! ## Example
//!
//! ```
//! use rivulet_providers::NotifyProvider;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let (provider, receiver) = NotifyProvider::blocking(4);
//!
//! assert!(provider.provide(1).await);
//! assert_eq!(receiver.recv().await.ok(), Some(1));
//!
//! provider.close();
//! assert!(!provider.provide(2).await);
//! # }
//! ```

mod provider;
mod relay;

pub use self::provider::NotifyProvider;
pub use self::relay::{guard, relay_panics, spawn_guarded};
