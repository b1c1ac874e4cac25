// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::time::Duration;
use rivulet_core::Keyed;
use rivulet_debounce::{throttle, throttle_custom, DebounceItem, DebounceOptions};
use rivulet_test_utils::{assert_no_item, collect, send_all};

#[tokio::test(start_paused = true)]
async fn test_throttle_emits_lead_immediately() -> anyhow::Result<()> {
    // Arrange
    let (tx, rx) = async_channel::bounded(8);
    let (out, _pending) = throttle(rx, Duration::from_millis(500), DebounceOptions::default());
    let started = tokio::time::Instant::now();

    // Act
    send_all(&tx, vec!["a"]).await;

    // Assert: no waiting for the window to end.
    assert_eq!(out.recv().await?, "a");
    assert!(started.elapsed() < Duration::from_millis(500));

    tx.close();
    assert!(out.recv().await.is_err());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_throttle_suppresses_repeats_within_window() -> anyhow::Result<()> {
    // Arrange
    let (tx, rx) = async_channel::bounded(8);
    let (out, _pending) = throttle(rx, Duration::from_millis(500), DebounceOptions::default());

    // Act
    send_all(&tx, vec!["a"]).await;
    assert_eq!(out.recv().await?, "a");
    send_all(&tx, vec!["a", "a"]).await;

    // Assert: repeats inside the window never surface, not even as a tail.
    assert_no_item(&out, 100).await;
    tx.close();
    assert!(collect(out).await.is_empty());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_throttle_reopens_after_window_expires() -> anyhow::Result<()> {
    // Arrange
    let (tx, rx) = async_channel::bounded(8);
    let (out, pending) = throttle(rx, Duration::from_millis(500), DebounceOptions::default());

    // Act
    send_all(&tx, vec!["a"]).await;
    assert_eq!(out.recv().await?, "a");
    assert_eq!(pending.get(), 1);

    tokio::time::sleep(Duration::from_millis(600)).await;

    // Assert: the window expired, so the same value passes again.
    assert_eq!(pending.get(), 0);
    send_all(&tx, vec!["a"]).await;
    assert_eq!(out.recv().await?, "a");

    tx.close();
    assert!(out.recv().await.is_err());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_throttle_custom_uses_per_item_delay() -> anyhow::Result<()> {
    // Arrange
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Alarm {
        zone: &'static str,
        quiet: Duration,
    }

    impl Keyed for Alarm {
        type Key = &'static str;

        fn key(&self) -> &'static str {
            self.zone
        }
    }

    impl DebounceItem for Alarm {
        fn delay(&self) -> Duration {
            self.quiet
        }

        fn reduce(self, _incoming: Self) -> (Self, bool) {
            (self, false)
        }
    }

    let short = Alarm {
        zone: "hall",
        quiet: Duration::from_millis(50),
    };
    let long = Alarm {
        zone: "vault",
        quiet: Duration::from_secs(5),
    };

    let (tx, rx) = async_channel::bounded(8);
    let (out, pending) = throttle_custom(
        rx,
        DebounceOptions {
            capacity: Some(4),
            ..DebounceOptions::default()
        },
    );

    // Act
    send_all(&tx, vec![short.clone(), long.clone()]).await;
    assert_eq!(out.recv().await?, short);
    assert_eq!(out.recv().await?, long);
    assert_eq!(pending.get(), 2);

    tokio::time::sleep(Duration::from_millis(100)).await;

    // Assert: the short window reopened, the long one is still closed.
    assert_eq!(pending.get(), 1);

    tx.close();
    assert!(out.recv().await.is_err());
    Ok(())
}
