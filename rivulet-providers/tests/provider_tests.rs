// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::time::Duration;
use rivulet_providers::NotifyProvider;
use rivulet_test_utils::collect;

#[tokio::test]
async fn test_blocking_provider_delivers_in_order() -> anyhow::Result<()> {
    // Arrange
    let (provider, rx) = NotifyProvider::blocking(4);

    // Act
    assert!(provider.provide(1).await);
    assert!(provider.provide(2).await);
    assert!(provider.provide(3).await);
    provider.close();

    // Assert
    assert_eq!(collect(rx).await, vec![1, 2, 3]);
    Ok(())
}

#[tokio::test]
async fn test_blocking_provider_refuses_after_close() -> anyhow::Result<()> {
    // Arrange
    let (provider, rx) = NotifyProvider::blocking(4);
    assert!(provider.provide(1).await);

    // Act
    provider.close();

    // Assert
    assert!(!provider.provide(2).await);
    assert!(provider.is_closed());
    assert_eq!(collect(rx).await, vec![1]);
    Ok(())
}

#[tokio::test]
async fn test_blocked_provide_unblocks_on_concurrent_close() -> anyhow::Result<()> {
    // Arrange: capacity one, already full, so the next provide must wait.
    let (provider, rx) = NotifyProvider::blocking(1);
    assert!(provider.provide(1).await);

    let blocked = {
        let provider = provider.clone();
        tokio::spawn(async move { provider.provide(2).await })
    };

    // Act
    provider.close();

    // Assert: the waiter observes closure instead of hanging.
    assert!(!blocked.await?);
    assert_eq!(collect(rx).await, vec![1]);
    Ok(())
}

#[tokio::test]
async fn test_dropping_provider_discards_when_full() -> anyhow::Result<()> {
    // Arrange
    let (provider, rx) = NotifyProvider::dropping(1);

    // Act: the second value finds the sink full and is discarded, yet the
    // call still reports success.
    assert!(provider.provide(1).await);
    assert!(provider.provide(2).await);
    provider.close();

    // Assert
    assert_eq!(collect(rx).await, vec![1]);
    Ok(())
}

#[tokio::test]
async fn test_dropping_provider_refuses_after_close() -> anyhow::Result<()> {
    // Arrange
    let (provider, _rx) = NotifyProvider::<i32>::dropping(1);

    // Act
    provider.close();

    // Assert
    assert!(!provider.provide(1).await);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_coalescing_provider_batches_while_reader_busy() -> anyhow::Result<()> {
    // Arrange: occupy the sink so further values pile up behind it.
    let (provider, rx) = NotifyProvider::coalescing(1);
    assert!(provider.provide("x").await);
    tokio::time::sleep(Duration::from_millis(1)).await;

    // Act
    assert!(provider.provide("a").await);
    assert!(provider.provide("b").await);
    assert!(provider.provide("c").await);
    tokio::time::sleep(Duration::from_millis(1)).await;

    // Assert: everything submitted while the reader was busy arrives as a
    // single batch, in submission order.
    assert_eq!(rx.recv().await?, vec!["x"]);
    assert_eq!(rx.recv().await?, vec!["a", "b", "c"]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_coalescing_provider_close_discards_residual() -> anyhow::Result<()> {
    // Arrange
    let (provider, rx) = NotifyProvider::coalescing(1);
    assert!(provider.provide("x").await);
    tokio::time::sleep(Duration::from_millis(1)).await;
    assert!(provider.provide("residual").await);
    tokio::time::sleep(Duration::from_millis(1)).await;

    // Act
    provider.close();

    // Assert: the already-delivered batch survives, the buffered one does not.
    assert_eq!(collect(rx).await, vec![vec!["x"]]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_coalescing_provider_flushes_residual_when_dropped() -> anyhow::Result<()> {
    // Arrange
    let (provider, rx) = NotifyProvider::coalescing(1);
    assert!(provider.provide("x").await);
    tokio::time::sleep(Duration::from_millis(1)).await;
    assert!(provider.provide("a").await);
    assert!(provider.provide("b").await);
    tokio::time::sleep(Duration::from_millis(1)).await;

    // Act: dropping every handle, unlike close, flushes what was buffered.
    drop(provider);

    // Assert
    assert_eq!(collect(rx).await, vec![vec!["x"], vec!["a", "b"]]);
    Ok(())
}

#[tokio::test]
async fn test_is_closed_reflects_dropped_receiver() -> anyhow::Result<()> {
    // Arrange
    let (provider, rx) = NotifyProvider::blocking(1);
    assert!(!provider.is_closed());

    // Act
    drop(rx);

    // Assert
    assert!(provider.is_closed());
    assert!(!provider.provide(1).await);
    Ok(())
}

#[tokio::test]
async fn test_dropping_provider_observes_dropped_receiver() -> anyhow::Result<()> {
    // Arrange
    let (provider, rx) = NotifyProvider::dropping(1);
    assert!(provider.provide(1).await);

    // Act
    drop(rx);

    // Assert: a gone receiver is closure, not a silent discard.
    assert!(!provider.provide(2).await);
    assert!(provider.is_closed());
    Ok(())
}

#[tokio::test]
async fn test_close_is_idempotent() -> anyhow::Result<()> {
    // Arrange
    let (provider, _rx) = NotifyProvider::<i32>::blocking(1);

    // Act
    provider.close();
    provider.close();

    // Assert
    assert!(provider.is_closed());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_concurrent_provide_and_close_never_deadlocks() -> anyhow::Result<()> {
    // Arrange
    let (provider, rx) = NotifyProvider::blocking(1);

    let writer = {
        let provider = provider.clone();
        tokio::spawn(async move {
            let mut n = 0_u64;
            while provider.provide(n).await {
                n += 1;
            }
            n
        })
    };
    let reader = tokio::spawn(async move { collect(rx).await });

    // Act
    tokio::time::sleep(Duration::from_millis(10)).await;
    provider.close();

    // Assert: both sides terminate, and everything delivered is a prefix of
    // what the writer submitted.
    let submitted = writer.await?;
    let delivered = reader.await?;
    assert!(delivered.len() as u64 <= submitted + 1);
    for (i, value) in delivered.iter().enumerate() {
        assert_eq!(*value, i as u64);
    }
    Ok(())
}
