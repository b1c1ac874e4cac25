// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The operators composed end to end, the way a consumer wires them.

use core::time::Duration;
use rivulet::prelude::*;
use rivulet_test_utils::{collect, feed};

#[tokio::test]
async fn test_merge_then_batch_partitions_the_union() -> anyhow::Result<()> {
    // Arrange
    let sources = vec![
        feed(vec![1_u32, 2, 3, 4]),
        feed(vec![5, 6, 7, 8]),
        feed(vec![9, 10, 11, 12]),
    ];

    // Act
    let merged = merge(sources);
    let windows = batch_values(merged, 4, Duration::ZERO, BatchOptions::default()).await;

    // Assert: three full windows carrying the union exactly once.
    assert_eq!(windows.len(), 3);
    assert!(windows.iter().all(|w| w.len() == 4));
    let mut all: Vec<u32> = windows.into_iter().flatten().collect();
    all.sort_unstable();
    assert_eq!(all, (1..=12).collect::<Vec<u32>>());
    Ok(())
}

#[tokio::test]
async fn test_merge_then_unique_collapses_cross_source_duplicates() -> anyhow::Result<()> {
    // Arrange
    let sources = vec![feed(vec![1, 1, 2]), feed(vec![2, 3, 3])];

    // Act
    let merged = merge(sources);
    let windows = unique_values(merged, 10, Duration::ZERO, BatchOptions::default()).await;

    // Assert
    assert_eq!(windows.len(), 1);
    let mut window = windows.into_iter().next().unwrap_or_default();
    window.sort_unstable();
    assert_eq!(window, vec![1, 2, 3]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_debounce_then_batch_settles_noisy_input() -> anyhow::Result<()> {
    // Arrange: a burst of repeated signals reduced to one event per value,
    // then batched for the downstream consumer.
    let input = feed(vec!["build", "build", "deploy", "build", "deploy"]);

    // Act
    let (settled, _pending) = debounce(
        input,
        Duration::from_millis(50),
        DebounceOptions {
            capacity: Some(4),
            ..DebounceOptions::default()
        },
    );
    let out = rivulet::batch(settled, 10, Duration::ZERO, BatchOptions::default());
    let mut windows = collect(out).await;

    // Assert
    assert_eq!(windows.len(), 1);
    let mut window = windows.remove(0);
    window.sort_unstable();
    assert_eq!(window, vec!["build", "deploy"]);
    Ok(())
}
