// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{DebounceStats, OperationStats, PanicPayload};
use rivulet_providers::NotifyProvider;

/// When a key's value surfaces on the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmitMode {
    /// Emit the reduced value when the key's delay elapses.
    #[default]
    Tail,
    /// Emit the first arrival immediately; suppress the rest of the window.
    Lead,
    /// Both: the first arrival immediately, the reduced value at expiry.
    LeadAndTail,
}

impl EmitMode {
    #[must_use]
    pub const fn emits_lead(self) -> bool {
        matches!(self, Self::Lead | Self::LeadAndTail)
    }

    #[must_use]
    pub const fn emits_tail(self) -> bool {
        matches!(self, Self::Tail | Self::LeadAndTail)
    }
}

/// Configuration for the delay-coalescing operators.
#[derive(Debug, Clone, Default)]
pub struct DebounceOptions {
    /// Output queue capacity; defaults to one.
    pub capacity: Option<usize>,
    /// Emission mode; defaults to [`EmitMode::Tail`].
    pub mode: EmitMode,
    /// Stats provider notified after every emission.
    pub stats: Option<NotifyProvider<DebounceStats>>,
    /// Panic relay; without one, a panic in a user callback terminates the
    /// owning operator task.
    pub panics: Option<NotifyProvider<PanicPayload>>,
}

/// Configuration for the timed-forwarding operators.
#[derive(Debug, Clone, Default)]
pub struct DelayOptions {
    /// Output queue capacity; defaults to one.
    pub capacity: Option<usize>,
    /// Stats provider notified after every forwarded item.
    pub stats: Option<NotifyProvider<OperationStats>>,
    /// Panic relay; without one, a panic in a user callback terminates the
    /// owning operator task.
    pub panics: Option<NotifyProvider<PanicPayload>>,
}
