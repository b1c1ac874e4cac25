// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core building blocks shared by every rivulet operator crate.
//!
//! This crate defines the closable queue abstraction the operators are built
//! over, the stats payloads they report, the [`Keyed`] trait used by keyed
//! operators, and the error types of the toolkit. It contains no operator
//! logic of its own.

pub mod error;
pub mod keyed;
pub mod queue;
pub mod stats;

pub use self::error::{Error, PanicPayload, Result};
pub use self::keyed::Keyed;
pub use self::stats::{BatchStats, DebounceStats, OperationStats};
