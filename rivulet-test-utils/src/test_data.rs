// Copyright 2026 the rivulet authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Shared keyed test values for the operator test suites.

use rivulet_core::Keyed;

/// A sensor reading keyed by the sensor name: the workhorse value for
/// keyed-operator tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    pub sensor: &'static str,
    pub value: i64,
}

impl Reading {
    #[must_use]
    pub fn new(sensor: &'static str, value: i64) -> Self {
        Self { sensor, value }
    }
}

impl Keyed for Reading {
    type Key = &'static str;

    fn key(&self) -> &'static str {
        self.sensor
    }
}

pub fn temperature(value: i64) -> Reading {
    Reading::new("temperature", value)
}

pub fn humidity(value: i64) -> Reading {
    Reading::new("humidity", value)
}

pub fn pressure(value: i64) -> Reading {
    Reading::new("pressure", value)
}
