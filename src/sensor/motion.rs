// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Simulated motion sensor.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::Sensor;
use crate::error::ProducerError;
use crate::event::Event;

/// Probability that a tick detects motion.
const DETECTION_PROBABILITY: f64 = 0.5;

/// A motion sensor that detects motion at random, one tick in two on
/// average.
///
/// Each detection publishes a `motion_detected` event carrying the sensor's
/// location. Ticks without motion publish nothing.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use sensorhub::sensor::{MotionSensor, Sensor};
///
/// let sensor = MotionSensor::new()
///     .with_location("Hallway")
///     .with_interval(Duration::from_secs(2))
///     .with_seed(7);
/// assert_eq!(sensor.location(), "Hallway");
/// assert_eq!(sensor.interval(), Duration::from_secs(2));
/// ```
#[derive(Debug, Clone)]
pub struct MotionSensor {
    location: String,
    interval: Duration,
    rng: StdRng,
}

impl MotionSensor {
    /// Default delay between two samples.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

    /// Default location reported in motion events.
    pub const DEFAULT_LOCATION: &'static str = "Living Room";

    /// Creates a sensor with the default location and interval, seeded from
    /// the operating system.
    #[must_use]
    pub fn new() -> Self {
        Self {
            location: Self::DEFAULT_LOCATION.to_string(),
            interval: Self::DEFAULT_INTERVAL,
            rng: StdRng::from_entropy(),
        }
    }

    /// Sets the location reported in motion events.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Sets the delay between two samples.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Makes the detection sequence deterministic.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Returns the location reported in motion events.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }
}

impl Default for MotionSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl Sensor for MotionSensor {
    fn name(&self) -> &str {
        "motion_sensor"
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    fn sample(&mut self) -> Result<Option<Event>, ProducerError> {
        if !self.rng.gen_bool(DETECTION_PROBABILITY) {
            return Ok(None);
        }

        tracing::info!(location = %self.location, "Motion detected");
        Ok(Some(Event::motion(self.location.clone())))
    }
}
