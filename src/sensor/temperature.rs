// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Simulated temperature sensor.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::Sensor;
use crate::error::{ConfigError, ProducerError};
use crate::event::Event;

/// A temperature sensor reporting a uniformly random whole-degree reading
/// every tick.
///
/// # Examples
///
/// ```
/// use sensorhub::sensor::{Sensor, TemperatureSensor};
///
/// let mut sensor = TemperatureSensor::new().with_range(20, 22)?.with_seed(3);
/// let event = sensor.sample().unwrap().expect("temperature is always reported");
/// let value = event.payload().get("value").and_then(|v| v.as_i64()).unwrap();
/// assert!((20..=22).contains(&value));
/// # Ok::<(), sensorhub::error::ConfigError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TemperatureSensor {
    min: i64,
    max: i64,
    interval: Duration,
    rng: StdRng,
}

impl TemperatureSensor {
    /// Default delay between two samples.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);

    /// Default lowest reading, in degrees Celsius.
    pub const DEFAULT_MIN: i64 = 18;

    /// Default highest reading, in degrees Celsius.
    pub const DEFAULT_MAX: i64 = 30;

    /// Creates a sensor reading 18-30 °C every 10 seconds, seeded from the
    /// operating system.
    #[must_use]
    pub fn new() -> Self {
        Self {
            min: Self::DEFAULT_MIN,
            max: Self::DEFAULT_MAX,
            interval: Self::DEFAULT_INTERVAL,
            rng: StdRng::from_entropy(),
        }
    }

    /// Sets the inclusive range of readings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `min > max`.
    pub fn with_range(mut self, min: i64, max: i64) -> Result<Self, ConfigError> {
        if min > max {
            return Err(ConfigError::Invalid(format!(
                "temperature range is empty: min {min} > max {max}"
            )));
        }
        self.min = min;
        self.max = max;
        Ok(self)
    }

    /// Sets the delay between two samples.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Makes the reading sequence deterministic.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Returns the inclusive range of readings.
    #[must_use]
    pub fn range(&self) -> (i64, i64) {
        (self.min, self.max)
    }
}

impl Default for TemperatureSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl Sensor for TemperatureSensor {
    fn name(&self) -> &str {
        "temperature_sensor"
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    fn sample(&mut self) -> Result<Option<Event>, ProducerError> {
        let value = self.rng.gen_range(self.min..=self.max);
        tracing::info!("Temperature: {value}°C");
        Ok(Some(Event::temperature(value)))
    }
}
