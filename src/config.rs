// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Simulation configuration.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::event::FailurePolicy;
use crate::sensor::{MotionSensor, TemperatureSensor};

/// Configuration of the home simulation.
///
/// Every field has a default, so a configuration file only needs the
/// values it changes.
///
/// # Examples
///
/// ```
/// use sensorhub::config::SimulationConfig;
/// use sensorhub::FailurePolicy;
///
/// // From JSON, overriding a few fields
/// let config = SimulationConfig::from_json_str(
///     r#"{ "motion_location": "Garage", "failure_policy": "propagate" }"#,
/// )?;
/// assert_eq!(config.motion_location, "Garage");
/// assert_eq!(config.failure_policy, FailurePolicy::Propagate);
/// assert_eq!(config.temperature_interval_secs, 10);
///
/// // Built in code
/// let config = SimulationConfig::default()
///     .with_motion_interval_secs(1)
///     .with_seed(42);
/// assert_eq!(config.seed, Some(42));
/// # Ok::<(), sensorhub::error::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Seconds between two motion samples.
    pub motion_interval_secs: u64,
    /// Seconds between two temperature samples.
    pub temperature_interval_secs: u64,
    /// Location reported by the motion sensor.
    pub motion_location: String,
    /// Lowest temperature reading, in degrees Celsius.
    pub temperature_min: i64,
    /// Highest temperature reading, in degrees Celsius.
    pub temperature_max: i64,
    /// What the hub does when a handler fails.
    pub failure_policy: FailurePolicy,
    /// Seed for the sensors' random generators; random when absent.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            motion_interval_secs: MotionSensor::DEFAULT_INTERVAL.as_secs(),
            temperature_interval_secs: TemperatureSensor::DEFAULT_INTERVAL.as_secs(),
            motion_location: MotionSensor::DEFAULT_LOCATION.to_string(),
            temperature_min: TemperatureSensor::DEFAULT_MIN,
            temperature_max: TemperatureSensor::DEFAULT_MAX,
            failure_policy: FailurePolicy::default(),
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not match the schema or a value is
    /// invalid.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its content is invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a zero interval or an empty
    /// temperature range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.motion_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "motion_interval_secs must be greater than zero".to_string(),
            ));
        }
        if self.temperature_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "temperature_interval_secs must be greater than zero".to_string(),
            ));
        }
        if self.temperature_min > self.temperature_max {
            return Err(ConfigError::Invalid(format!(
                "temperature_min ({}) is greater than temperature_max ({})",
                self.temperature_min, self.temperature_max
            )));
        }
        Ok(())
    }

    /// Returns the motion sampling interval.
    #[must_use]
    pub fn motion_interval(&self) -> Duration {
        Duration::from_secs(self.motion_interval_secs)
    }

    /// Returns the temperature sampling interval.
    #[must_use]
    pub fn temperature_interval(&self) -> Duration {
        Duration::from_secs(self.temperature_interval_secs)
    }

    /// Sets the motion sampling interval, in seconds.
    #[must_use]
    pub fn with_motion_interval_secs(mut self, secs: u64) -> Self {
        self.motion_interval_secs = secs;
        self
    }

    /// Sets the temperature sampling interval, in seconds.
    #[must_use]
    pub fn with_temperature_interval_secs(mut self, secs: u64) -> Self {
        self.temperature_interval_secs = secs;
        self
    }

    /// Sets the location reported by the motion sensor.
    #[must_use]
    pub fn with_motion_location(mut self, location: impl Into<String>) -> Self {
        self.motion_location = location.into();
        self
    }

    /// Sets the temperature range.
    #[must_use]
    pub fn with_temperature_range(mut self, min: i64, max: i64) -> Self {
        self.temperature_min = min;
        self.temperature_max = max;
        self
    }

    /// Sets the hub failure policy.
    #[must_use]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Seeds the sensors' random generators.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
