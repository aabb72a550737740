// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wiring and driving of the simulation.
//!
//! A [`Simulation`] owns one hub and a set of sensors. [`Simulation::run`]
//! spawns one producer task per sensor and joins them all.
//!
//! # Cancellation
//!
//! Each producer gets a child of the token passed to `run`; cancelling that
//! token stops every producer at its next sleep. Publishes already in flight
//! finish first. Dropping the `run` future instead aborts the producer
//! tasks outright.
//!
//! # Failures
//!
//! A failing producer ends on its own; its siblings keep running. Every exit
//! is reported in the returned [`RunReport`].

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::config::SimulationConfig;
use crate::device::{DoorLock, LightController, Notifier, TracingNotifier};
use crate::error::{Error, ProducerError, Result, panic_message};
use crate::event::EventHub;
use crate::sensor::{MotionSensor, Sensor, TemperatureSensor, run_producer};

/// The devices attached by [`Simulation::from_config`].
#[derive(Debug, Clone)]
pub struct Home {
    /// Door lock alerting on motion.
    pub door_lock: Arc<DoorLock>,
    /// Lights switching on at the first motion.
    pub lights: Arc<LightController>,
}

impl Home {
    /// Attaches the home devices to `hub`, notifying through `notifier`.
    ///
    /// The light controller subscribes first, so it is notified of each
    /// motion before the door lock.
    pub fn attach(hub: &EventHub, notifier: &Arc<dyn Notifier>) -> Self {
        let lights = LightController::attach_with_notifier(hub, Arc::clone(notifier));
        let door_lock = DoorLock::attach_with_notifier(hub, Arc::clone(notifier));
        Self { door_lock, lights }
    }
}

/// How one producer loop ended.
#[derive(Debug)]
pub struct ProducerExit {
    /// Name of the sensor.
    pub name: String,
    /// `Ok` if the loop stopped because it was cancelled.
    pub result: Result<()>,
}

/// Outcome of [`Simulation::run`].
#[derive(Debug, Default)]
pub struct RunReport {
    /// One entry per producer, in the order they ended.
    pub exits: Vec<ProducerExit>,
}

impl RunReport {
    /// Returns the producers that ended with an error.
    pub fn failures(&self) -> impl Iterator<Item = &ProducerExit> {
        self.exits.iter().filter(|exit| exit.result.is_err())
    }

    /// Returns `true` if every producer stopped cleanly.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// A hub and the sensors publishing on it.
///
/// # Examples
///
/// ```no_run
/// use sensorhub::config::SimulationConfig;
/// use sensorhub::runner::Simulation;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example() -> sensorhub::Result<()> {
/// let (simulation, home) = Simulation::from_config(&SimulationConfig::default())?;
///
/// let token = CancellationToken::new();
/// let stop = token.clone();
/// tokio::spawn(async move {
///     tokio::time::sleep(std::time::Duration::from_secs(30)).await;
///     stop.cancel();
/// });
///
/// let report = simulation.run(token).await;
/// assert!(report.is_clean());
/// println!("lights on: {}", home.lights.lights_on());
/// # Ok(())
/// # }
/// ```
pub struct Simulation {
    hub: EventHub,
    sensors: Vec<Box<dyn Sensor>>,
}

impl Simulation {
    /// Creates a simulation without sensors around `hub`.
    #[must_use]
    pub fn new(hub: EventHub) -> Self {
        Self {
            hub,
            sensors: Vec::new(),
        }
    }

    /// Builds the home simulation: a motion sensor and a temperature sensor
    /// publishing on a fresh hub, with a door lock and a light controller
    /// subscribed to it. Notifications go to the `tracing` log.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration is invalid.
    pub fn from_config(config: &SimulationConfig) -> Result<(Self, Home)> {
        Self::from_config_with_notifier(config, Arc::new(TracingNotifier))
    }

    /// Same as [`from_config`](Self::from_config), sending device
    /// notifications to `notifier`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration is invalid.
    pub fn from_config_with_notifier(
        config: &SimulationConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Result<(Self, Home)> {
        config.validate()?;

        let hub = EventHub::with_policy(config.failure_policy);
        let home = Home::attach(&hub, &notifier);

        let mut motion = MotionSensor::new()
            .with_location(config.motion_location.clone())
            .with_interval(config.motion_interval());
        let mut temperature = TemperatureSensor::new()
            .with_range(config.temperature_min, config.temperature_max)?
            .with_interval(config.temperature_interval());
        if let Some(seed) = config.seed {
            motion = motion.with_seed(seed);
            temperature = temperature.with_seed(seed.wrapping_add(1));
        }

        let simulation = Self::new(hub).with_sensor(motion).with_sensor(temperature);
        Ok((simulation, home))
    }

    /// Adds a sensor.
    #[must_use]
    pub fn with_sensor(mut self, sensor: impl Sensor) -> Self {
        self.add_sensor(sensor);
        self
    }

    /// Adds a sensor.
    pub fn add_sensor(&mut self, sensor: impl Sensor) {
        self.sensors.push(Box::new(sensor));
    }

    /// Returns the hub the sensors publish on.
    #[must_use]
    pub fn hub(&self) -> &EventHub {
        &self.hub
    }

    /// Returns the number of sensors.
    #[must_use]
    pub fn sensor_count(&self) -> usize {
        self.sensors.len()
    }

    /// Runs every sensor in its own task until all of them have ended.
    ///
    /// Producers end when `token` is cancelled or when they fail.
    pub async fn run(self, token: CancellationToken) -> RunReport {
        let mut tasks = JoinSet::new();

        for sensor in self.sensors {
            let name = sensor.name().to_string();
            let hub = self.hub.clone();
            let child = token.child_token();

            tasks.spawn(async move {
                let result = match AssertUnwindSafe(run_producer(sensor, hub, child))
                    .catch_unwind()
                    .await
                {
                    Ok(result) => result,
                    Err(panic) => Err(Error::Producer(ProducerError::Aborted {
                        sensor: name.clone(),
                        message: panic_message(&*panic),
                    })),
                };
                ProducerExit { name, result }
            });
        }

        tracing::info!(producers = tasks.len(), "Simulation started");

        let mut report = RunReport::default();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(exit) => {
                    match &exit.result {
                        Ok(()) => tracing::info!(producer = %exit.name, "Producer stopped"),
                        Err(e) => {
                            tracing::error!(producer = %exit.name, error = %e, "Producer failed");
                        }
                    }
                    report.exits.push(exit);
                }
                Err(e) => tracing::error!(error = %e, "Producer task aborted"),
            }
        }

        tracing::info!(failed = report.failures().count(), "Simulation stopped");
        report
    }
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("hub", &self.hub)
            .field("sensor_count", &self.sensors.len())
            .finish()
    }
}
