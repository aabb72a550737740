// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `sensorhub` - an in-process publish/subscribe hub driving a simulated
//! smart home.
//!
//! Sensors publish events on a central [`EventHub`]; devices subscribe to the
//! topics they care about and react when an event is delivered.
//!
//! # Delivery Guarantees
//!
//! - **Ordered**: handlers of a topic run in subscription order
//! - **Sequential**: each handler completes before the next starts, and
//!   `emit` returns after the last one
//! - **Unknown topics**: emitting with no subscribers is a no-op
//! - **Failures**: isolated per handler by default, or propagated to the
//!   emitter with [`FailurePolicy::Propagate`]
//!
//! # Quick Start
//!
//! ## Subscribing and Emitting
//!
//! ```
//! use sensorhub::{EventHub, Payload, Topic};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> sensorhub::Result<()> {
//! let hub = EventHub::new();
//!
//! hub.subscribe_fn(Topic::TEMPERATURE_UPDATE, "thermostat", |event| async move {
//!     println!("Temperature: {:?}", event.payload().get("value"));
//!     Ok(())
//! });
//!
//! hub.emit(Topic::TEMPERATURE_UPDATE, Payload::new().with("value", 21))
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Running the Home Simulation
//!
//! ```no_run
//! use sensorhub::config::SimulationConfig;
//! use sensorhub::runner::Simulation;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> sensorhub::Result<()> {
//!     // Motion and temperature sensors, a door lock and a light controller
//!     let (simulation, _home) = Simulation::from_config(&SimulationConfig::default())?;
//!
//!     let token = CancellationToken::new();
//!     let report = simulation.run(token).await;
//!     assert!(report.is_clean());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod device;
pub mod error;
pub mod event;
pub mod runner;
pub mod sensor;
pub mod shutdown;
pub mod subscription;

pub use config::SimulationConfig;
pub use error::{ConfigError, Error, HandlerError, PayloadError, ProducerError, Result};
pub use event::{Delivery, Event, EventHub, FailurePolicy, Payload, Topic};
pub use runner::{Home, RunReport, Simulation};
pub use sensor::{MotionSensor, Sensor, TemperatureSensor};
pub use subscription::{Handler, HandlerFn};
