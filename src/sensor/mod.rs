// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event producers.
//!
//! A [`Sensor`] generates readings; [`run_producer`] turns it into an
//! independent loop that samples, publishes on the hub and sleeps for the
//! sensor's interval, until cancelled.
//!
//! # Built-in sensors
//!
//! | Sensor | Topic | Payload | Interval |
//! |--------|-------|---------|----------|
//! | [`MotionSensor`] | `motion_detected` | `{"location": "Living Room"}` | 5 s |
//! | [`TemperatureSensor`] | `temperature_update` | `{"value": 18..=30}` | 10 s |

mod motion;
mod producer;
mod temperature;

pub use motion::MotionSensor;
pub use producer::{Sensor, run_producer};
pub use temperature::TemperatureSensor;
