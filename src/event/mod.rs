// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Publish/subscribe event hub.
//!
//! Producers emit `(topic, payload)` pairs on an [`EventHub`]; the hub hands
//! each emission to every [`Handler`](crate::subscription::Handler)
//! subscribed to that topic, one after the other, in subscription order.
//!
//! # Examples
//!
//! ```
//! use sensorhub::event::{EventHub, Payload, Topic};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> sensorhub::Result<()> {
//! let hub = EventHub::new();
//!
//! hub.subscribe_fn(Topic::MOTION_DETECTED, "printer", |event| async move {
//!     println!("motion: {:?}", event.payload().get("location"));
//!     Ok(())
//! });
//!
//! // Publish an event
//! let delivery = hub
//!     .emit(Topic::MOTION_DETECTED, Payload::new().with("location", "Kitchen"))
//!     .await?;
//! assert_eq!(delivery.invoked, 1);
//! # Ok(())
//! # }
//! ```

mod delivery;
mod event_hub;
mod instance;
mod payload;
mod topic;

pub use delivery::{Delivery, FailurePolicy};
pub use event_hub::EventHub;
pub use instance::Event;
pub use payload::{MotionReading, Payload, TemperatureReading};
pub use topic::Topic;
