// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The sensor interface and the producer loop driving it.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::{ProducerError, Result};
use crate::event::{Event, EventHub};

/// A source of events sampled on a fixed interval.
///
/// A sensor only produces readings; [`run_producer`] owns the timing and the
/// publishing.
pub trait Sensor: Send + 'static {
    /// Returns the sensor name used in logs and errors.
    fn name(&self) -> &str;

    /// Returns the delay between two samples.
    fn interval(&self) -> Duration;

    /// Takes one sample.
    ///
    /// Returns `Ok(None)` when there is nothing to publish this tick.
    ///
    /// # Errors
    ///
    /// An error ends the producer loop driving this sensor.
    fn sample(&mut self) -> std::result::Result<Option<Event>, ProducerError>;
}

impl<S: Sensor + ?Sized> Sensor for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn interval(&self) -> Duration {
        (**self).interval()
    }

    fn sample(&mut self) -> std::result::Result<Option<Event>, ProducerError> {
        (**self).sample()
    }
}

/// Runs a sensor until `token` is cancelled or the loop fails.
///
/// Each iteration samples the sensor, publishes the reading (if any) on the
/// hub and then sleeps for the sensor's interval.
///
/// # Cancellation
///
/// The token is observed before sampling and during the sleep, which is the
/// only point where the loop waits on its own. A publish that is already in
/// flight is always awaited to completion, so handlers never see a delivery
/// abandoned halfway through.
///
/// # Errors
///
/// Returns an error if the sensor fails to sample, or if delivery fails on a
/// hub running with [`FailurePolicy::Propagate`](crate::FailurePolicy::Propagate).
pub async fn run_producer<S: Sensor>(
    mut sensor: S,
    hub: EventHub,
    token: CancellationToken,
) -> Result<()> {
    let interval = sensor.interval();
    tracing::debug!(sensor = sensor.name(), ?interval, "Producer started");

    loop {
        if token.is_cancelled() {
            break;
        }

        if let Some(event) = sensor.sample()? {
            hub.publish(event).await?;
        }

        tokio::select! {
            () = token.cancelled() => break,
            () = tokio::time::sleep(interval) => {}
        }
    }

    tracing::debug!(sensor = sensor.name(), "Producer stopped");
    Ok(())
}
