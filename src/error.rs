// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `sensorhub` crate.
//!
//! This module provides the error hierarchy for the hub and the components
//! layered on top of it: handler failures during delivery, payload decoding,
//! producer loops, and configuration loading.

use thiserror::Error;

use crate::event::Topic;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A handler failed while an event was being delivered.
    ///
    /// Only returned by [`EventHub::emit`](crate::EventHub::emit) when the hub
    /// runs with [`FailurePolicy::Propagate`](crate::FailurePolicy::Propagate).
    #[error("handler `{handler}` failed on topic `{topic}`: {source}")]
    Delivery {
        /// Topic of the emission that failed.
        topic: Topic,
        /// Name of the failing handler.
        handler: String,
        /// The underlying handler failure.
        #[source]
        source: HandlerError,
    },

    /// A producer loop failed.
    #[error("producer error: {0}")]
    Producer(#[from] ProducerError),

    /// A payload could not be built or decoded.
    #[error("payload error: {0}")]
    Payload(#[from] PayloadError),

    /// Configuration could not be loaded or is invalid.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised while building or decoding an event payload.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// JSON conversion failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload is not a JSON object.
    #[error("payload must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// An expected field is missing.
    #[error("missing field in payload: {0}")]
    MissingField(String),
}

/// Errors a handler can report back to the hub.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The handler rejected the event.
    #[error("rejected: {0}")]
    Rejected(String),

    /// The event payload did not have the expected shape.
    #[error("bad payload: {0}")]
    Payload(#[from] PayloadError),

    /// The handler panicked; the panic was caught by the hub.
    #[error("panicked: {0}")]
    Panicked(String),
}

impl HandlerError {
    /// Creates a rejection with the given message.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }
}

/// Errors that end a producer loop.
#[derive(Debug, Error)]
pub enum ProducerError {
    /// The sensor failed to produce a reading.
    #[error("sensor `{sensor}` failed to sample: {message}")]
    Sample {
        /// Name of the sensor.
        sensor: String,
        /// Description of the failure.
        message: String,
    },

    /// The producer task panicked or was aborted.
    #[error("producer `{sensor}` stopped abnormally: {message}")]
    Aborted {
        /// Name of the sensor.
        sensor: String,
        /// Description of the failure.
        message: String,
    },
}

/// Errors related to loading and validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration is not valid JSON for this schema.
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration value is out of its allowed domain.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

/// Extracts a readable message from a caught panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
