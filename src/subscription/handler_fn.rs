// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Closure-backed handler.

use std::borrow::Cow;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use super::Handler;
use crate::error::HandlerError;
use crate::event::Event;

/// Handler wrapping an async closure.
///
/// The closure receives an owned (cheaply cloned) [`Event`] and returns a
/// fresh future per delivery. Shared state must be captured explicitly,
/// typically behind an `Arc`.
///
/// # Examples
///
/// ```
/// use sensorhub::subscription::{Handler, HandlerFn};
///
/// let handler = HandlerFn::arc("logger", |event| async move {
///     println!("got {}", event.topic());
///     Ok(())
/// });
/// assert_eq!(handler.name(), "logger");
/// ```
pub struct HandlerFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> HandlerFn<F> {
    /// Creates a new closure-backed handler.
    pub fn new<Fut>(name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: Fn(Event) -> Fut,
        Fut: Future<Output = Result<(), HandlerError>>,
    {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the handler and returns it as a shared handle.
    pub fn arc<Fut>(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self>
    where
        F: Fn(Event) -> Fut,
        Fut: Future<Output = Result<(), HandlerError>>,
    {
        Arc::new(Self::new(name, f))
    }
}

impl<F> fmt::Debug for HandlerFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerFn")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<F, Fut> Handler for HandlerFn<F>
where
    F: Fn(Event) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
{
    async fn handle(&self, event: &Event) -> Result<(), HandlerError> {
        (self.f)(event.clone()).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}
