// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The callback interface the hub dispatches to.

use async_trait::async_trait;

use crate::error::HandlerError;
use crate::event::Event;

/// A subscriber callback.
///
/// The hub only ever sees `Arc<dyn Handler>`; it never depends on concrete
/// subscriber types. Within one emission the hub awaits each handler to
/// completion before invoking the next one, so a handler is never called
/// concurrently by the same emission.
///
/// # Implementation requirements
///
/// - Use async I/O; avoid blocking the executor.
/// - Report failures through the returned `Result`. Panics are caught by the
///   hub and reported as [`HandlerError::Panicked`].
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use sensorhub::error::HandlerError;
/// use sensorhub::event::Event;
/// use sensorhub::subscription::Handler;
///
/// struct Printer;
///
/// #[async_trait]
/// impl Handler for Printer {
///     async fn handle(&self, event: &Event) -> Result<(), HandlerError> {
///         println!("{}: {:?}", event.topic(), event.payload());
///         Ok(())
///     }
///
///     fn name(&self) -> &str {
///         "printer"
///     }
/// }
/// ```
#[async_trait]
pub trait Handler: Send + Sync + 'static {
    /// Processes one delivered event.
    async fn handle(&self, event: &Event) -> Result<(), HandlerError>;

    /// Returns the handler name used in logs and delivery errors.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
