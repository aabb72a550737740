// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Runs the home simulation until the process receives a shutdown signal.
//!
//! Usage: `sensorhub [CONFIG.json]`. Log verbosity follows `RUST_LOG`
//! (default `info`).

use std::process::ExitCode;

use sensorhub::config::SimulationConfig;
use sensorhub::runner::Simulation;
use sensorhub::shutdown::wait_for_shutdown_signal;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match std::env::args_os().nth(1) {
        Some(path) => match SimulationConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!("Failed to load {}: {e}", path.to_string_lossy());
                return ExitCode::FAILURE;
            }
        },
        None => SimulationConfig::default(),
    };

    let (simulation, _home) = match Simulation::from_config(&config) {
        Ok(built) => built,
        Err(e) => {
            tracing::error!("Failed to build simulation: {e}");
            return ExitCode::FAILURE;
        }
    };

    let token = CancellationToken::new();
    let shutdown = token.clone();
    tokio::spawn(async move {
        if let Err(e) = wait_for_shutdown_signal().await {
            tracing::error!("Failed to listen for shutdown signals: {e}");
        }
        shutdown.cancel();
    });

    let report = simulation.run(token).await;
    if report.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
