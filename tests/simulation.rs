// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end tests of the home simulation.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use sensorhub::device::{DoorLock, LIGHTS_ON, LightController, MOTION_ALERT, Notifier};
use sensorhub::{
    Error, EventHub, FailurePolicy, HandlerError, Payload, Simulation, SimulationConfig, Topic,
};
use tokio_util::sync::CancellationToken;

/// Notifier keeping every notification.
#[derive(Debug, Default)]
struct Inbox {
    messages: Mutex<Vec<(String, String)>>,
}

impl Inbox {
    fn count(&self, device: &str, message: &str) -> usize {
        self.messages
            .lock()
            .iter()
            .filter(|(d, m)| d == device && m == message)
            .count()
    }
}

impl Notifier for Inbox {
    fn notify(&self, device: &str, message: &str) {
        self.messages
            .lock()
            .push((device.to_string(), message.to_string()));
    }
}

fn count_topic(hub: &EventHub, topic: Topic) -> Arc<AtomicU32> {
    let counter = Arc::new(AtomicU32::new(0));
    let handle = Arc::clone(&counter);
    hub.subscribe_fn(topic, "counter", move |_event| {
        let counter = Arc::clone(&handle);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    });
    counter
}

// ============================================================================
// Devices on a shared hub
// ============================================================================

mod devices {
    use super::*;

    #[tokio::test]
    async fn door_lock_alerts_twice_for_two_motions() {
        let hub = EventHub::new();
        let inbox = Arc::new(Inbox::default());
        let _lock = DoorLock::attach_with_notifier(&hub, inbox.clone());

        for _ in 0..2 {
            hub.emit(
                Topic::MOTION_DETECTED,
                Payload::new().with("location", "Living Room"),
            )
            .await
            .unwrap();
        }

        assert_eq!(inbox.count("door_lock", MOTION_ALERT), 2);
    }

    #[tokio::test]
    async fn lights_notify_once_for_two_motions() {
        let hub = EventHub::new();
        let inbox = Arc::new(Inbox::default());
        let lights = LightController::attach_with_notifier(&hub, inbox.clone());

        for _ in 0..2 {
            hub.emit(
                Topic::MOTION_DETECTED,
                Payload::new().with("location", "Living Room"),
            )
            .await
            .unwrap();
        }

        assert!(lights.lights_on());
        assert_eq!(inbox.count("light_controller", LIGHTS_ON), 1);
    }

    #[tokio::test]
    async fn failing_sibling_does_not_block_devices() {
        let hub = EventHub::new();
        let inbox = Arc::new(Inbox::default());
        hub.subscribe_fn(Topic::MOTION_DETECTED, "broken_camera", |_event| async {
            Err(HandlerError::rejected("lens cap on"))
        });
        let lights = LightController::attach_with_notifier(&hub, inbox.clone());
        let _lock = DoorLock::attach_with_notifier(&hub, inbox.clone());

        let delivery = hub
            .emit(
                Topic::MOTION_DETECTED,
                Payload::new().with("location", "Porch"),
            )
            .await
            .unwrap();

        assert_eq!(delivery.failed, 1);
        assert_eq!(delivery.succeeded, 2);
        assert!(lights.lights_on());
        assert_eq!(inbox.count("door_lock", MOTION_ALERT), 1);
    }

    #[tokio::test]
    async fn propagating_hub_skips_devices_after_failure() {
        let hub = EventHub::with_policy(FailurePolicy::Propagate);
        let inbox = Arc::new(Inbox::default());
        hub.subscribe_fn(Topic::MOTION_DETECTED, "broken_camera", |_event| async {
            Err(HandlerError::rejected("lens cap on"))
        });
        let lights = LightController::attach_with_notifier(&hub, inbox.clone());

        let err = hub
            .emit(
                Topic::MOTION_DETECTED,
                Payload::new().with("location", "Porch"),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Delivery { handler, .. } if handler == "broken_camera"));
        assert!(!lights.lights_on());
        assert!(inbox.messages.lock().is_empty());
    }
}

// ============================================================================
// Full simulation
// ============================================================================

mod full_run {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn seeded_home_reacts_to_sensors() {
        let inbox = Arc::new(Inbox::default());
        let config = SimulationConfig::default().with_seed(2024);
        let (simulation, home) =
            Simulation::from_config_with_notifier(&config, inbox.clone()).unwrap();

        let motions = count_topic(simulation.hub(), Topic::MOTION_DETECTED);
        let temperatures = count_topic(simulation.hub(), Topic::TEMPERATURE_UPDATE);

        let token = CancellationToken::new();
        let run = tokio::spawn(simulation.run(token.clone()));
        tokio::time::sleep(Duration::from_secs(55)).await;
        token.cancel();
        let report = run.await.unwrap();

        assert!(report.is_clean());
        assert_eq!(report.exits.len(), 2);

        // Temperature samples at 0, 10, 20, 30, 40 and 50 seconds.
        assert_eq!(temperatures.load(Ordering::SeqCst), 6);

        // Motion is random: one alert per detection, lights at most once.
        let motion_count = motions.load(Ordering::SeqCst) as usize;
        assert!(motion_count <= 11);
        assert_eq!(inbox.count("door_lock", MOTION_ALERT), motion_count);
        assert_eq!(
            inbox.count("light_controller", LIGHTS_ON),
            usize::from(motion_count > 0)
        );
        assert_eq!(home.lights.lights_on(), motion_count > 0);
        assert!(home.door_lock.is_locked());
    }

    #[tokio::test(start_paused = true)]
    async fn same_seed_gives_same_motion_count() {
        async fn motion_count(seed: u64) -> u32 {
            let config = SimulationConfig::default().with_seed(seed);
            let (simulation, _home) = Simulation::from_config(&config).unwrap();
            let motions = count_topic(simulation.hub(), Topic::MOTION_DETECTED);

            let token = CancellationToken::new();
            let run = tokio::spawn(simulation.run(token.clone()));
            tokio::time::sleep(Duration::from_secs(42)).await;
            token.cancel();
            run.await.unwrap();

            motions.load(Ordering::SeqCst)
        }

        assert_eq!(motion_count(7).await, motion_count(7).await);
    }

    #[tokio::test]
    async fn cancelled_before_start_publishes_nothing() {
        let config = SimulationConfig::default().with_seed(1);
        let (simulation, home) = Simulation::from_config(&config).unwrap();
        let temperatures = count_topic(simulation.hub(), Topic::TEMPERATURE_UPDATE);

        let token = CancellationToken::new();
        token.cancel();
        let report = simulation.run(token).await;

        assert!(report.is_clean());
        assert_eq!(temperatures.load(Ordering::SeqCst), 0);
        assert!(!home.lights.lights_on());
    }
}
