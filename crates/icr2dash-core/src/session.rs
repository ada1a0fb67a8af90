//! Overlay session loop
//!
//! Wires capture to rendering. The capture side publishes instrument
//! readings whenever it has them; the session repaints on a fixed
//! interval, always against the newest reading. Readings never queue:
//! a slow frame drops samples instead of falling behind.
//!
//! The session ends when the capture side goes away (its sender is
//! dropped), which is what happens when the simulator window closes.

use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use crate::config::{AppSettings, BoostResponse, DashLayout};
use crate::frame::{FramePlan, FramePlanner};
use crate::lights::WarningLights;
use crate::state::{DashState, InstrumentReading};

/// Capture-side handle publishing readings into a session
#[derive(Debug, Clone)]
pub struct ReadingSender {
    tx: watch::Sender<Option<InstrumentReading>>,
}

impl ReadingSender {
    /// Publish the latest sample, replacing any unconsumed one
    pub fn publish(&self, reading: InstrumentReading) {
        // A closed channel means the session already ended
        let _ = self.tx.send(Some(reading));
    }
}

/// One overlay session: consumes readings, emits frame plans
pub struct DashSession {
    planner: FramePlanner,
    state: DashState,
    lights: WarningLights,
    boost_response: BoostResponse,
    tick: Duration,
    rx: watch::Receiver<Option<InstrumentReading>>,
}

impl DashSession {
    /// Build a session for a layout and hand back the capture handle
    pub fn new(layout: DashLayout, settings: &AppSettings) -> (Self, ReadingSender) {
        let (tx, rx) = watch::channel(None);
        let lights = WarningLights::new(layout.thresholds);
        let session = Self {
            planner: FramePlanner::new(layout),
            state: DashState::default(),
            lights,
            boost_response: settings.boost_response,
            tick: Duration::from_millis(settings.general.loop_ms.max(1)),
            rx,
        };
        (session, ReadingSender { tx })
    }

    /// The frame planner, e.g. for HUD text
    pub fn planner_mut(&mut self) -> &mut FramePlanner {
        &mut self.planner
    }

    /// Drive the session until the capture side disappears
    ///
    /// `on_frame` receives one frame plan per tick once the first reading
    /// has arrived. Before that the overlay has nothing to show and no
    /// plans are emitted.
    pub async fn run<F>(mut self, mut on_frame: F)
    where
        F: FnMut(FramePlan),
    {
        let mut interval = tokio::time::interval(self.tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;

            if self.rx.has_changed().is_err() {
                break;
            }
            let latest = *self.rx.borrow_and_update();

            if let Some(reading) = latest {
                let now = tokio::time::Instant::now().into_std();
                self.state.apply(&reading, now, &self.boost_response);
                let lights =
                    self.lights
                        .evaluate(self.state.fuel, self.state.temp, self.state.rpm, now);
                on_frame(self.planner.compose(&self.state, &lights));
            }
        }
    }
}
