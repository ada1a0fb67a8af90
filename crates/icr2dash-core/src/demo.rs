//! Demo Mode - Simulated instrument feed for testing
//!
//! Generates plausible dash readings without the game running: a tach that
//! idles and blips, fuel burning down, water temperature creeping up to
//! operating range, and a lap clock that rolls over and reshuffles the
//! chassis settings.

use rand::SeedableRng;
use rand::Rng;
use rand::rngs::StdRng;

use crate::state::InstrumentReading;

/// Idle tach reading in gauge units
const IDLE_RPM: f64 = 250.0;

/// Demo instrument simulator that generates realistic dash readings
pub struct DemoInstruments {
    /// Time when simulation started (ms)
    start_time_ms: u64,
    /// Last update time (ms)
    last_update_ms: u64,
    /// Time of next throttle blip (ms from start)
    next_blip_at_ms: u64,
    /// Current blip state
    blip_state: BlipState,
    /// Current tach reading in gauge units (smoothed)
    current_rpm: f64,
    /// Target tach reading for the current blip
    blip_target_rpm: f64,
    /// Fuel remaining (gallons)
    fuel: f64,
    /// Start of the current lap (ms from simulation start)
    lap_start_ms: u64,
    /// Length of the current simulated lap (ms)
    lap_length_ms: u64,
    /// Front and rear rollbar detents for the current lap
    rollbars: (u8, u8),
    /// Brake bias reading for the current lap
    brake: f64,
    /// Boost knob detent for the current lap
    boost_knob: u8,
    /// Random number generator
    rng: StdRng,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum BlipState {
    /// Engine idling in the pits
    Idle,
    /// Throttle opening, tach rising
    RampUp { start_ms: u64 },
    /// At peak revs, holding
    Hold { start_ms: u64 },
    /// Throttle closing, tach falling
    RampDown { start_ms: u64 },
}

impl Default for DemoInstruments {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoInstruments {
    /// Create a new demo simulator
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create a demo simulator with a fixed seed so runs are reproducible
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(mut rng: StdRng) -> Self {
        let first_blip = rng.gen_range(3000..7000); // 3-7 seconds
        let lap_length = rng.gen_range(45_000..75_000);

        Self {
            start_time_ms: 0,
            last_update_ms: 0,
            next_blip_at_ms: first_blip,
            blip_state: BlipState::Idle,
            current_rpm: IDLE_RPM,
            blip_target_rpm: 0.0,
            fuel: 40.0,
            lap_start_ms: 0,
            lap_length_ms: lap_length,
            rollbars: (3, 3),
            brake: 50.0,
            boost_knob: 1,
            rng,
        }
    }

    /// Update simulation and generate the current instrument reading
    ///
    /// # Arguments
    /// * `elapsed_ms` - Milliseconds since simulation started
    pub fn update(&mut self, elapsed_ms: u64) -> InstrumentReading {
        if self.start_time_ms == 0 {
            self.start_time_ms = elapsed_ms;
        }

        let sim_time = elapsed_ms - self.start_time_ms;
        let delta_ms = if self.last_update_ms > 0 {
            elapsed_ms.saturating_sub(self.last_update_ms)
        } else {
            0
        };
        self.last_update_ms = elapsed_ms;

        // Update blip state machine
        self.update_blip_state(sim_time);

        // Calculate target tach reading based on state
        let target_rpm = self.calculate_target_rpm(sim_time);

        // Smooth tach changes
        let rpm_rate = if target_rpm > self.current_rpm { 900.0 } else { 400.0 }; // units/sec
        let max_change = rpm_rate * (delta_ms as f64 / 1000.0);
        let rpm_diff = target_rpm - self.current_rpm;
        self.current_rpm += rpm_diff.clamp(-max_change, max_change);

        // Add idle wobble
        let t = sim_time as f64 / 1000.0;
        let idle_wobble = if matches!(self.blip_state, BlipState::Idle) {
            6.0 * (t * 2.5).sin() + 3.0 * (t * 7.3).sin()
        } else {
            0.0
        };
        let rpm = (self.current_rpm + idle_wobble).max(0.0);

        // Fuel burns faster under throttle
        let burn_rate = if matches!(self.blip_state, BlipState::Idle) {
            0.015
        } else {
            0.06
        };
        self.fuel = (self.fuel - burn_rate * (delta_ms as f64 / 1000.0)).max(0.0);

        // Lap clock rolls over and the crew dials in new chassis settings
        if sim_time.saturating_sub(self.lap_start_ms) >= self.lap_length_ms {
            self.lap_start_ms = sim_time;
            self.lap_length_ms = self.rng.gen_range(45_000..75_000);
            self.rollbars = (self.rng.gen_range(0..8), self.rng.gen_range(0..8));
            self.brake = self.rng.gen_range(35.0..65.0);
            self.boost_knob = self.rng.gen_range(1..9);
        }
        let laptime = sim_time.saturating_sub(self.lap_start_ms) as f64 / 1000.0;

        // Gear steps through the box on a slow cycle
        let gear = 1 + ((sim_time / 20_000) % 6) as u8;

        // Water temperature climbs to operating range, then sits there
        let temp = 165.0 + 40.0 * (1.0 - (-t / 180.0).exp()) + 2.0 * (t * 0.4).sin();

        // Manifold pressure tracks throttle
        let throttle = ((rpm - IDLE_RPM) / (1400.0 - IDLE_RPM)).clamp(0.0, 1.0);
        let boost = 28.0 + 17.0 * throttle;

        let mph = rpm * (0.02 + 0.02 * gear as f64);

        InstrumentReading {
            rpm,
            boost,
            temp,
            fuel: self.fuel,
            mph,
            gear,
            front_rollbar: self.rollbars.0,
            rear_rollbar: self.rollbars.1,
            brake: self.brake,
            boost_knob: self.boost_knob,
            laptime,
        }
    }

    /// Update the blip state machine
    fn update_blip_state(&mut self, sim_time: u64) {
        const RAMP_UP_MS: u64 = 400;
        const HOLD_MS: u64 = 300;
        const RAMP_DOWN_MS: u64 = 900;

        match self.blip_state {
            BlipState::Idle => {
                if sim_time >= self.next_blip_at_ms {
                    // Start a new blip
                    self.blip_target_rpm = self.rng.gen_range(700.0..1400.0);
                    self.blip_state = BlipState::RampUp { start_ms: sim_time };
                }
            }
            BlipState::RampUp { start_ms } => {
                if sim_time >= start_ms + RAMP_UP_MS {
                    self.blip_state = BlipState::Hold { start_ms: sim_time };
                }
            }
            BlipState::Hold { start_ms } => {
                if sim_time >= start_ms + HOLD_MS {
                    self.blip_state = BlipState::RampDown { start_ms: sim_time };
                }
            }
            BlipState::RampDown { start_ms } => {
                if sim_time >= start_ms + RAMP_DOWN_MS {
                    // Back to idle, schedule next blip
                    self.blip_state = BlipState::Idle;
                    let next_interval = self.rng.gen_range(3000..7000);
                    self.next_blip_at_ms = sim_time + next_interval;
                }
            }
        }
    }

    /// Calculate target tach reading based on current blip state
    fn calculate_target_rpm(&self, sim_time: u64) -> f64 {
        const RAMP_UP_MS: u64 = 400;
        const RAMP_DOWN_MS: u64 = 900;

        match self.blip_state {
            BlipState::Idle => IDLE_RPM,
            BlipState::RampUp { start_ms } => {
                let progress = ((sim_time - start_ms) as f64 / RAMP_UP_MS as f64).min(1.0);
                IDLE_RPM + (self.blip_target_rpm - IDLE_RPM) * progress
            }
            BlipState::Hold { .. } => self.blip_target_rpm,
            BlipState::RampDown { start_ms } => {
                let progress = ((sim_time - start_ms) as f64 / RAMP_DOWN_MS as f64).min(1.0);
                self.blip_target_rpm + (IDLE_RPM - self.blip_target_rpm) * progress
            }
        }
    }
}
