//! Live instrument state
//!
//! [`InstrumentReading`] is one raw sample from the capture side.
//! [`DashState`] is what the overlay actually draws: readings copy
//! straight through except boost, which ramps toward the reading at a
//! configured rate so the needle sweeps instead of teleporting. The
//! simulator quantizes its boost readout coarsely; the ramp restores the
//! analog feel of the real gauge.

use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::config::BoostResponse;

/// Boost jumps larger than this snap instead of ramping
const BOOST_SNAP_THRESHOLD: f64 = 15.0;

/// One instrument sample captured from the simulator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct InstrumentReading {
    /// Engine speed, tachometer units (hundreds of RPM on the stock dash)
    pub rpm: f64,
    /// Manifold pressure
    pub boost: f64,
    /// Water temperature
    pub temp: f64,
    /// Fuel remaining, gallons
    pub fuel: f64,
    /// Speed in mph
    pub mph: f64,
    /// Selected gear
    pub gear: u8,
    /// Front anti-roll bar detent
    pub front_rollbar: u8,
    /// Rear anti-roll bar detent
    pub rear_rollbar: u8,
    /// Brake bias
    pub brake: f64,
    /// Boost knob detent
    pub boost_knob: u8,
    /// Lap clock as shown on the dash LCD, seconds
    pub laptime: f64,
}

/// Displayed instrument state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashState {
    /// Engine speed
    pub rpm: f64,
    /// Smoothed manifold pressure
    pub boost: f64,
    /// Water temperature
    pub temp: f64,
    /// Fuel remaining
    pub fuel: f64,
    /// Speed in mph
    pub mph: f64,
    /// Selected gear
    pub gear: u8,
    /// Front anti-roll bar detent
    pub front_rollbar: u8,
    /// Rear anti-roll bar detent
    pub rear_rollbar: u8,
    /// Brake bias
    pub brake: f64,
    /// Boost knob detent
    pub boost_knob: u8,
    /// Lap clock, seconds
    pub laptime: f64,
    pub(crate) last_update: Option<Instant>,
}

impl Default for DashState {
    fn default() -> Self {
        Self {
            rpm: 0.0,
            boost: 30.0,
            temp: 0.0,
            fuel: 0.0,
            mph: 0.0,
            gear: 1,
            front_rollbar: 0,
            rear_rollbar: 0,
            brake: 0.0,
            boost_knob: 1,
            laptime: 0.0,
            last_update: None,
        }
    }
}

impl DashState {
    /// Fold a new sample into the displayed state
    pub fn apply(&mut self, reading: &InstrumentReading, now: Instant, rates: &BoostResponse) {
        self.rpm = reading.rpm;
        self.temp = reading.temp;
        self.fuel = reading.fuel;
        self.mph = reading.mph;
        self.gear = reading.gear;
        self.front_rollbar = reading.front_rollbar;
        self.rear_rollbar = reading.rear_rollbar;
        self.brake = reading.brake;
        self.apply_boost(reading.boost, now, rates);
        self.boost_knob = reading.boost_knob;
        self.laptime = reading.laptime;
    }

    fn apply_boost(&mut self, reading: f64, now: Instant, rates: &BoostResponse) {
        let dt = self
            .last_update
            .map(|previous| now.duration_since(previous).as_secs_f64())
            .unwrap_or(0.0);

        if reading < self.boost {
            self.boost -= rates.drop_rate_per_second * dt;
        } else if reading > self.boost {
            self.boost += rates.climb_rate_per_second * dt;
        }

        // A jump this large is a scene change, not needle motion
        if (reading - self.boost).abs() > BOOST_SNAP_THRESHOLD {
            self.boost = reading;
        }

        self.last_update = Some(now);
    }
}
