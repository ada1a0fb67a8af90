//! Warning lights
//!
//! The stock dash carries three: a low fuel light that blinks (faster
//! once fuel is critical), a water temperature light that blinks, and a
//! steady shift light driven by RPM. Blinking is phase-based from the
//! moment the condition starts, so a light always turns on immediately
//! and toggles on a fixed cadence after that.

use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::config::WarningThresholds;

/// Fuel light half-period, seconds
const FUEL_BLINK_PERIOD: f64 = 0.5;
/// Fuel light half-period below the critical threshold
const FUEL_CRITICAL_BLINK_PERIOD: f64 = 0.25;
/// Temp light half-period
const TEMP_BLINK_PERIOD: f64 = 0.5;

/// Which warning lights are lit this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LightStates {
    /// Low fuel light
    pub fuel: bool,
    /// High temperature light
    pub temp: bool,
    /// Shift light
    pub rpm: bool,
}

/// Evaluates the warning lights against configured thresholds
#[derive(Debug, Clone)]
pub struct WarningLights {
    thresholds: WarningThresholds,
    fuel_since: Option<Instant>,
    temp_since: Option<Instant>,
}

impl WarningLights {
    /// Create an evaluator with all conditions clear
    pub fn new(thresholds: WarningThresholds) -> Self {
        Self {
            thresholds,
            fuel_since: None,
            temp_since: None,
        }
    }

    /// Light states for the given readings at `now`
    ///
    /// `now` must not go backwards between calls; each blinking light
    /// keeps the instant its condition started as its phase anchor.
    pub fn evaluate(&mut self, fuel: f64, temp: f64, rpm: f64, now: Instant) -> LightStates {
        let fuel_lit = if fuel < self.thresholds.low_fuel {
            let since = *self.fuel_since.get_or_insert(now);
            let period = if fuel < self.thresholds.critical_fuel {
                FUEL_CRITICAL_BLINK_PERIOD
            } else {
                FUEL_BLINK_PERIOD
            };
            blink_phase(now.duration_since(since).as_secs_f64(), period)
        } else {
            self.fuel_since = None;
            false
        };

        let temp_lit = if temp >= self.thresholds.high_temp {
            let since = *self.temp_since.get_or_insert(now);
            blink_phase(now.duration_since(since).as_secs_f64(), TEMP_BLINK_PERIOD)
        } else {
            self.temp_since = None;
            false
        };

        LightStates {
            fuel: fuel_lit,
            temp: temp_lit,
            rpm: rpm > self.thresholds.high_rpm,
        }
    }
}

/// Even half-periods are lit
fn blink_phase(elapsed: f64, period: f64) -> bool {
    (elapsed / period) as u64 % 2 == 0
}
