//! Lap recorder
//!
//! Derives completed laps from the dash lap clock alone. The clock only
//! ever does three things: advance while a lap is running, jump backwards
//! when a new lap starts (or the session resets), and freeze when the
//! final time is held on the display. A backwards jump books the last
//! time seen; a freeze longer than a display refresh books the frozen
//! time. One capture per lap, re-armed by the next advance.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Instant;

/// Maximum laps to keep in memory
const MAX_BUFFER_SIZE: usize = 10000;

/// A frozen clock older than this is a held final time, not a slow refresh
const STALL_SECONDS: f64 = 0.1;

/// One completed lap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LapRecord {
    /// Lap number, starting at 1
    pub lap: u32,
    /// Lap time in seconds, as read off the dash
    pub laptime: f64,
    /// Fuel remaining when the lap completed, gallons
    pub fuel: f64,
}

/// Lap capture state machine
#[derive(Debug, Clone)]
pub struct LapRecorder {
    /// Completed laps, oldest first
    records: VecDeque<LapRecord>,
    /// Laps captured since the last reset
    lap_counter: u32,
    /// Last clock value seen
    last_lcd_time: f64,
    /// When the clock last changed
    last_refresh: Option<Instant>,
    /// A lap was captured and the next advance has not happened yet
    captured: bool,
}

impl LapRecorder {
    /// Create a recorder with no laps
    pub fn new() -> Self {
        Self {
            records: VecDeque::new(),
            lap_counter: 0,
            last_lcd_time: 0.0,
            last_refresh: None,
            captured: false,
        }
    }

    /// Feed one clock sample; returns the lap it completed, if any
    pub fn update(&mut self, lcd_time: f64, fuel: f64, now: Instant) -> Option<LapRecord> {
        if lcd_time > self.last_lcd_time {
            self.last_lcd_time = lcd_time;
            self.last_refresh = Some(now);
            self.captured = false;
            None
        } else if lcd_time < self.last_lcd_time {
            let record = if !self.captured {
                Some(self.capture(self.last_lcd_time, fuel))
            } else {
                None
            };
            self.last_lcd_time = lcd_time;
            self.last_refresh = Some(now);
            self.captured = true;
            record
        } else {
            let since = *self.last_refresh.get_or_insert(now);
            if now.duration_since(since).as_secs_f64() > STALL_SECONDS && !self.captured {
                self.captured = true;
                Some(self.capture(lcd_time, fuel))
            } else {
                None
            }
        }
    }

    fn capture(&mut self, laptime: f64, fuel: f64) -> LapRecord {
        self.lap_counter += 1;
        let record = LapRecord {
            lap: self.lap_counter,
            laptime,
            fuel,
        };
        if self.records.len() >= MAX_BUFFER_SIZE {
            self.records.pop_front();
        }
        self.records.push_back(record);
        record
    }

    /// Number of laps captured since the last reset
    pub fn lap_count(&self) -> u32 {
        self.lap_counter
    }

    /// Captured laps, oldest first
    pub fn records(&self) -> impl Iterator<Item = &LapRecord> {
        self.records.iter()
    }

    /// Forget captured laps and restart numbering
    ///
    /// Clock tracking is untouched, so a lap in progress still captures
    /// normally (as lap 1).
    pub fn reset(&mut self) {
        self.records.clear();
        self.lap_counter = 0;
    }
}

impl Default for LapRecorder {
    fn default() -> Self {
        Self::new()
    }
}
