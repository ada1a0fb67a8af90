//! Needle gauge definitions
//!
//! One [`GaugeSpec`] per layout section that declares a rotating needle.

use serde::{Deserialize, Serialize};

use super::anchor::Point;

/// Section names of the six gauges every cockpit layout provides
pub const STANDARD_GAUGES: [&str; 6] = [
    "Tachometer",
    "Boost",
    "Temperature",
    "Fuel",
    "Brake bias",
    "Boost knob",
];

/// A rotating-needle instrument parsed from one layout section
///
/// The value-to-angle curve is two linear segments joined at
/// `section_one_end`/`section_two_start` (usually the same value), which
/// lets a layout compress part of the sweep the way period tachometers do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeSpec {
    /// Section name this gauge was parsed from (e.g. "Tachometer")
    pub name: String,
    /// Rotatable needle sprite asset
    pub needle_image_path: String,
    /// Rotation center in the needle sprite's own coordinate space
    pub pivot: Point,
    /// Overlay position where the pivot is placed
    pub gauge_center: Point,
    /// Lowest value the instrument shows
    pub min_value: f64,
    /// Highest value the instrument shows
    pub max_value: f64,
    /// Value where the first angular segment ends
    pub section_one_end: f64,
    /// Value where the second angular segment starts
    pub section_two_start: f64,
    /// Needle angle at `min_value`, in degrees counterclockwise
    pub min_angle: f64,
    /// Needle angle at `section_one_end`
    pub max_angle_section_one: f64,
    /// Needle angle at `max_value`
    pub max_angle_section_two: f64,
}

impl Default for GaugeSpec {
    fn default() -> Self {
        Self {
            name: String::new(),
            needle_image_path: String::new(),
            pivot: Point::default(),
            gauge_center: Point::default(),
            min_value: 0.0,
            max_value: 100.0,
            section_one_end: 50.0,
            section_two_start: 50.0,
            min_angle: 0.0,
            max_angle_section_one: 0.0,
            max_angle_section_two: 0.0,
        }
    }
}

impl GaugeSpec {
    /// True when the gauge's value domain has zero width
    pub fn is_degenerate(&self) -> bool {
        self.min_value == self.max_value
    }
}
