//! Needle angle mapping
//!
//! Converts an instrument value into a needle rotation using the gauge's
//! two-segment linear curve. Real dash gauges are rarely linear end to
//! end: the tachometer sweep tightens past the launch range, the boost
//! gauge stretches its working band. Two segments with independent slopes
//! reproduce that closely enough at overlay resolution.
//!
//! Angles are in degrees, counterclockwise positive. Renderers whose
//! rotation convention is clockwise positive negate the result when
//! rotating the sprite.

use thiserror::Error;

use crate::config::{GaugeSpec, Point};

/// Mapping failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NeedleError {
    /// The gauge's value domain has zero width, so no value maps anywhere
    #[error("Gauge '{gauge}' cannot map values: min_value = max_value = {value}")]
    InvalidRange { gauge: String, value: f64 },
}

/// Needle angle for an instrument value
///
/// The value is clamped into the gauge's domain first, so out-of-range
/// readings pin the needle at an end stop. Values up to
/// `section_one_end` interpolate between `min_angle` and
/// `max_angle_section_one`; values beyond it interpolate between
/// `max_angle_section_one` and `max_angle_section_two` over the second
/// segment. A zero-width segment maps straight to its end angle.
pub fn angle_for(spec: &GaugeSpec, value: f64) -> Result<f64, NeedleError> {
    if spec.is_degenerate() {
        return Err(NeedleError::InvalidRange {
            gauge: spec.name.clone(),
            value: spec.min_value,
        });
    }

    // Inverted domains still clamp; clamp itself requires low <= high
    let (low, high) = if spec.min_value <= spec.max_value {
        (spec.min_value, spec.max_value)
    } else {
        (spec.max_value, spec.min_value)
    };
    let value = value.clamp(low, high);

    if value <= spec.section_one_end {
        let span = spec.section_one_end - spec.min_value;
        if span == 0.0 {
            return Ok(spec.max_angle_section_one);
        }
        let fraction = (value - spec.min_value) / span;
        Ok(spec.min_angle + fraction * (spec.max_angle_section_one - spec.min_angle))
    } else {
        let span = spec.max_value - spec.section_two_start;
        if span == 0.0 {
            return Ok(spec.max_angle_section_two);
        }
        let fraction = (value - spec.section_two_start) / span;
        Ok(spec.max_angle_section_one
            + fraction * (spec.max_angle_section_two - spec.max_angle_section_one))
    }
}

/// Top-left corner for a rotated needle sprite
///
/// Rotation changes the sprite's bounding box, so the corner is derived
/// from the gauge center and the rotated size each frame. Fractional
/// halves truncate toward zero.
pub fn needle_placement(spec: &GaugeSpec, rotated_width: u32, rotated_height: u32) -> Point {
    let x = (spec.gauge_center.x as f64 - rotated_width as f64 / 2.0) as i32;
    let y = (spec.gauge_center.y as f64 - rotated_height as f64 / 2.0) as i32;
    Point::new(x, y)
}
