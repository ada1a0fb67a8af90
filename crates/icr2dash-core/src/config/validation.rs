//! Layout validation and error reporting
//!
//! Checks a parsed layout for problems that `from_str` deliberately lets
//! through: missing standard gauges, unusable value ranges, breakpoints
//! outside the gauge domain, and missing asset files. Real skins bend the
//! breakpoint rules, so those are warnings rather than errors.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use super::gauge::{GaugeSpec, STANDARD_GAUGES};
use super::layout::DashLayout;

/// Problems that will break rendering or crash a session
#[derive(Debug, Clone, Serialize, Deserialize, Error)]
pub enum ValidationError {
    #[error("Standard gauge section [{0}] is missing")]
    MissingStandardGauge(String),

    #[error("Gauge '{gauge}' has a zero-width value range (min = max = {value})")]
    DegenerateRange { gauge: String, value: f64 },

    #[error("Section [{section}] references missing asset '{path}'")]
    MissingAsset { section: String, path: String },
}

/// Non-critical issues worth surfacing to skin authors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ValidationWarning {
    /// First breakpoint lies outside the gauge's value domain
    SectionOneOutOfRange { gauge: String },
    /// Second breakpoint lies outside the gauge's value domain
    SectionTwoOutOfRange { gauge: String },
    /// Gauge declares min_value greater than max_value
    InvertedDomain { gauge: String },
    /// Second segment starts before the first one ends
    OverlappingSections { gauge: String },
    /// No dedicated temp light sprite; the fuel light sprite will be reused
    TempLightFallback,
}

/// Complete validation report for a layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Critical errors that prevent proper rendering
    pub errors: Vec<ValidationError>,
    /// Non-critical warnings
    pub warnings: Vec<ValidationWarning>,
    /// Statistics about the layout
    pub stats: LayoutStats,
}

/// Statistics about a layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutStats {
    pub gauge_count: usize,
    pub anchor_count: usize,
    pub asset_count: usize,
}

impl ValidationReport {
    /// Returns true if there are any critical errors.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns true if there are any warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Returns true if the layout is usable (no errors).
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }
}

/// Validate a layout, optionally checking asset files under `asset_base`.
pub fn validate(layout: &DashLayout, asset_base: Option<&Path>) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for name in STANDARD_GAUGES {
        if !layout.gauges.contains_key(name) {
            errors.push(ValidationError::MissingStandardGauge(name.to_string()));
        }
    }

    // Name order keeps reports stable across runs
    let mut names: Vec<&String> = layout.gauges.keys().collect();
    names.sort();
    for name in names {
        validate_gauge(&layout.gauges[name], &mut errors, &mut warnings);
    }

    if layout.lights.temp.image_path.is_none() {
        warnings.push(ValidationWarning::TempLightFallback);
    }

    if let Some(base) = asset_base {
        for (section, path) in layout.asset_paths() {
            if !base.join(&path).is_file() {
                errors.push(ValidationError::MissingAsset { section, path });
            }
        }
    }

    let stats = LayoutStats {
        gauge_count: layout.gauges.len(),
        anchor_count: layout.anchors().len(),
        asset_count: layout.asset_paths().len(),
    };

    ValidationReport {
        errors,
        warnings,
        stats,
    }
}

fn validate_gauge(
    gauge: &GaugeSpec,
    errors: &mut Vec<ValidationError>,
    warnings: &mut Vec<ValidationWarning>,
) {
    if gauge.is_degenerate() {
        errors.push(ValidationError::DegenerateRange {
            gauge: gauge.name.clone(),
            value: gauge.min_value,
        });
        // Breakpoint checks below need a real domain
        return;
    }

    let (low, high) = if gauge.min_value <= gauge.max_value {
        (gauge.min_value, gauge.max_value)
    } else {
        warnings.push(ValidationWarning::InvertedDomain {
            gauge: gauge.name.clone(),
        });
        (gauge.max_value, gauge.min_value)
    };

    if gauge.section_one_end < low || gauge.section_one_end > high {
        warnings.push(ValidationWarning::SectionOneOutOfRange {
            gauge: gauge.name.clone(),
        });
    }
    if gauge.section_two_start < low || gauge.section_two_start > high {
        warnings.push(ValidationWarning::SectionTwoOutOfRange {
            gauge: gauge.name.clone(),
        });
    }
    if gauge.section_two_start < gauge.section_one_end {
        warnings.push(ValidationWarning::OverlappingSections {
            gauge: gauge.name.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::anchor::DisplayAnchor;

    fn plausible_gauge(name: &str) -> GaugeSpec {
        GaugeSpec {
            name: name.to_string(),
            needle_image_path: format!("{}.png", name.to_lowercase()),
            min_value: 0.0,
            max_value: 100.0,
            section_one_end: 50.0,
            section_two_start: 50.0,
            min_angle: 220.0,
            max_angle_section_one: 90.0,
            max_angle_section_two: -40.0,
            ..GaugeSpec::default()
        }
    }

    fn complete_layout() -> DashLayout {
        let mut layout = DashLayout::default();
        for name in STANDARD_GAUGES {
            layout.gauges.insert(name.to_string(), plausible_gauge(name));
        }
        layout.lights.temp = DisplayAnchor::with_image("templight", Default::default(), "temp.png");
        layout
    }

    #[test]
    fn test_empty_layout_reports_missing_gauges() {
        let report = validate(&DashLayout::default(), None);

        assert!(report.has_errors());
        assert_eq!(
            report
                .errors
                .iter()
                .filter(|e| matches!(e, ValidationError::MissingStandardGauge(_)))
                .count(),
            STANDARD_GAUGES.len()
        );
    }

    #[test]
    fn test_complete_layout_is_valid() {
        let report = validate(&complete_layout(), None);

        assert!(report.is_valid());
        assert!(!report.has_warnings());
        assert_eq!(report.stats.gauge_count, 6);
        assert_eq!(report.stats.anchor_count, 10);
    }

    #[test]
    fn test_degenerate_range_error() {
        let mut layout = complete_layout();
        let boost = layout.gauges.get_mut("Boost").unwrap();
        boost.min_value = 20.0;
        boost.max_value = 20.0;

        let report = validate(&layout, None);

        assert!(report
            .errors
            .iter()
            .any(|e| matches!(e, ValidationError::DegenerateRange { gauge, .. } if gauge == "Boost")));
    }

    #[test]
    fn test_breakpoint_warnings() {
        let mut layout = complete_layout();
        let tach = layout.gauges.get_mut("Tachometer").unwrap();
        tach.section_one_end = 150.0;
        tach.section_two_start = 40.0;

        let report = validate(&layout, None);

        assert!(report.is_valid());
        assert!(report
            .warnings
            .iter()
            .any(|w| matches!(w, ValidationWarning::SectionOneOutOfRange { gauge } if gauge == "Tachometer")));
        assert!(report
            .warnings
            .iter()
            .any(|w| matches!(w, ValidationWarning::OverlappingSections { gauge } if gauge == "Tachometer")));
    }

    #[test]
    fn test_inverted_domain_warning() {
        let mut layout = complete_layout();
        let temp = layout.gauges.get_mut("Temperature").unwrap();
        temp.min_value = 250.0;
        temp.max_value = 100.0;
        temp.section_one_end = 180.0;
        temp.section_two_start = 180.0;

        let report = validate(&layout, None);

        assert!(report.is_valid());
        assert!(report
            .warnings
            .iter()
            .any(|w| matches!(w, ValidationWarning::InvertedDomain { gauge } if gauge == "Temperature")));
    }

    #[test]
    fn test_missing_temp_sprite_warns() {
        let mut layout = complete_layout();
        layout.lights.temp.image_path = None;

        let report = validate(&layout, None);

        assert!(report
            .warnings
            .iter()
            .any(|w| matches!(w, ValidationWarning::TempLightFallback)));
    }
}
