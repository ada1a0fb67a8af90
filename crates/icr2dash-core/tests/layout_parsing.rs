//! Tests for overlay layout parsing, asset checking and validation.

use icr2dash_core::config::{ConfigError, DashLayout, Point, ValidationError};
use pretty_assertions::assert_eq;

/// A complete SVGA cockpit skin: the six standard gauges, one custom
/// extra, and a free-form section the loader should skip.
const FULL_LAYOUT: &str = r#"
# ICR2 SVGA cockpit skin
[General]
cockpit_path = cockpit.png  # background art
low_fuel = 15
critical_fuel = 5
high_temp = 205
high_rpm = 1100
fuellight = 408, 344
fuellight_path = fuellight.png
templight = 318, 344
templight_path = templight.png
rpmlight = 51, 344
rpmlight_path = rpmlight.png

[LCD display]
lcdnums_path = lcdnums.png
lcd_speed1 = 118, 341
lcd_speed2 = 131, 341
lcd_speed3 = 144, 341
lcd_gear = 201, 341

[Rollbars]
rollbar1 = rollbar1.png
rollbar2 = rollbar2.png
rollbar3 = rollbar3.png
rollbar4 = rollbar4.png
rollbar5 = rollbar5.png
rollbar6 = rollbar6.png
rollbar7 = rollbar7.png
rollbar8 = rollbar8.png
front_rollbar = 255, 322
rear_rollbar = 255, 372

[Shifter]
shifter = 576, 320
gear1 = gear1.png
gear2 = gear2.png
gear3 = gear3.png
gear4 = gear4.png
gear5 = gear5.png
gear6 = gear6.png

[Notes]
author = unknown
revision = 3

[Tachometer]
needle_image_path = tachneedle.png
pivot = 60, 60
gauge_center = 120, 120
min_value = 0
max_value = 1500
section_one_end = 600
section_two_start = 600
min_angle = 222
max_angle_section_one = 180
max_angle_section_two = -47

[Boost]
needle_image_path = boostneedle.png
pivot = 40, 40
gauge_center = 320, 120
min_value = 25
max_value = 60
section_one_end = 45
section_two_start = 45
min_angle = 225
max_angle_section_one = 90
max_angle_section_two = -45

[Temperature]
needle_image_path = tempneedle.png
pivot = 40, 40
gauge_center = 460, 120
min_value = 100
max_value = 305
section_one_end = 220
section_two_start = 220
min_angle = 202
max_angle_section_one = 100
max_angle_section_two = -22

[Fuel]
needle_image_path = fuelneedle.png
pivot = 40, 40
gauge_center = 560, 200
min_value = 0
max_value = 40
section_one_end = 20
section_two_start = 20
min_angle = 210
max_angle_section_one = 90
max_angle_section_two = -30

[Brake bias]
needle_image_path = bbneedle.png
pivot = 25, 25
gauge_center = 520, 300
min_value = 0
max_value = 100
section_one_end = 50
section_two_start = 50
min_angle = 180
max_angle_section_one = 90
max_angle_section_two = 0

[Boost knob]
needle_image_path = knobneedle.png
pivot = 20, 20
gauge_center = 600, 320
min_value = 1
max_value = 8
section_one_end = 4
section_two_start = 4
min_angle = 150
max_angle_section_one = 90
max_angle_section_two = 30

[Oil pressure]
needle_image_path = oilneedle.png
pivot = 20, 20
gauge_center = 40, 300
min_value = 0
max_value = 80
section_one_end = 40
section_two_start = 40
min_angle = 200
max_angle_section_one = 90
max_angle_section_two = -20
"#;

#[test]
fn test_parse_full_layout() {
    let layout = DashLayout::from_str(FULL_LAYOUT).unwrap();

    // Inline comment after the value is stripped
    assert_eq!(layout.cockpit_path, "cockpit.png");
    assert_eq!(layout.thresholds.high_rpm, 1100.0);
    assert_eq!(layout.lights.temp.image_path.as_deref(), Some("templight.png"));
    assert_eq!(layout.lcd.gear, Point::new(201, 341));
    assert_eq!(layout.rollbars.front, Point::new(255, 322));
    assert_eq!(layout.shifter.images[5], "gear6.png");

    let tach = layout.get_gauge("Tachometer").expect("Tachometer missing");
    assert_eq!(tach.min_value, 0.0);
    assert_eq!(tach.max_value, 1500.0);
    assert_eq!(tach.min_angle, 222.0);
    assert_eq!(tach.max_angle_section_two, -47.0);
    assert_eq!(tach.gauge_center, Point::new(120, 120));

    // Gauge sections are recognized by shape, not by a fixed name list
    assert_eq!(layout.gauges.len(), 7);
    let oil = layout.get_gauge("Oil pressure").expect("custom gauge missing");
    assert_eq!(oil.needle_image_path, "oilneedle.png");

    // [Notes] has no needle_image_path, so it is not a gauge
    assert!(layout.get_gauge("Notes").is_none());
}

#[test]
fn test_anchor_lookup() {
    let layout = DashLayout::from_str(FULL_LAYOUT).unwrap();

    assert_eq!(
        layout.get_anchor("rpmlight").unwrap().position,
        Point::new(51, 344)
    );
    assert_eq!(
        layout.get_anchor("lcd_speed2").unwrap().position,
        Point::new(131, 341)
    );
    assert_eq!(
        layout.get_anchor("shifter").unwrap().position,
        Point::new(576, 320)
    );
    assert!(layout.get_anchor("bogus").is_none());
}

#[test]
fn test_asset_list_is_stable_and_complete() {
    let layout = DashLayout::from_str(FULL_LAYOUT).unwrap();
    let assets = layout.asset_paths();

    // cockpit + 3 lights + 7 needles + digit strip + 8 rollbars + 6 gears
    assert_eq!(assets.len(), 26);
    assert_eq!(
        assets[0],
        ("General".to_string(), "cockpit.png".to_string())
    );

    // Needles are listed in gauge name order
    let needle_sections: Vec<&str> = assets
        .iter()
        .filter(|(_, path)| path.ends_with("needle.png"))
        .map(|(section, _)| section.as_str())
        .collect();
    assert_eq!(
        needle_sections,
        vec![
            "Boost",
            "Boost knob",
            "Brake bias",
            "Fuel",
            "Oil pressure",
            "Tachometer",
            "Temperature",
        ]
    );
}

#[test]
fn test_duplicate_key_last_wins() {
    let content = FULL_LAYOUT.replace("low_fuel = 15", "low_fuel = 10\nlow_fuel = 15");
    let layout = DashLayout::from_str(&content).unwrap();
    assert_eq!(layout.thresholds.low_fuel, 15.0);
}

#[test]
fn test_missing_field_is_reported() {
    let content = FULL_LAYOUT.replace("high_rpm = 1100\n", "");
    let err = DashLayout::from_str(&content).unwrap_err();
    assert!(
        matches!(
            err,
            ConfigError::MissingField { ref section, ref field }
                if section == "General" && field == "high_rpm"
        ),
        "unexpected error: {:?}",
        err
    );
}

#[test]
fn test_bad_point_is_reported() {
    let content = FULL_LAYOUT.replace("fuellight = 408, 344", "fuellight = broken");
    let err = DashLayout::from_str(&content).unwrap_err();
    assert!(
        matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "fuellight"),
        "unexpected error: {:?}",
        err
    );
}

#[test]
fn test_bad_number_is_reported() {
    let content = FULL_LAYOUT.replace("low_fuel = 15", "low_fuel = lots");
    let err = DashLayout::from_str(&content).unwrap_err();
    assert!(
        matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "low_fuel"),
        "unexpected error: {:?}",
        err
    );
}

#[test]
fn test_unterminated_header_is_a_parse_error() {
    let err = DashLayout::from_str("[General\ncockpit_path = x\n").unwrap_err();
    assert!(
        matches!(err, ConfigError::Parse { line: 1, .. }),
        "unexpected error: {:?}",
        err
    );
}

#[test]
fn test_key_outside_any_section_is_a_parse_error() {
    let err = DashLayout::from_str("cockpit_path = x\n[General]\n").unwrap_err();
    assert!(
        matches!(err, ConfigError::Parse { line: 1, .. }),
        "unexpected error: {:?}",
        err
    );
}

#[test]
fn test_from_file_verifies_assets() {
    let dir = tempfile::tempdir().unwrap();
    let ini_path = dir.path().join("overlay.ini");
    std::fs::write(&ini_path, FULL_LAYOUT).unwrap();

    // No art next to the file yet
    let err = DashLayout::from_file(&ini_path).unwrap_err();
    assert!(matches!(err, ConfigError::MissingAsset { .. }));

    // Create every referenced file and the load goes through
    let layout = DashLayout::from_str(FULL_LAYOUT).unwrap();
    for (_, asset) in layout.asset_paths() {
        std::fs::write(dir.path().join(asset), b"").unwrap();
    }
    let loaded = DashLayout::from_file(&ini_path).unwrap();
    assert_eq!(loaded, layout);

    // Losing one file brings the error back, naming the file
    std::fs::remove_file(dir.path().join("rollbar3.png")).unwrap();
    let err = DashLayout::from_file(&ini_path).unwrap_err();
    assert!(
        matches!(
            err,
            ConfigError::MissingAsset { ref section, ref path }
                if section == "Rollbars" && path == "rollbar3.png"
        ),
        "unexpected error: {:?}",
        err
    );
}

#[test]
fn test_validation_passes_on_real_layout() {
    let layout = DashLayout::from_str(FULL_LAYOUT).unwrap();
    let report = layout.validate(None);

    assert!(report.is_valid(), "unexpected errors: {:?}", report.errors);
    assert!(
        !report.has_warnings(),
        "unexpected warnings: {:?}",
        report.warnings
    );
    assert_eq!(report.stats.gauge_count, 7);
    assert_eq!(report.stats.anchor_count, 10);
    assert_eq!(report.stats.asset_count, 26);
}

#[test]
fn test_renamed_standard_gauge_is_caught() {
    let content = FULL_LAYOUT.replace("[Brake bias]", "[Brake balance]");
    let layout = DashLayout::from_str(&content).unwrap();
    let report = layout.validate(None);

    assert!(report.has_errors());
    assert!(report.errors.iter().any(|e| matches!(
        e,
        ValidationError::MissingStandardGauge(name) if name == "Brake bias"
    )));
    // The renamed section still parses as a (custom) gauge
    assert_eq!(report.stats.gauge_count, 7);
}

#[test]
fn test_degenerate_gauge_is_an_error() {
    let content = FULL_LAYOUT.replace("max_value = 60", "max_value = 25");
    let layout = DashLayout::from_str(&content).unwrap();
    let report = layout.validate(None);

    assert!(report.errors.iter().any(|e| matches!(
        e,
        ValidationError::DegenerateRange { gauge, .. } if gauge == "Boost"
    )));
}
