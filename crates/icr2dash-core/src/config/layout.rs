//! Overlay layout store
//!
//! Loads `overlay.ini`, the file that describes one cockpit skin: the
//! background art, gauge geometry, warning light anchors, LCD digit
//! positions, and the rollbar/shifter sprite sets. Gauge sections are
//! recognized structurally, so a skin can add extra dials without any
//! code change.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use super::anchor::{DisplayAnchor, Point};
use super::error::ConfigError;
use super::gauge::GaugeSpec;
use super::parser::{self, RawSection, POINT_PATTERN};
use super::validation::{self, ValidationReport};
use crate::frame::SpriteRef;

/// Thresholds that drive the warning lights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct WarningThresholds {
    /// Fuel level (gallons) below which the fuel light blinks
    pub low_fuel: f64,
    /// Fuel level below which the fuel light blinks at double rate
    pub critical_fuel: f64,
    /// Water temperature at or above which the temp light blinks
    pub high_temp: f64,
    /// Engine speed above which the shift light comes on
    pub high_rpm: f64,
}

/// Anchors for the three warning lights
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LightAnchors {
    /// Low fuel light
    pub fuel: DisplayAnchor,
    /// High temperature light
    pub temp: DisplayAnchor,
    /// Shift light
    pub rpm: DisplayAnchor,
}

/// LCD digit strip and the positions of the digits drawn from it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LcdLayout {
    /// Strip image holding the glyphs 0-9 in ten equal-width cells
    pub lcdnums_path: String,
    /// Hundreds, tens and ones positions of the speed readout
    pub speed: [Point; 3],
    /// Gear digit position
    pub gear: Point,
}

/// Anti-roll bar indicator sprites, one per detent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RollbarSprites {
    /// Sprites for detents 1-8, in order
    pub images: [String; 8],
    /// Front bar indicator position
    pub front: Point,
    /// Rear bar indicator position
    pub rear: Point,
}

/// Gear lever sprites, one per forward gear
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ShifterSprites {
    /// Sprites for gears 1-6, in order
    pub images: [String; 6],
    /// Lever position
    pub anchor: Point,
}

/// Parsed overlay layout
///
/// Construct with [`DashLayout::from_file`] (checks that every referenced
/// asset exists next to the layout file) or [`DashLayout::from_str`]
/// (structure only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DashLayout {
    /// Cockpit background image
    pub cockpit_path: String,
    /// Warning light thresholds
    pub thresholds: WarningThresholds,
    /// Warning light anchors
    pub lights: LightAnchors,
    /// LCD readout layout
    pub lcd: LcdLayout,
    /// Anti-roll bar indicators
    pub rollbars: RollbarSprites,
    /// Gear lever indicator
    pub shifter: ShifterSprites,
    /// Gauges by section name
    pub gauges: HashMap<String, GaugeSpec>,
}

impl DashLayout {
    /// Load a layout file and verify its assets
    ///
    /// Asset paths are resolved against the layout file's directory; the
    /// first missing file fails the load with
    /// [`ConfigError::MissingAsset`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = parser::read_config_file(path)?;
        let layout = Self::from_str(&content)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        layout.check_assets(base)?;
        Ok(layout)
    }

    /// Parse layout content without touching the filesystem
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        // Pre-compile regex for point-valued fields
        let point_re = Regex::new(POINT_PATTERN).unwrap();

        let mut general = None;
        let mut lcd = None;
        let mut rollbars = None;
        let mut shifter = None;
        let mut gauges = HashMap::new();

        for section in parser::collect_sections(content)? {
            match section.name.as_str() {
                "General" => general = Some(parse_general(&section, &point_re)?),
                "LCD display" => lcd = Some(parse_lcd(&section, &point_re)?),
                "Rollbars" => rollbars = Some(parse_rollbars(&section, &point_re)?),
                "Shifter" => shifter = Some(parse_shifter(&section, &point_re)?),
                _ if section.contains("needle_image_path") => {
                    let spec = parse_gauge(&section, &point_re)?;
                    gauges.insert(spec.name.clone(), spec);
                }
                other => {
                    tracing::warn!("Skipping unrecognized layout section [{}]", other);
                }
            }
        }

        let (cockpit_path, thresholds, lights) =
            general.ok_or_else(|| ConfigError::MissingSection("General".to_string()))?;

        Ok(Self {
            cockpit_path,
            thresholds,
            lights,
            lcd: lcd.ok_or_else(|| ConfigError::MissingSection("LCD display".to_string()))?,
            rollbars: rollbars.ok_or_else(|| ConfigError::MissingSection("Rollbars".to_string()))?,
            shifter: shifter.ok_or_else(|| ConfigError::MissingSection("Shifter".to_string()))?,
            gauges,
        })
    }

    /// Look up a gauge by section name
    pub fn get_gauge(&self, name: &str) -> Option<&GaugeSpec> {
        self.gauges.get(name)
    }

    /// All non-gauge anchors, keyed by label
    ///
    /// Labels are `fuellight`, `templight`, `rpmlight`, `lcd_speed1`
    /// through `lcd_speed3`, `lcd_gear`, `front_rollbar`, `rear_rollbar`
    /// and `shifter`.
    pub fn anchors(&self) -> HashMap<String, DisplayAnchor> {
        let mut anchors = HashMap::new();
        for light in [&self.lights.fuel, &self.lights.temp, &self.lights.rpm] {
            anchors.insert(light.label.clone(), light.clone());
        }
        for (i, position) in self.lcd.speed.iter().enumerate() {
            let label = format!("lcd_speed{}", i + 1);
            anchors.insert(label.clone(), DisplayAnchor::new(label, *position));
        }
        anchors.insert(
            "lcd_gear".to_string(),
            DisplayAnchor::new("lcd_gear", self.lcd.gear),
        );
        anchors.insert(
            "front_rollbar".to_string(),
            DisplayAnchor::new("front_rollbar", self.rollbars.front),
        );
        anchors.insert(
            "rear_rollbar".to_string(),
            DisplayAnchor::new("rear_rollbar", self.rollbars.rear),
        );
        anchors.insert(
            "shifter".to_string(),
            DisplayAnchor::new("shifter", self.shifter.anchor),
        );
        anchors
    }

    /// Look up a single anchor by label
    pub fn get_anchor(&self, label: &str) -> Option<DisplayAnchor> {
        self.anchors().remove(label)
    }

    /// Every asset path the layout references, with its section
    ///
    /// Paths are relative to the layout file. Gauges are listed in name
    /// order so the result is stable.
    pub fn asset_paths(&self) -> Vec<(String, String)> {
        let mut paths = vec![("General".to_string(), self.cockpit_path.clone())];
        for light in [&self.lights.fuel, &self.lights.temp, &self.lights.rpm] {
            if let Some(image) = &light.image_path {
                paths.push(("General".to_string(), image.clone()));
            }
        }
        let mut names: Vec<&String> = self.gauges.keys().collect();
        names.sort();
        for name in names {
            paths.push((name.clone(), self.gauges[name].needle_image_path.clone()));
        }
        paths.push(("LCD display".to_string(), self.lcd.lcdnums_path.clone()));
        for image in &self.rollbars.images {
            paths.push(("Rollbars".to_string(), image.clone()));
        }
        for image in &self.shifter.images {
            paths.push(("Shifter".to_string(), image.clone()));
        }
        paths
    }

    /// Verify that every referenced asset exists under `base`
    pub fn check_assets(&self, base: &Path) -> Result<(), ConfigError> {
        for (section, relative) in self.asset_paths() {
            if !base.join(&relative).is_file() {
                return Err(ConfigError::MissingAsset {
                    section,
                    path: relative,
                });
            }
        }
        Ok(())
    }

    /// Resolve a sprite reference to its asset path
    ///
    /// The temp light reuses the fuel light sprite when the layout does
    /// not provide a dedicated one. Digits all resolve to the shared
    /// strip image.
    pub fn sprite_path(&self, sprite: &SpriteRef) -> Option<&str> {
        match sprite {
            SpriteRef::Cockpit => Some(self.cockpit_path.as_str()),
            SpriteRef::Needle(name) => self
                .gauges
                .get(name)
                .map(|gauge| gauge.needle_image_path.as_str()),
            SpriteRef::FuelLight => self.lights.fuel.image_path.as_deref(),
            SpriteRef::TempLight => self
                .lights
                .temp
                .image_path
                .as_deref()
                .or(self.lights.fuel.image_path.as_deref()),
            SpriteRef::RpmLight => self.lights.rpm.image_path.as_deref(),
            SpriteRef::LcdDigit(_) => Some(self.lcd.lcdnums_path.as_str()),
            SpriteRef::RollbarStage(stage) => self
                .rollbars
                .images
                .get(*stage as usize)
                .map(String::as_str),
            SpriteRef::ShifterGear(gear) => self
                .shifter
                .images
                .get((*gear as usize).wrapping_sub(1))
                .map(String::as_str),
        }
    }

    /// Run the full consistency check over this layout
    ///
    /// Pass an asset directory to include file-existence checks, or
    /// `None` for a structure-only report.
    pub fn validate(&self, asset_base: Option<&Path>) -> ValidationReport {
        validation::validate(self, asset_base)
    }
}

fn parse_general(
    section: &RawSection,
    point_re: &Regex,
) -> Result<(String, WarningThresholds, LightAnchors), ConfigError> {
    let cockpit_path = section.require("cockpit_path")?.to_string();

    let thresholds = WarningThresholds {
        low_fuel: section.require_f64("low_fuel")?,
        critical_fuel: section.require_f64("critical_fuel")?,
        high_temp: section.require_f64("high_temp")?,
        high_rpm: section.require_f64("high_rpm")?,
    };

    let temp_position = section.require_point(point_re, "templight")?;
    let temp = match section.get("templight_path") {
        Some(path) => DisplayAnchor::with_image("templight", temp_position, path),
        None => DisplayAnchor::new("templight", temp_position),
    };

    let lights = LightAnchors {
        fuel: DisplayAnchor::with_image(
            "fuellight",
            section.require_point(point_re, "fuellight")?,
            section.require("fuellight_path")?,
        ),
        temp,
        rpm: DisplayAnchor::with_image(
            "rpmlight",
            section.require_point(point_re, "rpmlight")?,
            section.require("rpmlight_path")?,
        ),
    };

    Ok((cockpit_path, thresholds, lights))
}

fn parse_lcd(section: &RawSection, point_re: &Regex) -> Result<LcdLayout, ConfigError> {
    Ok(LcdLayout {
        lcdnums_path: section.require("lcdnums_path")?.to_string(),
        speed: [
            section.require_point(point_re, "lcd_speed1")?,
            section.require_point(point_re, "lcd_speed2")?,
            section.require_point(point_re, "lcd_speed3")?,
        ],
        gear: section.require_point(point_re, "lcd_gear")?,
    })
}

fn parse_rollbars(section: &RawSection, point_re: &Regex) -> Result<RollbarSprites, ConfigError> {
    let mut images: [String; 8] = Default::default();
    for (i, slot) in images.iter_mut().enumerate() {
        *slot = section.require(&format!("rollbar{}", i + 1))?.to_string();
    }
    Ok(RollbarSprites {
        images,
        front: section.require_point(point_re, "front_rollbar")?,
        rear: section.require_point(point_re, "rear_rollbar")?,
    })
}

fn parse_shifter(section: &RawSection, point_re: &Regex) -> Result<ShifterSprites, ConfigError> {
    let mut images: [String; 6] = Default::default();
    for (i, slot) in images.iter_mut().enumerate() {
        *slot = section.require(&format!("gear{}", i + 1))?.to_string();
    }
    Ok(ShifterSprites {
        images,
        anchor: section.require_point(point_re, "shifter")?,
    })
}

fn parse_gauge(section: &RawSection, point_re: &Regex) -> Result<GaugeSpec, ConfigError> {
    Ok(GaugeSpec {
        name: section.name.clone(),
        needle_image_path: section.require("needle_image_path")?.to_string(),
        pivot: section.require_point(point_re, "pivot")?,
        gauge_center: section.require_point(point_re, "gauge_center")?,
        min_value: section.require_f64("min_value")?,
        max_value: section.require_f64("max_value")?,
        section_one_end: section.require_f64("section_one_end")?,
        section_two_start: section.require_f64("section_two_start")?,
        min_angle: section.require_f64("min_angle")?,
        max_angle_section_one: section.require_f64("max_angle_section_one")?,
        max_angle_section_two: section.require_f64("max_angle_section_two")?,
    })
}
