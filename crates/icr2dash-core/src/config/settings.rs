//! Application settings store
//!
//! Loads `icr2dash.ini`: engine pacing, overlay position nudging, boost
//! needle response, gear shifting keys and the cockpit-detection pixel
//! table. Every section is optional and falls back to defaults, but a
//! section that is present must carry all of its keys.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use super::anchor::Point;
use super::error::ConfigError;
use super::parser::{self, RawSection};

/// Engine pacing and capture tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Frame interval in milliseconds
    pub loop_ms: u64,
    /// Keyboard poll interval in seconds
    pub key_listener_delay: f64,
    /// Brightness threshold separating lit LCD segments from background
    pub lcd_detect_threshold: u32,
    /// Window title keywords that identify the simulator
    pub app_keywords: Vec<String>,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            loop_ms: 16,
            key_listener_delay: 0.01,
            lcd_detect_threshold: 100,
            app_keywords: Vec::new(),
        }
    }
}

/// Manual overlay position correction, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OverlayPositioning {
    /// Horizontal nudge applied to the computed overlay origin
    pub x_adjustment: i32,
    /// Vertical nudge
    pub y_adjustment: i32,
}

/// Boost needle ramp rates
///
/// Zero rates freeze the needle between snaps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct BoostResponse {
    /// Gauge units per second while boost is rising
    pub climb_rate_per_second: f64,
    /// Gauge units per second while boost is falling
    pub drop_rate_per_second: f64,
}

/// H-shifter emulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ShiftingSettings {
    /// Master switch for the shifter subsystem
    pub hshifter: bool,
    /// Require the clutch to be held while selecting a gear
    pub clutch: bool,
    /// Physical keys bound to gears 1-6, in order
    pub gear_keys: [String; 6],
    /// Physical clutch key
    pub clutch_key: String,
    /// Key the simulator expects for an upshift
    pub shiftup_key: String,
    /// Key the simulator expects for a downshift
    pub shiftdown_key: String,
    /// Pause between queued upshift keystrokes, in seconds
    pub upshift_delay: f64,
    /// Pause between queued downshift keystrokes, in seconds
    pub downshift_delay: f64,
    /// Volume for the grinding sound when shifting without the clutch
    pub gear_grinding_volume: f64,
}

/// One probe pixel used to recognize the cockpit view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CockpitPixel {
    /// Key name from the settings file
    pub label: String,
    /// Probe position in game-window coordinates
    pub position: Point,
    /// Expected RGB color at the probe
    pub color: [u8; 3],
}

/// Parsed application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppSettings {
    /// Engine pacing and capture tuning
    pub general: GeneralSettings,
    /// Overlay position correction
    pub positioning: OverlayPositioning,
    /// Boost needle response
    pub boost_response: BoostResponse,
    /// H-shifter emulation
    pub shifting: ShiftingSettings,
    /// Cockpit-detection probe pixels
    pub cockpit_pixels: Vec<CockpitPixel>,
}

impl AppSettings {
    /// Load a settings file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = parser::read_config_file(path.as_ref())?;
        Self::from_str(&content)
    }

    /// Parse settings content
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let mut settings = Self::default();

        for section in parser::collect_sections(content)? {
            match section.name.as_str() {
                "General" => settings.general = parse_general(&section)?,
                "Overlay positioning" => settings.positioning = parse_positioning(&section)?,
                "Boost rise and fall speed" => settings.boost_response = parse_boost(&section)?,
                "Gear shifting" => settings.shifting = parse_shifting(&section)?,
                "Cockpit detection" => settings.cockpit_pixels = parse_pixels(&section)?,
                other => {
                    tracing::warn!("Skipping unrecognized settings section [{}]", other);
                }
            }
        }

        Ok(settings)
    }
}

fn parse_int<T: FromStr>(section: &RawSection, field: &str) -> Result<T, ConfigError> {
    let raw = section.require(field)?;
    raw.parse()
        .map_err(|_| section.invalid(field, format!("expected an integer, got '{raw}'")))
}

fn parse_general(section: &RawSection) -> Result<GeneralSettings, ConfigError> {
    let keywords = section
        .require("app_keywords")?
        .split(',')
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty())
        .map(String::from)
        .collect();

    Ok(GeneralSettings {
        loop_ms: parse_int(section, "loop_ms")?,
        key_listener_delay: section.require_f64("key_listener_delay")?,
        lcd_detect_threshold: parse_int(section, "lcd_detect_threshold")?,
        app_keywords: keywords,
    })
}

fn parse_positioning(section: &RawSection) -> Result<OverlayPositioning, ConfigError> {
    Ok(OverlayPositioning {
        x_adjustment: parse_int(section, "x_adjustment")?,
        y_adjustment: parse_int(section, "y_adjustment")?,
    })
}

fn parse_boost(section: &RawSection) -> Result<BoostResponse, ConfigError> {
    Ok(BoostResponse {
        climb_rate_per_second: section.require_f64("boost_climb_rate_per_second")?,
        drop_rate_per_second: section.require_f64("boost_drop_rate_per_second")?,
    })
}

fn parse_shifting(section: &RawSection) -> Result<ShiftingSettings, ConfigError> {
    let mut gear_keys: [String; 6] = Default::default();
    for (i, slot) in gear_keys.iter_mut().enumerate() {
        *slot = section
            .require(&format!("shifter_gear{}_key", i + 1))?
            .to_string();
    }

    Ok(ShiftingSettings {
        hshifter: section.require_switch("hshifter")?,
        clutch: section.require_switch("clutch")?,
        gear_keys,
        clutch_key: section.require("clutch_key")?.to_string(),
        shiftup_key: section.require("icr2_shiftup_key")?.to_string(),
        shiftdown_key: section.require("icr2_shiftdown_key")?.to_string(),
        upshift_delay: section.require_f64("upshift_delay")?,
        downshift_delay: section.require_f64("downshift_delay")?,
        gear_grinding_volume: section.require_f64("gear_grinding_volume")?,
    })
}

fn parse_pixels(section: &RawSection) -> Result<Vec<CockpitPixel>, ConfigError> {
    let mut pixels = Vec::new();

    for (key, value) in section.iter() {
        let parts: Vec<&str> = value.split(',').map(str::trim).collect();
        let bad = || section.invalid(key, format!("expected 'x, y, r, g, b', got '{value}'"));
        if parts.len() != 5 {
            return Err(bad());
        }

        let x = parts[0].parse().map_err(|_| bad())?;
        let y = parts[1].parse().map_err(|_| bad())?;
        let mut color = [0u8; 3];
        for (slot, part) in color.iter_mut().zip(&parts[2..]) {
            *slot = part.parse().map_err(|_| bad())?;
        }

        pixels.push(CockpitPixel {
            label: key.to_string(),
            position: Point::new(x, y),
            color,
        });
    }

    Ok(pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_SETTINGS: &str = r#"
[General]
loop_ms = 16
key_listener_delay = 0.01
lcd_detect_threshold = 100
app_keywords = DOSBox, INDYCAR

[Overlay positioning]
x_adjustment = -4
y_adjustment = 2

[Boost rise and fall speed]
boost_climb_rate_per_second = 20
boost_drop_rate_per_second = 40

[Gear shifting]
shifter_gear1_key = z
shifter_gear2_key = x
shifter_gear3_key = c
shifter_gear4_key = v
shifter_gear5_key = b
shifter_gear6_key = n
hshifter = ON
clutch = off
clutch_key = space
upshift_delay = 0.05
downshift_delay = 0.1
gear_grinding_volume = 0.6
icr2_shiftup_key = a
icr2_shiftdown_key = z

[Cockpit detection]
dash_edge = 10, 190, 108, 108, 108
mirror_frame = 320, 12, 64, 64, 64
"#;

    #[test]
    fn test_defaults() {
        let settings = AppSettings::default();
        assert_eq!(settings.general.loop_ms, 16);
        assert_eq!(settings.general.key_listener_delay, 0.01);
        assert_eq!(settings.general.lcd_detect_threshold, 100);
        assert!(!settings.shifting.hshifter);
        assert_eq!(settings.boost_response.climb_rate_per_second, 0.0);
        assert!(settings.cockpit_pixels.is_empty());
    }

    #[test]
    fn test_parse_full_settings() {
        let settings = AppSettings::from_str(FULL_SETTINGS).unwrap();
        assert_eq!(settings.general.app_keywords, vec!["DOSBox", "INDYCAR"]);
        assert_eq!(settings.positioning.x_adjustment, -4);
        assert_eq!(settings.boost_response.drop_rate_per_second, 40.0);
        assert!(settings.shifting.hshifter);
        assert!(!settings.shifting.clutch);
        assert_eq!(settings.shifting.gear_keys[2], "c");
        assert_eq!(settings.shifting.shiftup_key, "a");
        assert_eq!(settings.cockpit_pixels.len(), 2);
        assert_eq!(settings.cockpit_pixels[0].label, "dash_edge");
        assert_eq!(settings.cockpit_pixels[0].position, Point::new(10, 190));
        assert_eq!(settings.cockpit_pixels[0].color, [108, 108, 108]);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let settings =
            AppSettings::from_str("[Overlay positioning]\nx_adjustment = 3\ny_adjustment = 0\n")
                .unwrap();
        assert_eq!(settings.positioning.x_adjustment, 3);
        assert_eq!(settings.general.loop_ms, 16);
        assert!(settings.shifting.gear_keys.iter().all(String::is_empty));
    }

    #[test]
    fn test_switch_rejects_other_words() {
        let content = FULL_SETTINGS.replace("hshifter = ON", "hshifter = maybe");
        let err = AppSettings::from_str(&content).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref field, .. } if field == "hshifter"
        ));
    }

    #[test]
    fn test_pixel_entry_needs_five_numbers() {
        let content = "[Cockpit detection]\nprobe = 1, 2, 3\n";
        let err = AppSettings::from_str(content).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
