//! Overlay Configuration Stores
//!
//! Two INI files drive the overlay:
//! - `overlay.ini` describes one cockpit skin: background art, gauge
//!   geometry, warning lights, LCD readouts, rollbar and shifter sprites
//! - `icr2dash.ini` holds application settings: engine pacing, boost
//!   needle response, gear shifting keys, cockpit detection probes
//!
//! Both share the same line-oriented front end and fail on the first
//! structural problem. Softer consistency checks live in [`validation`].

pub(crate) mod parser;
mod error;
mod anchor;
mod gauge;
mod layout;
mod settings;
pub mod validation;

pub use error::ConfigError;
pub use anchor::{DisplayAnchor, Point};
pub use gauge::{GaugeSpec, STANDARD_GAUGES};
pub use layout::{
    DashLayout, LcdLayout, LightAnchors, RollbarSprites, ShifterSprites, WarningThresholds,
};
pub use settings::{
    AppSettings, BoostResponse, CockpitPixel, GeneralSettings, OverlayPositioning,
    ShiftingSettings,
};
pub use validation::{ValidationError, ValidationReport, ValidationWarning};
