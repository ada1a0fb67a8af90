//! # icr2dash Core Library
//!
//! Core functionality for the icr2dash cockpit overlay for IndyCar Racing 2.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//!
//! This library provides:
//! - Overlay layout and keybinding INI parsing
//! - Needle angle mapping for the cockpit gauges
//! - Frame planning (which sprite goes where, at what rotation)
//! - Warning light blinking and boost needle smoothing
//! - H-shifter emulation and lap telemetry capture
//!
//! ## Example
//!
//! ```rust,ignore
//! use icr2dash_core::{config::DashLayout, needle};
//!
//! // Load the overlay layout shipped next to the cockpit art
//! let layout = DashLayout::from_file("overlay.ini")?;
//!
//! // Where does the tach needle point at 10,200 RPM?
//! let tach = layout.get_gauge("Tachometer").unwrap();
//! let angle = needle::angle_for(tach, 1020.0)?;
//! println!("needle angle: {:.1} degrees", angle);
//! ```

pub mod config;
pub mod demo;
pub mod frame;
pub mod lights;
pub mod needle;
pub mod session;
pub mod shifter;
pub mod state;
pub mod telemetry;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{
        AppSettings, DashLayout, DisplayAnchor, GaugeSpec, Point, ValidationReport,
    };
    pub use crate::demo::DemoInstruments;
    pub use crate::frame::{FrameItem, FramePlan, FramePlanner, SpritePlacement, SpriteRef};
    pub use crate::lights::{LightStates, WarningLights};
    pub use crate::needle::{angle_for, needle_placement};
    pub use crate::session::{DashSession, ReadingSender};
    pub use crate::shifter::{ShiftCommand, ShiftDirection, Shifter, ShifterInput};
    pub use crate::state::{DashState, InstrumentReading};
    pub use crate::telemetry::{LapRecord, LapRecorder, SessionWriter};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
