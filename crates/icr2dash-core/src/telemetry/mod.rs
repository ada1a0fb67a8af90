//! Lap telemetry
//!
//! Captures completed laps from the dash lap clock and writes them to
//! per-session CSV files:
//! - [`LapRecorder`] turns raw clock samples into [`LapRecord`]s
//! - [`SessionWriter`] streams records to disk as laps complete
//! - [`write_csv`] dumps a full set of records in one go

mod recorder;
mod format;

pub use recorder::{LapRecord, LapRecorder};
pub use format::{default_dir, session_filename, write_csv, SessionWriter, CSV_HEADER};
