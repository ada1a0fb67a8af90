//! Telemetry file output
//!
//! One CSV per session, named from the wall clock at session start.

use chrono::{DateTime, Local};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::LapRecord;

/// CSV header row
pub const CSV_HEADER: &str = "lap,laptime,fuel";

/// Session file name for a start time, e.g. `telemetry_2025-01-21_14-30-45.csv`
pub fn session_filename(started: DateTime<Local>) -> String {
    format!("telemetry_{}.csv", started.format("%Y-%m-%d_%H-%M-%S"))
}

/// Default telemetry directory: `Documents/icr2dash/telemetry`, or under
/// the home directory when there is no documents folder
pub fn default_dir() -> io::Result<PathBuf> {
    let base = dirs::document_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine documents or home directory",
            )
        })?;
    Ok(base.join("icr2dash").join("telemetry"))
}

/// Write a complete set of lap records to a CSV file
pub fn write_csv<'a, P: AsRef<Path>>(
    path: P,
    records: impl IntoIterator<Item = &'a LapRecord>,
) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{}", CSV_HEADER)?;
    for record in records {
        write_record(&mut writer, record)?;
    }

    writer.flush()?;
    Ok(())
}

fn write_record<W: Write>(writer: &mut W, record: &LapRecord) -> io::Result<()> {
    writeln!(
        writer,
        "{},{:.3},{:.2}",
        record.lap, record.laptime, record.fuel
    )
}

/// Incremental session log: header at creation, one row per completed lap
///
/// Rows go straight to the file, so an interrupted session keeps every
/// lap it finished.
#[derive(Debug)]
pub struct SessionWriter {
    path: PathBuf,
    file: File,
}

impl SessionWriter {
    /// Create `dir` if needed and start a session file named for `started`
    pub fn create_in(dir: &Path, started: DateTime<Local>) -> io::Result<Self> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(session_filename(started));
        let mut file = File::create(&path)?;
        writeln!(file, "{}", CSV_HEADER)?;
        Ok(Self { path, file })
    }

    /// Path of the session file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one completed lap
    pub fn append(&mut self, record: &LapRecord) -> io::Result<()> {
        write_record(&mut self.file, record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_session_filename() {
        let started = Local.with_ymd_and_hms(2025, 1, 21, 14, 30, 45).unwrap();
        assert_eq!(
            session_filename(started),
            "telemetry_2025-01-21_14-30-45.csv"
        );
    }

    #[test]
    fn test_write_csv_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("laps.csv");

        let records = [
            LapRecord {
                lap: 1,
                laptime: 62.125,
                fuel: 38.25,
            },
            LapRecord {
                lap: 2,
                laptime: 61.5,
                fuel: 36.5,
            },
        ];
        write_csv(&path, &records).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "lap,laptime,fuel\n1,62.125,38.25\n2,61.500,36.50\n");
    }

    #[test]
    fn test_session_writer_appends_incrementally() {
        let dir = tempfile::tempdir().unwrap();
        let started = Local.with_ymd_and_hms(2025, 1, 21, 14, 30, 45).unwrap();

        let mut writer = SessionWriter::create_in(dir.path(), started).unwrap();
        assert_eq!(
            writer.path().file_name().unwrap().to_str().unwrap(),
            "telemetry_2025-01-21_14-30-45.csv"
        );

        writer
            .append(&LapRecord {
                lap: 1,
                laptime: 58.75,
                fuel: 39.5,
            })
            .unwrap();

        let content = std::fs::read_to_string(writer.path()).unwrap();
        assert_eq!(content, "lap,laptime,fuel\n1,58.750,39.50\n");
    }
}
