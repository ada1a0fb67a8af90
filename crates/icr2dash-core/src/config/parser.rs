//! Line-oriented INI front end
//!
//! Shared tokenization for the layout and settings files: `#` comments,
//! `[Section]` headers, `key = value` pairs. Typed field access lives on
//! [`RawSection`] so each store reports errors with section and key names.

use regex::Regex;
use std::collections::HashMap;
use std::path::Path;

use super::anchor::Point;
use super::error::ConfigError;

/// Two comma-separated integers with optional whitespace, e.g. `231, 185`
pub(crate) const POINT_PATTERN: &str = r"^\s*(-?\d+)\s*,\s*(-?\d+)\s*$";

/// One `[Section]` and its key/value pairs
#[derive(Debug)]
pub(crate) struct RawSection {
    /// Section name as written in the header
    pub name: String,
    entries: HashMap<String, String>,
    order: Vec<String>,
}

impl RawSection {
    fn new(name: String) -> Self {
        Self {
            name,
            entries: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Raw value of a field, if present
    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries.get(field).map(String::as_str)
    }

    /// True when the section declares the field
    pub fn contains(&self, field: &str) -> bool {
        self.entries.contains_key(field)
    }

    /// Keys in declaration order, with their raw values
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.order.iter().filter_map(|key| {
            self.entries
                .get(key)
                .map(|value| (key.as_str(), value.as_str()))
        })
    }

    /// Required string field
    pub fn require(&self, field: &str) -> Result<&str, ConfigError> {
        self.get(field).ok_or_else(|| ConfigError::MissingField {
            section: self.name.clone(),
            field: field.to_string(),
        })
    }

    /// Required numeric field (integer or decimal)
    pub fn require_f64(&self, field: &str) -> Result<f64, ConfigError> {
        let raw = self.require(field)?;
        raw.parse().map_err(|_| self.invalid(field, format!("expected a number, got '{raw}'")))
    }

    /// Optional numeric field
    pub fn get_f64(&self, field: &str) -> Result<Option<f64>, ConfigError> {
        match self.get(field) {
            Some(raw) => {
                let value = raw
                    .parse()
                    .map_err(|_| self.invalid(field, format!("expected a number, got '{raw}'")))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Required integer field
    pub fn require_i64(&self, field: &str) -> Result<i64, ConfigError> {
        let raw = self.require(field)?;
        raw.parse().map_err(|_| self.invalid(field, format!("expected an integer, got '{raw}'")))
    }

    /// Required `x, y` point field
    pub fn require_point(&self, re: &Regex, field: &str) -> Result<Point, ConfigError> {
        let raw = self.require(field)?;
        parse_point(re, raw)
            .ok_or_else(|| self.invalid(field, format!("expected 'x, y', got '{raw}'")))
    }

    /// Required on/off switch field
    pub fn require_switch(&self, field: &str) -> Result<bool, ConfigError> {
        let raw = self.require(field)?;
        match raw.to_ascii_lowercase().as_str() {
            "on" => Ok(true),
            "off" => Ok(false),
            _ => Err(self.invalid(field, format!("expected 'on' or 'off', got '{raw}'"))),
        }
    }

    /// Build an invalid-value error for this section
    pub fn invalid(&self, field: &str, message: String) -> ConfigError {
        ConfigError::InvalidValue {
            section: self.name.clone(),
            field: field.to_string(),
            message,
        }
    }
}

/// Parse `x, y` into a point
pub(crate) fn parse_point(re: &Regex, value: &str) -> Option<Point> {
    let caps = re.captures(value)?;
    let x = caps.get(1)?.as_str().parse().ok()?;
    let y = caps.get(2)?.as_str().parse().ok()?;
    Some(Point::new(x, y))
}

/// Strip a `#` comment, respecting double quotes
fn strip_comment(line: &str) -> String {
    let mut result = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        if ch == '"' {
            in_quotes = !in_quotes;
            result.push(ch);
        } else if ch == '#' && !in_quotes {
            break;
        } else {
            result.push(ch);
        }
    }

    result
}

/// Parse a `key = value` line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let parts: Vec<&str> = line.splitn(2, '=').collect();
    if parts.len() == 2 {
        Some((parts[0].trim(), parts[1].trim()))
    } else {
        None
    }
}

/// Tokenize a whole file into raw sections
pub(crate) fn collect_sections(content: &str) -> Result<Vec<RawSection>, ConfigError> {
    let mut sections: Vec<RawSection> = Vec::new();

    for (idx, raw_line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = strip_comment(raw_line);
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            if !line.ends_with(']') {
                return Err(ConfigError::Parse {
                    line: line_no,
                    message: format!("unterminated section header: {line}"),
                });
            }
            let name = line[1..line.len() - 1].trim();
            if name.is_empty() {
                return Err(ConfigError::Parse {
                    line: line_no,
                    message: "empty section name".to_string(),
                });
            }
            sections.push(RawSection::new(name.to_string()));
            continue;
        }

        let Some((key, value)) = parse_key_value(line) else {
            return Err(ConfigError::Parse {
                line: line_no,
                message: format!("expected 'key = value', got '{line}'"),
            });
        };

        match sections.last_mut() {
            Some(section) => {
                if section
                    .entries
                    .insert(key.to_string(), value.to_string())
                    .is_none()
                {
                    section.order.push(key.to_string());
                }
            }
            None => {
                return Err(ConfigError::Parse {
                    line: line_no,
                    message: format!("'{key}' appears before any [section] header"),
                });
            }
        }
    }

    Ok(sections)
}

/// Read a configuration file, tolerating non-UTF-8 bytes
///
/// Hand-edited files are sometimes saved in Windows-1252 or Latin-1;
/// lossy conversion keeps those loadable.
pub(crate) fn read_config_file(path: &Path) -> Result<String, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) => {
            if e.kind() == std::io::ErrorKind::InvalidData {
                let bytes = std::fs::read(path)?;
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            } else {
                Err(ConfigError::Io(e))
            }
        }
    }
}
