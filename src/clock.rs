//! Timestamp source for record creation.

use chrono::Local;

/// Display format matching the ru-RU locale (`16.10.2026, 14:03:05`).
pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y, %H:%M:%S";

/// Supplies the locale-formatted timestamp stamped on each record.
pub trait Clock {
    fn now(&self) -> String;

    /// Today's date as `YYYY-MM-DD`, used in export file names.
    fn today_iso(&self) -> String;
}

/// Wall-clock time in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> String {
        Local::now().format(TIMESTAMP_FORMAT).to_string()
    }

    fn today_iso(&self) -> String {
        Local::now().format("%Y-%m-%d").to_string()
    }
}

/// Clock frozen at a preset instant.
#[derive(Debug, Clone)]
pub struct FixedClock {
    timestamp: String,
    date: String,
}

impl FixedClock {
    pub fn new(timestamp: &str, date: &str) -> Self {
        Self {
            timestamp: timestamp.to_string(),
            date: date.to_string(),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> String {
        self.timestamp.clone()
    }

    fn today_iso(&self) -> String {
        self.date.clone()
    }
}
