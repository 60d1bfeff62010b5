//! Audit trail of planning decisions.
//!
//! Every significant decision (rule accepted or skipped, resource skipped,
//! row written, no match) is recorded as an [`AuditEntry`]. Entries are also
//! mirrored to `tracing` under the `tagplan::audit` target so they show up in
//! console diagnostics.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::io::{self, Write};

/// Severity of an audit entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditLevel {
    Info,
    Warning,
    Error,
}

impl AuditLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditLevel::Info => "INFO",
            AuditLevel::Warning => "WARNING",
            AuditLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for AuditLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single timestamped audit line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub level: AuditLevel,
    pub message: String,
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} - {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S,%3f"),
            self.level,
            self.message
        )
    }
}

/// Ordered collection of audit entries.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditLog {
    entries: Vec<AuditEntry>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an entry at the given level.
    pub fn record(&mut self, level: AuditLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            AuditLevel::Info => tracing::info!(target: "tagplan::audit", "{}", message),
            AuditLevel::Warning => tracing::warn!(target: "tagplan::audit", "{}", message),
            AuditLevel::Error => tracing::error!(target: "tagplan::audit", "{}", message),
        }
        self.entries.push(AuditEntry {
            timestamp: Utc::now(),
            level,
            message,
        });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.record(AuditLevel::Info, message);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.record(AuditLevel::Warning, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.record(AuditLevel::Error, message);
    }

    /// Append all entries of `other`, preserving their timestamps.
    pub fn extend(&mut self, other: AuditLog) {
        self.entries.extend(other.entries);
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Messages only, in order. Mostly useful in tests.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.message.as_str())
    }

    /// Write one line per entry.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for entry in &self.entries {
            writeln!(writer, "{}", entry)?;
        }
        writer.flush()
    }
}
