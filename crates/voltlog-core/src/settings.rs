use crate::bus::BusConfig;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use voltlog_decode::VoltageReference;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("base_interval_secs must be at least 1")]
    ZeroInterval,
    #[error("base_interval_secs * max_backoff exceeds {max} s", max = MAX_SLEEP_SECS)]
    IntervalTooLong,
}

/// Upper bound for a single sleep, `base_interval_secs * max_backoff`.
pub const MAX_SLEEP_SECS: u64 = 7 * 24 * 3600;

/// Runtime settings. Every field has a default, so an empty JSON object is
/// a valid settings file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub log_path: PathBuf,
    pub bus: BusConfig,
    pub reference: VoltageReference,
    pub base_interval_secs: u64,
    pub max_backoff: u32,
    /// Local wall-clock time the elapsed-seconds column counts from.
    pub epoch: NaiveDateTime,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from("voltage.log"),
            bus: BusConfig::default(),
            reference: VoltageReference::default(),
            base_interval_secs: 60,
            max_backoff: 10,
            epoch: NaiveDate::from_ymd_opt(2019, 1, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .unwrap_or_default(),
        }
    }
}

impl Settings {
    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.base_interval_secs == 0 {
            return Err(SettingsError::ZeroInterval);
        }
        match self
            .base_interval_secs
            .checked_mul(u64::from(self.max_backoff.max(1)))
        {
            Some(longest) if longest <= MAX_SLEEP_SECS => Ok(()),
            _ => Err(SettingsError::IntervalTooLong),
        }
    }

    /// `Ok(None)` when there is no file at `path`.
    pub fn load(path: &Path) -> Result<Option<Self>, SettingsError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_json(&text).map(Some),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SettingsError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn base_interval(&self) -> Duration {
        Duration::from_secs(self.base_interval_secs)
    }

    /// The epoch in local time. A time skipped by a DST jump falls back to
    /// reading it as UTC.
    pub fn epoch_local(&self) -> DateTime<Local> {
        Local
            .from_local_datetime(&self.epoch)
            .earliest()
            .unwrap_or_else(|| Local.from_utc_datetime(&self.epoch))
    }
}
