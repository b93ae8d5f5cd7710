use crate::os_error;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const START_MARKER: &str = "MCP3202 START";
pub const FINISH_MARKER: &str = "MCP3202 FINISHED";

#[derive(Debug, Error)]
pub enum LogWriteError {
    #[error("Can't open log file: {}", os_error::describe(.0))]
    Open(#[source] io::Error),
    #[error("Can't write log file: {}", os_error::describe(.0))]
    Write(#[source] io::Error),
}

/// Append-only text log. The file is opened and closed for every line so
/// nothing stays buffered across cycles.
#[derive(Debug, Clone)]
pub struct VoltageLog {
    path: PathBuf,
}

impl VoltageLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, line: &str) -> Result<(), LogWriteError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(LogWriteError::Open)?;
        writeln!(file, "{line}").map_err(LogWriteError::Write)?;
        // flush in case of power loss
        file.flush().map_err(LogWriteError::Write)
    }

    /// Appends `line`, reporting a failure on stderr instead of returning it.
    pub fn store(&self, line: &str) -> bool {
        match self.append(line) {
            Ok(()) => true,
            Err(e) => {
                eprintln!("{e}");
                log::debug!("write to {} failed: {e:?}", self.path.display());
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "voltlog-{}-{}.log",
            std::process::id(),
            name
        ));
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn appends_lines() {
        let path = scratch("appends");
        let log = VoltageLog::new(&path);
        assert!(log.store(START_MARKER));
        assert!(log.store("a\tb"));
        assert!(log.store(FINISH_MARKER));

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "MCP3202 START\na\tb\nMCP3202 FINISHED\n");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn keeps_existing_content() {
        let path = scratch("keeps");
        fs::write(&path, "earlier\n").unwrap();
        VoltageLog::new(&path).append("later").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "earlier\nlater\n");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn unopenable_path_is_not_fatal() {
        let path = scratch("missing-dir").join("voltage.log");
        let log = VoltageLog::new(&path);
        let err = log.append("x").unwrap_err();
        assert!(matches!(err, LogWriteError::Open(_)));
        assert!(err.to_string().starts_with("Can't open log file: "));
        assert!(!log.store("x"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn full_device_is_a_write_error() {
        let full = Path::new("/dev/full");
        if !full.exists() {
            return;
        }
        let err = VoltageLog::new(full).append("x").unwrap_err();
        assert!(matches!(err, LogWriteError::Write(_)));
        assert!(err.to_string().starts_with("Can't write log file: "));
    }
}
