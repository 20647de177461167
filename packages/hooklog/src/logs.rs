//! The hook log directory.
//!
//! Logs are plain text, one timestamped entry per line, and only ever
//! appended to. Rotation copies a log into `backups/` under a timestamped
//! name and then truncates it.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use color_eyre::eyre::{Context, Result};

/// Every tool call the read monitor sees.
pub const ACTIVITY_LOG: &str = "read-log.txt";

/// Conversation transcript kept by other hooks; rotated alongside ours.
pub const CONVERSATION_LOG: &str = "conversation-log.txt";

/// Raw hook input, for debugging hook configuration.
pub const DEBUG_LOG: &str = "debug-hook.txt";

/// Logs rotated at session boundaries.
pub const KNOWN_LOGS: [&str; 3] = [ACTIVITY_LOG, CONVERSATION_LOG, DEBUG_LOG];

/// Subdirectory of the log directory holding rotated copies.
pub const BACKUP_DIR: &str = "backups";

/// Default log directory, relative to the project root.
pub const DEFAULT_LOG_DIR: &str = ".claude/logs";

/// Format `at` as the `[...]` prefix of a log entry.
pub fn entry_timestamp(at: &DateTime<Local>) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format `at` as the suffix of a rotated log's file name.
pub fn backup_timestamp(at: &DateTime<Local>) -> String {
    at.format("%Y%m%d_%H%M%S").to_string()
}

/// Name of the rotated copy of `log`, e.g. `read-log_20250101_120000.txt`.
pub fn backup_name(log: &str, at: &DateTime<Local>) -> String {
    let path = Path::new(log);
    let stem = path.file_stem().unwrap_or(path.as_os_str()).to_string_lossy();
    let stamp = backup_timestamp(at);
    match path.extension() {
        Some(ext) => format!("{stem}_{stamp}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{stamp}"),
    }
}

/// A directory of hook logs.
#[derive(Debug, Clone)]
pub struct LogDir {
    root: PathBuf,
}

impl LogDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self, log: &str) -> PathBuf {
        self.root.join(log)
    }

    pub fn backup_dir(&self) -> PathBuf {
        self.root.join(BACKUP_DIR)
    }

    /// Size of `log` in bytes; zero when it does not exist.
    pub fn size(&self, log: &str) -> u64 {
        fs::metadata(self.path(log)).map_or(0, |meta| meta.len())
    }

    /// Append `entry` to `log`, stamped with the current time.
    pub fn append(&self, log: &str, entry: &str) -> Result<()> {
        self.append_at(log, &Local::now(), entry)
    }

    /// Append `entry` to `log`, stamped with `at`.
    #[tracing::instrument(skip(self, entry))]
    pub fn append_at(&self, log: &str, at: &DateTime<Local>, entry: &str) -> Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("create log directory: {:?}", self.root))?;

        let path = self.path(log);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("open log: {path:?}"))?;

        // One write per entry keeps concurrent hook invocations from
        // splitting each other's lines.
        let line = format!("[{}] {entry}\n", entry_timestamp(at));
        file.write_all(line.as_bytes())
            .with_context(|| format!("append to log: {path:?}"))
    }

    /// Copy every non-empty known log into the backup directory.
    ///
    /// Returns the names of the copies, in [`KNOWN_LOGS`] order.
    #[tracing::instrument(skip(self))]
    pub fn backup_all(&self, at: &DateTime<Local>) -> Result<Vec<String>> {
        let backup_dir = self.backup_dir();
        fs::create_dir_all(&backup_dir)
            .with_context(|| format!("create backup directory: {backup_dir:?}"))?;

        let mut backed_up = Vec::new();
        for log in KNOWN_LOGS {
            if self.size(log) == 0 {
                continue;
            }

            let name = backup_name(log, at);
            let target = backup_dir.join(&name);
            match fs::copy(self.path(log), &target) {
                Ok(_) => backed_up.push(name),
                Err(error) if error.kind() == ErrorKind::NotFound => {
                    tracing::debug!(?log, "logs.backup.vanished");
                }
                Err(error) => {
                    return Err(error).with_context(|| format!("back up {log} to {target:?}"));
                }
            }
        }

        tracing::debug!(?backed_up, "logs.backup.done");
        Ok(backed_up)
    }

    /// Empty every known log, creating the ones that do not exist.
    #[tracing::instrument(skip(self))]
    pub fn truncate_all(&self) -> Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("create log directory: {:?}", self.root))?;

        for log in KNOWN_LOGS {
            let path = self.path(log);
            fs::write(&path, "").with_context(|| format!("truncate log: {path:?}"))?;
        }

        Ok(())
    }
}
