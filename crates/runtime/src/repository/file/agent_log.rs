//! JSON-lines agent log on disk.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Serialize;

use crate::repository::record::CompactRecord;
use crate::repository::{AgentLog, AgentLogRecord, RepositoryError, Result};

/// Appends every record to two files in one directory:
///
/// ```text
/// agent-logs.json          full records, prompts included
/// agent-logs-compact.json  game/turn tags and the parsed response only
/// ```
///
/// Both are JSON lines. Existing files are appended to, so several batches can
/// share an experiment directory.
pub struct FileAgentLog {
    full_path: PathBuf,
    compact_path: PathBuf,
    full: Mutex<BufWriter<File>>,
    compact: Mutex<BufWriter<File>>,
}

impl FileAgentLog {
    pub const FULL_FILE: &'static str = "agent-logs.json";
    pub const COMPACT_FILE: &'static str = "agent-logs-compact.json";

    /// Opens (or creates) both log files under `dir`.
    pub fn create(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let full_path = dir.join(Self::FULL_FILE);
        let compact_path = dir.join(Self::COMPACT_FILE);
        let full = open_append(&full_path)?;
        let compact = open_append(&compact_path)?;

        tracing::debug!(
            target: "runtime::agent",
            "Agent log at {}",
            full_path.display()
        );

        Ok(Self {
            full_path,
            compact_path,
            full: Mutex::new(BufWriter::new(full)),
            compact: Mutex::new(BufWriter::new(compact)),
        })
    }

    pub fn full_path(&self) -> &Path {
        &self.full_path
    }

    pub fn compact_path(&self) -> &Path {
        &self.compact_path
    }
}

fn open_append(path: &Path) -> Result<File> {
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

fn write_line<T: Serialize>(writer: &Mutex<BufWriter<File>>, value: &T) -> Result<()> {
    let line = serde_json::to_string(value).map_err(|e| RepositoryError::Json(e.to_string()))?;
    let mut writer = writer.lock().map_err(|_| RepositoryError::LockPoisoned)?;
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\n")?;
    // Records are read back while the game is still running.
    writer.flush()?;
    Ok(())
}

impl AgentLog for FileAgentLog {
    fn append(&self, record: &AgentLogRecord) -> Result<()> {
        write_line(&self.full, record)?;
        write_line(&self.compact, &CompactRecord::from(record))
    }

    fn flush(&self) -> Result<()> {
        for writer in [&self.full, &self.compact] {
            writer
                .lock()
                .map_err(|_| RepositoryError::LockPoisoned)?
                .flush()?;
        }
        Ok(())
    }
}
