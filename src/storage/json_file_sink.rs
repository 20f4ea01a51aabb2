use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;

use super::RecordSink;
use crate::record::Record;

#[cfg(unix)]
const SNAPSHOT_MODE: u32 = 0o644;

/// Writes the record set as an indented JSON array to a single file.
///
/// Every write goes to a temporary file next to the target and is then renamed
/// over it, so readers only ever see a complete snapshot.
#[derive(Debug)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Sink for `file_name` inside `dir`. The directory must already exist.
    pub fn in_dir(dir: &Path, file_name: &str) -> Self {
        Self::new(dir.join(file_name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSink for JsonFileSink {
    fn persist(&mut self, records: &[Record]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
        // Temporary files are owner-only; snapshots are regular output files
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tmp.as_file()
                .set_permissions(std::fs::Permissions::from_mode(SNAPSHOT_MODE))
                .context("Failed to set snapshot permissions")?;
        }

        {
            let mut writer = BufWriter::new(tmp.as_file());
            let mut serializer =
                serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
            records
                .serialize(&mut serializer)
                .context("Failed to serialize records")?;
            writer.flush().context("Failed to write records")?;
        }

        tmp.persist(&self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        debug!("Saved {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}

/// Reads back a snapshot written by [`JsonFileSink`].
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let records = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(records)
}
