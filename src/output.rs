//! Output management module
//!
//! Writes the email collection as a single `", "`-joined line. Missing parent
//! directories are created first; an existing file is truncated.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Access, FilterError, Result};

/// Separator placed between emails in the output file
pub const DELIMITER: &str = ", ";

/// Buffered writer for a delimited line of items
pub struct OutputWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    items_written: u64,
    bytes_written: u64,
}

impl OutputWriter {
    /// Create (or truncate) the destination, creating parent directories
    pub fn create(path: &Path) -> Result<Self> {
        ensure_parent_dir(path)?;

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(|e| FilterError::from_io(e, path, Access::Write))?;

        Ok(Self {
            writer: BufWriter::new(file),
            path: path.to_path_buf(),
            items_written: 0,
            bytes_written: 0,
        })
    }

    /// Append one item, preceded by the delimiter unless it is the first
    pub fn write_item(&mut self, item: &str) -> Result<()> {
        if self.items_written > 0 {
            self.write_raw(DELIMITER)?;
        }
        self.write_raw(item)?;
        self.items_written += 1;
        Ok(())
    }

    fn write_raw(&mut self, data: &str) -> Result<()> {
        self.writer
            .write_all(data.as_bytes())
            .map_err(|e| FilterError::from_io(e, &self.path, Access::Write))?;
        self.bytes_written += data.len() as u64;
        Ok(())
    }

    /// Flush the buffer to disk
    pub fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| FilterError::from_io(e, &self.path, Access::Write))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn items_written(&self) -> u64 {
        self.items_written
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }
}

impl Drop for OutputWriter {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}

/// Write `items` to `path` as one `", "`-joined line with no trailing newline
///
/// An empty slice produces an empty file. Returns the number of bytes written.
pub fn write_emails<S: AsRef<str>>(items: &[S], path: &Path) -> Result<u64> {
    let mut writer = OutputWriter::create(path)?;

    for item in items {
        writer.write_item(item.as_ref())?;
    }
    writer.flush()?;

    log::debug!(
        "wrote {} item(s), {} bytes to {:?}",
        writer.items_written(),
        writer.bytes_written(),
        writer.path()
    );
    Ok(writer.bytes_written())
}

/// Ensure every ancestor directory of `path` exists
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            log::debug!("creating directory {:?}", parent);
            fs::create_dir_all(parent).map_err(|e| FilterError::from_io(e, parent, Access::Write))
        }
        _ => Ok(()),
    }
}
