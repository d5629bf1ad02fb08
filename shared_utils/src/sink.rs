//! JSON output sinks.
//!
//! Every output unit (a summary record, a paint array, `dims.json`) is one file.
//! [`DirSink`] writes each file to a temporary sibling and renames it into
//! place, so a reader never observes a half-written file. [`MemorySink`] keeps
//! the encoded values in a map for assertions.

use std::{
    collections::BTreeMap,
    io::Write,
    path::{Component, Path, PathBuf},
};

use serde::Serialize;
use snafu::{Backtrace, ResultExt, Snafu, ensure};
use tempfile::NamedTempFile;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SinkError {
    /// The value could not be encoded as JSON.
    #[snafu(display("Failed to encode {}: {source}", path.display()))]
    Encode {
        path: PathBuf,
        source: serde_json::Error,
        backtrace: Backtrace,
    },

    /// A file I/O error (directory creation, temp file, rename).
    #[snafu(display("Failed to write {}: {source}", path.display()))]
    Write {
        path: PathBuf,
        source: std::io::Error,
        backtrace: Backtrace,
    },

    /// The relative path would escape the sink root (absolute, `..`, empty).
    #[snafu(display("Refusing to write outside the output root: {}", path.display()))]
    UnsafePath { path: PathBuf, backtrace: Backtrace },
}

pub trait JsonSink {
    /// What a successful write hands back (a path on disk, or nothing).
    type Output;

    /// Write `value` as pretty JSON at `rel`, relative to the sink root.
    fn write_json<T: Serialize + ?Sized>(
        &mut self,
        rel: &Path,
        value: &T,
    ) -> Result<Self::Output, SinkError>;
}

/// Writes under a root directory, creating parents as needed.
#[derive(Debug, Clone)]
pub struct DirSink {
    root: PathBuf,
    written: usize,
}

impl DirSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            written: 0,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of files written so far.
    pub fn written(&self) -> usize {
        self.written
    }
}

impl JsonSink for DirSink {
    type Output = PathBuf;

    fn write_json<T: Serialize + ?Sized>(
        &mut self,
        rel: &Path,
        value: &T,
    ) -> Result<PathBuf, SinkError> {
        ensure_relative(rel)?;
        let target = self.root.join(rel);
        write_json_atomic(&target, value)?;
        self.written += 1;
        Ok(target)
    }
}

/// In-memory sink; values are re-encoded to `serde_json::Value` for inspection.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub files: BTreeMap<PathBuf, serde_json::Value>,
}

impl JsonSink for MemorySink {
    type Output = ();

    fn write_json<T: Serialize + ?Sized>(&mut self, rel: &Path, value: &T) -> Result<(), SinkError> {
        ensure_relative(rel)?;
        let v = serde_json::to_value(value).context(EncodeSnafu { path: rel })?;
        self.files.insert(rel.to_path_buf(), v);
        Ok(())
    }
}

/// Pretty-print `value` (2-space indent) and atomically replace `path` with it.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), SinkError> {
    let bytes = serde_json::to_vec_pretty(value).context(EncodeSnafu { path })?;
    write_bytes_atomic(path, &bytes)
}

/// Atomically replace `path` with `bytes`, creating parent directories.
pub fn write_bytes_atomic(path: &Path, bytes: &[u8]) -> Result<(), SinkError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&parent).context(WriteSnafu { path: &parent })?;

    let mut tmp = NamedTempFile::new_in(&parent).context(WriteSnafu { path })?;
    tmp.write_all(bytes).context(WriteSnafu { path })?;
    tmp.flush().context(WriteSnafu { path })?;
    tmp.persist(path)
        .map_err(|e| e.error)
        .context(WriteSnafu { path })?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote file");
    Ok(())
}

fn ensure_relative(rel: &Path) -> Result<(), SinkError> {
    let ok = rel.components().count() > 0
        && rel.components().all(|c| matches!(c, Component::Normal(_)));
    ensure!(ok, UnsafePathSnafu { path: rel });
    Ok(())
}
