//! Triangulation file I/O.
//!
//! This module provides readers for the two supported input shapes and
//! the boundary-ordered export writer.
//!
//! # Supported formats
//!
//! | Format | Extension | Load | Save | Notes |
//! |--------|-----------|------|------|-------|
//! | OFF | `.off` | ✓ | ✗ | Combined vertices + faces, triangles only |
//! | Triangle triple | `.node`/`.ele`/`.neigh` | ✓ | ✗ | Explicit neighbor table, see [`tri::load`] |
//! | pg | `.pg` | ✗ | ✓ | Boundary-ordered adjacency export |
//!
//! # Usage
//!
//! Single-file formats go through automatic extension dispatch:
//!
//! ```no_run
//! use hemline::io::{load, save};
//! use hemline::mesh::Triangulation;
//!
//! let t: Triangulation = load("mesh.off").unwrap();
//! save(&t, "mesh.pg").unwrap();
//! ```
//!
//! The explicit-neighbor format spans three files and is loaded directly:
//!
//! ```no_run
//! use hemline::io::tri;
//! use hemline::mesh::Triangulation;
//!
//! let t: Triangulation = tri::load("mesh.node", "mesh.ele", "mesh.neigh").unwrap();
//! ```

pub mod off;
pub mod pg;
pub mod tri;

use std::io::BufRead;
use std::path::Path;

use crate::error::{MeshError, Result};
use crate::mesh::{MeshIndex, Triangulation};

/// Supported single-file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Object File Format (combined vertex and face records).
    Off,
    /// Boundary-ordered adjacency format.
    Pg,
}

impl Format {
    /// Detect format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Format> {
        match ext.to_lowercase().as_str() {
            "off" => Some(Format::Off),
            "pg" => Some(Format::Pg),
            _ => None,
        }
    }

    /// Detect format from a file path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Format> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Format::from_extension)
    }
}

fn detect<P: AsRef<Path>>(path: P) -> Result<Format> {
    Format::from_path(&path).ok_or_else(|| MeshError::UnsupportedFormat {
        extension: path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)")
            .to_string(),
    })
}

/// Load a triangulation from a file with automatic format detection.
pub fn load<P: AsRef<Path>, I: MeshIndex>(path: P) -> Result<Triangulation<I>> {
    let path = path.as_ref();
    match detect(path)? {
        Format::Off => off::load(path),
        Format::Pg => Err(MeshError::LoadError {
            path: path.to_path_buf(),
            message: "pg is an export-only format".to_string(),
        }),
    }
}

/// Save a triangulation to a file with automatic format detection.
pub fn save<P: AsRef<Path>, I: MeshIndex>(mesh: &Triangulation<I>, path: P) -> Result<()> {
    let path = path.as_ref();
    match detect(path)? {
        Format::Off => Err(MeshError::SaveError {
            path: path.to_path_buf(),
            message: "OFF export is not supported".to_string(),
        }),
        Format::Pg => pg::save(mesh, path),
    }
}

/// Line-oriented record scanner shared by the text readers.
///
/// Yields trimmed data lines, skipping blanks and `#` comment lines
/// anywhere between records. Errors are plain messages; the callers wrap
/// them with the file path.
pub(crate) struct Records<B> {
    lines: std::io::Lines<B>,
    line: usize,
}

impl<B: BufRead> Records<B> {
    pub(crate) fn new(reader: B) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
        }
    }

    /// The 1-based number of the last line handed out.
    pub(crate) fn line(&self) -> usize {
        self.line
    }

    /// Next data record, or `None` at end of input.
    pub(crate) fn next_record(&mut self) -> std::result::Result<Option<String>, String> {
        for line in self.lines.by_ref() {
            self.line += 1;
            let line = line.map_err(|e| e.to_string())?;
            let data = line.trim();
            if data.is_empty() || data.starts_with('#') {
                continue;
            }
            return Ok(Some(data.to_string()));
        }
        Ok(None)
    }

    /// Next data record, or an error naming what was expected.
    pub(crate) fn expect_record(&mut self, what: &str) -> std::result::Result<String, String> {
        self.next_record()?
            .ok_or_else(|| format!("unexpected end of input, expected {what}"))
    }
}

/// Parse one whitespace-separated field of a record.
pub(crate) fn parse_field<T>(token: &str, line: usize, what: &str) -> std::result::Result<T, String>
where
    T: std::str::FromStr,
{
    token
        .parse()
        .map_err(|_| format!("line {line}: invalid {what} `{token}`"))
}

/// Wrap a reader-level message into a [`MeshError::LoadError`].
pub(crate) fn load_error(path: &Path, message: String) -> MeshError {
    MeshError::LoadError {
        path: path.to_path_buf(),
        message,
    }
}
