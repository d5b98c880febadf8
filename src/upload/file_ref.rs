//! File references from typed or dropped paths
//!
//! Terminals deliver a dropped file as pasted text. Depending on the
//! terminal that text may be quoted, prefixed with `file://` or carry
//! shell escapes, so both entry points go through `normalize_path`.

use crate::error::UploadError;
use std::path::{Path, PathBuf};

/// A file offered to an upload dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    pub name: String,
    pub size: u64,
    pub path: PathBuf,
}

impl FileRef {
    /// Stat a path and build a reference from its metadata
    pub fn from_path(path: &Path) -> Result<Self, UploadError> {
        let metadata = std::fs::metadata(path).map_err(|e| UploadError::FileUnavailable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        if !metadata.is_file() {
            return Err(UploadError::FileUnavailable {
                path: path.to_path_buf(),
                reason: "not a regular file".to_string(),
            });
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            name,
            size: metadata.len(),
            path: path.to_path_buf(),
        })
    }

    /// Normalize raw input text and stat the result
    pub fn from_input(text: &str) -> Result<Self, UploadError> {
        let path = normalize_path(text).ok_or(UploadError::EmptyPath)?;
        Self::from_path(&path)
    }
}

/// Turn typed or pasted text into a filesystem path
///
/// Only the first line is used. Returns `None` for blank input.
pub fn normalize_path(text: &str) -> Option<PathBuf> {
    let mut s = text.lines().next().unwrap_or("").trim();

    for quote in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            s = &s[1..s.len() - 1];
            break;
        }
    }

    if let Some(rest) = s.strip_prefix("file://") {
        s = rest;
    }

    let unescaped = unescape(s.trim());
    if unescaped.is_empty() {
        None
    } else {
        Some(PathBuf::from(unescaped))
    }
}

/// Drop shell backslash escapes (`\ ` → ` `, `\\` → `\`)
fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next) => out.push(next),
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}
