//! Core data types for Waypoint.
//!
//! This module defines the fundamental data structures shared by the
//! enumerator bridge, the listing builder, and the presentation layer.
//! These types are designed to be:
//!
//! - **Deserializable**: enumeration records arrive as a literal data
//!   structure on the helper's standard output
//! - **Short-lived**: enumeration records are rebuilt on every listing
//!   refresh and never cached
//! - **Format-preserving**: display lines keep masked metadata bytes in
//!   place so downstream column parsers continue to work

use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// A ready drive reported by the enumeration helper.
///
/// Holds the single-character drive identifier (e.g., "C"). Readiness is
/// implied by inclusion: unready drives are never reported.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DriveRecord(pub String);

impl DriveRecord {
    /// Create a drive record from its identifier
    pub fn new(letter: impl Into<String>) -> Self {
        DriveRecord(letter.into())
    }

    /// The drive identifier as reported (e.g., "C")
    pub fn letter(&self) -> &str {
        &self.0
    }

    /// The drive's root path in forward-slash convention (e.g., "C:/")
    pub fn root_path(&self) -> String {
        format!("{}:/", self.0)
    }
}

impl fmt::Display for DriveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:/", self.0)
    }
}

/// A special folder reported by the enumeration helper.
///
/// Holds an absolute real-filesystem path in forward-slash convention,
/// already OS-resolved by the helper. The path may be empty (the folder is
/// unset on this system) or may point at a directory that no longer exists;
/// the listing builder filters both out before display.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpecialFolderRecord(pub String);

impl SpecialFolderRecord {
    /// Create a special-folder record from its absolute path
    pub fn new(path: impl Into<String>) -> Self {
        SpecialFolderRecord(path.into())
    }

    /// The folder path as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the helper reported this folder as unset
    pub fn is_unset(&self) -> bool {
        self.0.is_empty()
    }

    /// True when the folder exists on disk as a directory
    pub fn exists(&self) -> bool {
        !self.is_unset() && Path::new(&self.0).is_dir()
    }

    /// The last path-separator-delimited segment (the visible leaf name).
    ///
    /// Returns the whole path when it contains no separator.
    pub fn leaf(&self) -> &str {
        self.0
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or(&self.0)
    }
}

impl fmt::Display for SpecialFolderRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One full enumeration as reported by the helper process.
///
/// Produced once per listing build and owned by that build; both sequences
/// preserve the helper's ordering.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnumerationResult {
    /// Ready drives, in enumeration order
    pub drives: Vec<DriveRecord>,

    /// Special folders, in enumeration order
    pub folders: Vec<SpecialFolderRecord>,
}

/// A half-open byte range `[start, end)` within a display line that must
/// render invisible while remaining present in the underlying text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskedRange {
    /// First masked byte
    pub start: usize,

    /// One past the last masked byte
    pub end: usize,
}

impl MaskedRange {
    /// Create a new masked range
    pub fn new(start: usize, end: usize) -> Self {
        MaskedRange { start, end }
    }

    /// Number of bytes covered
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// True when the range covers no bytes
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// One synthetic directory-entry line plus the byte ranges of its text that
/// must be hidden from the user.
///
/// The masked bytes stay in `text` so that column-oriented parsing of the
/// line by the host's generic renderer still succeeds; only presentation
/// suppresses them. Masked ranges never cover the trailing name field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLine {
    /// Full line text, including masked metadata columns
    pub text: String,

    /// Byte ranges of `text` to render invisible, non-overlapping and
    /// in ascending order
    pub masked: Vec<MaskedRange>,
}

impl DisplayLine {
    /// Create an unmasked display line
    pub fn new(text: impl Into<String>) -> Self {
        DisplayLine {
            text: text.into(),
            masked: Vec::new(),
        }
    }

    /// Add a masked range
    pub fn with_mask(mut self, start: usize, end: usize) -> Self {
        debug_assert!(end <= self.text.len());
        debug_assert!(self.masked.last().map_or(true, |r| r.end <= start));
        self.masked.push(MaskedRange::new(start, end));
        self
    }

    /// True when the byte at `index` falls inside a masked range
    pub fn is_masked(&self, index: usize) -> bool {
        self.masked
            .iter()
            .any(|r| r.start <= index && index < r.end)
    }

    /// The line as the user sees it, with masked ranges suppressed.
    ///
    /// This is a presentation convenience; consumers that parse columns
    /// must use `text` instead.
    pub fn visible(&self) -> String {
        let mut out = String::with_capacity(self.text.len());
        let mut pos = 0;
        for range in &self.masked {
            out.push_str(&self.text[pos..range.start]);
            pos = range.end;
        }
        out.push_str(&self.text[pos..]);
        out
    }
}
