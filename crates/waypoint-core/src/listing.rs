//! Synthetic listing of drives and special folders.
//!
//! The listing builder turns one enumeration into directory-entry lines
//! that match the host's generic fixed-column entry format, so the host's
//! parser consumes them unmodified. Metadata the user should not see (the
//! sentinel permission/owner/size/date prefix, and the directory portion
//! of special-folder paths) is kept in the text but marked as masked byte
//! ranges; see [`DisplayLine`].
//!
//! The resulting pane is synthetic and read-only: a refresh must call
//! [`build_virtual_listing`] again rather than re-reading a directory, and
//! opening one of its entries goes through the normal directory-open path
//! so virtual-directory resolution still applies.

use crate::bridge::EnumeratorBridge;
use crate::error::Result;
use crate::types::{DisplayLine, DriveRecord, SpecialFolderRecord};
use tracing::debug;

/// Sentinel metadata prefix carried by every synthetic entry line.
///
/// The columns are permissions, link count, owner, group, size, and date,
/// mirroring the host's generic entry format. The values are fixed: a
/// synthetic entry has no real metadata, and the whole prefix is masked.
const SENTINEL_PREFIX: &str = "drwxr-xr-x  1 virtual virtual        0 Jan  1  1970 ";

/// Visible marker of the separator line between the two groups
const SEPARATOR_MARKER: &str = "----";

/// A synthetic, read-only pane listing drives and special folders.
///
/// Lines appear as drives first (enumeration order), one separator when
/// both groups are non-empty, then special folders (enumeration order,
/// with unset and nonexistent folders filtered out).
#[derive(Debug, Clone, Default)]
pub struct VirtualListing {
    lines: Vec<DisplayLine>,
}

impl VirtualListing {
    /// The entry lines in display order
    pub fn lines(&self) -> &[DisplayLine] {
        &self.lines
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True when the listing has no lines
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The name field of the line at `index`: a drive root path, a
    /// special-folder path, or the separator marker.
    ///
    /// This is the same trailing field a generic column parser would
    /// extract from the line text.
    pub fn target(&self, index: usize) -> Option<&str> {
        self.lines
            .get(index)
            .map(|line| &line.text[SENTINEL_PREFIX.len()..])
    }

    /// True when the line at `index` is the group separator rather than
    /// an openable entry.
    pub fn is_separator(&self, index: usize) -> bool {
        self.target(index) == Some(SEPARATOR_MARKER)
    }
}

/// Build the virtual drives/folders listing from a fresh enumeration.
///
/// Calls [`EnumeratorBridge::enumerate`] (never cached) and surfaces its
/// bridge errors so the caller can report a failed pane open or refresh.
pub fn build_virtual_listing<B: EnumeratorBridge>(bridge: &B) -> Result<VirtualListing> {
    let enumeration = bridge.enumerate()?;

    let mut lines = Vec::with_capacity(enumeration.drives.len() + enumeration.folders.len() + 1);

    for drive in &enumeration.drives {
        lines.push(drive_line(drive));
    }

    let folders: Vec<&SpecialFolderRecord> = enumeration
        .folders
        .iter()
        .filter(|folder| {
            if folder.is_unset() {
                debug!("Skipping unset special folder");
                false
            } else if !folder.exists() {
                debug!(folder = %folder, "Skipping nonexistent special folder");
                false
            } else {
                true
            }
        })
        .collect();

    if !enumeration.drives.is_empty() && !folders.is_empty() {
        lines.push(separator_line());
    }

    for folder in folders {
        lines.push(folder_line(folder));
    }

    debug!(lines = lines.len(), "Built virtual listing");
    Ok(VirtualListing { lines })
}

/// Entry line for one drive: sentinel prefix masked, root path visible.
fn drive_line(drive: &DriveRecord) -> DisplayLine {
    let text = format!("{}{}", SENTINEL_PREFIX, drive.root_path());
    DisplayLine::new(text).with_mask(0, SENTINEL_PREFIX.len())
}

/// Entry line for one special folder.
///
/// The mask extends past the sentinel prefix over the directory portion of
/// the path, leaving only the leaf name visible; the full path stays in
/// the text as the parseable name field.
fn folder_line(folder: &SpecialFolderRecord) -> DisplayLine {
    let text = format!("{}{}", SENTINEL_PREFIX, folder.as_str());
    // The leaf is located ignoring any trailing separator, so the mask
    // must end at its byte offset rather than at text.len() - leaf_len
    let trimmed_len = folder.as_str().trim_end_matches('/').len();
    let masked_end = SENTINEL_PREFIX.len() + (trimmed_len - folder.leaf().len());
    DisplayLine::new(text).with_mask(0, masked_end)
}

/// Separator between the drive group and the folder group, fully masked
/// except for a small visible marker.
fn separator_line() -> DisplayLine {
    let text = format!("{}{}", SENTINEL_PREFIX, SEPARATOR_MARKER);
    DisplayLine::new(text).with_mask(0, SENTINEL_PREFIX.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, WaypointError};
    use crate::types::EnumerationResult;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// Bridge returning a canned enumeration
    struct MockBridge {
        enumeration: Option<EnumerationResult>,
    }

    impl MockBridge {
        fn new(drives: &[&str], folders: &[&str]) -> Self {
            MockBridge {
                enumeration: Some(EnumerationResult {
                    drives: drives.iter().map(|d| DriveRecord::new(*d)).collect(),
                    folders: folders
                        .iter()
                        .map(|f| SpecialFolderRecord::new(*f))
                        .collect(),
                }),
            }
        }

        fn failing() -> Self {
            MockBridge { enumeration: None }
        }
    }

    impl EnumeratorBridge for MockBridge {
        fn enumerate(&self) -> Result<EnumerationResult> {
            self.enumeration
                .clone()
                .ok_or_else(|| WaypointError::bridge_unavailable("mock failure"))
        }

        fn resolve_shortcut(&self, path: &Path) -> PathBuf {
            path.to_path_buf()
        }
    }

    #[test]
    fn test_drives_then_separator_then_folders() {
        let temp = TempDir::new().unwrap();
        let desktop = temp.path().join("Desktop");
        std::fs::create_dir(&desktop).unwrap();
        let desktop_str = desktop.to_string_lossy().replace('\\', "/");

        let bridge = MockBridge::new(&["C", "D"], &[&desktop_str, ""]);
        let listing = build_virtual_listing(&bridge).unwrap();

        // 2 drives + separator + 1 surviving folder
        assert_eq!(listing.len(), 4);
        assert_eq!(listing.lines()[0].visible(), "C:/");
        assert_eq!(listing.lines()[1].visible(), "D:/");
        assert_eq!(listing.lines()[2].visible(), SEPARATOR_MARKER);
        assert_eq!(listing.lines()[3].visible(), "Desktop");
    }

    #[test]
    fn test_folder_filtering() {
        let temp = TempDir::new().unwrap();
        let existing = temp.path().to_string_lossy().replace('\\', "/");

        let bridge = MockBridge::new(&[], &["", "/does/not/exist", &existing]);
        let listing = build_virtual_listing(&bridge).unwrap();

        // No drives, so no separator either
        assert_eq!(listing.len(), 1);
    }

    #[test]
    fn test_no_separator_without_folders() {
        let bridge = MockBridge::new(&["C"], &["", "/does/not/exist"]);
        let listing = build_virtual_listing(&bridge).unwrap();

        assert_eq!(listing.len(), 1);
        assert_eq!(listing.lines()[0].visible(), "C:/");
    }

    #[test]
    fn test_enumeration_order_preserved() {
        let bridge = MockBridge::new(&["Z", "A", "M"], &[]);
        let listing = build_virtual_listing(&bridge).unwrap();

        let visible: Vec<String> = listing.lines().iter().map(|l| l.visible()).collect();
        assert_eq!(visible, vec!["Z:/", "A:/", "M:/"]);
    }

    #[test]
    fn test_lines_keep_parseable_name_field() {
        let temp = TempDir::new().unwrap();
        let folder = temp.path().to_string_lossy().replace('\\', "/");

        let bridge = MockBridge::new(&["C"], &[&folder]);
        let listing = build_virtual_listing(&bridge).unwrap();

        for line in listing.lines() {
            // Sentinel columns intact in the underlying text
            assert!(line.text.starts_with(SENTINEL_PREFIX));
            // The trailing name field is never fully masked
            assert!(!line.is_masked(line.text.len() - 1));
        }

        // The folder line's name field is the full path, not just the leaf
        let folder_line = &listing.lines()[2];
        assert!(folder_line.text.ends_with(&folder));
    }

    #[test]
    fn test_folder_with_trailing_separator_shows_leaf() {
        let temp = TempDir::new().unwrap();
        let desktop = temp.path().join("Desktop");
        std::fs::create_dir(&desktop).unwrap();
        let with_slash = format!("{}/", desktop.to_string_lossy().replace('\\', "/"));

        let bridge = MockBridge::new(&[], &[&with_slash]);
        let listing = build_virtual_listing(&bridge).unwrap();

        assert_eq!(listing.len(), 1);
        assert_eq!(listing.lines()[0].visible(), "Desktop/");
        // The name field still carries the path as reported
        assert!(listing.lines()[0].text.ends_with(&with_slash));
    }

    #[test]
    fn test_targets_and_separator() {
        let temp = TempDir::new().unwrap();
        let folder = temp.path().to_string_lossy().replace('\\', "/");

        let bridge = MockBridge::new(&["C"], &[&folder]);
        let listing = build_virtual_listing(&bridge).unwrap();

        assert_eq!(listing.target(0), Some("C:/"));
        assert!(listing.is_separator(1));
        assert_eq!(listing.target(2), Some(folder.as_str()));
        assert_eq!(listing.target(3), None);
    }

    #[test]
    fn test_bridge_failure_surfaces() {
        let err = build_virtual_listing(&MockBridge::failing()).unwrap_err();
        assert!(err.is_bridge_error());
    }

    #[test]
    fn test_empty_enumeration() {
        let bridge = MockBridge::new(&[], &[]);
        let listing = build_virtual_listing(&bridge).unwrap();
        assert!(listing.is_empty());
    }
}
