//! Breadcrumb rendering and click navigation for the current path.
//!
//! The canonical current-directory path is the single source of truth; the
//! rendered string shown in the status area is derived from it on every
//! width or path change and is never itself re-truncated or used to resolve
//! a navigation target. Mapping a click back to an ancestor works from the
//! *lengths* of the displayed string and the canonical path, so it stays
//! correct when the display has been elided.
//!
//! Rendering is a pure tail truncation, not segment-aware: when the path
//! does not fit, the leading portion is replaced by `"..."` and the last
//! `max_width` characters are kept.

/// Prefix shown in place of the elided head of a truncated path
pub const ELLIPSIS: &str = "...";

/// The canonical current-directory path plus derived display logic.
///
/// The stored path is always an absolute, normalized path terminated by a
/// path separator; the constructor enforces the trailing separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    path: String,
}

impl Breadcrumb {
    /// Create a breadcrumb for the given canonical directory path.
    ///
    /// Backslashes are normalized to forward slashes and a trailing
    /// separator is appended when missing.
    pub fn new(path: impl Into<String>) -> Self {
        let mut path = path.into().replace('\\', "/");
        if !path.ends_with('/') {
            path.push('/');
        }
        Breadcrumb { path }
    }

    /// The canonical path, trailing-separator-terminated
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Replace the canonical path (e.g., after navigation)
    pub fn set_path(&mut self, path: impl Into<String>) {
        *self = Breadcrumb::new(path);
    }

    /// Render the path for a display area of `max_width` characters.
    ///
    /// Returns the path unchanged when it fits; otherwise `"..."` followed
    /// by the trailing `max_width` characters of the canonical path. The
    /// caller computes `max_width` as the available width minus its
    /// reserved margin.
    pub fn render(&self, max_width: usize) -> String {
        let chars: Vec<char> = self.path.chars().collect();
        if chars.len() <= max_width {
            return self.path.clone();
        }

        let tail: String = chars[chars.len() - max_width..].iter().collect();
        format!("{}{}", ELLIPSIS, tail)
    }

    /// Map a click on the rendered string back to an ancestor directory.
    ///
    /// `display` is the rendered string with any formatting stripped;
    /// `click_offset` is the character offset of the click within it. A
    /// click inside a segment's rendered text navigates to the directory
    /// ending at that segment's closing separator. Returns `None` when the
    /// click lands on the final (current) segment, past the end of the
    /// display, or maps before the start of the canonical path (a click
    /// inside the ellipsis of a heavily elided render).
    pub fn navigate(&self, display: &str, click_offset: usize) -> Option<String> {
        let display_len = display.chars().count();
        if click_offset >= display_len {
            return None;
        }
        let tail_length = display_len - click_offset;

        let chars: Vec<char> = self.path.chars().collect();
        if tail_length > chars.len() {
            // Click maps before the start of the canonical path
            return None;
        }
        let target = chars.len() - tail_length;

        // Scan forward to the segment's closing separator. The trailing
        // separator of the canonical path closes the current segment, so
        // reaching it means no navigation.
        let boundary = (target..chars.len()).find(|&i| chars[i] == '/')?;
        if boundary + 1 == chars.len() {
            return None;
        }

        Some(chars[..=boundary].iter().collect())
    }
}
