//! Transparent shortcut and virtual-directory resolution.
//!
//! The resolver wraps two generic host operations with pure before/after
//! hooks rather than patching them:
//!
//! - [`Resolver::resolve_directory`] runs *before* a path is opened or
//!   visited. A directory containing the marker file `target.lnk` is a
//!   virtual directory: entering it transparently enters the marker's
//!   target directory instead.
//! - [`Resolver::resolve_entry`] runs *after* the generic layer determines
//!   which entry an operation applies to. A `.lnk` entry is substituted by
//!   its target, so every operation that first asks "what file is this?"
//!   (open, delete, rename, copy) transparently receives the target.
//!
//! Resolution is opportunistic and never fatal: an unresolvable or dangling
//! shortcut falls back to the original path, preserving the ability to
//! operate on the broken shortcut itself. To operate on a shortcut file
//! deliberately, turn the follow policy off; there is no per-call override.

use crate::bridge::EnumeratorBridge;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Filename suffix marking a shortcut file
pub const SHORTCUT_SUFFIX: &str = ".lnk";

/// Marker filename whose presence makes a directory a virtual directory
pub const VIRTUAL_DIR_MARKER: &str = "target.lnk";

/// True when the path names a shortcut file (case-insensitive suffix).
pub fn is_shortcut(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| {
            name.len() > SHORTCUT_SUFFIX.len()
                && name[name.len() - SHORTCUT_SUFFIX.len()..].eq_ignore_ascii_case(SHORTCUT_SUFFIX)
        })
        .unwrap_or(false)
}

/// Whether resolution hooks follow shortcuts to their targets.
///
/// Held by the resolver as an explicit object rather than process-wide
/// state, and read on every resolution attempt, so toggling it takes
/// effect on the next attempt with no retroactive re-resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionPolicy {
    /// Follow shortcuts and virtual-directory markers
    pub follow: bool,
}

impl ResolutionPolicy {
    /// Policy following shortcuts
    pub fn following() -> Self {
        ResolutionPolicy { follow: true }
    }

    /// Policy leaving every path untouched
    pub fn literal() -> Self {
        ResolutionPolicy { follow: false }
    }
}

impl Default for ResolutionPolicy {
    fn default() -> Self {
        ResolutionPolicy::following()
    }
}

/// Resolution hooks around the host's generic file operations.
pub struct Resolver<B: EnumeratorBridge> {
    bridge: B,
    policy: ResolutionPolicy,
}

impl<B: EnumeratorBridge> Resolver<B> {
    /// Create a resolver over the given bridge
    pub fn new(bridge: B, policy: ResolutionPolicy) -> Self {
        Resolver { bridge, policy }
    }

    /// Current policy
    pub fn policy(&self) -> ResolutionPolicy {
        self.policy
    }

    /// Toggle or set the follow policy at runtime
    pub fn set_follow(&mut self, follow: bool) {
        self.policy.follow = follow;
    }

    /// The underlying bridge
    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    /// Pre-navigation hook: dereference a virtual directory.
    ///
    /// If `path` contains a readable `target.lnk` marker whose resolved
    /// target exists on disk, returns the target; otherwise returns `path`
    /// unchanged. No-op when the follow policy is off.
    pub fn resolve_directory(&self, path: &Path) -> PathBuf {
        if !self.policy.follow {
            return path.to_path_buf();
        }

        let marker = path.join(VIRTUAL_DIR_MARKER);
        if !marker.is_file() || File::open(&marker).is_err() {
            return path.to_path_buf();
        }

        let resolved = self.bridge.resolve_shortcut(&marker);
        if resolved != marker && resolved.exists() {
            debug!(
                virtual_dir = %path.display(),
                target = %resolved.display(),
                "Dereferenced virtual directory"
            );
            resolved
        } else {
            // Dangling marker: keep the original directory visitable
            path.to_path_buf()
        }
    }

    /// Post-retrieval hook: substitute a shortcut entry by its target.
    ///
    /// If `path` has the shortcut suffix and resolves to an existing
    /// target, returns the target; otherwise returns `path` unchanged.
    /// No-op when the follow policy is off.
    pub fn resolve_entry(&self, path: &Path) -> PathBuf {
        if !self.policy.follow || !is_shortcut(path) {
            return path.to_path_buf();
        }

        let resolved = self.bridge.resolve_shortcut(path);
        if resolved != path && resolved.exists() {
            resolved
        } else {
            // Unresolvable or dangling: operate on the shortcut itself
            path.to_path_buf()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::types::EnumerationResult;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    /// Bridge with a canned resolution table; paths not in the table
    /// resolve to themselves, mirroring helper failure.
    struct MockBridge {
        resolutions: HashMap<PathBuf, PathBuf>,
    }

    impl MockBridge {
        fn new() -> Self {
            MockBridge {
                resolutions: HashMap::new(),
            }
        }

        fn with_resolution(mut self, from: impl Into<PathBuf>, to: impl Into<PathBuf>) -> Self {
            self.resolutions.insert(from.into(), to.into());
            self
        }
    }

    impl EnumeratorBridge for MockBridge {
        fn enumerate(&self) -> Result<EnumerationResult> {
            Ok(EnumerationResult::default())
        }

        fn resolve_shortcut(&self, path: &Path) -> PathBuf {
            self.resolutions
                .get(path)
                .cloned()
                .unwrap_or_else(|| path.to_path_buf())
        }
    }

    #[test]
    fn test_is_shortcut() {
        assert!(is_shortcut(Path::new("C:/Users/me/report.lnk")));
        assert!(is_shortcut(Path::new("report.LNK")));
        assert!(!is_shortcut(Path::new("report.txt")));
        assert!(!is_shortcut(Path::new(".lnk")));
        assert!(!is_shortcut(Path::new("report")));
    }

    #[test]
    fn test_follow_off_is_identity() {
        let temp = TempDir::new().unwrap();
        let virtual_dir = temp.path().join("projects");
        fs::create_dir(&virtual_dir).unwrap();
        fs::write(virtual_dir.join(VIRTUAL_DIR_MARKER), b"").unwrap();

        let bridge = MockBridge::new()
            .with_resolution(virtual_dir.join(VIRTUAL_DIR_MARKER), temp.path());
        let resolver = Resolver::new(bridge, ResolutionPolicy::literal());

        assert_eq!(resolver.resolve_directory(&virtual_dir), virtual_dir);
        let shortcut = temp.path().join("x.lnk");
        assert_eq!(resolver.resolve_entry(&shortcut), shortcut);
    }

    #[test]
    fn test_virtual_directory_dereference() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("real");
        fs::create_dir(&target).unwrap();
        let virtual_dir = temp.path().join("redirect");
        fs::create_dir(&virtual_dir).unwrap();
        let marker = virtual_dir.join(VIRTUAL_DIR_MARKER);
        fs::write(&marker, b"").unwrap();

        let bridge = MockBridge::new().with_resolution(&marker, &target);
        let resolver = Resolver::new(bridge, ResolutionPolicy::following());

        assert_eq!(resolver.resolve_directory(&virtual_dir), target);
    }

    #[test]
    fn test_virtual_directory_dangling_target() {
        let temp = TempDir::new().unwrap();
        let virtual_dir = temp.path().join("redirect");
        fs::create_dir(&virtual_dir).unwrap();
        let marker = virtual_dir.join(VIRTUAL_DIR_MARKER);
        fs::write(&marker, b"").unwrap();

        let bridge = MockBridge::new().with_resolution(&marker, "/no/such/target");
        let resolver = Resolver::new(bridge, ResolutionPolicy::following());

        assert_eq!(resolver.resolve_directory(&virtual_dir), virtual_dir);
    }

    #[test]
    fn test_ordinary_directory_untouched() {
        let temp = TempDir::new().unwrap();
        let plain = temp.path().join("plain");
        fs::create_dir(&plain).unwrap();

        let resolver = Resolver::new(MockBridge::new(), ResolutionPolicy::following());
        assert_eq!(resolver.resolve_directory(&plain), plain);
    }

    #[test]
    fn test_shortcut_entry_substitution() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("document.txt");
        fs::write(&target, b"contents").unwrap();
        let shortcut = temp.path().join("document.lnk");
        fs::write(&shortcut, b"").unwrap();

        let bridge = MockBridge::new().with_resolution(&shortcut, &target);
        let resolver = Resolver::new(bridge, ResolutionPolicy::following());

        assert_eq!(resolver.resolve_entry(&shortcut), target);
    }

    #[test]
    fn test_shortcut_entry_dangling_falls_back() {
        let temp = TempDir::new().unwrap();
        let shortcut = temp.path().join("broken.lnk");
        fs::write(&shortcut, b"").unwrap();

        // Resolvable but dangling
        let bridge = MockBridge::new().with_resolution(&shortcut, "/vanished/file.txt");
        let resolver = Resolver::new(bridge, ResolutionPolicy::following());
        assert_eq!(resolver.resolve_entry(&shortcut), shortcut);

        // Not resolvable at all
        let resolver = Resolver::new(MockBridge::new(), ResolutionPolicy::following());
        assert_eq!(resolver.resolve_entry(&shortcut), shortcut);
    }

    #[test]
    fn test_non_shortcut_entry_untouched() {
        let resolver = Resolver::new(MockBridge::new(), ResolutionPolicy::following());
        let path = Path::new("/home/me/notes.txt");
        assert_eq!(resolver.resolve_entry(path), path);
    }

    #[test]
    fn test_policy_toggle_takes_effect() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("doc.txt");
        fs::write(&target, b"x").unwrap();
        let shortcut = temp.path().join("doc.lnk");
        fs::write(&shortcut, b"").unwrap();

        let bridge = MockBridge::new().with_resolution(&shortcut, &target);
        let mut resolver = Resolver::new(bridge, ResolutionPolicy::following());
        assert_eq!(resolver.resolve_entry(&shortcut), target);

        resolver.set_follow(false);
        assert_eq!(resolver.resolve_entry(&shortcut), shortcut);

        resolver.set_follow(true);
        assert_eq!(resolver.resolve_entry(&shortcut), target);
    }
}
