//! Enumerator bridge: the seam to the external helper process.
//!
//! Drives, special folders, and shortcut targets are enumerated by a helper
//! process rather than by this library, keeping all OS-specific lookups out
//! of the core. The bridge invokes the helper synchronously, captures its
//! standard output, and parses the single-line protocol:
//!
//! - No arguments: one JSON line,
//!   `{"drives":["C","D"],"folders":["C:/Users/me/Desktop"]}`.
//!   Drives are single-character identifiers; folders are absolute
//!   forward-slash paths, already OS-resolved.
//! - `/l <path>`: one line containing the resolved absolute path of the
//!   shortcut at `<path>`, or nothing when the shortcut is unresolvable.
//!
//! The core interacts with the helper only through the [`EnumeratorBridge`]
//! trait, so the resolver and listing builder can be exercised in tests
//! without spawning processes.

use crate::error::{Result, WaypointError};
use crate::types::EnumerationResult;
use directories::UserDirs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};

/// Abstract interface to the drive/folder/shortcut enumeration helper.
///
/// ## Error Handling
///
/// `enumerate` surfaces bridge failures so the caller can report a failed
/// pane open or refresh. `resolve_shortcut` never fails: an unresolvable
/// shortcut degrades to "treat it as an ordinary file" by returning the
/// input path unchanged.
pub trait EnumeratorBridge {
    /// Enumerate ready drives and special folders.
    ///
    /// Invoked once per listing build; implementations must not cache.
    fn enumerate(&self) -> Result<EnumerationResult>;

    /// Resolve one shortcut file to its real target path.
    ///
    /// Returns the input path unchanged on any failure.
    fn resolve_shortcut(&self, path: &Path) -> PathBuf;
}

/// Bridge implementation backed by the configured helper command.
///
/// Every call spawns a fresh helper process and blocks until it exits;
/// there is no timeout, matching the synchronous model of the host.
pub struct HelperBridge {
    command: String,
}

impl HelperBridge {
    /// Create a bridge invoking the given helper command
    pub fn new(command: impl Into<String>) -> Self {
        HelperBridge {
            command: command.into(),
        }
    }

    /// The configured helper command
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Run the helper with the given arguments and capture stdout.
    ///
    /// When `cwd` is set, the helper runs from that directory.
    fn run(&self, args: &[&str], cwd: Option<&Path>) -> Result<String> {
        let mut cmd = Command::new(&self.command);
        cmd.args(args);
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }

        let output = cmd
            .output()
            .map_err(|e| WaypointError::bridge_unavailable(format!("{}: {}", self.command, e)))?;

        if !output.status.success() {
            return Err(WaypointError::bridge_unavailable(format!(
                "{} exited with {}",
                self.command, output.status
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|_| WaypointError::bridge_protocol("output is not valid UTF-8"))
    }

    /// One enumeration attempt: invoke with no arguments and parse.
    fn enumerate_once(&self, cwd: Option<&Path>) -> Result<EnumerationResult> {
        let output = self.run(&[], cwd)?;
        parse_enumeration(&output)
    }
}

impl EnumeratorBridge for HelperBridge {
    fn enumerate(&self) -> Result<EnumerationResult> {
        match self.enumerate_once(None) {
            Ok(result) => Ok(result),
            Err(first) => {
                // The helper can fail when the inherited working directory
                // has gone away (e.g., a deleted or unshared directory).
                // Retry exactly once from the home directory.
                let home = UserDirs::new().map(|dirs| dirs.home_dir().to_path_buf());
                warn!(
                    error = %first,
                    retry_from = ?home,
                    "Enumeration helper failed, retrying from home directory"
                );
                self.enumerate_once(home.as_deref())
            }
        }
    }

    fn resolve_shortcut(&self, path: &Path) -> PathBuf {
        let arg = path.to_string_lossy();
        match self.run(&["/l", &arg], None) {
            Ok(output) => match parse_resolution(&output) {
                Some(resolved) => {
                    debug!(shortcut = %arg, target = %resolved, "Resolved shortcut");
                    PathBuf::from(resolved)
                }
                None => {
                    debug!(shortcut = %arg, "Helper could not resolve shortcut");
                    path.to_path_buf()
                }
            },
            Err(e) => {
                debug!(shortcut = %arg, error = %e, "Shortcut resolution failed");
                path.to_path_buf()
            }
        }
    }
}

/// Parse the no-argument enumeration record.
///
/// The record is a single line containing a literal JSON object with
/// `drives` and `folders` fields; surrounding blank lines are tolerated.
fn parse_enumeration(output: &str) -> Result<EnumerationResult> {
    let line = output
        .lines()
        .find(|line| !line.trim().is_empty())
        .ok_or_else(|| WaypointError::bridge_protocol("empty output"))?;

    serde_json::from_str(line.trim())
        .map_err(|_| WaypointError::bridge_protocol(line.trim().to_string()))
}

/// Parse the `/l` resolution output: one line with the target path, or
/// nothing when the shortcut is invalid.
fn parse_resolution(output: &str) -> Option<String> {
    let line = output.trim();
    if line.is_empty() {
        None
    } else {
        Some(line.lines().next().unwrap_or(line).trim().to_string())
    }
}
