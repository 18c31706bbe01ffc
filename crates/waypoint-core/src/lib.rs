//! # Waypoint Core Library
//!
//! This crate provides the resolution, listing, and breadcrumb logic for
//! Waypoint, a navigation layer for file managers on platforms with drive
//! letters, OS special folders, and shortcut (`.lnk`) files. All OS-level
//! enumeration is delegated to an external helper process behind a trait.
//!
//! ## Architecture
//!
//! - **Bridge** (`bridge`): invokes the enumeration helper and parses its
//!   textual protocol
//! - **Resolver** (`resolver`): redirects operations on shortcuts and
//!   virtual directories to their real targets
//! - **Listing** (`listing`): synthesizes drive/special-folder entry lines
//!   with masked metadata
//! - **Breadcrumb** (`breadcrumb`): truncation-tolerant clickable path
//! - **Config** (`config`): configuration management
//!
//! ## Example
//!
//! ```rust,ignore
//! use waypoint_core::{build_virtual_listing, HelperBridge, ResolutionPolicy, Resolver};
//!
//! let bridge = HelperBridge::new("waypoint-helper");
//! let listing = build_virtual_listing(&bridge)?;
//!
//! let resolver = Resolver::new(bridge, ResolutionPolicy::following());
//! let real = resolver.resolve_directory(std::path::Path::new("C:/Users/me/projects"));
//! ```

pub mod breadcrumb;
pub mod bridge;
pub mod config;
pub mod error;
pub mod listing;
pub mod resolver;
pub mod types;

// Re-export commonly used types
pub use breadcrumb::{Breadcrumb, ELLIPSIS};
pub use bridge::{EnumeratorBridge, HelperBridge};
pub use config::Config;
pub use error::{Result, WaypointError};
pub use listing::{build_virtual_listing, VirtualListing};
pub use resolver::{is_shortcut, ResolutionPolicy, Resolver, SHORTCUT_SUFFIX, VIRTUAL_DIR_MARKER};
pub use types::{DisplayLine, DriveRecord, EnumerationResult, MaskedRange, SpecialFolderRecord};
