//! CLI command implementations.

pub mod pane;
pub mod resolve;
pub mod status;
