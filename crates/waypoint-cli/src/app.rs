//! Application state management.

use tracing::info;
use waypoint_core::{Config, HelperBridge, ResolutionPolicy, Resolver};

/// Shared application state.
pub struct App {
    /// Configuration
    pub config: Config,

    /// Resolution hooks around the helper bridge
    pub resolver: Resolver<HelperBridge>,
}

impl App {
    /// Create a new application instance.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let bridge = HelperBridge::new(&config.helper.command);
        let policy = ResolutionPolicy {
            follow: config.resolution.follow_shortcuts,
        };
        let resolver = Resolver::new(bridge, policy);

        info!(
            helper = %config.helper.command,
            follow = policy.follow,
            "Application initialized"
        );

        Ok(App { config, resolver })
    }

    /// The bridge underlying the resolver.
    pub fn bridge(&self) -> &HelperBridge {
        self.resolver.bridge()
    }
}
