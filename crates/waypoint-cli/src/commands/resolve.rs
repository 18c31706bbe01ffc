//! Resolve command - resolve a shortcut or virtual directory.

use crate::app::App;
use std::path::Path;
use waypoint_core::Config;

/// Run the resolve command.
///
/// With `dir`, applies the pre-navigation hook (virtual-directory marker);
/// otherwise applies the post-retrieval hook (shortcut suffix). Either way
/// an unresolvable input prints unchanged, mirroring how operations fall
/// back to the original path.
pub fn run(config: Config, path: &Path, dir: bool, no_follow: bool) -> anyhow::Result<()> {
    let mut app = App::new(config)?;

    if no_follow {
        app.resolver.set_follow(false);
    }

    let resolved = if dir {
        app.resolver.resolve_directory(path)
    } else {
        app.resolver.resolve_entry(path)
    };

    println!("{}", resolved.display());

    if resolved == path {
        eprintln!("(unchanged)");
    }

    Ok(())
}
