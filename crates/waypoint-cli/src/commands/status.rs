//! Status command - show configuration and helper availability.

use crate::app::App;
use waypoint_core::{Config, EnumeratorBridge};

/// Run the status command.
pub fn run(config: Config) -> anyhow::Result<()> {
    let app = App::new(config)?;

    println!("Waypoint Status");
    println!("===============");
    println!();
    println!("Helper command:    {}", app.config.helper.command);
    println!(
        "Follow shortcuts:  {}",
        if app.resolver.policy().follow {
            "yes"
        } else {
            "no"
        }
    );
    println!("Reserved margin:   {}", app.config.ui.reserved_margin);

    println!();
    match app.bridge().enumerate() {
        Ok(result) => {
            println!(
                "Helper reachable:  yes ({} drives, {} folders reported)",
                result.drives.len(),
                result.folders.len()
            );
            for drive in &result.drives {
                println!("  drive  {}", drive);
            }
            for folder in &result.folders {
                if folder.is_unset() {
                    println!("  folder (unset)");
                } else if !folder.exists() {
                    println!("  folder {} (missing)", folder);
                } else {
                    println!("  folder {}", folder);
                }
            }
        }
        Err(e) => {
            println!("Helper reachable:  no");
            println!("  {}", e);
        }
    }

    if let Ok(path) = Config::default_config_path() {
        println!();
        println!("Config file: {}", path.display());
    }

    Ok(())
}
