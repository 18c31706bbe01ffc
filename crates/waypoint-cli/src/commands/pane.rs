//! Pane command - print the virtual drives/folders pane.

use crate::app::App;
use crate::OutputFormat;
use waypoint_core::{build_virtual_listing, Config};

/// Run the pane command.
pub fn run(config: Config, raw: bool, output: OutputFormat) -> anyhow::Result<()> {
    let app = App::new(config)?;

    let listing = build_virtual_listing(app.bridge())?;

    if listing.is_empty() {
        eprintln!("The helper reported no drives or special folders.");
        return Ok(());
    }

    match output {
        OutputFormat::Text => {
            for line in listing.lines() {
                if raw {
                    println!("{}", line.text);
                } else {
                    println!("{}", line.visible());
                }
            }
        }
        OutputFormat::Json => {
            let json_lines: Vec<serde_json::Value> = listing
                .lines()
                .iter()
                .map(|line| {
                    serde_json::json!({
                        "text": line.text,
                        "visible": line.visible(),
                        "masked": line
                            .masked
                            .iter()
                            .map(|r| serde_json::json!([r.start, r.end]))
                            .collect::<Vec<_>>(),
                    })
                })
                .collect();

            println!("{}", serde_json::to_string_pretty(&json_lines)?);
        }
    }

    Ok(())
}
