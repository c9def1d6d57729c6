use crate::util::format::format_share;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Color, Table};
use console::style;
use serde_json::json;
use std::path::Path;
use tema_lib::{Config, LabelCounts, Result};

pub fn handle_report_command(
    config: &Config,
    input: &Path,
    format: &str,
    field: &str,
    as_json: bool,
) -> Result<()> {
    let campaign = config.load_campaign()?;
    let classifier = campaign.classifier()?;
    let comments = super::read_input(input, format, field)?;
    let counts = LabelCounts::from_comments(&classifier, &comments);

    if as_json {
        let report = json!({
            "campaign": campaign.metadata,
            "total": counts.total(),
            "labels": counts.entries(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "\n{}",
        style(format!(
            "{} ({} v{})",
            campaign.metadata.campaign_name, campaign.id(), campaign.metadata.version
        ))
        .bold()
        .cyan()
    );
    println!("{}\n", style("═".repeat(80)).dim());

    if counts.total() == 0 {
        println!("{}\n", style("No comments found").yellow());
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        Cell::new("Label").fg(Color::Cyan),
        Cell::new("Comments").fg(Color::Cyan),
        Cell::new("Share").fg(Color::Cyan),
    ]);

    for entry in counts.entries() {
        table.add_row(vec![
            Cell::new(&entry.label),
            Cell::new(entry.count).set_alignment(CellAlignment::Right),
            Cell::new(format_share(entry.share)).set_alignment(CellAlignment::Right),
        ]);
    }

    println!("{}\n", table);
    println!("  Total: {}", style(counts.total()).bold());

    Ok(())
}
