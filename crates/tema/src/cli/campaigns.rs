use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use console::style;
use tema_lib::{Config, MatchMode, Result};

pub fn handle_campaigns_command(config: &Config) -> Result<()> {
    let catalog = config.catalog()?;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        Cell::new("Id").fg(Color::Cyan),
        Cell::new("Campaign").fg(Color::Cyan),
        Cell::new("Product").fg(Color::Cyan),
        Cell::new("Version").fg(Color::Cyan),
        Cell::new("Updated").fg(Color::Cyan),
        Cell::new("Rules").fg(Color::Cyan),
        Cell::new("Source").fg(Color::Cyan),
    ]);

    for campaign in catalog.campaigns() {
        let id = if campaign.id() == config.campaign_id {
            Cell::new(format!("{} *", campaign.id())).fg(Color::Green)
        } else {
            Cell::new(campaign.id())
        };
        table.add_row(vec![
            id,
            Cell::new(&campaign.metadata.campaign_name),
            Cell::new(&campaign.metadata.product),
            Cell::new(&campaign.metadata.version),
            Cell::new(campaign.metadata.last_updated.format("%Y-%m-%d")),
            Cell::new(campaign.rule_set.rules.len()),
            Cell::new(&campaign.source),
        ]);
    }

    println!("{}", table);
    if let Some(dir) = &config.campaigns_dir {
        println!("{}", style(format!("User campaigns: {}", dir.display())).dim());
    }

    Ok(())
}

pub fn handle_rules_command(config: &Config) -> Result<()> {
    let campaign = config.load_campaign()?;
    let rule_set = &campaign.rule_set;

    println!(
        "{} {} v{}\n",
        style(">>>").cyan(),
        style(campaign.id()).bold(),
        campaign.metadata.version
    );

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        Cell::new("#").fg(Color::Cyan),
        Cell::new("Label").fg(Color::Cyan),
        Cell::new("Keywords").fg(Color::Cyan),
        Cell::new("Short comments").fg(Color::Cyan),
    ]);

    for (index, rule) in rule_set.rules.iter().enumerate() {
        let mode = match rule.mode {
            MatchMode::Regex => "",
            MatchMode::Literal => " (literal)",
        };
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&rule.label),
            Cell::new(format!("{}{}", rule.keywords.join(" | "), mode)),
            Cell::new(if rule.short_comments {
                format!("< {} words", rule_set.short_comment_threshold)
            } else {
                String::new()
            }),
        ]);
    }
    table.add_row(vec![
        Cell::new("-"),
        Cell::new(&rule_set.fallback_label).fg(Color::Yellow),
        Cell::new("(fallback)"),
        Cell::new(""),
    ]);

    println!("{}", table);

    Ok(())
}
