use console::style;
use std::path::PathBuf;
use tema_lib::{Campaign, Config, Result};

pub fn handle_check_command(config: &Config, path: Option<PathBuf>) -> Result<()> {
    let campaign = match path {
        Some(path) => Campaign::from_file(path)?,
        None => config.load_campaign()?,
    };

    let classifier = campaign.classifier()?;
    println!(
        "{} Campaign '{}' ({}) compiled: {} rules, {} labels",
        style("✓").green(),
        campaign.id(),
        campaign.source,
        campaign.rule_set.rules.len(),
        classifier.labels().len()
    );

    let issues = campaign.category_issues();
    if issues.is_empty() {
        return Ok(());
    }

    for issue in &issues {
        log::warn!("{}: {}", campaign.id(), issue);
        println!("  {} {}", style("!").yellow(), issue);
    }

    Ok(())
}
