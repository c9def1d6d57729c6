use crate::util::progress::{create_progress_bar, PROGRESS_THRESHOLD};
use console::style;
use std::path::{Path, PathBuf};
use tema_lib::batch::{render, ClassifiedComment};
use tema_lib::{Config, OutputFormat, Result};

pub fn handle_batch_command(
    config: &Config,
    input: &Path,
    format: &str,
    field: &str,
    output_format: &str,
    output: Option<PathBuf>,
    quiet: bool,
) -> Result<()> {
    let output_format: OutputFormat = output_format.parse()?;
    let campaign = config.load_campaign()?;
    let classifier = campaign.classifier()?;

    let comments = super::read_input(input, format, field)?;
    log::info!("Read {} comments from {}", comments.len(), input.display());

    let pb = if quiet || output.is_none() || comments.len() < PROGRESS_THRESHOLD {
        None
    } else {
        Some(create_progress_bar(comments.len() as u64, "Classifying comments"))
    };

    let mut records = Vec::with_capacity(comments.len());
    for comment in comments {
        if let Some(pb) = &pb {
            pb.inc(1);
        }
        let label = classifier.classify(&comment).to_string();
        records.push(ClassifiedComment { comment, label });
    }

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    let rendered = render(&records, output_format)?;

    if let Some(path) = output {
        std::fs::write(&path, rendered)?;
        if !quiet {
            println!(
                "{} Classified {} comments with '{}' into {}",
                style("✓").green(),
                style(records.len()).bold(),
                campaign.id(),
                path.display()
            );
        }
    } else {
        print!("{}", rendered);
    }

    Ok(())
}
