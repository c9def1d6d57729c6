mod cli;
mod util;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = tema_lib::Config::new(cli.campaign, cli.config)?;

    match cli.command {
        cli::Commands::Classify { text, explain } => {
            cli::classify::handle_classify_command(&config, text, explain)?
        }

        cli::Commands::Batch { input, format, field, output_format, output } => {
            cli::batch::handle_batch_command(&config, &input, &format, &field, &output_format, output, cli.quiet)?
        }

        cli::Commands::Report { input, format, field, json } => {
            cli::report::handle_report_command(&config, &input, &format, &field, json)?
        }

        cli::Commands::Campaigns => cli::campaigns::handle_campaigns_command(&config)?,

        cli::Commands::Rules => cli::campaigns::handle_rules_command(&config)?,

        cli::Commands::Check { path } => cli::check::handle_check_command(&config, path)?,
    }

    Ok(())
}
