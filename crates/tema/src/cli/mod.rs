pub mod batch;
pub mod campaigns;
pub mod check;
pub mod classify;
pub mod report;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tema_lib::batch::{read_comments, DEFAULT_COMMENT_FIELD};
use tema_lib::{InputFormat, Result};

#[derive(Parser)]
#[command(name = "tema")]
#[command(about = "Classify campaign comments into topics with ordered keyword rules", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to a campaign TOML file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Campaign id (defaults to $TEMA_CAMPAIGN)")]
    pub campaign: Option<String>,

    #[arg(long, short = 'v', global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, short = 'q', global = true, help = "Suppress non-error output")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Classify comments given as arguments or on stdin")]
    Classify {
        #[arg(help = "Comments to classify (reads stdin lines when omitted)")]
        text: Vec<String>,

        #[arg(long, help = "Show which rule fired and why")]
        explain: bool,
    },

    #[command(about = "Classify every comment in a file")]
    Batch {
        #[arg(help = "Input file, or - for stdin")]
        input: PathBuf,

        #[arg(long, default_value = "lines", help = "Input format (lines, json)")]
        format: String,

        #[arg(long, default_value = DEFAULT_COMMENT_FIELD, help = "Field holding the comment in JSON objects")]
        field: String,

        #[arg(long, default_value = "tsv", help = "Output format (tsv, csv, json)")]
        output_format: String,

        #[arg(long, short = 'o', help = "Output file path")]
        output: Option<PathBuf>,
    },

    #[command(about = "Summarize label counts for a file")]
    Report {
        #[arg(help = "Input file, or - for stdin")]
        input: PathBuf,

        #[arg(long, default_value = "lines", help = "Input format (lines, json)")]
        format: String,

        #[arg(long, default_value = DEFAULT_COMMENT_FIELD, help = "Field holding the comment in JSON objects")]
        field: String,

        #[arg(long, help = "Print counts as JSON")]
        json: bool,
    },

    #[command(about = "List available campaigns")]
    Campaigns,

    #[command(about = "Show the active campaign's rules in priority order")]
    Rules,

    #[command(about = "Validate a campaign file")]
    Check {
        #[arg(help = "Campaign file (defaults to the active campaign)")]
        path: Option<PathBuf>,
    },
}

/// Read comments from a file, or from stdin when `input` is `-`.
pub fn read_input(input: &Path, format: &str, field: &str) -> Result<Vec<String>> {
    let format: InputFormat = format.parse()?;
    if input == Path::new("-") {
        read_comments(std::io::stdin().lock(), format, field)
    } else {
        let file = std::fs::File::open(input)?;
        read_comments(std::io::BufReader::new(file), format, field)
    }
}
