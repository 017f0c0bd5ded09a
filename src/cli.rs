use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "aeoscope")]
#[command(about = "Answer engine optimization (AEO) auditor for web pages", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal", global = true)]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Configuration file (defaults to the nearest .aeoscope.toml)
    #[arg(short, long, global = true, env = "AEOSCOPE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Run analyzers one after another instead of in parallel
    #[arg(long, global = true)]
    pub no_parallel: bool,
}

/// Page to analyze and the URL it was served from.
#[derive(Args, Debug, Clone)]
pub struct PageArgs {
    /// HTML file, or a .json document snapshot
    pub input: PathBuf,

    /// URL the page was served from (scheme defaults to https://)
    #[arg(short, long)]
    pub url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Technical AEO audit: schema, crawlability, structure, accessibility
    Technical {
        #[command(flatten)]
        page: PageArgs,
    },

    /// Content quality: readability, Q&A patterns, citation worthiness
    Content {
        #[command(flatten)]
        page: PageArgs,
    },

    /// AI visibility: citation potential, authority, entities
    Visibility {
        #[command(flatten)]
        page: PageArgs,
    },

    /// Score how well the page answers target queries
    QueryMatch {
        #[command(flatten)]
        page: PageArgs,

        /// Target query (repeatable, first 10 are used)
        #[arg(short, long = "query", required = true)]
        queries: Vec<String>,
    },

    /// Run every analyzer and merge the results
    Audit {
        #[command(flatten)]
        page: PageArgs,

        /// Optional target queries for query matching
        #[arg(short, long = "query")]
        queries: Vec<String>,
    },

    /// Write a default .aeoscope.toml in the current directory
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Markdown => crate::io::output::OutputFormat::Markdown,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
