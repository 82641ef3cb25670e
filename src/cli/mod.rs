pub mod config;
pub mod report;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::filter::Selection;
use crate::settings::Settings;

#[derive(Parser)]
#[command(name = "umsatz", about = "E-commerce sales KPIs and breakdowns from a transactions CSV.")]
pub struct Cli {
    /// Transactions CSV (default: data_file from settings)
    #[arg(long, global = true)]
    pub file: Option<String>,
    /// Output format
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show or change persisted settings.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    #[command(flatten)]
    Report(ReportCommands),
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the current settings.
    Show,
    /// Set the default transactions CSV.
    SetFile {
        /// Path to the CSV file
        path: String,
    },
    /// Set the default output format.
    SetFormat {
        #[arg(value_enum)]
        format: OutputFormat,
    },
}

/// Region/category/year restriction shared by the report commands.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Year filter: YYYY (default: newest year in the data)
    #[arg(long)]
    pub year: Option<i32>,
    /// Region to include; repeat for several
    #[arg(long = "region")]
    pub regions: Vec<String>,
    /// Category (display label) to include; repeat for several
    #[arg(long = "category")]
    pub categories: Vec<String>,
}

impl FilterArgs {
    pub fn selection(&self) -> Selection {
        Selection::new(self.year, self.regions.clone(), self.categories.clone())
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum ReportCommands {
    /// Sales, profit, order count and average order value.
    Summary(FilterArgs),
    /// Sales per year.
    Years(FilterArgs),
    /// Sales share per category within a year.
    Categories(FilterArgs),
    /// Monthly sales per category within a year (all regions and categories).
    Monthly {
        #[arg(long)]
        year: Option<i32>,
    },
    /// Transactions matching the filter.
    Transactions(FilterArgs),
    /// Available years, regions and categories.
    Options,
    /// All views for one selection.
    Dashboard(FilterArgs),
}

/// Resolved global options for one invocation.
#[derive(Debug, Clone)]
pub struct Context {
    pub data_file: PathBuf,
    pub format: OutputFormat,
}

impl Context {
    pub fn resolve(cli_file: Option<&str>, cli_format: Option<OutputFormat>, settings: &Settings) -> Self {
        let data_file = PathBuf::from(cli_file.unwrap_or(&settings.data_file));
        let format = cli_format.unwrap_or_else(|| {
            OutputFormat::from_str(&settings.default_format, true).unwrap_or(OutputFormat::Text)
        });
        Self { data_file, format }
    }
}
