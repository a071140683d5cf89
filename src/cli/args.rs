//! Command-line argument definitions for the county health CLI
//!
//! This module defines the complete CLI interface using the clap derive API.
//! Every subcommand operates on the same loaded dataset, so the dataset and
//! output options are shared structs flattened into each subcommand.

use crate::app::models::CountyIdentifier;
use crate::app::services::county_registry::{SortOrder, ValueRange};
use crate::config::Config;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the county health dataset browser
///
/// Fetches the County Health Rankings CSV dataset, parses it into typed
/// records and answers county browsing and filtering queries from the
/// command line.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "county-health",
    version,
    about = "Browse and filter the County Health Rankings dataset",
    long_about = "Fetches the County Health Rankings CSV dataset (or reads a local copy), \
                  parses it into typed health records, and answers county browsing queries: \
                  filtered county lists, per-county record histories narrowed by measure, \
                  year span and value range, state listings and dataset statistics."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the county health CLI
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// List counties, optionally filtered by state and free-text search
    Counties(CountiesArgs),
    /// Show one county's records, narrowed by measure, year span and value range
    Records(RecordsArgs),
    /// List the states present in the dataset
    States(StatesArgs),
    /// Show dataset summary statistics
    Stats(StatsArgs),
}

/// Shared dataset location and logging options
///
/// Flattened into every subcommand: each invocation loads the dataset once
/// before answering its query.
#[derive(Debug, Clone, Default, Parser)]
pub struct DatasetArgs {
    /// Fetch the dataset from a custom URL
    ///
    /// If not specified, fetches the published County Health Rankings CSV.
    #[arg(
        long = "url",
        value_name = "URL",
        help = "Fetch the dataset from a custom URL"
    )]
    pub dataset_url: Option<String>,

    /// Read the dataset from a local CSV file instead of the network
    #[arg(
        short = 'i',
        long = "input",
        value_name = "PATH",
        conflicts_with = "dataset_url",
        help = "Read the dataset from a local CSV file instead of the network"
    )]
    pub input_path: Option<PathBuf>,

    /// Fetch timeout in seconds (0 disables the timeout)
    #[arg(
        long = "timeout",
        value_name = "SECS",
        help = "Fetch timeout in seconds (0 disables the timeout)"
    )]
    pub timeout_secs: Option<u64>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors and the query result. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors and results",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Shared output format and destination options
#[derive(Debug, Clone, Default, Parser)]
pub struct OutputArgs {
    /// Output format for the query result
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format for the query result"
    )]
    pub output_format: OutputFormat,

    /// Output file for the query result
    ///
    /// If not specified, outputs to stdout.
    #[arg(
        short = 'o',
        long = "output-file",
        value_name = "FILE",
        help = "Output file for the query result"
    )]
    pub output_file: Option<PathBuf>,
}

/// Arguments for the counties command (filtered county browsing)
#[derive(Debug, Clone, Parser)]
pub struct CountiesArgs {
    /// Filter to counties in one state
    ///
    /// The match is exact and case-sensitive against the full state name,
    /// e.g. "New York".
    #[arg(
        short = 's',
        long = "state",
        value_name = "STATE",
        help = "Filter to counties in one state (exact full name)"
    )]
    pub state: Option<String>,

    /// Free-text county search
    ///
    /// Split on whitespace into terms; a county matches when every term is a
    /// substring of its lowercase "county state" name.
    #[arg(
        long = "search",
        value_name = "TEXT",
        help = "Free-text search over county and state names"
    )]
    pub search: Option<String>,

    /// Maximum number of counties to show
    #[arg(
        short = 'n',
        long = "limit",
        value_name = "COUNT",
        help = "Maximum number of counties to show"
    )]
    pub limit: Option<usize>,

    #[command(flatten)]
    pub dataset: DatasetArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for the records command (one county's record history)
#[derive(Debug, Clone, Parser)]
pub struct RecordsArgs {
    /// County name, without the "County" suffix
    #[arg(
        short = 'c',
        long = "county",
        value_name = "NAME",
        help = "County name, without the \"County\" suffix"
    )]
    pub county: String,

    /// Full state name the county belongs to
    #[arg(
        short = 's',
        long = "state",
        value_name = "STATE",
        help = "Full state name the county belongs to"
    )]
    pub state: String,

    /// Filter to one measure (exact name)
    #[arg(
        short = 'm',
        long = "measure",
        value_name = "NAME",
        help = "Filter to one measure (exact name)"
    )]
    pub measure: Option<String>,

    /// Filter to one year span label, e.g. "2014-2018"
    #[arg(
        long = "year-span",
        value_name = "SPAN",
        help = "Filter to one year span label, e.g. \"2014-2018\""
    )]
    pub year_span: Option<String>,

    /// Keep only records with a value strictly above the threshold
    #[arg(
        long = "above",
        value_name = "VALUE",
        help = "Keep only records with a value strictly above the threshold"
    )]
    pub above: Option<f64>,

    /// Keep only records with a value strictly below the threshold
    #[arg(
        long = "below",
        value_name = "VALUE",
        conflicts_with = "above",
        help = "Keep only records with a value strictly below the threshold"
    )]
    pub below: Option<f64>,

    /// Re-rank the result by raw value instead of year span order
    #[arg(
        long = "rank-by-value",
        value_enum,
        value_name = "DIRECTION",
        help = "Re-rank the result by raw value (asc or desc)"
    )]
    pub rank_by_value: Option<RankDirection>,

    #[command(flatten)]
    pub dataset: DatasetArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for the states command
#[derive(Debug, Clone, Parser)]
pub struct StatesArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for the stats command
#[derive(Debug, Clone, Parser)]
pub struct StatsArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Output format options for query results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table output
    #[default]
    Table,
    /// JSON format for scripting
    Json,
}

/// Ranking direction for value-ordered record lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RankDirection {
    /// Smallest value first
    Asc,
    /// Largest value first
    Desc,
}

impl From<RankDirection> for SortOrder {
    fn from(direction: RankDirection) -> Self {
        match direction {
            RankDirection::Asc => SortOrder::Ascending,
            RankDirection::Desc => SortOrder::Descending,
        }
    }
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .expect("Command should be present when get_command() is called")
    }
}

impl Commands {
    /// The dataset options shared by every subcommand
    pub fn dataset_args(&self) -> &DatasetArgs {
        match self {
            Self::Counties(args) => &args.dataset,
            Self::Records(args) => &args.dataset,
            Self::States(args) => &args.dataset,
            Self::Stats(args) => &args.dataset,
        }
    }

    /// The output options shared by every subcommand
    pub fn output_args(&self) -> &OutputArgs {
        match self {
            Self::Counties(args) => &args.output,
            Self::Records(args) => &args.output,
            Self::States(args) => &args.output,
            Self::Stats(args) => &args.output,
        }
    }

    /// Validate the command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        self.dataset_args().validate()?;
        self.output_args().validate()?;

        if let Self::Records(args) = self {
            if args.county.trim().is_empty() {
                return Err(Error::configuration("County name cannot be empty"));
            }
            if args.state.trim().is_empty() {
                return Err(Error::configuration("State name cannot be empty"));
            }
        }

        Ok(())
    }
}

impl DatasetArgs {
    /// Validate the dataset arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(url) = &self.dataset_url {
            if url.trim().is_empty() {
                return Err(Error::configuration("Dataset URL cannot be empty"));
            }
        }

        if let Some(input_path) = &self.input_path {
            if !input_path.exists() {
                return Err(Error::configuration(format!(
                    "Input file does not exist: {}",
                    input_path.display()
                )));
            }

            if !input_path.is_file() {
                return Err(Error::configuration(format!(
                    "Input path is not a file: {}",
                    input_path.display()
                )));
            }
        }

        Ok(())
    }

    /// Build the pipeline configuration with CLI overrides applied
    pub fn to_config(&self) -> Config {
        let mut config = Config::default();

        if let Some(url) = &self.dataset_url {
            config = config.with_dataset_url(url);
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_fetch_timeout_secs(secs);
        }

        config
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show the loading spinner (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl OutputArgs {
    /// Validate the output arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(output_file) = &self.output_file {
            if let Some(parent) = output_file.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(Error::configuration(format!(
                        "Output file directory does not exist: {}",
                        parent.display()
                    )));
                }
            }
        }

        Ok(())
    }
}

impl RecordsArgs {
    /// The county identity named by `--county` and `--state`
    pub fn county_identifier(&self) -> CountyIdentifier {
        CountyIdentifier::new(self.county.trim(), self.state.trim())
    }

    /// The value-range predicate implied by `--above` / `--below`
    pub fn value_range(&self) -> ValueRange {
        match (self.above, self.below) {
            (Some(threshold), _) => ValueRange::Above(threshold),
            (_, Some(threshold)) => ValueRange::Below(threshold),
            (None, None) => ValueRange::All,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn records_args() -> RecordsArgs {
        RecordsArgs {
            county: "Albany".to_string(),
            state: "New York".to_string(),
            measure: None,
            year_span: None,
            above: None,
            below: None,
            rank_by_value: None,
            dataset: DatasetArgs::default(),
            output: OutputArgs::default(),
        }
    }

    #[test]
    fn test_log_level() {
        let mut args = DatasetArgs::default();

        // Default level
        assert_eq!(args.get_log_level(), "warn");

        // Verbose levels
        args.verbose = 1;
        assert_eq!(args.get_log_level(), "info");

        args.verbose = 2;
        assert_eq!(args.get_log_level(), "debug");

        args.verbose = 3;
        assert_eq!(args.get_log_level(), "trace");

        // Quiet mode
        args.quiet = true;
        assert_eq!(args.get_log_level(), "error");
    }

    #[test]
    fn test_show_progress() {
        let mut args = DatasetArgs::default();
        assert!(args.show_progress());

        args.quiet = true;
        assert!(!args.show_progress());
    }

    #[test]
    fn test_to_config_applies_overrides() {
        let args = DatasetArgs {
            dataset_url: Some("https://example.com/data.csv".to_string()),
            timeout_secs: Some(5),
            ..Default::default()
        };

        let config = args.to_config();
        assert_eq!(config.dataset_url, "https://example.com/data.csv");
        assert_eq!(config.fetch_timeout_secs, 5);

        // No overrides: defaults pass through.
        let config = DatasetArgs::default().to_config();
        assert_eq!(config.dataset_url, Config::default().dataset_url);
        assert_eq!(config.fetch_timeout_secs, Config::default().fetch_timeout_secs);
    }

    #[test]
    fn test_dataset_args_validation() {
        let file = NamedTempFile::new().unwrap();

        let args = DatasetArgs {
            input_path: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        assert!(args.validate().is_ok());

        // Nonexistent input file
        let args = DatasetArgs {
            input_path: Some("/nonexistent/rankings.csv".into()),
            ..Default::default()
        };
        assert!(args.validate().is_err());

        // Empty URL
        let args = DatasetArgs {
            dataset_url: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_records_args_validation() {
        let valid = Commands::Records(records_args());
        assert!(valid.validate().is_ok());

        let mut args = records_args();
        args.county = "  ".to_string();
        assert!(Commands::Records(args).validate().is_err());

        let mut args = records_args();
        args.state = String::new();
        assert!(Commands::Records(args).validate().is_err());
    }

    #[test]
    fn test_value_range_mapping() {
        let mut args = records_args();
        assert_eq!(args.value_range(), ValueRange::All);

        args.above = Some(50.0);
        assert_eq!(args.value_range(), ValueRange::Above(50.0));

        args.above = None;
        args.below = Some(50.0);
        assert_eq!(args.value_range(), ValueRange::Below(50.0));
    }

    #[test]
    fn test_above_below_conflict() {
        let result = Args::try_parse_from([
            "county-health",
            "records",
            "--county",
            "Albany",
            "--state",
            "New York",
            "--above",
            "50",
            "--below",
            "50",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_url_input_conflict() {
        let result = Args::try_parse_from([
            "county-health",
            "counties",
            "--url",
            "https://example.com/data.csv",
            "--input",
            "rankings.csv",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rank_direction_conversion() {
        assert_eq!(SortOrder::from(RankDirection::Asc), SortOrder::Ascending);
        assert_eq!(SortOrder::from(RankDirection::Desc), SortOrder::Descending);
    }
}
