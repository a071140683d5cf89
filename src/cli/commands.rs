//! Command implementations for the county health CLI
//!
//! This module contains the command execution logic: logging setup, dataset
//! loading with progress reporting, and rendering of query results as tables
//! or JSON.

use crate::app::services::county_registry::{CountyFilter, CountyRegistry, RecordFilter};
use crate::app::services::dataset_cache::DatasetCache;
use crate::app::services::dataset_source::{DatasetSource, FileDatasetSource, HttpDatasetSource};
use crate::cli::args::{
    Args, Commands, CountiesArgs, DatasetArgs, OutputArgs, OutputFormat, RecordsArgs,
};
use crate::{Error, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Main command runner for the county health CLI
///
/// This function orchestrates the query workflow:
/// 1. Set up logging and validate arguments
/// 2. Load the dataset through the configured source
/// 3. Answer the query and render the result
pub async fn run(args: Args) -> Result<()> {
    let command = args.get_command();

    // Set up logging
    setup_logging(command.dataset_args())?;

    info!("Starting county-health");
    debug!("Command line arguments: {:?}", command);

    // Validate arguments
    command.validate()?;

    // Load the dataset once; every subcommand queries the same registry
    let registry = load_registry(command.dataset_args()).await?;

    match &command {
        Commands::Counties(args) => run_counties(&registry, args),
        Commands::Records(args) => run_records(&registry, args),
        Commands::States(_) => run_states(&registry, command.output_args()),
        Commands::Stats(_) => run_stats(&registry, command.output_args()),
    }
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &DatasetArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    // Create filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("county_health={}", log_level)));

    // Set up subscriber based on output format preference
    if args.quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        // Standard logging with timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Build a registry for the configured source and load the dataset
async fn load_registry(args: &DatasetArgs) -> Result<CountyRegistry> {
    let config = args.to_config();
    config.validate()?;

    let source: Box<dyn DatasetSource> = match &args.input_path {
        Some(path) => Box::new(FileDatasetSource::new(path)),
        None => Box::new(HttpDatasetSource::new(&config)?),
    };
    info!("Loading dataset from {}", source.describe());

    let mut registry = CountyRegistry::new(config, source, DatasetCache::shared());

    // Set up progress reporting
    let spinner = if args.show_progress() {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Loading dataset...");
        Some(pb)
    } else {
        None
    };

    let stats = registry.load().await;

    if let Some(pb) = &spinner {
        pb.finish_and_clear();
    }

    // The registry collapses to empty on failure; for the CLI an empty
    // session is useless, so surface the load errors as the exit reason.
    if stats.has_errors() {
        return Err(Error::registry(format!(
            "dataset load failed: {}",
            stats.errors.join("; ")
        )));
    }

    info!("{}", stats.summary());
    Ok(registry)
}

/// Execute the counties command: filtered county browsing
fn run_counties(registry: &CountyRegistry, args: &CountiesArgs) -> Result<()> {
    let mut filter = CountyFilter::default();
    if let Some(state) = &args.state {
        filter = filter.with_state(state);
    }
    if let Some(search) = &args.search {
        filter = filter.with_search(search);
    }

    let mut counties = registry.filter_counties(&filter);
    let total = counties.len();
    if let Some(limit) = args.limit {
        counties.truncate(limit);
    }

    let report = match args.output.output_format {
        OutputFormat::Table => {
            render_counties_table(&counties, total, args.output.use_color())
        }
        OutputFormat::Json => serde_json::to_string_pretty(&counties).unwrap(),
    };

    emit(report, args.output.output_file.as_deref())
}

/// Execute the records command: one county's record history
fn run_records(registry: &CountyRegistry, args: &RecordsArgs) -> Result<()> {
    let county = args.county_identifier();

    let mut filter = RecordFilter::default().with_value_range(args.value_range());
    if let Some(measure) = &args.measure {
        filter = filter.with_measure(measure);
    }
    if let Some(year_span) = &args.year_span {
        filter = filter.with_year_span(year_span);
    }

    let mut records = registry.filtered_county_records(&county, &filter);
    if let Some(direction) = args.rank_by_value {
        records = CountyRegistry::rank_records_by_value(&records, direction.into());
    }

    if records.is_empty() {
        warn!(
            "No records for {} with {}",
            county.display_title(),
            filter.value_range.describe()
        );
    }

    let report = match args.output.output_format {
        OutputFormat::Table => render_records_table(&county, &records, args.output.use_color()),
        OutputFormat::Json => serde_json::to_string_pretty(&records).unwrap(),
    };

    emit(report, args.output.output_file.as_deref())
}

/// Execute the states command: sorted unique state names
fn run_states(registry: &CountyRegistry, output: &OutputArgs) -> Result<()> {
    let states = registry.available_states();

    let report = match output.output_format {
        OutputFormat::Table => render_states_table(&states, output.use_color()),
        OutputFormat::Json => serde_json::to_string_pretty(&states).unwrap(),
    };

    emit(report, output.output_file.as_deref())
}

/// Execute the stats command: dataset summary statistics
fn run_stats(registry: &CountyRegistry, output: &OutputArgs) -> Result<()> {
    let stats = registry.statistics();
    let metadata = registry.metadata();

    let report = match output.output_format {
        OutputFormat::Table => {
            let mut lines = Vec::new();
            let title = format!("Dataset statistics ({})", metadata.source);
            lines.push(maybe_bold(&title, output.use_color()));
            lines.push(format!("  Records:  {}", stats.total_records));
            lines.push(format!("  Counties: {}", stats.unique_counties));
            lines.push(format!("  States:   {}", stats.unique_states));
            lines.push(format!("  Measures: {}", stats.unique_measures));
            lines.push(format!(
                "  Values:   {} to {}",
                stats.min_value, stats.max_value
            ));
            lines.join("\n")
        }
        OutputFormat::Json => serde_json::to_string_pretty(&stats).unwrap(),
    };

    emit(report, output.output_file.as_deref())
}

/// Render the county list as an aligned table
fn render_counties_table(
    counties: &[crate::app::models::CountyIdentifier],
    total: usize,
    use_color: bool,
) -> String {
    let mut lines = Vec::with_capacity(counties.len() + 2);
    lines.push(maybe_bold(&format!("{:<28} STATE", "COUNTY"), use_color));

    for county in counties {
        lines.push(format!("{:<28} {}", county.county, county.state));
    }

    if counties.len() < total {
        lines.push(format!("\n{} of {} counties", counties.len(), total));
    } else {
        lines.push(format!("\n{} counties", total));
    }

    lines.join("\n")
}

/// Render one county's records as an aligned table
fn render_records_table(
    county: &crate::app::models::CountyIdentifier,
    records: &[crate::app::models::HealthRecord],
    use_color: bool,
) -> String {
    let mut lines = Vec::with_capacity(records.len() + 3);
    lines.push(maybe_bold(&county.display_title(), use_color));
    lines.push(maybe_bold(
        &format!("{:<36} {:<12} {:>10}  RELEASE", "MEASURE", "YEARS", "VALUE"),
        use_color,
    ));

    for record in records {
        lines.push(format!(
            "{:<36} {:<12} {:>10.1}  {}",
            record.measure_name, record.year_span, record.raw_value, record.release_year
        ));
    }

    lines.push(format!("\n{} records", records.len()));
    lines.join("\n")
}

/// Render the state list
fn render_states_table(states: &[String], use_color: bool) -> String {
    let mut lines = Vec::with_capacity(states.len() + 2);
    lines.push(maybe_bold("STATE", use_color));
    lines.extend(states.iter().cloned());
    lines.push(format!("\n{} states", states.len()));
    lines.join("\n")
}

fn maybe_bold(text: &str, use_color: bool) -> String {
    if use_color {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

impl OutputArgs {
    /// ANSI styling only makes sense for terminal output, never for files
    fn use_color(&self) -> bool {
        self.output_file.is_none()
    }
}

/// Write the rendered report to the output file, or print it to stdout
fn emit(report: String, output_file: Option<&Path>) -> Result<()> {
    match output_file {
        Some(path) => {
            std::fs::write(path, report.as_bytes()).map_err(|e| {
                Error::io(format!("failed to write report to {}", path.display()), e)
            })?;
            info!("Report written to {}", path.display());
        }
        None => println!("{}", report),
    }

    Ok(())
}
