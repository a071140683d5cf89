use clap::Parser;
use county_health::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Create async runtime and run the main command logic
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(commands::run(args));

    match result {
        Ok(()) => {
            // Success - the query result has already been emitted
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("County Health - County Health Rankings Dataset Browser");
    println!("=======================================================");
    println!();
    println!("Fetches the County Health Rankings CSV dataset, parses it into typed");
    println!("health records, and answers county browsing and filtering queries.");
    println!();
    println!("USAGE:");
    println!("    county-health <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    counties    List counties, filtered by state and free-text search");
    println!("    records     Show one county's records by measure, years and value");
    println!("    states      List the states present in the dataset");
    println!("    stats       Show dataset summary statistics");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # List every county in New York:");
    println!("    county-health counties --state \"New York\"");
    println!();
    println!("    # Free-text search across county and state names:");
    println!("    county-health counties --search \"wash\"");
    println!();
    println!("    # One county's obesity history, high values first:");
    println!("    county-health records --county Albany --state \"New York\" \\");
    println!("                          --measure \"Adult obesity\" --rank-by-value desc");
    println!();
    println!("    # Work from a downloaded copy of the dataset:");
    println!("    county-health stats --input rankings.csv --format json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    county-health <COMMAND> --help");
}
