use clap::Parser;
use marker_server::cli::{args::Args, commands};
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
    println!("Marker Server - JSON-backed map marker record service");
    println!("=====================================================");
    println!();
    println!("Manage map marker (station) records persisted as JSON documents,");
    println!("with CRUD endpoints, bulk list-field updates, and xlsx export.");
    println!();
    println!("USAGE:");
    println!("    marker-server <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    serve       Run the HTTP API server (main command)");
    println!("    export      Write a collection's xlsx projection to a file");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Serve the default data directory on port 7000:");
    println!("    marker-server serve");
    println!();
    println!("    # Serve a custom data directory on a custom port:");
    println!("    marker-server serve --data-dir /srv/markers --port 8080");
    println!();
    println!("    # Export the admin collection to a workbook:");
    println!("    marker-server export admin --output admin_stations.xlsx");
    println!();
    println!("For detailed help on any command, use:");
    println!("    marker-server <COMMAND> --help");
}
