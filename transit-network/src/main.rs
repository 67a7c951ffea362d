use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use transit_network::config::NetworkDefinition;
use transit_network::report;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Use the built-in sample network unless a definition file is given
    let definition = match std::env::args().nth(1) {
        Some(path) => match NetworkDefinition::from_path(&path) {
            Ok(definition) => definition,
            Err(e) => {
                eprintln!("Failed to load {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => NetworkDefinition::default(),
    };

    let report = match report::run(&definition) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&report) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to encode report: {e}");
            ExitCode::FAILURE
        }
    }
}
