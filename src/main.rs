mod commands;

use std::process;

use clap::{CommandFactory, Parser};
use colored::*;
use commands::{Cli, Commands};
use dotenv::dotenv;
use tplscan::{ScanEngine, ScanResult};
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let _guard = tplscan::logging::init_logger();

    let config = match tplscan::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    let args = Cli::parse();

    match args.command {
        Some(Commands::Scan) => {
            if let Err(err) = run_scan(ScanEngine::new(config)) {
                error!("Error: {}", err);
                process::exit(1);
            }
        }
        Some(Commands::Tree { unit }) => {
            let engine = ScanEngine::new(config);
            match engine.scan_unit(&unit) {
                Ok(tree) => {
                    println!("{}", unit.cyan());
                    print!("{}", tree.render());
                }
                Err(err) => {
                    error!("Error: {}", err);
                    process::exit(1);
                }
            }
        }
        Some(Commands::Resolve { unit, reference }) => {
            let engine = ScanEngine::new(config);
            match engine.scan_unit(&unit) {
                Ok(tree) => match tree.resolve(&reference, engine.config().delimiter) {
                    Some(path) => println!("{}", path),
                    None => {
                        error!("No template matches '{}' in unit '{}'", reference, unit);
                        process::exit(1);
                    }
                },
                Err(err) => {
                    error!("Error: {}", err);
                    process::exit(1);
                }
            }
        }
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:?}", config);
        }
        None => {
            let _ = Cli::command().print_long_help();
        }
    }

    Ok(())
}

fn run_scan(engine: ScanEngine) -> anyhow::Result<()> {
    let result: ScanResult = engine.scan()?;

    for (unit, tree) in &result.trees {
        println!("{}", unit.cyan());
        print!("{}", tree.render());
        println!();
    }

    info!(
        "Walk: {}, Build: {}",
        format!("{:.2}ms", result.walk_duration.as_secs_f64() * 1000.0).green(),
        format!("{:.2}ms", result.build_duration.as_secs_f64() * 1000.0).green(),
    );
    info!(
        "{} units, {} templates",
        format!("{}", result.unit_count).cyan(),
        format!("{}", result.total_templates).cyan(),
    );

    Ok(())
}
