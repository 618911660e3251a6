//! # ShadeKits CLI
//!
//! Terminal front end for `shade_core`: normalize and price configurations,
//! build lead requests and quote sheets, dump preview geometry and price
//! prefab kits.
//!
//! ```text
//! shade_cli quote --style Gable --span 16 --depth 24 --zip 84101
//! shade_cli lead --query "style=Mono&span=12&depth=12" --name "Dana" --zip 02134 --pdf quote.pdf
//! shade_cli kit --kit cafe-cover-20x20 --roof louvered --addon led --qty 2
//! shade_cli presets --zip 84101
//! shade_cli settings --write shade.toml
//! ```

use clap::Parser;
use shade_core::errors::ShadeResult;
use shade_core::file_io::load_settings;
use shade_core::settings::EngineSettings;
use shade_core::ShadeError;

mod cli;
mod commands;
mod logging;

use crate::cli::{Cli, Command};
use crate::logging::{init_logging, LogConfig};

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging(&LogConfig::from_verbosity(cli.verbose)) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let exit_code = match run(&cli) {
        Ok(output) => {
            println!("{output}");
            0
        }
        Err(error) => {
            report_error(&error, cli.json);
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> ShadeResult<String> {
    let settings = match &cli.settings {
        Some(path) => load_settings(path)?,
        None => EngineSettings::default(),
    };

    match &cli.command {
        Command::Quote(args) => commands::run_quote(args, &settings, cli.json),
        Command::Lead(args) => commands::run_lead(args, &settings, cli.json),
        Command::Geometry(args) => commands::run_geometry(args, &settings),
        Command::Kit(args) => commands::run_kit(args, cli.json),
        Command::Presets(args) => commands::run_presets(args, &settings, cli.json),
        Command::Settings(args) => commands::run_settings(args, &settings),
    }
}

fn report_error(error: &ShadeError, json: bool) {
    tracing::debug!(code = error.error_code(), "command failed");
    if json {
        let body = serde_json::json!({
            "error_code": error.error_code(),
            "message": error.to_string(),
            "error": error,
        });
        match serde_json::to_string_pretty(&body) {
            Ok(text) => println!("{text}"),
            Err(_) => eprintln!("error: {error}"),
        }
    } else {
        eprintln!("error: {error}");
    }
}
