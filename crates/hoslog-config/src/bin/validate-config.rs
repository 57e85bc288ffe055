//! Config validation CLI tool
//!
//! Validates a hoslog configuration file and reports any errors.

use hoslog_util::{default_config_path, format_duration};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    let config_path = match args.get(1) {
        Some(path) => PathBuf::from(path),
        None => {
            let default_path = default_config_path();
            eprintln!("Usage: validate-config [config-file]");
            eprintln!();
            eprintln!("Validates a hoslog configuration file.");
            eprintln!();
            eprintln!("Example:");
            eprintln!("  validate-config {}", default_path.display());
            eprintln!("  validate-config config.example.toml");
            return ExitCode::from(2);
        }
    };

    if !config_path.exists() {
        eprintln!("Error: Configuration file not found: {}", config_path.display());
        return ExitCode::from(1);
    }

    match hoslog_config::load_config(&config_path) {
        Ok(policy) => {
            let rules = &policy.rules;
            println!("✓ Configuration is valid");
            println!();
            println!("Summary:");
            println!("  Config version: {}", hoslog_config::CURRENT_CONFIG_VERSION);
            println!("  Data directory: {}", policy.service.data_dir.display());
            println!();
            println!("Rules:");
            println!("  Daily driving:     {}", format_duration(rules.max_daily_driving));
            println!("  Daily on-duty:     {}", format_duration(rules.max_daily_on_duty));
            println!("  Cycle limit:       {}", format_duration(rules.cycle_limit));
            println!(
                "  Break after:       {} (break {})",
                format_duration(rules.driving_before_break),
                format_duration(rules.rest_break)
            );
            println!("  Daily reset:       {}", format_duration(rules.daily_reset));
            println!("  Cycle restart:     {}", format_duration(rules.cycle_restart));
            println!(
                "  Fuel every:        {} mi at {} mph",
                rules.fuel_interval_miles, rules.average_speed_mph
            );
            println!();
            println!("Routing:");
            println!("  Provider: {} ({})", policy.routing.base_url, policy.routing.profile);
            println!("  API key env: {}", policy.routing.api_key_env);
            println!("  Known places: {}", policy.routing.places.len());

            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ Configuration validation failed");
            eprintln!();
            match &e {
                hoslog_config::ConfigError::ReadError(io_err) => {
                    eprintln!("Failed to read file: {}", io_err);
                }
                hoslog_config::ConfigError::ParseError(parse_err) => {
                    eprintln!("TOML parse error:");
                    eprintln!("  {}", parse_err);
                }
                hoslog_config::ConfigError::ValidationFailed { errors } => {
                    eprintln!("Validation errors ({}):", errors.len());
                    for err in errors {
                        eprintln!("  - {}", err);
                    }
                }
                hoslog_config::ConfigError::UnsupportedVersion(ver) => {
                    eprintln!(
                        "Unsupported config version: {} (expected {})",
                        ver,
                        hoslog_config::CURRENT_CONFIG_VERSION
                    );
                }
            }
            ExitCode::from(1)
        }
    }
}
