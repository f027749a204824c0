//! pkgrev-hooks entry point.
//!
//! Offline tooling around the hooks: renders the provider workload for a
//! revision and shows the effective configuration.

mod cli_parser;

use std::process::ExitCode;

use pkgrev_hooks::config::{self, HooksConfig};
use pkgrev_hooks::pkg::ProviderMeta;
use pkgrev_hooks::templates::build_provider_workload;
use pkgrev_hooks::{telemetry, DesiredState, PackageKind, PackageRevision};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    if cli_parser::is_info_command(command) {
        return run_info(command, &args);
    }

    let config = match config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::from(2u8);
        }
    };
    telemetry::init_logging(&config.logging);

    match command {
        "render" => run_render(&config, &args[2..]),
        "config" => run_config_cmd(&config, &args),
        _ => {
            eprintln!("Unknown command: {}", command);
            cli_parser::print_usage();
            ExitCode::FAILURE
        }
    }
}

/// Answers help and version without loading configuration.
fn run_info(command: &str, args: &[String]) -> ExitCode {
    if matches!(command, "version" | "--version" | "-V") {
        println!("pkgrev-hooks {}", env!("CARGO_PKG_VERSION"));
    } else if let Some(sub) = args.get(2) {
        cli_parser::print_command_help(sub);
    } else {
        cli_parser::print_usage();
    }
    ExitCode::SUCCESS
}

fn run_render(config: &HooksConfig, args: &[String]) -> ExitCode {
    let parsed = match cli_parser::parse_render_args(args) {
        Ok(parsed) => parsed,
        Err(msg) => {
            eprintln!("{}", msg);
            return ExitCode::FAILURE;
        }
    };

    let mut rev = PackageRevision::new(PackageKind::Provider, parsed.name, parsed.image)
        .with_desired_state(DesiredState::Active);
    rev.spec.revision = parsed.revision;
    let namespace = parsed.namespace.as_deref().unwrap_or(config.namespace.as_str());

    let workload = match build_provider_workload(&ProviderMeta::default(), &rev, namespace) {
        Ok(workload) => workload,
        Err(e) => {
            eprintln!("Invalid revision: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let rendered =
        serde_json::to_string_pretty(&(&workload.service_account, &workload.deployment));
    match rendered {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to encode workload: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_config_cmd(config: &HooksConfig, args: &[String]) -> ExitCode {
    let sub = args.get(2).map(|s| s.as_str()).unwrap_or("show");
    match sub {
        "show" => match toml::to_string_pretty(config) {
            Ok(rendered) => {
                println!("{}", rendered);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Failed to encode config: {}", e);
                ExitCode::FAILURE
            }
        },
        _ => {
            eprintln!("Unknown config subcommand: {}", sub);
            cli_parser::print_command_help("config");
            ExitCode::FAILURE
        }
    }
}
