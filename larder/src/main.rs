// This file is part of the product Larder.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::rt::System;
use actix_web::{App, HttpServer, middleware::Logger, web};
use log::{LevelFilter, info};
use std::io::Write;

use larder::api;
use larder::app_state::AppState;
use larder::bootstrap;
use larder::config::ValidatedConfig;
use larder::public;
use larder::runtime_paths::RuntimePaths;

fn main() {
    let exit_code = run();
    std::process::exit(exit_code);
}

fn run() -> i32 {
    let parsed_args = match parse_args() {
        Ok(args) => args,
        Err(error) => {
            eprintln!("❌ Invalid command line arguments: {}", error);
            eprintln!("❌ Use -C <root> to set the runtime directory.");
            return 1;
        }
    };

    if parsed_args.show_help {
        print!("{}", help_text());
        return 0;
    }

    let bootstrap = match bootstrap::bootstrap_runtime(&parsed_args.runtime_root) {
        Ok(result) => result,
        Err(error) => {
            eprintln!("❌ Bootstrap error: {}", error);
            eprintln!("❌ Application cannot start with invalid configuration.");
            return 1;
        }
    };

    match System::new().block_on(run_server(bootstrap)) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("❌ Server failed to start: {}", error);
            1
        }
    }
}

async fn run_server(bootstrap: bootstrap::BootstrapResult) -> std::io::Result<()> {
    let validated_config = bootstrap.validated_config;
    let runtime_paths = bootstrap.runtime_paths;

    // Configure logging with a stable format
    env_logger::Builder::from_default_env()
        .filter_level(log_level(&validated_config))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}: {}",
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f UTC"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    log_startup_info(&validated_config, &runtime_paths);

    let app_state = AppState::new(&validated_config, runtime_paths)
        .map_err(|error| std::io::Error::other(error.to_string()))?;
    let app_state = web::Data::new(app_state);
    info!(
        "✅ Stores initialized for app: {}",
        validated_config.app.name
    );

    let workers = validated_config.server.workers;

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(Logger::new(
                r#"%a "%r" %s %b "%{Referer}i" "%{User-Agent}i" %T"#,
            ))
            .configure(api::configure)
            .configure(public::configure)
    })
    .workers(workers)
    .bind(validated_config.server.address_tuple())?
    .run()
    .await
}

fn log_level(config: &ValidatedConfig) -> LevelFilter {
    match config.logging.level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

fn log_startup_info(config: &ValidatedConfig, runtime_paths: &RuntimePaths) {
    info!("Starting {} - {}", config.app.name, config.app.description);
    info!("Workers: {}", config.server.workers);
    info!(
        "Listening on http://{}:{}",
        config.server.host, config.server.port
    );
    info!("Runtime root: {}", runtime_paths.root.display());
    info!("Config file: {}", runtime_paths.config_file.display());
    info!("Recipes file: {}", runtime_paths.recipes_file.display());
    info!("Tags file: {}", runtime_paths.tags_file.display());
    info!("Public directory: {}", runtime_paths.public_dir.display());

    if let Ok(current_dir) = std::env::current_dir() {
        info!("Working directory: {}", current_dir.display());
    }
}

fn help_text() -> String {
    [
        "Larder - a personal recipe collection API",
        "",
        "Usage: larder [-C <root>]",
        "",
        "  -C <root>   Runtime directory holding config.yaml, data/ and public/",
        "              (default: current directory; created when missing)",
        "  -h, --help  Print this help",
        "",
    ]
    .join("\n")
}

struct ParsedArgs {
    runtime_root: std::path::PathBuf,
    show_help: bool,
}

fn parse_args() -> Result<ParsedArgs, String> {
    parse_args_from(std::env::args().skip(1))
}

fn parse_args_from<I>(args: I) -> Result<ParsedArgs, String>
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();
    if args.iter().any(|arg| is_help_flag(arg)) {
        return Ok(ParsedArgs {
            runtime_root: std::path::PathBuf::from("."),
            show_help: true,
        });
    }

    let mut args = args.into_iter();
    let mut runtime_root = std::path::PathBuf::from(".");

    while let Some(arg) = args.next() {
        if arg == "--" {
            continue;
        } else if arg == "-C" {
            let value = args
                .next()
                .ok_or_else(|| "Missing value for -C".to_string())?;
            runtime_root = std::path::PathBuf::from(value);
        } else {
            return Err(format!("Unknown argument: {}", arg));
        }
    }

    let runtime_root = make_runtime_root_absolute(runtime_root)?;

    Ok(ParsedArgs {
        runtime_root,
        show_help: false,
    })
}

fn is_help_flag(arg: &str) -> bool {
    arg == "-h" || arg == "--help"
}

fn make_runtime_root_absolute(
    runtime_root: std::path::PathBuf,
) -> Result<std::path::PathBuf, String> {
    if runtime_root.is_absolute() {
        return Ok(runtime_root);
    }

    let current_dir = std::env::current_dir()
        .map_err(|error| format!("Failed to resolve current directory: {}", error))?;
    Ok(current_dir.join(runtime_root))
}

#[cfg(test)]
mod tests {
    use super::{log_level, parse_args_from};
    use larder::config::{
        AppConfig, DataConfig, LoggingConfig, ServerConfig, ValidatedConfig,
    };
    use log::LevelFilter;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    fn config_with_level(level: &str) -> ValidatedConfig {
        ValidatedConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
                workers: 1,
            },
            logging: LoggingConfig {
                level: level.to_string(),
            },
            app: AppConfig {
                name: "Larder".to_string(),
                description: "A personal recipe collection API".to_string(),
            },
            data: DataConfig { pretty: true },
        }
    }

    #[test]
    fn parse_args_defaults_to_current_directory() {
        let parsed = parse_args_from(Vec::new()).expect("parse args");
        assert!(!parsed.show_help);
        assert!(parsed.runtime_root.is_absolute());
    }

    #[test]
    fn parse_args_accepts_runtime_root() {
        let parsed = parse_args_from(args(&["-C", "runtime"])).expect("parse args");
        assert!(!parsed.show_help);
        assert!(parsed.runtime_root.ends_with("runtime"));
    }

    #[test]
    fn parse_args_ignores_double_dash() {
        let parsed = parse_args_from(args(&["--", "-C", "runtime"])).expect("parse args");
        assert!(parsed.runtime_root.ends_with("runtime"));
    }

    #[test]
    fn parse_args_rejects_missing_root_value() {
        match parse_args_from(args(&["-C"])) {
            Err(error) => assert!(error.contains("-C")),
            Ok(_) => panic!("expected missing value rejection"),
        }
    }

    #[test]
    fn parse_args_rejects_unknown_arguments() {
        match parse_args_from(args(&["--verbose"])) {
            Err(error) => assert!(error.contains("--verbose")),
            Ok(_) => panic!("expected unknown argument rejection"),
        }
    }

    #[test]
    fn parse_args_accepts_help_flag() {
        for flag in ["-h", "--help"] {
            let parsed = parse_args_from(args(&[flag])).expect("parse args");
            assert!(parsed.show_help);
        }
    }

    #[test]
    fn parse_args_help_wins_over_other_arguments() {
        let parsed = parse_args_from(args(&["-C", "runtime", "--help"])).expect("parse args");
        assert!(parsed.show_help);
    }

    #[test]
    fn log_level_maps_configured_levels() {
        assert_eq!(log_level(&config_with_level("debug")), LevelFilter::Debug);
        assert_eq!(log_level(&config_with_level("WARN")), LevelFilter::Warn);
        assert_eq!(log_level(&config_with_level("unknown")), LevelFilter::Info);
    }
}
