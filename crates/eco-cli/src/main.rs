//! EcoInspect command-line tool.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use eco_cli::logging::{LogConfig, LogFormat, init_logging};
use eco_cli::settings::load_settings;

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::Context;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let settings = load_settings(cli.config.as_deref());
    let ctx = Context {
        data_dir: settings.data_dir(cli.data_dir.as_deref()),
        settings,
    };

    let result = match &cli.command {
        Command::Login { name } => commands::run_login(&ctx, name),
        Command::Logout => commands::run_logout(&ctx),
        Command::Status => commands::run_status(&ctx),
        Command::Forms => commands::run_forms(&ctx),
        Command::Inspector(command) => commands::run_inspector(&ctx, command),
        Command::Inspect(args) => commands::run_inspect(&ctx, args).await,
        Command::History(args) => commands::run_history(&ctx, args),
        Command::Print(args) => commands::run_print(&ctx, args).await,
    };
    if let Err(error) = result {
        tracing::error!("{error:#}");
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
