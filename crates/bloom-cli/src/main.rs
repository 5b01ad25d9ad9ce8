//! Bloom authoring CLI.

use clap::{ColorChoice, Parser};
use bloom_cli::logging::{LogConfig, LogFormat, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    run_accept, run_add, run_align, run_config, run_delete, run_edit, run_export, run_generate,
    run_include, run_init, run_module, run_outline, run_reopen, run_reset_module, run_show,
    run_status,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let path = cli.session.as_path();
    let result = match &cli.command {
        Command::Init(args) => run_init(path, args),
        Command::Module(args) => run_module(path, args),
        Command::ResetModule => run_reset_module(path),
        Command::Outline(args) => run_outline(path, args),
        Command::Add(args) => run_add(path, args),
        Command::Edit(args) => run_edit(path, args),
        Command::Delete(args) => run_delete(path, args),
        Command::Align(args) => run_align(path, args),
        Command::Accept(args) => run_accept(path, args),
        Command::Reopen(args) => run_reopen(path, args),
        Command::Generate(args) => run_generate(path, args),
        Command::Include(args) => run_include(path, args),
        Command::Export(args) => run_export(path, args),
        Command::Status => run_status(path),
        Command::Show(args) => run_show(path, args),
        Command::Config(args) => run_config(path, args),
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
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
