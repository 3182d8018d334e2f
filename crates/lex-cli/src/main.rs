//! Lex & Safety command-line client.

use clap::{ColorChoice, Parser};
use lex_cli::logging::{LogConfig, LogFormat, init_logging};
use lex_cli::render::alert_line;
use lex_client::ClientError;
use lex_ui::Alert;
use std::io::{self, IsTerminal};
use tracing::error;
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    run_base, run_config, run_departamentos, run_descargar, run_documentos, run_editar,
    run_etapas, run_historico, run_juzgado, run_login, run_logout, run_nuevo, run_obligaciones,
    run_observaciones, run_proceso, run_procesos,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let result = match &cli.command {
        Command::Login(args) => run_login(args),
        Command::Logout => run_logout(),
        Command::Procesos(args) => run_procesos(args),
        Command::Proceso(args) => run_proceso(args),
        Command::Nuevo(args) => run_nuevo(args),
        Command::Editar(args) => run_editar(args),
        Command::Observaciones(args) => run_observaciones(args),
        Command::Obligaciones(args) => run_obligaciones(args),
        Command::Etapas(args) => run_etapas(args),
        Command::Historico(args) => run_historico(args),
        Command::Documentos(args) => run_documentos(args),
        Command::Descargar(args) => run_descargar(args),
        Command::Base(args) => run_base(args),
        Command::Juzgado(args) => run_juzgado(args),
        Command::Departamentos(args) => run_departamentos(args),
        Command::Config(args) => run_config(args),
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(err) => {
            error!(error = %format!("{err:#}"), "command failed");
            eprintln!("{}", alert_line(&failure_alert(&err)));
            1
        }
    };
    std::process::exit(exit_code);
}

/// Client errors carry their own alert; anything else is shown as is.
fn failure_alert(err: &anyhow::Error) -> Alert {
    match err.downcast_ref::<ClientError>() {
        Some(client_error) => client_error.alert(),
        None => Alert::error("Error", format!("{err:#}")),
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
