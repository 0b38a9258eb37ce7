//! `agenda` executable: interactive contact book over a JSON file.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open the agenda.
//! - Hand stdin/stdout to the interactive shell.

mod config;
mod render;
mod shell;

use agenda_core::{AgendaService, JsonFileRepository};
use clap::Parser;
use config::{AgendaConfig, CommandLine};
use log::{error, info};
use shell::Shell;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let working_dir = std::env::current_dir().unwrap_or_default();
    let config = AgendaConfig::resolve(CommandLine::parse(), &working_dir);

    if let Some(log_dir) = &config.log_dir {
        if let Err(err) = agenda_core::init_logging(&config.log_level, log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }
    info!(
        "event=cli_start module=cli status=ok version={} data_file={}",
        agenda_core::core_version(),
        config.data_file.display()
    );

    let service = AgendaService::open(JsonFileRepository::new(&config.data_file));
    let stdin = io::stdin();
    let mut shell = Shell::new(service, stdin.lock(), io::stdout().lock());

    match shell.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_exit module=cli status=error error={}", err);
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
