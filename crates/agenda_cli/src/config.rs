//! Command-line and environment configuration.
//!
//! # Responsibility
//! - Parse flags with environment fallbacks.
//! - Resolve paths against the working directory.

use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(
    name = "agenda",
    version,
    about = "Interactive contact agenda stored in a JSON file"
)]
pub struct CommandLine {
    /// JSON document holding the agenda.
    #[arg(long, env = "AGENDA_DATA_FILE", default_value = "agenda.json")]
    pub data_file: PathBuf,
    /// Directory for rolling log files. Logging is off when unset.
    #[arg(long, env = "AGENDA_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
    /// trace|debug|info|warn|error
    #[arg(long, env = "AGENDA_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaConfig {
    pub data_file: PathBuf,
    /// Always absolute when set.
    pub log_dir: Option<PathBuf>,
    pub log_level: String,
}

impl AgendaConfig {
    pub fn resolve(command_line: CommandLine, working_dir: &Path) -> Self {
        Self {
            data_file: command_line.data_file,
            log_dir: command_line
                .log_dir
                .map(|dir| absolutize(dir, working_dir)),
            log_level: command_line
                .log_level
                .unwrap_or_else(|| agenda_core::default_log_level().to_string()),
        }
    }
}

fn absolutize(path: PathBuf, working_dir: &Path) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        working_dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::{AgendaConfig, CommandLine};
    use clap::Parser;
    use std::path::{Path, PathBuf};

    #[test]
    fn defaults_apply_without_flags() {
        let command_line = CommandLine::try_parse_from(["agenda"]).unwrap();
        let config = AgendaConfig::resolve(command_line, Path::new("/work"));

        assert_eq!(config.data_file, PathBuf::from("agenda.json"));
        assert_eq!(config.log_dir, None);
        assert_eq!(config.log_level, agenda_core::default_log_level());
    }

    #[test]
    fn relative_log_dir_is_resolved_against_working_dir() {
        let command_line = CommandLine::try_parse_from([
            "agenda",
            "--data-file",
            "data/contactos.json",
            "--log-dir",
            "logs",
            "--log-level",
            "warn",
        ])
        .unwrap();
        let config = AgendaConfig::resolve(command_line, Path::new("/work"));

        assert_eq!(config.data_file, PathBuf::from("data/contactos.json"));
        assert_eq!(config.log_dir, Some(PathBuf::from("/work/logs")));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(CommandLine::try_parse_from(["agenda", "--verbose"]).is_err());
    }
}
