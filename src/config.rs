//! Resolved runtime configuration, built once from the command line.

use crate::cli::Cli;
use crate::storage::default_data_dir;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frontend {
    Plain,
    Tui,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Play,
    ShowStats,
    ResetStats,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub mode: RunMode,
    pub frontend: Frontend,
    pub word_list: Option<PathBuf>,
    /// `None` when running offline.
    pub dictionary_api: Option<String>,
    pub data_dir: PathBuf,
    pub persist_stats: bool,
    pub verbose: u8,
}

impl AppConfig {
    #[must_use]
    pub fn from_cli(cli: Cli) -> Self {
        let mode = if cli.reset_stats {
            RunMode::ResetStats
        } else if cli.stats {
            RunMode::ShowStats
        } else {
            RunMode::Play
        };
        Self {
            mode,
            frontend: if cli.plain { Frontend::Plain } else { Frontend::Tui },
            word_list: cli.wordbank_path,
            dictionary_api: (!cli.offline).then_some(cli.api_url),
            data_dir: cli.data_dir.unwrap_or_else(default_data_dir),
            persist_stats: !cli.ephemeral,
            verbose: cli.verbose,
        }
    }

    /// Where logs go: a file while the full-screen interface owns the
    /// terminal, stderr otherwise.
    #[must_use]
    pub fn log_dir(&self) -> Option<&Path> {
        (self.mode == RunMode::Play && self.frontend == Frontend::Tui)
            .then_some(self.data_dir.as_path())
    }
}
