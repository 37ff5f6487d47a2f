use anyhow::{Context, bail};
use guess5::cli::{CliInterface, format_stats, parse_cli};
use guess5::config::{AppConfig, Frontend, RunMode};
use guess5::logging::init_logging;
use guess5::session::{DEFAULT_SECRET, GameSession};
use guess5::storage::{FileStore, KeyValueStore, MemoryStore};
use guess5::streak::StreakStore;
use guess5::tui::TuiInterface;
use guess5::word_source::{
    DictionaryWordSource, EmbeddedWordSource, WordSource, load_words_from_file,
};
use guess5::{game_loop, info_log};
use std::io;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_cli(parse_cli());
    init_logging(config.verbose, config.log_dir())
        .with_context(|| format!("failed to open log file in {}", config.data_dir.display()))?;

    let storage: Box<dyn KeyValueStore> = if config.persist_stats {
        Box::new(FileStore::new(&config.data_dir))
    } else {
        Box::new(MemoryStore::new())
    };
    let mut streaks = StreakStore::open(storage);

    match config.mode {
        RunMode::ResetStats => {
            streaks.reset_all_stats();
            println!("All statistics have been reset.");
            return Ok(());
        }
        RunMode::ShowStats => {
            for line in format_stats(&streaks.stats()) {
                println!("{line}");
            }
            return Ok(());
        }
        RunMode::Play => {}
    }

    let words = match &config.word_list {
        Some(path) => EmbeddedWordSource::new(
            load_words_from_file(path)
                .with_context(|| format!("failed to load word list from '{}'", path.display()))?,
        ),
        None => EmbeddedWordSource::embedded(),
    };
    if words.is_empty() {
        bail!("the word list contains no five-letter words");
    }
    info_log!("Loaded {} words", words.len());

    let word_source: Box<dyn WordSource> = match config.dictionary_api {
        Some(api) => Box::new(DictionaryWordSource::new(words, api)),
        None => Box::new(words),
    };
    let mut session = GameSession::new(word_source, streaks, DEFAULT_SECRET);

    match config.frontend {
        Frontend::Tui => {
            let mut interface = TuiInterface::new().context("failed to initialize terminal")?;
            game_loop(&mut session, &mut interface).await;
            interface.cleanup().context("failed to restore terminal")?;
        }
        Frontend::Plain => {
            let stdin = io::stdin();
            let mut interface = CliInterface::new(stdin.lock());
            game_loop(&mut session, &mut interface).await;
        }
    }
    Ok(())
}
