// Entrypoint for the book log.
// - Keeps `main` small: load config, set up logging, open the store and hand
//   everything to the menu loop.
// - Returns `anyhow::Result`; only a broken terminal ends the program early.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use booklog_cli::{ui::main_menu, BookLog, CancelSignal, Config, SqliteStore, TerminalPrompter};
use crossterm::style::Stylize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> anyhow::Result<()> {
    // A bad config file is reported, then ignored.
    let config = Config::load().unwrap_or_else(|err| {
        eprintln!("{}", format!("Using default settings: {err:#}").yellow());
        Config::default()
    });
    init_logging(&config);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message("Opening your book log...");
    let mut store = SqliteStore::new(&config.database_path);
    let opened = store.connect();
    spinner.finish_and_clear();

    // Keep going when the database cannot be opened: every action retries
    // and reports its own failure.
    if let Err(err) = opened {
        tracing::warn!(
            path = %config.database_path.display(),
            error = %err,
            "could not open book log"
        );
        println!("{}", format!("Could not open the book log: {err}").red());
    }

    let mut app = BookLog::new(
        store,
        TerminalPrompter::new(),
        CancelSignal::new(config.cancel_token.as_str()),
    );
    main_menu(&mut app)?;
    Ok(())
}

/// Log to the configured file so log lines never land between prompts;
/// stderr when there is no usable file.
fn init_logging(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = fmt().with_env_filter(filter).with_target(true);

    match config.log_file.as_deref().map(open_log_file) {
        Some(Ok(file)) => builder.with_ansi(false).with_writer(Mutex::new(file)).init(),
        _ => builder.with_writer(std::io::stderr).init(),
    }
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}
