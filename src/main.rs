mod app;
mod model;
mod msg;
mod prompt;
mod storage;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing_subscriber::EnvFilter;

use app::App;
use model::config::AppConfig;
use model::store::NoteStore;
use msg::Msg;
use prompt::TerminalPrompt;
use storage::NoteDir;

fn main() -> Result<()> {
    let config = AppConfig::load()?;

    // Initialize logging to file (never stdout)
    let log_dir = directories::ProjectDirs::from("", "", "pocketnote")
        .map(|d| d.data_dir().to_path_buf())
        .unwrap_or_else(std::env::temp_dir);
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "pocketnote.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    tracing::info!(notes_dir = %config.notes_dir().display(), "pocketnote starting");

    let store = NoteStore::load(NoteDir::new(config.notes_dir()));
    tracing::info!(notes = store.len(), "store ready");
    let app = App::new(store);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, app, config.frame_interval());

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        tracing::error!("fatal: {e:?}");
        eprintln!("pocketnote error: {e:?}");
    }

    tracing::info!("pocketnote stopped");
    Ok(())
}

/// One pass per frame: draw, wait up to `frame` for input, apply it.
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    frame: Duration,
) -> Result<()> {
    loop {
        terminal.draw(|f| app.view(f))?;

        if !event::poll(frame)? {
            continue;
        }

        let msg = match event::read()? {
            Event::Key(k) => Msg::Key(k),
            Event::Resize(w, h) => Msg::Resize(w, h),
            _ => continue,
        };

        app.update(msg, &mut TerminalPrompt::new(terminal))?;

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
