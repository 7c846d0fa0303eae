mod app;
mod card;
mod config;
mod fetch;
mod handlers;
mod logging;
mod model;
mod overlay;
mod registry;
mod render;
mod search;
mod ui;

use app::{App, InputMode};
use clap::Parser;
use config::{ConfigSource, ExplorerConfig};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use fetch::{FetchChannels, FetchRequest, ShowFetcher, TvMazeClient};
use std::path::PathBuf;
use std::sync::Arc;

/// TUI browser for TV shows from the TVmaze database
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Path to a JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Show name to search for on startup
    #[arg(long)]
    query: Option<String>,

    /// Base URL of the show database API
    #[arg(long)]
    api_url: Option<String>,

    /// Log debug events
    #[arg(short, long)]
    verbose: bool,

    /// Log warnings and errors only
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let _log_guard = match config::default_log_dir() {
        Ok(dir) => match logging::init(&dir, logging::Verbosity::from_flags(cli.verbose, cli.quiet)) {
            Ok(guard) => Some(guard),
            Err(e) => {
                eprintln!("Warning: logging disabled, cannot write to {}: {}", dir.display(), e);
                None
            }
        },
        Err(e) => {
            eprintln!("Warning: logging disabled: {}", e.user_message());
            None
        }
    };

    let (mut config, source) = match ExplorerConfig::load(cli.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            std::process::exit(1);
        }
    };
    if let Some(query) = cli.query {
        config.initial_query = query;
    }
    if let Some(api_url) = cli.api_url {
        config.api_base_url = api_url;
    }
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e.user_message());
        std::process::exit(1);
    }
    match &source {
        ConfigSource::File(path) => tracing::info!(path = %path.display(), "config loaded"),
        ConfigSource::Defaults => tracing::info!("using default config"),
    }

    let mut app = App::new(&config)?;
    let client = Arc::new(TvMazeClient::new(&config)?);
    tracing::info!(api = client.base_url(), "show explorer starting");

    // Init terminal
    let mut terminal = ratatui::init();

    // Main loop
    let result = run_app(&mut terminal, &mut app, client).await;

    // Restore terminal
    ratatui::restore();

    if let Err(e) = result {
        tracing::error!(error = %e, "event loop failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app<F: ShowFetcher>(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
    fetcher: Arc<F>,
) -> Result<(), Box<dyn std::error::Error>> {
    let FetchChannels { sender, mut receiver } = FetchChannels::new();
    fetch::dispatch(fetcher.clone(), app.start(), sender.clone());

    loop {
        // Apply every fetch that finished since the last frame
        while let Ok(message) = receiver.try_recv() {
            app.apply(message);
        }

        terminal.draw(|frame| ui::render(app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        // Short poll so completions show up promptly
        if crossterm::event::poll(std::time::Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(request) = handle_key(app, key) {
                    fetch::dispatch(fetcher.clone(), request, sender.clone());
                }
            }
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) -> Option<FetchRequest> {
    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return None;
    }

    // If help is showing, any key closes it
    if app.show_help {
        app.show_help = false;
        return None;
    }

    if app.input_mode == InputMode::Editing {
        return handle_search_input(app, key);
    }

    if key.code == KeyCode::Char('?') {
        app.show_help = true;
        return None;
    }

    if app.overlay().is_open() {
        handle_overlay_key(app, key);
        return None;
    }

    handle_list_key(app, key)
}

fn handle_search_input(app: &mut App, key: KeyEvent) -> Option<FetchRequest> {
    match key.code {
        KeyCode::Enter => return app.submit_input(),
        KeyCode::Esc => app.cancel_editing(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Char(c) => app.type_char(c),
        _ => {}
    }
    None
}

fn handle_overlay_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char('c') | KeyCode::Char('q') => {
            app.activate_close();
        }
        KeyCode::Down | KeyCode::Char('j') => app.overlay_scroll_down(1),
        KeyCode::Up | KeyCode::Char('k') => app.overlay_scroll_up(1),
        KeyCode::PageDown => app.overlay_scroll_down(10),
        KeyCode::PageUp => app.overlay_scroll_up(10),
        _ => {}
    }
}

fn handle_list_key(app: &mut App, key: KeyEvent) -> Option<FetchRequest> {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('/') => {
            app.begin_editing();
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.list_next();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.list_prev();
        }
        KeyCode::Char('g') | KeyCode::Home => {
            app.list_first();
        }
        KeyCode::Char('G') | KeyCode::End => {
            app.list_last();
        }
        KeyCode::Enter => {
            return app.activate_selected();
        }
        KeyCode::Char(c) if c.is_ascii_digit() => {
            return app.press_button(c);
        }
        _ => {}
    }
    None
}
