//! trendboard — terminal dashboard for GitHub trends, tech news feeds, and
//! on-demand AI summaries.
//!
//! All data comes from an external backend over HTTP: scraped trending
//! repositories, pre-parsed and raw RSS feeds (localized variants selected
//! by path), AI summaries, and a cookie-based session. This binary wires
//! the `api` client and the `dashboard` state machines to a ratatui event
//! loop:
//!
//! * **`app`** — owns all state (session gate, panels, summary modal) and
//!   spawns one tokio task per fetch.
//! * **`ui`** — pure rendering of that state.
//! * **`input`** — maps key events to state mutations.

mod app;
mod input;
mod ui;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use api::{ApiClient, Locale};
use app::App;

#[derive(Parser)]
#[command(name = "trendboard")]
#[command(about = "Terminal dashboard for GitHub trending, tech feeds, and AI summaries", long_about = None)]
struct Cli {
    /// Backend base URL
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    backend: String,

    /// Initial display language (ja or en)
    #[arg(short, long, default_value = "ja")]
    locale: Locale,

    /// Log file; the TUI owns the terminal, so tracing output goes here
    #[arg(long, default_value = "trendboard.log")]
    log_file: PathBuf,

    /// Prefill the login form's username
    #[arg(long, env = "TRENDBOARD_USERNAME")]
    username: Option<String>,

    /// Prefill the login form's password
    #[arg(long, env = "TRENDBOARD_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

/// Manages terminal raw-mode and alternate-screen lifetime via [`Drop`], so
/// the terminal is restored even when the event loop unwinds.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Restore the terminal before printing a panic message; without this a
/// panic inside the loop leaves raw mode enabled.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));
}

fn main() -> Result<()> {
    install_panic_hook();
    let cli = Cli::parse();

    let log_file = std::fs::File::create(&cli.log_file)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();

    // One shared HTTP client; the backend's session cookie lives in its
    // cookie store.
    let client = reqwest::Client::builder().cookie_store(true).build()?;
    let api = Arc::new(ApiClient::new(client, cli.backend.clone()));
    tracing::info!("starting trendboard against {}", cli.backend);

    let runtime = tokio::runtime::Runtime::new()?;
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let mut app = App::new(api, runtime.handle().clone(), tx, cli.locale);
    if let Some(username) = cli.username {
        app.login.username = username;
    }
    if let Some(password) = cli.password {
        app.login.password = password;
    }
    app.start();

    let mut guard = TerminalGuard::new()?;

    // ~10 fps tick; each iteration drains fetch results, redraws, and polls
    // for input.
    let tick_rate = Duration::from_millis(100);
    loop {
        while let Ok(msg) = rx.try_recv() {
            app.apply(msg);
        }

        guard.terminal.draw(|f| ui::draw(&mut app, f))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    input::handle_key_event(&mut app, key);
                }
            }
        }

        if app.quit {
            break;
        }
    }

    Ok(())
}
