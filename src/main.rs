mod app;
mod cli;
mod model;
mod sys;
mod tui;

use anyhow::Result;
use app::App;
use clap::Parser;
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use ratatui_image::picker::Picker;
use std::{
    io,
    time::{Duration, Instant},
};
use sys::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    let config = Config::load();
    sys::logging::init_logger(Config::get_log_path(), config.enable_logging)?;

    let probe_client = reqwest::Client::new();
    match sys::api::check_backend(&probe_client, &config.backend_url).await {
        Ok(()) => println!("Backend reachable: {}", config.backend_url),
        Err(e) => {
            println!("WARNING: {} ({})", e, config.backend_url);
            println!("Fetches will fail until the backend is reachable.");
        }
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut picker = Picker::from_query_stdio().unwrap_or_else(|_| Picker::from_fontsize((8, 16)));

    let mut app = App::new(config)?;
    if let Some(url) = cli.url {
        app.cursor_position = url.len();
        app.url_input = url;
        app::handlers::start_fetch(&mut app);
    }

    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| tui::ui(f, &mut app, &mut picker))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if crossterm::event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => app::handlers::handle_key_event(&mut app, key),
                Event::Paste(text) => app::handlers::handle_paste(&mut app, text),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app::updates::on_tick(&mut app);
            last_tick = Instant::now();
        }

        if !app.running {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    Ok(())
}
