// src/main.rs

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use flexi_logger::{FileSpec, Logger};
use ratatui::{backend::CrosstermBackend, Terminal};
use sidechat::{api::ChatClient, app::App, config, key_handlers, ui};
use std::{io, time::Duration};

#[tokio::main]
async fn main() -> Result<()> {
    config::initialize_config()?;
    let cfg = config::get_config();

    // Log to a file so the alternate screen stays clean
    let _logger = Logger::try_with_str(&cfg.log_level)?
        .log_to_file(FileSpec::default().basename("sidechat").suppress_timestamp())
        .start()?;
    log::info!("chat endpoint: {}", cfg.endpoint);

    let client = ChatClient::from_config()?;
    let mut app = App::new(client);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

/// Main loop of the application.
async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        {
            let session_arc = app.session.clone();
            let session = session_arc.lock().await;
            app.status.set_thinking(session.is_pending());
            app.status.update_spinner();
            terminal.draw(|f| ui::draw(f, app, &session))?;
        }

        // Poll with a timeout so an in-flight send keeps the UI live
        if event::poll(Duration::from_millis(100))? {
            if let CEvent::Key(key) = event::read()? {
                key_handlers::handle_key(app, key).await;
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
