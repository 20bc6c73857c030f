use airboard_tui::{
    api::AviationClient,
    app::{App, Command},
    config::Config,
    events::{Event, EventHandler},
    logging,
    search::FlightSearch,
    ui,
};
use color_eyre::Result;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, sync::Arc};
use tokio::sync::mpsc::UnboundedSender;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Instrumentation and safety
    let _log_guard = logging::initialize_logging();
    install_panic_hook();
    color_eyre::install()?;

    let config = Config::load();
    let search = Arc::new(FlightSearch::from_config(&config)?);

    // Ready terminal and state
    let mut terminal = setup_terminal()?;
    let mut app = App::new(&config);
    let mut events = EventHandler::new(config.ui.tick_rate_ms);

    // Main loop
    while !app.should_quit {
        terminal.draw(|f| ui::render(f, &app))?;

        if let Some(event) = events.next().await {
            match event {
                Event::Tick => app.on_tick(),
                Event::Input(key) => {
                    if let Some(cmd) = app.handle_key(key) {
                        dispatch(cmd, &search, events.tx.clone());
                    }
                }
                Event::Status(msg) => app.on_status(msg),
                Event::SearchFinished(result) => app.on_search_finished(result),
            }
        }
    }

    restore_terminal(terminal)?;
    info!("Exiting.");
    Ok(())
}

/// Runs a command off the UI loop; results come back as events.
fn dispatch(cmd: Command, search: &Arc<FlightSearch<AviationClient>>, tx: UnboundedSender<Event>) {
    match cmd {
        Command::Search {
            country_code,
            filter,
        } => {
            let search = Arc::clone(search);
            tokio::spawn(async move {
                let result = search.run(&country_code, filter, &tx).await;
                let _ = tx.send(Event::SearchFinished(result));
            });
        }
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    crossterm::terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen, crossterm::cursor::Hide)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), crossterm::terminal::LeaveAlternateScreen, crossterm::cursor::Show)?;
    Ok(())
}

fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Force terminal cleanup!
        crossterm::terminal::disable_raw_mode().ok();
        crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen, crossterm::cursor::Show).ok();
        original_hook(panic_info);
    }));
}
