//! Event types and the main event loop driver for the Airboard TUI.
//!
//! This module defines the [`Event`] enum (keyboard input, ticks, search
//! status and search results) and the [`EventHandler`], which runs a
//! background task that polls crossterm for key events and emits periodic
//! [`Event::Tick`]s. The main loop in `main.rs` receives events via
//! [`EventHandler::next`]; search tasks send events via [`EventHandler::tx`].

use crate::error::SearchError;
use crate::models::AggregatedFlight;
use crate::status::StatusMessage;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::error;

/// Events processed by the application event loop.
#[derive(Debug)]
pub enum Event {
    /// Periodic tick used for the loading animation.
    Tick,
    /// User key press from the terminal.
    Input(KeyEvent),
    /// Progress or outcome announcement from a running search.
    Status(StatusMessage),
    /// A search finished. On error the message has already been sent as a
    /// [`Event::Status`].
    SearchFinished(Result<Vec<AggregatedFlight>, SearchError>),
}

/// Multiplexes terminal input, ticks and search progress into one stream.
///
/// The sender ([`tx`](EventHandler::tx)) can be cloned and handed to search
/// tasks, while the receiver is consumed by [`next`](EventHandler::next).
pub struct EventHandler {
    pub tx: mpsc::UnboundedSender<Event>,
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Creates a new event handler and spawns the input/tick task.
    ///
    /// The spawned task polls crossterm with a timeout of `tick_rate_ms`,
    /// sending [`Event::Input`] on key press and [`Event::Tick`] whenever the
    /// interval elapses. It stops if the terminal can no longer be read.
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let event_tx = tx.clone();

        tokio::spawn(async move {
            let tick_rate = Duration::from_millis(tick_rate_ms);
            let mut last_tick = Instant::now();
            loop {
                let timeout = tick_rate
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::from_secs(0));
                match event::poll(timeout) {
                    Ok(true) => match event::read() {
                        Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                            event_tx.send(Event::Input(key)).ok();
                        }
                        Ok(_) => {}
                        Err(e) => {
                            error!("Terminal read failed: {}", e);
                            break;
                        }
                    },
                    Ok(false) => {}
                    Err(e) => {
                        error!("Terminal poll failed: {}", e);
                        break;
                    }
                }
                if last_tick.elapsed() >= tick_rate {
                    if event_tx.send(Event::Tick).is_err() {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Self { tx, rx }
    }

    /// Receives the next event from the channel.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}
