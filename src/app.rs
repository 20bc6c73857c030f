use crate::config::Config;
use crate::error::SearchError;
use crate::models::{AggregatedFlight, Country, StatusFilter, COUNTRIES};
use crate::status::{Severity, StatusMessage};
use crossterm::event::{KeyCode, KeyEvent};

/// Work the main loop has to dispatch on behalf of the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search {
        country_code: String,
        filter: StatusFilter,
    },
}

#[derive(Debug, Default)]
pub struct App {
    pub country_index: Option<usize>,
    pub filter: StatusFilter,
    pub flights: Vec<AggregatedFlight>,
    pub selected_index: usize,
    pub status: StatusMessage,
    pub is_searching: bool,
    pub dark_mode: bool,
    pub tick_count: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let country_index = COUNTRIES
            .iter()
            .position(|c| c.code.eq_ignore_ascii_case(config.search.default_country.trim()));

        Self {
            country_index,
            dark_mode: config.ui.dark_mode,
            status: StatusMessage::new(
                "Pick a country with ←/→ and press Enter.",
                Severity::Info,
            ),
            ..Self::default()
        }
    }

    pub fn selected_country(&self) -> Option<&'static Country> {
        self.country_index.and_then(|i| COUNTRIES.get(i))
    }

    pub fn selected_flight(&self) -> Option<&AggregatedFlight> {
        self.flights.get(self.selected_index)
    }

    pub fn on_tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
    }

    pub fn on_status(&mut self, message: StatusMessage) {
        self.status = message;
    }

    pub fn on_search_finished(&mut self, result: Result<Vec<AggregatedFlight>, SearchError>) {
        match result {
            Ok(flights) => {
                self.is_searching = false;
                self.flights = flights;
                self.selected_index = 0;
            }
            // The running search owns the loading state; this one never started.
            Err(SearchError::InProgress) => {}
            Err(_) => {
                self.is_searching = false;
                self.flights.clear();
                self.selected_index = 0;
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('t') => self.dark_mode = !self.dark_mode,
            KeyCode::Char('f') => self.filter = self.filter.next(),
            KeyCode::Right | KeyCode::Char('l') => self.cycle_country(1),
            KeyCode::Left | KeyCode::Char('h') => self.cycle_country(COUNTRIES.len() - 1),
            KeyCode::Down | KeyCode::Char('j') => {
                if !self.flights.is_empty() {
                    self.selected_index = (self.selected_index + 1) % self.flights.len();
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if !self.flights.is_empty() {
                    self.selected_index = self
                        .selected_index
                        .checked_sub(1)
                        .unwrap_or(self.flights.len() - 1);
                }
            }
            KeyCode::Enter => return Some(self.begin_search()),
            _ => {}
        }
        None
    }

    fn cycle_country(&mut self, step: usize) {
        self.country_index = Some(match self.country_index {
            Some(i) => (i + step) % COUNTRIES.len(),
            None => 0,
        });
    }

    /// Clears prior results and shows the loading state unless a search is
    /// already running; the search itself decides whether it may proceed.
    fn begin_search(&mut self) -> Command {
        if !self.is_searching {
            self.is_searching = true;
            self.flights.clear();
            self.selected_index = 0;
        }
        Command::Search {
            country_code: self
                .selected_country()
                .map(|c| c.code.to_string())
                .unwrap_or_default(),
            filter: self.filter,
        }
    }
}
