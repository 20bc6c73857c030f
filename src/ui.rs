//! TUI rendering for Airboard
//!
//! Draws the search bar, the status line, the flight list and the
//! departure/arrival cards of the selected flight with `ratatui`.

use crate::app::App;
use crate::cards::{self, LegCard};
use crate::models::{FlightStatus, COUNTRIES};
use crate::status::Severity;
use ratatui::{prelude::*, widgets::*};

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Foreground/background/accent for the current theme.
#[derive(Debug, Clone, Copy)]
struct Palette {
    fg: Color,
    bg: Color,
    muted: Color,
    accent: Color,
    highlight_bg: Color,
}

impl Palette {
    fn for_app(app: &App) -> Self {
        if app.dark_mode {
            Palette {
                fg: Color::Gray,
                bg: Color::Rgb(15, 15, 25),
                muted: Color::DarkGray,
                accent: Color::Rgb(129, 140, 248),
                highlight_bg: Color::Rgb(30, 30, 60),
            }
        } else {
            Palette {
                fg: Color::Black,
                bg: Color::White,
                muted: Color::Gray,
                accent: Color::Rgb(79, 70, 229),
                highlight_bg: Color::Rgb(224, 231, 255),
            }
        }
    }
}

/// Renders one frame of the TUI based on current application state.
///
/// # Arguments
///
/// * `f` - The ratatui frame to draw into (from `terminal.draw()`).
/// * `app` - Current application state (selection, results, status).
pub fn render(f: &mut Frame, app: &App) {
    let palette = Palette::for_app(app);
    let area = f.size();
    f.render_widget(
        Block::default().style(Style::default().fg(palette.fg).bg(palette.bg)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search bar
            Constraint::Length(1), // Status line
            Constraint::Min(0),
            Constraint::Length(1), // Help
        ])
        .split(area);

    render_search_bar(f, app, palette, chunks[0]);
    render_status_line(f, app, chunks[1]);

    if app.is_searching {
        render_loading(f, app, palette, chunks[2]);
    } else if app.flights.is_empty() {
        let empty = Paragraph::new("No results.")
            .style(Style::default().fg(palette.muted))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
        f.render_widget(empty, chunks[2]);
    } else {
        render_results(f, app, palette, chunks[2]);
    }

    let help = Paragraph::new(" ←/→ country   f filter   Enter search   ↑/↓ select   t theme   q quit")
        .style(Style::default().fg(palette.muted));
    f.render_widget(help, chunks[3]);
}

fn render_search_bar(f: &mut Frame, app: &App, palette: Palette, area: Rect) {
    let country = app
        .selected_country()
        .map(|c| format!("{} ({})", c.name, c.code))
        .unwrap_or_else(|| "Select a country".to_string());

    let line = Line::from(vec![
        Span::styled(" COUNTRY: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(country, Style::default().fg(palette.accent)),
        Span::raw(format!("  ({}/{})", app.country_index.map_or(0, |i| i + 1), COUNTRIES.len())),
        Span::raw("  │  "),
        Span::styled("STATUS: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            app.filter.label().to_uppercase(),
            Style::default().fg(palette.accent),
        ),
    ]);

    let bar = Paragraph::new(line).block(
        Block::default()
            .title(" Airboard ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(bar, area);
}

fn render_status_line(f: &mut Frame, app: &App, area: Rect) {
    let color = severity_color(app.status.severity);
    let status = Paragraph::new(format!(" {}", app.status.text)).style(match color {
        Some(c) => Style::default().fg(c),
        None => Style::default(),
    });
    f.render_widget(status, area);
}

fn render_loading(f: &mut Frame, app: &App, palette: Palette, area: Rect) {
    let frame = SPINNER[app.tick_count % SPINNER.len()];
    let msg = Paragraph::new(format!("{} Querying flights…", frame))
        .style(Style::default().fg(palette.muted))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(msg, area);
}

/// Flight list (30%) next to the selected flight's header and leg cards.
fn render_results(f: &mut Frame, app: &App, palette: Palette, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(area);

    let items: Vec<ListItem> = app
        .flights
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let style = if i == app.selected_index {
                Style::default()
                    .fg(palette.accent)
                    .bg(palette.highlight_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let h = cards::header(entry);

            ListItem::new(Line::from(vec![
                Span::styled(format!(" {:<8}", h.code), style),
                Span::styled(
                    format!(" {} ", entry.origin.identifier),
                    Style::default().fg(palette.muted),
                ),
                Span::styled(" ● ", Style::default().fg(status_color(h.status))),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(format!(" Flights ({}) ", app.flights.len()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(list, chunks[0]);

    let Some(entry) = app.selected_flight() else {
        return;
    };

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(chunks[1]);

    let h = cards::header(entry);
    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {} ", h.code),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(h.airline, Style::default().fg(palette.muted)),
        Span::raw("  "),
        Span::styled(
            format!(" {} ", h.status.label()),
            Style::default()
                .fg(Color::White)
                .bg(status_color(h.status))
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.accent)),
    );
    f.render_widget(title, main_chunks[0]);

    let card_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(main_chunks[1]);

    render_leg_card(f, &cards::departure_card(entry), palette, card_chunks[0]);
    render_leg_card(f, &cards::arrival_card(entry), palette, card_chunks[1]);
}

fn render_leg_card(f: &mut Frame, card: &LegCard, palette: Palette, area: Rect) {
    let label = Style::default().add_modifier(Modifier::BOLD);
    let airport = match &card.iata {
        Some(iata) => format!("{} ({})", card.airport, iata),
        None => card.airport.clone(),
    };

    let mut lines = vec![
        Line::from(vec![Span::styled("Airport:   ", label), Span::raw(airport)]),
        Line::from(vec![
            Span::styled("City:      ", label),
            Span::styled(card.city.as_str(), Style::default().fg(palette.muted)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Scheduled: ", label),
            Span::raw(card.scheduled.as_str()),
        ]),
    ];
    if let Some(est) = &card.estimated {
        lines.push(Line::from(vec![
            Span::styled("Est.:      ", label),
            Span::styled(est.as_str(), Style::default().fg(palette.muted)),
        ]));
    }
    if let Some(delay) = &card.delay {
        lines.push(Line::from(vec![
            Span::styled("Delay:     ", label),
            Span::styled(delay.as_str(), Style::default().fg(Color::Rgb(217, 119, 6))),
        ]));
    }

    let p = Paragraph::new(lines).block(
        Block::default()
            .title(format!(" {} ", card.kind.title()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .padding(Padding::new(2, 2, 1, 1)),
    );
    f.render_widget(p, area);
}

/// Badge colour per flight status; anything without a colour of its own is grey.
fn status_color(status: FlightStatus) -> Color {
    match status {
        FlightStatus::Active => Color::Rgb(5, 150, 105),
        FlightStatus::Landed => Color::Rgb(2, 132, 199),
        FlightStatus::Cancelled => Color::Rgb(225, 29, 72),
        FlightStatus::Diverted => Color::Rgb(217, 119, 6),
        FlightStatus::Scheduled | FlightStatus::Unknown => Color::Rgb(75, 85, 99),
    }
}

fn severity_color(severity: Severity) -> Option<Color> {
    match severity {
        Severity::Info => None,
        Severity::Ok => Some(Color::Rgb(5, 150, 105)),
        Severity::Warn => Some(Color::Rgb(217, 119, 6)),
        Severity::Err => Some(Color::Rgb(225, 29, 72)),
    }
}
