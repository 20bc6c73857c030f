//! Display-ready views of an aggregated flight.
//!
//! Each flight becomes a header plus one card per leg. Missing upstream
//! values are replaced by [`PLACEHOLDER`]; optional lines (estimate, delay)
//! are only produced when there is something to show.

use crate::models::{AggregatedFlight, FlightStatus, LegInfo};
use chrono::DateTime;

pub const PLACEHOLDER: &str = "—";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegKind {
    Departure,
    Arrival,
}

impl LegKind {
    pub fn title(&self) -> &'static str {
        match self {
            LegKind::Departure => "DEPARTURE",
            LegKind::Arrival => "ARRIVAL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightHeader {
    pub code: String,
    pub airline: String,
    pub status: FlightStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegCard {
    pub kind: LegKind,
    pub airport: String,
    pub iata: Option<String>,
    pub city: String,
    pub scheduled: String,
    pub estimated: Option<String>,
    pub delay: Option<String>,
}

pub fn header(entry: &AggregatedFlight) -> FlightHeader {
    let flight = &entry.flight;
    FlightHeader {
        code: or_placeholder(flight.flight_code.as_deref()),
        airline: or_placeholder(flight.airline_name.as_deref()),
        status: flight.status,
    }
}

/// The departure leg is backfilled from the airport the flight was found at,
/// since flight records rarely carry a full departure airport.
pub fn departure_card(entry: &AggregatedFlight) -> LegCard {
    let leg = &entry.flight.departure;
    let origin = &entry.origin;

    let airport = origin.name.as_deref().or(leg.airport_name.as_deref());
    let iata = leg
        .iata_code
        .clone()
        .unwrap_or_else(|| origin.identifier.clone());
    let city = leg.city.as_deref().or(origin.city.as_deref());

    LegCard {
        kind: LegKind::Departure,
        airport: or_placeholder(airport),
        iata: Some(iata),
        city: or_placeholder(city),
        ..times(leg, LegKind::Departure)
    }
}

pub fn arrival_card(entry: &AggregatedFlight) -> LegCard {
    let leg = &entry.flight.arrival;
    LegCard {
        kind: LegKind::Arrival,
        airport: or_placeholder(leg.airport_name.as_deref()),
        iata: leg.iata_code.clone(),
        city: or_placeholder(leg.city.as_deref()),
        ..times(leg, LegKind::Arrival)
    }
}

fn times(leg: &LegInfo, kind: LegKind) -> LegCard {
    LegCard {
        kind,
        airport: String::new(),
        iata: None,
        city: String::new(),
        scheduled: leg
            .scheduled_time
            .as_deref()
            .map(format_time)
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
        estimated: leg.estimated_time.as_deref().map(format_time),
        delay: leg
            .delay_minutes
            .filter(|d| *d != 0)
            .map(|d| format!("+{}m", d)),
    }
}

/// Renders an RFC 3339 timestamp as `YYYY-MM-DD HH:MM`; anything else is
/// shown as received.
pub fn format_time(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => ts.format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

fn or_placeholder(value: Option<&str>) -> String {
    value.unwrap_or(PLACEHOLDER).to_string()
}
