//! In-memory doubles shared by the unit tests.

use crate::api::{Endpoint, FlightApi, QueryParams};
use crate::error::ApiError;
use crate::status::{Severity, StatusReporter};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

pub type Scripted = Result<Value, ApiError>;

/// Answers airport queries from one scripted response and flight queries per
/// departure IATA code, recording every call it sees.
#[derive(Default)]
pub struct ScriptedApi {
    airports: Mutex<Option<Scripted>>,
    flights: Mutex<HashMap<String, VecDeque<Scripted>>>,
    calls: Mutex<Vec<(Endpoint, QueryParams)>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_airports(self, response: Scripted) -> Self {
        *self.airports.lock().unwrap() = Some(response);
        self
    }

    pub fn with_flights(self, iata: &str, response: Scripted) -> Self {
        self.flights
            .lock()
            .unwrap()
            .entry(iata.to_string())
            .or_default()
            .push_back(response);
        self
    }

    pub fn calls(&self) -> Vec<(Endpoint, QueryParams)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, endpoint: Endpoint) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(e, _)| *e == endpoint)
            .count()
    }

    /// The `dep_iata` values of flight queries, in call order.
    pub fn flight_queries(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|(e, _)| *e == Endpoint::Flights)
            .filter_map(|(_, p)| param(&p, "dep_iata").map(str::to_string))
            .collect()
    }
}

pub fn param<'a>(params: &'a QueryParams, key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v.as_str())
}

#[async_trait]
impl FlightApi for ScriptedApi {
    async fn request(&self, endpoint: Endpoint, params: &QueryParams) -> Result<Value, ApiError> {
        self.calls.lock().unwrap().push((endpoint, params.clone()));
        match endpoint {
            Endpoint::Airports => self
                .airports
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Ok(json!({ "data": [] }))),
            Endpoint::Flights => {
                let iata = param(params, "dep_iata").unwrap_or_default().to_string();
                self.flights
                    .lock()
                    .unwrap()
                    .get_mut(&iata)
                    .and_then(VecDeque::pop_front)
                    .unwrap_or_else(|| Ok(json!({ "data": [] })))
            }
        }
    }
}

pub fn airports_body(codes: &[Option<&str>]) -> Value {
    let data: Vec<Value> = codes
        .iter()
        .enumerate()
        .map(|(i, code)| {
            json!({
                "airport_name": format!("Airport {}", i),
                "iata_code": code,
                "city_iata_code": code,
                "country_iso2": "CL",
            })
        })
        .collect();
    json!({ "data": data })
}

/// `count` flights numbered `<prefix>1..=<prefix>count` departing `iata`.
pub fn flights_body(iata: &str, prefix: &str, count: usize) -> Value {
    let data: Vec<Value> = (1..=count)
        .map(|n| {
            json!({
                "flight_status": "scheduled",
                "airline": { "name": "LATAM Airlines" },
                "flight": { "iata": format!("{}{}", prefix, n), "icao": null },
                "departure": { "airport": null, "iata": iata, "scheduled": "2026-10-16T08:00:00+00:00" },
                "arrival": { "airport": "Jorge Chavez", "iata": "LIM" }
            })
        })
        .collect();
    json!({ "data": data })
}

#[derive(Default)]
pub struct RecordingReporter {
    pub messages: Mutex<Vec<(String, Severity)>>,
}

impl RecordingReporter {
    pub fn messages(&self) -> Vec<(String, Severity)> {
        self.messages.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<(String, Severity)> {
        self.messages().pop()
    }
}

impl StatusReporter for RecordingReporter {
    fn report(&self, message: &str, severity: Severity) {
        self.messages
            .lock()
            .unwrap()
            .push((message.to_string(), severity));
    }
}
