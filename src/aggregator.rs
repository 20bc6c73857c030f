//! Country-wide flight aggregation.
//!
//! Airports are visited in resolution order and queried one at a time. Before
//! each query the running total is compared against the global cap; once it
//! is reached no further airports are queried, and the result is cut to the
//! cap. The first failing query aborts the whole aggregation.

use crate::airports::resolve_airports;
use crate::api::{Endpoint, FlightApi};
use crate::error::ApiError;
use crate::models::{AggregatedFlight, Airport, Country, DataEnvelope, Flight, RawFlight, StatusFilter};
use crate::status::{Severity, StatusReporter};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub airport_limit: usize,
    pub per_airport_limit: usize,
    pub global_cap: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            airport_limit: 10,
            per_airport_limit: 10,
            global_cap: 10,
        }
    }
}

/// Resolves `country`'s airports and collects their departures.
///
/// The airport count is announced to `reporter` as soon as it is known. With
/// no usable airports no flight query is issued.
pub async fn aggregate_flights<A, R>(
    api: &A,
    country: &Country,
    filter: StatusFilter,
    limits: SearchLimits,
    reporter: &R,
) -> Result<Vec<AggregatedFlight>, ApiError>
where
    A: FlightApi + ?Sized,
    R: StatusReporter + ?Sized,
{
    let airports = resolve_airports(api, country, limits.airport_limit).await?;
    reporter.report(
        &format!("Found {} airport(s) in {}.", airports.len(), country.name),
        Severity::Info,
    );
    if airports.is_empty() {
        info!("No usable airports for {}; skipping flight lookup", country.code);
        return Ok(Vec::new());
    }
    collect_flights(api, &airports, filter, limits.per_airport_limit, limits.global_cap).await
}

/// Queries departures for each airport in order until `global_cap` flights
/// have been gathered.
pub async fn collect_flights<A: FlightApi + ?Sized>(
    api: &A,
    airports: &[Airport],
    filter: StatusFilter,
    per_airport_limit: usize,
    global_cap: usize,
) -> Result<Vec<AggregatedFlight>, ApiError> {
    let mut collected: Vec<AggregatedFlight> = Vec::new();

    for airport in airports {
        if collected.len() >= global_cap {
            debug!("Global cap of {} reached, stopping", global_cap);
            break;
        }

        let flights = fetch_departures(api, airport, filter, per_airport_limit).await?;
        debug!("{} returned {} flight(s)", airport.identifier, flights.len());

        collected.extend(flights.into_iter().map(|flight| AggregatedFlight {
            flight,
            origin: airport.clone(),
        }));
    }

    collected.truncate(global_cap);
    info!("Aggregated {} flight(s)", collected.len());
    Ok(collected)
}

async fn fetch_departures<A: FlightApi + ?Sized>(
    api: &A,
    airport: &Airport,
    filter: StatusFilter,
    limit: usize,
) -> Result<Vec<Flight>, ApiError> {
    let mut params = vec![
        ("dep_iata", airport.identifier.clone()),
        ("limit", limit.to_string()),
    ];
    // Forwarded as-is; results are not filtered again locally.
    if let Some(status) = filter.as_query() {
        params.push(("flight_status", status.to_string()));
    }

    let body = api.request(Endpoint::Flights, &params).await?;
    let envelope: DataEnvelope<RawFlight> = serde_json::from_value(body)?;
    Ok(envelope.into_data().into_iter().map(Flight::from).collect())
}
