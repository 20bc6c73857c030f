use crate::api::{Endpoint, FlightApi};
use crate::error::ApiError;
use crate::models::{Airport, Country, DataEnvelope, RawAirport};
use tracing::{debug, info};

/// Upper bound on airports requested per country.
pub const MAX_AIRPORTS: usize = 10;

/// Clamps a requested airport count into `[1, MAX_AIRPORTS]`.
pub fn clamp_airport_limit(requested: usize) -> usize {
    requested.clamp(1, MAX_AIRPORTS)
}

/// Fetches up to `max_results` airports for `country`, in upstream order.
///
/// Records without an IATA code are dropped here, since every later flight
/// query is keyed on it. A country with no usable airports yields an empty
/// list, not an error.
pub async fn resolve_airports<A: FlightApi + ?Sized>(
    api: &A,
    country: &Country,
    max_results: usize,
) -> Result<Vec<Airport>, ApiError> {
    let limit = clamp_airport_limit(max_results);
    let params = vec![
        ("country_iso2", country.code.to_string()),
        ("limit", limit.to_string()),
    ];

    let body = api.request(Endpoint::Airports, &params).await?;
    let envelope: DataEnvelope<RawAirport> = serde_json::from_value(body)?;
    let raw = envelope.into_data();
    let raw_count = raw.len();

    let airports: Vec<Airport> = raw
        .into_iter()
        .filter_map(RawAirport::into_airport)
        .collect();

    if airports.len() < raw_count {
        debug!(
            "Dropped {} airport(s) without an IATA code",
            raw_count - airports.len()
        );
    }
    info!("Resolved {} airport(s) for {}", airports.len(), country.code);
    Ok(airports)
}
