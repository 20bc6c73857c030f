//! Search entry point: pre-flight checks, the single-flight guard and the
//! status announcements around one country-wide aggregation.

use crate::aggregator::{aggregate_flights, SearchLimits};
use crate::api::{AviationClient, FlightApi};
use crate::config::Config;
use crate::error::{ApiError, ConfigError, SearchError};
use crate::models::{AggregatedFlight, Country, StatusFilter};
use crate::status::{Severity, StatusReporter};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info, warn};

pub struct FlightSearch<A> {
    api: Option<A>,
    limits: SearchLimits,
    in_flight: AtomicBool,
}

impl FlightSearch<AviationClient> {
    /// Builds the HTTP client only when a credential is configured; without
    /// one, every search fails locally and nothing is sent.
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let api = match config.access_key() {
            Ok(key) => Some(AviationClient::new(
                config.api.base_url.as_str(),
                key,
                config.timeout(),
            )?),
            Err(_) => {
                warn!("No access key configured; searches are disabled");
                None
            }
        };
        Ok(Self::new(api, config.limits()))
    }
}

impl<A: FlightApi> FlightSearch<A> {
    pub fn new(api: Option<A>, limits: SearchLimits) -> Self {
        Self {
            api,
            limits,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_running(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Runs one search, reporting each phase to `reporter`.
    ///
    /// Every failure is reported with its message before being returned, so
    /// callers only need to clear their own state.
    pub async fn run<R: StatusReporter + ?Sized>(
        &self,
        country_code: &str,
        filter: StatusFilter,
        reporter: &R,
    ) -> Result<Vec<AggregatedFlight>, SearchError> {
        let _guard = match InFlight::acquire(&self.in_flight) {
            Some(guard) => guard,
            None => {
                warn!("Search for {} rejected, another one is running", country_code);
                reporter.report(&SearchError::InProgress.to_string(), Severity::Warn);
                return Err(SearchError::InProgress);
            }
        };

        let api = match self.api.as_ref() {
            Some(api) => api,
            None => {
                let err = SearchError::Config(ConfigError::MissingAccessKey);
                error!("{}", err);
                reporter.report(&err.to_string(), Severity::Err);
                return Err(err);
            }
        };

        let country = match validate_country(country_code) {
            Ok(country) => country,
            Err(err) => {
                reporter.report(&err.to_string(), Severity::Warn);
                return Err(err);
            }
        };

        reporter.report("Fetching flights…", Severity::Info);
        info!("Searching {} ({}) with filter '{}'", country.name, country.code, filter.label());

        match aggregate_flights(api, country, filter, self.limits, reporter).await {
            Ok(flights) => {
                reporter.report(&format!("Showing {} flight(s).", flights.len()), Severity::Ok);
                Ok(flights)
            }
            Err(e) => {
                error!("Search for {} failed: {}", country.code, e);
                reporter.report(&format!("Failed to fetch data: {}", e), Severity::Err);
                Err(e.into())
            }
        }
    }
}

fn validate_country(code: &str) -> Result<&'static Country, SearchError> {
    if code.trim().is_empty() {
        return Err(SearchError::NoCountrySelected);
    }
    Country::from_code(code).ok_or_else(|| SearchError::UnknownCountry(code.to_string()))
}

/// Holds the in-progress flag for the lifetime of one search.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
