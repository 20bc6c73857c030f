use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    pub code: &'static str,
    pub name: &'static str,
}

/// Countries offered in the selector, in display order.
pub const COUNTRIES: &[Country] = &[
    Country { code: "CL", name: "Chile" },
    Country { code: "AR", name: "Argentina" },
    Country { code: "PE", name: "Peru" },
    Country { code: "CO", name: "Colombia" },
    Country { code: "BR", name: "Brazil" },
    Country { code: "MX", name: "Mexico" },
    Country { code: "US", name: "United States" },
    Country { code: "ES", name: "Spain" },
    Country { code: "FR", name: "France" },
    Country { code: "GB", name: "United Kingdom" },
];

impl Country {
    /// Looks up a supported country by ISO 3166-1 alpha-2 code, ignoring case.
    pub fn from_code(code: &str) -> Option<&'static Country> {
        let code = code.trim();
        COUNTRIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airport {
    /// IATA code; never empty.
    pub identifier: String,
    pub name: Option<String>,
    pub city: Option<String>,
    pub country_code: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlightStatus {
    Scheduled,
    Active,
    Landed,
    Cancelled,
    Diverted,
    Unknown,
}

impl FlightStatus {
    pub fn from_api(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("scheduled") => FlightStatus::Scheduled,
            Some("active") => FlightStatus::Active,
            Some("landed") => FlightStatus::Landed,
            Some("cancelled") => FlightStatus::Cancelled,
            Some("diverted") => FlightStatus::Diverted,
            _ => FlightStatus::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FlightStatus::Scheduled => "SCHEDULED",
            FlightStatus::Active => "ACTIVE",
            FlightStatus::Landed => "LANDED",
            FlightStatus::Cancelled => "CANCELLED",
            FlightStatus::Diverted => "DIVERTED",
            FlightStatus::Unknown => "UNKNOWN",
        }
    }
}

/// Lifecycle stage requested by the user. `All` adds no upstream constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Scheduled,
    Active,
    Landed,
    Cancelled,
    Diverted,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 6] = [
        StatusFilter::All,
        StatusFilter::Scheduled,
        StatusFilter::Active,
        StatusFilter::Landed,
        StatusFilter::Cancelled,
        StatusFilter::Diverted,
    ];

    /// Value for the upstream `flight_status` parameter, if any.
    pub fn as_query(&self) -> Option<&'static str> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Scheduled => Some("scheduled"),
            StatusFilter::Active => Some("active"),
            StatusFilter::Landed => Some("landed"),
            StatusFilter::Cancelled => Some("cancelled"),
            StatusFilter::Diverted => Some("diverted"),
        }
    }

    pub fn label(&self) -> &'static str {
        self.as_query().unwrap_or("all")
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegInfo {
    pub airport_name: Option<String>,
    pub iata_code: Option<String>,
    pub city: Option<String>,
    pub scheduled_time: Option<String>,
    pub estimated_time: Option<String>,
    pub delay_minutes: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flight {
    pub status: FlightStatus,
    pub airline_name: Option<String>,
    pub flight_code: Option<String>,
    pub departure: LegInfo,
    pub arrival: LegInfo,
}

/// A flight joined with the airport whose query produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedFlight {
    pub flight: Flight,
    pub origin: Airport,
}

// Upstream wire format.

/// `{ "data": [...] }` body of a successful response. `data` may be absent
/// or null; both mean no records.
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: Option<Vec<T>>,
}

impl<T> DataEnvelope<T> {
    pub fn into_data(self) -> Vec<T> {
        self.data.unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RawAirport {
    pub airport_name: Option<String>,
    pub iata_code: Option<String>,
    pub city: Option<String>,
    pub city_iata_code: Option<String>,
    pub country_iso2: Option<String>,
}

impl RawAirport {
    /// Converts into the domain model; records without an IATA code are
    /// unusable as a flight query key and yield `None`.
    pub fn into_airport(self) -> Option<Airport> {
        let identifier = self
            .iata_code
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())?;

        Some(Airport {
            identifier,
            name: non_blank(self.airport_name),
            city: non_blank(self.city),
            country_code: non_blank(self.country_iso2),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RawFlight {
    pub flight_status: Option<String>,
    #[serde(default)]
    pub airline: Option<RawNamed>,
    #[serde(default)]
    pub flight: Option<RawFlightNumber>,
    #[serde(default)]
    pub departure: Option<RawLeg>,
    #[serde(default)]
    pub arrival: Option<RawLeg>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawNamed {
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawFlightNumber {
    pub iata: Option<String>,
    pub icao: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawLeg {
    pub airport: Option<String>,
    pub iata: Option<String>,
    pub city: Option<String>,
    pub scheduled: Option<String>,
    pub estimated: Option<String>,
    pub delay: Option<i64>,
}

impl From<RawLeg> for LegInfo {
    fn from(raw: RawLeg) -> Self {
        Self {
            airport_name: non_blank(raw.airport),
            iata_code: non_blank(raw.iata),
            city: non_blank(raw.city),
            scheduled_time: non_blank(raw.scheduled),
            estimated_time: non_blank(raw.estimated),
            delay_minutes: raw.delay,
        }
    }
}

impl From<RawFlight> for Flight {
    fn from(raw: RawFlight) -> Self {
        let number = raw.flight.unwrap_or_default();
        Self {
            status: FlightStatus::from_api(raw.flight_status.as_deref()),
            airline_name: raw.airline.and_then(|a| non_blank(a.name)),
            flight_code: non_blank(number.iata).or_else(|| non_blank(number.icao)),
            departure: raw.departure.map(LegInfo::from).unwrap_or_default(),
            arrival: raw.arrival.map(LegInfo::from).unwrap_or_default(),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
