use std::fmt;

use chrono::NaiveDate;

use crate::error::CoreError;

/// A named point. Names are not unique and coordinates are not range-checked.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }

    /// A location known only by name, as used for fetch requests.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, 0.0, 0.0)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {}, Latitude: {}, Longitude: {}",
            self.name, self.latitude, self.longitude
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherVariable {
    pub name: String,
    pub value: f64,
}

impl WeatherVariable {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl fmt::Display for WeatherVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Variable: {}, Value: {}", self.name, self.value)
    }
}

/// Start and end dates exactly as the user typed them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Both bounds as `YYYY-MM-DD` dates, if they parse. Only used for diagnostics.
    pub fn parsed(&self) -> Option<(NaiveDate, NaiveDate)> {
        let start = NaiveDate::parse_from_str(self.start.trim(), "%Y-%m-%d").ok()?;
        let end = NaiveDate::parse_from_str(self.end.trim(), "%Y-%m-%d").ok()?;
        Some((start, end))
    }
}

#[derive(Debug, Clone)]
pub enum DataRequest {
    Forecast { location: Location },
    Historical { location: Location, range: DateRange },
}

impl DataRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            DataRequest::Forecast { .. } => "forecast",
            DataRequest::Historical { .. } => "historical",
        }
    }

    pub fn location(&self) -> &Location {
        match self {
            DataRequest::Forecast { location } | DataRequest::Historical { location, .. } => {
                location
            }
        }
    }
}

/// Parse a user-typed number, naming the field in the error.
pub fn parse_number(field: &'static str, input: &str) -> Result<f64, CoreError> {
    input
        .trim()
        .parse::<f64>()
        .map_err(|_| CoreError::InvalidNumber {
            field,
            input: input.trim().to_string(),
        })
}
