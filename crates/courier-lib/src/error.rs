use thiserror::Error;

use crate::location::LocationId;

/// Convenient result alias for the courier dispatch library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a location code or label is not part of the catalog.
    #[error("unknown location: {query}{}", format_suggestions(.suggestions))]
    UnknownLocation {
        query: String,
        suggestions: Vec<String>,
    },

    /// Raised when an order targets a location outside today's available set.
    #[error("location {location} is not available for delivery today")]
    UnavailableLocation { location: LocationId },

    /// Raised when a textual distance is not a non-negative integer.
    #[error("invalid route distance {value:?}; expected a non-negative integer")]
    InvalidDistance { value: String },

    /// Raised when a delivery tier cannot be parsed.
    #[error("invalid delivery tier {value:?}; expected expedited or standard")]
    InvalidTier { value: String },

    /// Raised when an inline order does not follow the `NAME@LOCATION` form.
    #[error("invalid order {spec:?}; expected NAME@LOCATION")]
    InvalidOrderSpec { spec: String },

    /// Raised when an inline route does not follow the `FROM:TO:DISTANCE` form.
    #[error("invalid route {spec:?}; expected FROM:TO:DISTANCE")]
    InvalidRouteSpec { spec: String },

    /// Raised when a row in an order batch file is malformed.
    #[error("invalid order record on line {line}: {message}")]
    InvalidOrderRecord { line: u64, message: String },

    /// Raised when a network configuration declares the same code twice.
    #[error("duplicate location code in network configuration: {code}")]
    DuplicateLocation { code: LocationId },

    /// Raised when summarising a path that has no steps.
    #[error("route path was empty")]
    EmptyRoutePath,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON (de)serialisation errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for CSV parsing errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
