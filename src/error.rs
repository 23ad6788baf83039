//! Error types for the layout engine.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::Timeslot;
use crate::validation::ValidationError;

/// Errors raised while building or laying out timeslots.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// A timeslot ends before it starts.
    #[error("timeslot '{id}' ends before it starts ({from} > {to})")]
    InvalidInterval {
        /// Timeslot or event identifier (may be empty).
        id: String,
        /// Interval start.
        from: DateTime<Utc>,
        /// Interval end.
        to: DateTime<Utc>,
    },

    /// A requested time is not covered by an availability.
    #[error("not available for '{id}' ({})", span(.from, .to))]
    Unavailable {
        /// Identifier of the requested timeslot.
        id: String,
        /// Requested start.
        from: DateTime<Utc>,
        /// Requested end.
        to: DateTime<Utc>,
    },

    /// Date arithmetic left the range chrono can represent.
    #[error("{0} falls outside the supported date range")]
    OutOfRange(String),

    /// Layout configuration could not be parsed.
    #[error("invalid layout config: {0}")]
    Config(#[from] toml::de::Error),

    /// Input events failed structural validation.
    #[error("{} validation error(s), first: {}", .0.len(), first_message(.0))]
    Validation(Vec<ValidationError>),
}

fn span(from: &DateTime<Utc>, to: &DateTime<Utc>) -> Timeslot {
    Timeslot::new(*from, *to)
}

fn first_message(errors: &[ValidationError]) -> &str {
    errors.first().map_or("", |e| e.message.as_str())
}

/// Result alias for layout operations.
pub type Result<T> = std::result::Result<T, LayoutError>;
