//! Input validation for calendar events.
//!
//! Checks structural integrity of events before layout. Detects:
//! - Inverted intervals (`from > to`)
//! - Duplicate IDs
//! - A last occurrence that ends before the first one does
//! - Excluded dates earlier than the first occurrence
//!
//! The layout engine itself only needs the first check; the others guard
//! records coming from persistence before they are displayed.

use std::collections::HashSet;

use tracing::warn;

use crate::error::LayoutError;
use crate::models::TimeBounded;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A timeslot ends before it starts.
    InvalidInterval,
    /// Two events share the same non-empty ID.
    DuplicateId,
    /// `last` is earlier than the timeslot's own end.
    InvalidLastOccurrence,
    /// An excluded date precedes the first occurrence.
    ExdateBeforeStart,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates events before layout.
///
/// Checks:
/// 1. Every timeslot satisfies `from <= to`
/// 2. No two events share a non-empty ID
/// 3. `last`, when set, is not before `to`
/// 4. Every excluded date is at or after `from`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_events<T: TimeBounded>(events: &[T]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for event in events {
        let id = event.id();
        let time = event.timeslot();

        if !id.is_empty() && !ids.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate event ID: {id}"),
            ));
        }

        if time.from > time.to {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidInterval,
                format!(
                    "Event '{id}' ends before it starts ({} > {})",
                    time.from, time.to
                ),
            ));
        }

        if let Some(last) = time.last {
            if last < time.to {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidLastOccurrence,
                    format!("Event '{id}' has last occurrence {last} before its end {}", time.to),
                ));
            }
        }

        for exdate in time.exdates.iter().flatten() {
            if *exdate < time.from {
                errors.push(ValidationError::new(
                    ValidationErrorKind::ExdateBeforeStart,
                    format!("Event '{id}' excludes {exdate}, before its start {}", time.from),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Like [`validate_events`], folding all errors into
/// [`LayoutError::Validation`].
pub fn ensure_valid<T: TimeBounded>(events: &[T]) -> crate::Result<()> {
    validate_events(events).map_err(|errors| {
        warn!(errors = errors.len(), "calendar events failed validation");
        LayoutError::Validation(errors)
    })
}
