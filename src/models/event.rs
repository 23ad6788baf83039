//! Layout input: anything with an id and a timeslot.

use serde::{Deserialize, Serialize};

use super::Timeslot;

/// A value the layout engine can place on a calendar.
///
/// The engine only reads `id()` and `timeslot()`; everything else about
/// the implementing type is passed through untouched.
pub trait TimeBounded {
    /// Identifier used for lookups and id-based tie-breaking.
    fn id(&self) -> &str;

    /// The interval occupied by this value.
    fn timeslot(&self) -> &Timeslot;
}

impl TimeBounded for Timeslot {
    fn id(&self) -> &str {
        &self.id
    }

    fn timeslot(&self) -> &Timeslot {
        self
    }
}

impl<T: TimeBounded + ?Sized> TimeBounded for &T {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn timeslot(&self) -> &Timeslot {
        (**self).timeslot()
    }
}

/// A calendar event (e.g. a meeting) with an uninterpreted payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event<P = ()> {
    /// Unique event identifier.
    pub id: String,
    /// When the event happens.
    pub time: Timeslot,
    /// Display data owned by the caller.
    pub payload: P,
}

impl Event<()> {
    /// Creates an event without a payload.
    pub fn new(id: impl Into<String>, time: Timeslot) -> Self {
        Self::with_payload(id, time, ())
    }
}

impl<P> Event<P> {
    /// Creates an event carrying `payload`.
    pub fn with_payload(id: impl Into<String>, time: Timeslot, payload: P) -> Self {
        Self {
            id: id.into(),
            time,
            payload,
        }
    }
}

impl<P> TimeBounded for Event<P> {
    fn id(&self) -> &str {
        &self.id
    }

    fn timeslot(&self) -> &Timeslot {
        &self.time
    }
}
