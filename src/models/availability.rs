//! Availability model.
//!
//! An availability is the set of timeslots during which a person (tutor or
//! student) is free. Requested meeting times must fit entirely inside one
//! of those timeslots.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::Timeslot;
use crate::error::{LayoutError, Result};

/// Ordered collection of free timeslots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Availability {
    slots: Vec<Timeslot>,
}

impl Availability {
    /// Creates an availability, ordering slots by start then end.
    pub fn new(mut slots: Vec<Timeslot>) -> Self {
        slots.sort_by(|a, b| a.from.cmp(&b.from).then(a.to.cmp(&b.to)));
        Self { slots }
    }

    /// Adds a slot, keeping the collection ordered.
    pub fn push(&mut self, slot: Timeslot) {
        let idx = self
            .slots
            .partition_point(|s| (s.from, s.to) <= (slot.from, slot.to));
        self.slots.insert(idx, slot);
    }

    /// Whether some slot fully contains `time`.
    pub fn contains(&self, time: &Timeslot) -> bool {
        self.slots.iter().any(|s| s.contains(time))
    }

    /// Whether some slot overlaps `time` (inclusive).
    pub fn overlaps(&self, time: &Timeslot) -> bool {
        self.slots.iter().any(|s| s.overlaps(time))
    }

    /// Fails on the first of `times` not contained in this availability.
    pub fn verify_contains(&self, times: &[Timeslot]) -> Result<()> {
        match times.iter().find(|t| !self.contains(t)) {
            Some(t) => {
                warn!(id = %t.id, from = %t.from, to = %t.to, "requested time outside availability");
                Err(LayoutError::Unavailable {
                    id: t.id.clone(),
                    from: t.from,
                    to: t.to,
                })
            }
            None => Ok(()),
        }
    }

    /// Iterates slots in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Timeslot> {
        self.slots.iter()
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether there are no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl FromIterator<Timeslot> for Availability {
    fn from_iter<I: IntoIterator<Item = Timeslot>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Availability {
    type Item = &'a Timeslot;
    type IntoIter = std::slice::Iter<'a, Timeslot>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}
