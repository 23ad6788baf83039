//! Calendar interval layout engine.
//!
//! Given one day's events, assigns every event a column so overlapping
//! events render side by side and non-overlapping events use full width.
//!
//! # Pipeline
//!
//! 1. [`sort_events`]: order by start, then end (stable)
//! 2. [`segment`]: split into maximal overlap groups
//! 3. [`pack`]: first-fit columns within each group
//! 4. [`Placement`]: `(group, column, column_count)` and derived geometry
//!
//! The engine is a pure function of its input: no I/O, no shared state, no
//! clock. Results borrow the input events.
//!
//! # Usage
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use tutor_calendar::layout::{layout_day, LayoutConfig};
//! use tutor_calendar::models::{Event, Timeslot};
//!
//! let at = |h, m| Utc.with_ymd_and_hms(2021, 3, 1, h, m, 0).unwrap();
//! let events = vec![
//!     Event::new("a", Timeslot::new(at(9, 0), at(10, 0))),
//!     Event::new("b", Timeslot::new(at(9, 30), at(10, 30))),
//! ];
//!
//! let day = layout_day(&events, &LayoutConfig::default()).unwrap();
//! let b = day.placement_for("b").unwrap();
//! assert_eq!(b.column_index, 1);
//! assert_eq!(b.width_fraction(), 0.5);
//! ```

mod config;
mod geometry;
mod pack;
mod segment;
mod sort;
mod week;

pub use config::{LayoutConfig, TieBreak};
pub use geometry::{Geometry, Placement, VerticalScale};
pub use pack::pack;
pub use segment::segment;
pub use sort::{compare_time, sort_events, sort_events_by};
pub use week::{bucket_by_day, layout_week, WeekLayout};

use tracing::{debug, trace, warn};

use crate::error::{LayoutError, Result};
use crate::models::TimeBounded;

/// Events sharing one lane of an overlap group. Never empty.
#[derive(Debug)]
pub struct Column<'a, T> {
    events: Vec<&'a T>,
}

impl<'a, T> Column<'a, T> {
    fn new(first: &'a T) -> Self {
        Self {
            events: vec![first],
        }
    }

    fn push(&mut self, event: &'a T) {
        self.events.push(event);
    }

    /// Events in this column, in chronological order.
    pub fn events(&self) -> &[&'a T] {
        &self.events
    }

    /// Most recently placed event.
    pub fn last(&self) -> &'a T {
        // Non-empty by construction.
        self.events[self.events.len() - 1]
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Always `false`; columns are created with one event.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// A maximal run of overlapping events and its columns.
#[derive(Debug)]
pub struct OverlapGroup<'a, T> {
    events: Vec<&'a T>,
    columns: Vec<Column<'a, T>>,
}

impl<'a, T> OverlapGroup<'a, T> {
    /// Events of the group in sorted order.
    pub fn events(&self) -> &[&'a T] {
        &self.events
    }

    /// Columns in creation order.
    pub fn columns(&self) -> &[Column<'a, T>] {
        &self.columns
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// Layout of one day's events.
#[derive(Debug)]
pub struct DayLayout<'a, T> {
    groups: Vec<OverlapGroup<'a, T>>,
    placements: Vec<Placement<'a, T>>,
}

impl<'a, T> Default for DayLayout<'a, T> {
    fn default() -> Self {
        Self {
            groups: Vec::new(),
            placements: Vec::new(),
        }
    }
}

impl<'a, T: TimeBounded> DayLayout<'a, T> {
    /// Overlap groups in chronological order.
    pub fn groups(&self) -> &[OverlapGroup<'a, T>] {
        &self.groups
    }

    /// One placement per event, in sorted event order.
    pub fn placements(&self) -> &[Placement<'a, T>] {
        &self.placements
    }

    /// Placement of the event with the given id.
    pub fn placement_for(&self, id: &str) -> Option<&Placement<'a, T>> {
        self.placements.iter().find(|p| p.event.id() == id)
    }

    /// Largest column count of any group.
    pub fn max_columns(&self) -> usize {
        self.groups
            .iter()
            .map(OverlapGroup::column_count)
            .max()
            .unwrap_or(0)
    }

    /// Number of events laid out.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Whether there were no events.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Lays out one day's events.
///
/// The caller is responsible for passing events of a single day; use
/// [`layout_week`] or [`bucket_by_day`] to split by calendar date.
///
/// Events with identical timeslots keep their input order under the
/// default [`TieBreak::InputOrder`], so swapping them in the input swaps
/// their columns. Set [`TieBreak::ById`] when the layout must not depend
/// on input order.
///
/// # Errors
/// [`LayoutError::InvalidInterval`](crate::error::LayoutError::InvalidInterval)
/// for the first event with `from > to` when `config.reject_inverted` is set.
pub fn layout_day<'a, T: TimeBounded>(
    events: &'a [T],
    config: &LayoutConfig,
) -> Result<DayLayout<'a, T>> {
    layout_refs(events.iter().collect(), config)
}

pub(crate) fn layout_refs<'a, T: TimeBounded>(
    mut events: Vec<&'a T>,
    config: &LayoutConfig,
) -> Result<DayLayout<'a, T>> {
    if config.reject_inverted {
        if let Some(bad) = events.iter().find(|e| e.timeslot().from > e.timeslot().to) {
            let time = bad.timeslot();
            warn!(id = bad.id(), from = %time.from, to = %time.to, "event ends before it starts");
            return Err(LayoutError::InvalidInterval {
                id: bad.id().to_string(),
                from: time.from,
                to: time.to,
            });
        }
    }

    sort::sort_refs(&mut events, config.tie_break);

    let mut groups = Vec::new();
    let mut placements = Vec::with_capacity(events.len());
    for (group_index, group) in segment(&events, config.touching_joins_group)
        .into_iter()
        .enumerate()
    {
        let (columns, assigned) = pack::assign_columns(group, config.overlap_rule);
        let column_count = columns.len();
        placements.extend(group.iter().zip(assigned).map(|(&event, column_index)| {
            trace!(
                id = event.id(),
                group = group_index,
                column = column_index,
                columns = column_count,
                "placed event"
            );
            Placement {
                event,
                group_index,
                column_index,
                column_count,
            }
        }));
        groups.push(OverlapGroup {
            events: group.to_vec(),
            columns,
        });
    }

    let day = DayLayout { groups, placements };
    debug!(
        events = day.len(),
        groups = day.groups.len(),
        max_columns = day.max_columns(),
        "laid out day"
    );
    Ok(day)
}
