//! Day bucketing and week layout.
//!
//! An event belongs to the calendar date on which its `from` falls in the
//! rendering time zone. A week view lays out seven consecutive dates
//! independently.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate, TimeZone};
use tracing::{debug, warn};

use super::{layout_refs, DayLayout, LayoutConfig};
use crate::error::{LayoutError, Result};
use crate::models::TimeBounded;

/// Groups events by local start date in `tz`, preserving input order
/// within each date.
pub fn bucket_by_day<'a, T: TimeBounded, Tz: TimeZone>(
    events: &'a [T],
    tz: &Tz,
) -> BTreeMap<NaiveDate, Vec<&'a T>> {
    let mut buckets: BTreeMap<NaiveDate, Vec<&'a T>> = BTreeMap::new();
    for event in events {
        let date = event.timeslot().from.with_timezone(tz).date_naive();
        buckets.entry(date).or_default().push(event);
    }
    buckets
}

/// Layouts for seven consecutive days.
#[derive(Debug)]
pub struct WeekLayout<'a, T> {
    start: NaiveDate,
    days: Vec<(NaiveDate, DayLayout<'a, T>)>,
}

impl<'a, T: TimeBounded> WeekLayout<'a, T> {
    /// First date of the week.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Layout of the `offset`-th day (0..7).
    pub fn day(&self, offset: usize) -> Option<&DayLayout<'a, T>> {
        self.days.get(offset).map(|(_, day)| day)
    }

    /// Layout of a specific date, if it falls in this week.
    pub fn date(&self, date: NaiveDate) -> Option<&DayLayout<'a, T>> {
        self.days
            .iter()
            .find(|(d, _)| *d == date)
            .map(|(_, day)| day)
    }

    /// `(date, layout)` pairs in order.
    pub fn days(&self) -> impl Iterator<Item = (NaiveDate, &DayLayout<'a, T>)> + '_ {
        self.days.iter().map(|(date, day)| (*date, day))
    }

    /// Total events laid out across the week.
    pub fn len(&self) -> usize {
        self.days.iter().map(|(_, day)| day.len()).sum()
    }

    /// Whether no event fell in the week.
    pub fn is_empty(&self) -> bool {
        self.days.iter().all(|(_, day)| day.is_empty())
    }
}

/// Lays out the seven days starting at `week_start` in `tz`.
///
/// Events whose local start date falls outside the week are ignored.
///
/// # Errors
/// [`LayoutError::OutOfRange`] when the week runs past chrono's maximum
/// date, and any error of [`layout_day`](super::layout_day) for a day.
pub fn layout_week<'a, T: TimeBounded, Tz: TimeZone>(
    events: &'a [T],
    week_start: NaiveDate,
    tz: &Tz,
    config: &LayoutConfig,
) -> Result<WeekLayout<'a, T>> {
    let mut buckets = bucket_by_day(events, tz);
    let days = (0..7)
        .map(|offset| -> Result<(NaiveDate, DayLayout<'a, T>)> {
            let date = week_start.checked_add_days(Days::new(offset)).ok_or_else(|| {
                warn!(start = %week_start, offset, "week runs past the last representable date");
                LayoutError::OutOfRange(format!("week starting {week_start}"))
            })?;
            let bucket = buckets.remove(&date).unwrap_or_default();
            Ok((date, layout_refs(bucket, config)?))
        })
        .collect::<Result<Vec<_>>>()?;

    let week = WeekLayout {
        start: week_start,
        days,
    };
    debug!(
        start = %week_start,
        events = week.len(),
        ignored = buckets.values().map(Vec::len).sum::<usize>(),
        "laid out week"
    );
    Ok(week)
}
