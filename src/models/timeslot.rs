//! Timeslot model.
//!
//! A timeslot is a window of time `[from, to]` plus the metadata needed to
//! describe a recurring meeting: an iCal recurrence rule, excluded dates,
//! and the last possible occurrence end.
//!
//! # Overlap semantics
//! Two predicates are provided. The default is inclusive: timeslots that
//! share a boundary instant (back-to-back) count as overlapping. The strict
//! form lets back-to-back timeslots touch without overlapping.
//!
//! | a            | b            | `Inclusive` | `AllowBackToBack` |
//! |--------------|--------------|-------------|-------------------|
//! | 09:00-10:00  | 09:30-10:30  | true        | true              |
//! | 09:00-10:00  | 10:00-11:00  | true        | false             |
//! | 09:00-10:00  | 10:30-11:00  | false       | false             |

use std::fmt;

use chrono::{DateTime, Days, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use tracing::warn;

use crate::error::{LayoutError, Result};

/// Which overlap predicate to apply between two timeslots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapRule {
    /// Touching endpoints overlap (`a.to >= b.from && a.from <= b.to`).
    #[default]
    Inclusive,
    /// Touching endpoints do not overlap (`a.to > b.from && a.from < b.to`).
    AllowBackToBack,
}

/// A window of time with optional recurrence metadata.
///
/// Equality only considers `from` and `to`; the id and recurrence
/// metadata are ignored.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use tutor_calendar::models::Timeslot;
///
/// let a = Timeslot::new(
///     Utc.with_ymd_and_hms(2021, 3, 1, 9, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2021, 3, 1, 10, 0, 0).unwrap(),
/// );
/// let b = Timeslot::new(
///     Utc.with_ymd_and_hms(2021, 3, 1, 10, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2021, 3, 1, 11, 0, 0).unwrap(),
/// );
/// assert!(a.overlaps(&b));
/// assert!(!a.overlaps_back_to_back(&b));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeslot {
    /// Client-side identifier (used as a render key). May be empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Start of this timeslot instance.
    pub from: DateTime<Utc>,
    /// End of this timeslot instance.
    pub to: DateTime<Utc>,
    /// Instants excluded from the recurrence rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exdates: Option<Vec<DateTime<Utc>>>,
    /// Recurrence rule (iCal RFC 5545 text). Carried, never expanded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recur: Option<String>,
    /// Last possible occurrence end. Only set server-side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<DateTime<Utc>>,
}

impl Timeslot {
    /// Creates a timeslot without checking `from <= to`.
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            id: String::new(),
            from,
            to,
            exdates: None,
            recur: None,
            last: None,
        }
    }

    /// Creates a timeslot, rejecting `from > to`.
    pub fn try_new(from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Self> {
        let slot = Self::new(from, to);
        slot.check()?;
        Ok(slot)
    }

    /// Sets the identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the recurrence rule.
    pub fn with_recur(mut self, rule: impl Into<String>) -> Self {
        self.recur = Some(rule.into());
        self
    }

    /// Adds an excluded date.
    pub fn with_exdate(mut self, date: DateTime<Utc>) -> Self {
        self.exdates.get_or_insert_with(Vec::new).push(date);
        self
    }

    /// Sets the last possible occurrence end.
    pub fn with_last(mut self, last: DateTime<Utc>) -> Self {
        self.last = Some(last);
        self
    }

    /// Fails with [`LayoutError::InvalidInterval`] if `from > to`.
    pub fn check(&self) -> Result<()> {
        if self.from > self.to {
            return Err(LayoutError::InvalidInterval {
                id: self.id.clone(),
                from: self.from,
                to: self.to,
            });
        }
        Ok(())
    }

    /// `to - from`.
    #[inline]
    pub fn duration(&self) -> Duration {
        self.to - self.from
    }

    /// Whether this timeslot carries a recurrence rule.
    #[inline]
    pub fn is_recurring(&self) -> bool {
        self.recur.is_some()
    }

    /// Inclusive overlap: back-to-back timeslots overlap.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.overlaps_with(other, OverlapRule::Inclusive)
    }

    /// Strict overlap: back-to-back timeslots do not overlap.
    #[inline]
    pub fn overlaps_back_to_back(&self, other: &Self) -> bool {
        self.overlaps_with(other, OverlapRule::AllowBackToBack)
    }

    /// Overlap under the given rule.
    pub fn overlaps_with(&self, other: &Self, rule: OverlapRule) -> bool {
        match rule {
            OverlapRule::Inclusive => self.to >= other.from && self.from <= other.to,
            OverlapRule::AllowBackToBack => self.to > other.from && self.from < other.to,
        }
    }

    /// Whether `other` lies entirely within this timeslot.
    pub fn contains(&self, other: &Self) -> bool {
        self.from <= other.from && self.from + self.duration() >= other.to
    }

    /// The same timeslot exactly 168 hours later. Metadata is kept.
    ///
    /// This is a UTC shift: across a daylight-saving change the local
    /// start time moves by an hour. Use [`Timeslot::to_next_week_in`] to
    /// keep the local wall-clock time of a weekly meeting.
    ///
    /// # Errors
    /// [`LayoutError::OutOfRange`] when either end would pass chrono's
    /// maximum date.
    pub fn to_next_week(&self) -> Result<Self> {
        let week = Duration::days(7);
        match (
            self.from.checked_add_signed(week),
            self.to.checked_add_signed(week),
        ) {
            (Some(from), Some(to)) => Ok(self.shifted(from, to)),
            _ => Err(self.out_of_range()),
        }
    }

    /// The same timeslot seven calendar days later in `tz`, keeping the
    /// local start and end times. Metadata is kept.
    ///
    /// A local time skipped by a forward clock change falls back to the
    /// 168-hour shift; an ambiguous one resolves to the earlier instant.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{FixedOffset, TimeZone, Utc};
    /// use tutor_calendar::models::Timeslot;
    ///
    /// let slot = Timeslot::new(
    ///     Utc.with_ymd_and_hms(2021, 3, 1, 9, 0, 0).unwrap(),
    ///     Utc.with_ymd_and_hms(2021, 3, 1, 10, 0, 0).unwrap(),
    /// );
    /// let tz = FixedOffset::east_opt(3600).unwrap();
    /// let next = slot.to_next_week_in(&tz).unwrap();
    /// assert_eq!(next.from, Utc.with_ymd_and_hms(2021, 3, 8, 9, 0, 0).unwrap());
    /// ```
    ///
    /// # Errors
    /// [`LayoutError::OutOfRange`] when either end would pass chrono's
    /// maximum date.
    pub fn to_next_week_in<Tz: TimeZone>(&self, tz: &Tz) -> Result<Self> {
        let shift = |instant: DateTime<Utc>| -> Option<DateTime<Utc>> {
            let local = instant
                .with_timezone(tz)
                .naive_local()
                .checked_add_days(Days::new(7))?;
            match tz.from_local_datetime(&local).earliest() {
                Some(shifted) => Some(shifted.with_timezone(&Utc)),
                None => instant.checked_add_signed(Duration::days(7)),
            }
        };
        match (shift(self.from), shift(self.to)) {
            (Some(from), Some(to)) => Ok(self.shifted(from, to)),
            _ => Err(self.out_of_range()),
        }
    }

    fn shifted(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            from,
            to,
            ..self.clone()
        }
    }

    fn out_of_range(&self) -> LayoutError {
        warn!(id = %self.id, from = %self.from, "weekly shift leaves the supported date range");
        LayoutError::OutOfRange(format!("timeslot '{}' shifted by one week", self.id))
    }

    /// The bare `(from, to)` pair.
    #[inline]
    pub fn segment(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        (self.from, self.to)
    }
}

/// `2021-03-01 09:00 - 10:30 UTC`, with the end date repeated when the
/// timeslot crosses midnight.
impl fmt::Display for Timeslot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - ", self.from.format("%Y-%m-%d %H:%M"))?;
        if self.to.date_naive() == self.from.date_naive() {
            write!(f, "{} UTC", self.to.format("%H:%M"))
        } else {
            write!(f, "{} UTC", self.to.format("%Y-%m-%d %H:%M"))
        }
    }
}

impl PartialEq for Timeslot {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to
    }
}

impl Eq for Timeslot {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use chrono_tz::America::Los_Angeles;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 3, 1, h, m, 0).unwrap()
    }

    fn slot(h1: u32, m1: u32, h2: u32, m2: u32) -> Timeslot {
        Timeslot::new(at(h1, m1), at(h2, m2))
    }

    #[test]
    fn test_duration() {
        assert_eq!(slot(9, 0, 10, 30).duration(), Duration::minutes(90));
        assert_eq!(slot(9, 0, 9, 0).duration(), Duration::zero());
    }

    #[test]
    fn test_overlap_partial() {
        let a = slot(9, 0, 10, 0);
        let b = slot(9, 30, 10, 30);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(a.overlaps_back_to_back(&b));
    }

    #[test]
    fn test_overlap_touching() {
        let a = slot(9, 0, 10, 0);
        let b = slot(10, 0, 11, 0);
        // Inclusive by default
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps_back_to_back(&b));
        assert!(!b.overlaps_back_to_back(&a));
    }

    #[test]
    fn test_overlap_disjoint() {
        let a = slot(9, 0, 10, 0);
        let b = slot(10, 30, 11, 0);
        assert!(!a.overlaps(&b));
        assert!(!a.overlaps_back_to_back(&b));
    }

    #[test]
    fn test_zero_duration_overlap() {
        let point = slot(9, 0, 9, 0);
        assert!(point.overlaps(&point));
        assert!(!point.overlaps_back_to_back(&point));
        assert!(point.overlaps(&slot(8, 0, 9, 0)));
    }

    #[test]
    fn test_contains() {
        let outer = slot(9, 0, 12, 0);
        assert!(outer.contains(&slot(9, 0, 12, 0)));
        assert!(outer.contains(&slot(10, 0, 11, 0)));
        assert!(!outer.contains(&slot(8, 59, 10, 0)));
        assert!(!outer.contains(&slot(11, 0, 12, 1)));
    }

    #[test]
    fn test_equality_ignores_metadata() {
        let a = slot(9, 0, 10, 0).with_id("a").with_recur("RRULE:FREQ=WEEKLY");
        let b = slot(9, 0, 10, 0).with_id("b");
        assert_eq!(a, b);
        assert_ne!(a, slot(9, 0, 10, 1));
    }

    #[test]
    fn test_try_new_rejects_inverted() {
        assert!(Timeslot::try_new(at(9, 0), at(9, 0)).is_ok());
        let err = Timeslot::try_new(at(10, 0), at(9, 0)).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidInterval { .. }));
    }

    #[test]
    fn test_to_next_week() {
        let s = slot(9, 0, 10, 0).with_id("weekly").with_recur("RRULE:FREQ=WEEKLY");
        let next = s.to_next_week().unwrap();
        assert_eq!(next.from, at(9, 0) + Duration::days(7));
        assert_eq!(next.duration(), s.duration());
        assert_eq!(next.id, "weekly");
        assert!(next.is_recurring());
    }

    #[test]
    fn test_to_next_week_keeps_local_time_across_dst() {
        // 09:00-10:00 PST on Monday 2021-03-08; clocks go forward on the 14th
        let s = Timeslot::new(
            Utc.with_ymd_and_hms(2021, 3, 8, 17, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2021, 3, 8, 18, 0, 0).unwrap(),
        )
        .with_id("tutoring");

        let next = s.to_next_week_in(&Los_Angeles).unwrap();
        assert_eq!(next.from, Utc.with_ymd_and_hms(2021, 3, 15, 16, 0, 0).unwrap());
        assert_eq!(next.to, Utc.with_ymd_and_hms(2021, 3, 15, 17, 0, 0).unwrap());
        assert_eq!(next.from.with_timezone(&Los_Angeles).hour(), 9);
        assert_eq!(next.id, "tutoring");

        // The UTC form keeps elapsed time instead
        let utc = s.to_next_week().unwrap();
        assert_eq!(utc.from.with_timezone(&Los_Angeles).hour(), 10);
    }

    #[test]
    fn test_to_next_week_in_skipped_local_time() {
        // 02:30 PST on 2021-03-07 does not exist a week later
        let s = Timeslot::new(
            Utc.with_ymd_and_hms(2021, 3, 7, 10, 30, 0).unwrap(),
            Utc.with_ymd_and_hms(2021, 3, 7, 11, 30, 0).unwrap(),
        );
        let next = s.to_next_week_in(&Los_Angeles).unwrap();
        assert_eq!(next.from, Utc.with_ymd_and_hms(2021, 3, 14, 10, 30, 0).unwrap());
        assert_eq!(next.from.with_timezone(&Los_Angeles).hour(), 3);
    }

    #[test]
    fn test_to_next_week_out_of_range() {
        let end = DateTime::<Utc>::MAX_UTC;
        let s = Timeslot::new(end - Duration::hours(1), end).with_id("last");
        assert!(matches!(s.to_next_week(), Err(LayoutError::OutOfRange(_))));
        assert!(matches!(s.to_next_week_in(&Utc), Err(LayoutError::OutOfRange(_))));
    }

    #[test]
    fn test_display() {
        assert_eq!(slot(9, 0, 10, 30).to_string(), "2021-03-01 09:00 - 10:30 UTC");
        let overnight = Timeslot::new(at(23, 0), at(23, 0) + Duration::hours(2));
        assert_eq!(
            overnight.to_string(),
            "2021-03-01 23:00 - 2021-03-02 01:00 UTC"
        );
    }

    #[test]
    fn test_json_shape() {
        let s = slot(9, 0, 10, 0).with_id("t1");
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["id"], "t1");
        assert_eq!(json["from"], "2021-03-01T09:00:00Z");
        assert!(json.get("recur").is_none());
        assert!(json.get("exdates").is_none());

        // Null optionals are accepted, as stored in database records
        let record = r#"{"id":"t2","from":"2021-03-01T09:00:00Z","to":"2021-03-01T10:00:00Z",
            "exdates":null,"recur":null,"last":null}"#;
        let parsed: Timeslot = serde_json::from_str(record).unwrap();
        assert_eq!(parsed, s);
        assert_eq!(parsed.id, "t2");
        assert!(parsed.last.is_none());
    }
}
