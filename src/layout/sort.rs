//! Interval sorter.
//!
//! Orders a day's events by start, then end, ascending. The sort is stable
//! so identical timeslots keep their input order and re-rendering the same
//! data yields the same layout.

use std::cmp::Ordering;

use super::TieBreak;
use crate::models::TimeBounded;

/// Compares two events by `from`, then `to`.
#[inline]
pub fn compare_time<T: TimeBounded>(a: &T, b: &T) -> Ordering {
    let (a, b) = (a.timeslot(), b.timeslot());
    a.from.cmp(&b.from).then(a.to.cmp(&b.to))
}

/// Returns references to `events` in chronological order.
pub fn sort_events<T: TimeBounded>(events: &[T]) -> Vec<&T> {
    sort_events_by(events, TieBreak::InputOrder)
}

/// Returns references to `events` in chronological order, breaking ties
/// between identical timeslots with `tie_break`.
pub fn sort_events_by<T: TimeBounded>(events: &[T], tie_break: TieBreak) -> Vec<&T> {
    let mut sorted: Vec<&T> = events.iter().collect();
    sort_refs(&mut sorted, tie_break);
    sorted
}

pub(crate) fn sort_refs<T: TimeBounded>(events: &mut [&T], tie_break: TieBreak) {
    match tie_break {
        TieBreak::InputOrder => events.sort_by(|a, b| compare_time(*a, *b)),
        TieBreak::ById => {
            events.sort_by(|a, b| compare_time(*a, *b).then_with(|| a.id().cmp(b.id())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Event, Timeslot};
    use chrono::{TimeZone, Utc};

    fn meeting(id: &str, from: (u32, u32), to: (u32, u32)) -> Event {
        Event::new(
            id,
            Timeslot::new(
                Utc.with_ymd_and_hms(2021, 3, 1, from.0, from.1, 0).unwrap(),
                Utc.with_ymd_and_hms(2021, 3, 1, to.0, to.1, 0).unwrap(),
            ),
        )
    }

    fn ids<'a>(sorted: &[&'a Event]) -> Vec<&'a str> {
        sorted.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_sort_by_start_then_end() {
        let events = vec![
            meeting("late", (11, 0), (12, 0)),
            meeting("long", (9, 0), (11, 0)),
            meeting("short", (9, 0), (9, 30)),
        ];
        assert_eq!(ids(&sort_events(&events)), vec!["short", "long", "late"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let events = vec![
            meeting("b", (9, 0), (10, 0)),
            meeting("a", (9, 0), (10, 0)),
            meeting("c", (9, 0), (10, 0)),
        ];
        assert_eq!(ids(&sort_events(&events)), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_sort_by_id_tie_break() {
        let events = vec![
            meeting("b", (9, 0), (10, 0)),
            meeting("a", (9, 0), (10, 0)),
            meeting("z", (8, 0), (8, 30)),
        ];
        assert_eq!(
            ids(&sort_events_by(&events, TieBreak::ById)),
            vec!["z", "a", "b"]
        );
    }

    #[test]
    fn test_sort_idempotent() {
        let events = vec![
            meeting("a", (9, 0), (10, 0)),
            meeting("b", (9, 0), (10, 0)),
            meeting("c", (9, 30), (9, 45)),
        ];
        let once: Vec<Event> = sort_events(&events).into_iter().cloned().collect();
        let twice: Vec<Event> = sort_events(&once).into_iter().cloned().collect();
        assert_eq!(once, twice);
    }
}
