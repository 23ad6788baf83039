//! Group segmenter.
//!
//! Splits a chronologically sorted run of events into maximal overlap
//! groups. A group closes when an event starts at or after the latest end
//! seen so far in that group; the running end then resets.

use chrono::{DateTime, Utc};

use crate::models::TimeBounded;

/// Splits `sorted` into overlap groups.
///
/// `sorted` must already be ordered by [`sort_events`](super::sort_events).
/// The returned slices partition `sorted` in order. With
/// `touching_joins_group`, an event starting exactly at the running end
/// stays in the current group.
pub fn segment<T: TimeBounded>(sorted: &[T], touching_joins_group: bool) -> Vec<&[T]> {
    let (mut groups, start, _) = sorted.iter().enumerate().fold(
        (Vec::new(), 0usize, None::<DateTime<Utc>>),
        |(mut groups, start, last_event_ending), (idx, event)| {
            let time = event.timeslot();
            let starts_new_group = last_event_ending.is_some_and(|end| {
                if touching_joins_group {
                    time.from > end
                } else {
                    time.from >= end
                }
            });

            let (start, last_event_ending) = if starts_new_group {
                groups.push(&sorted[start..idx]);
                (idx, None)
            } else {
                (start, last_event_ending)
            };

            let last_event_ending = Some(last_event_ending.map_or(time.to, |end| end.max(time.to)));
            (groups, start, last_event_ending)
        },
    );

    if start < sorted.len() {
        groups.push(&sorted[start..]);
    }
    groups
}
