//! Column packer.
//!
//! Greedy first-fit packing of one overlap group into columns. Each event
//! goes into the first column (in creation order) whose most recent event
//! it does not overlap; otherwise it opens a new column.
//!
//! Checking only a column's last event suffices: events arrive in
//! chronological order and a column never holds two overlapping events.

use super::Column;
use crate::models::{OverlapRule, TimeBounded};

/// Packs a sorted overlap group into columns.
///
/// Never fails. In the worst case (all events mutually overlapping) every
/// event gets its own column.
pub fn pack<'a, T: TimeBounded>(group: &[&'a T], rule: OverlapRule) -> Vec<Column<'a, T>> {
    assign_columns(group, rule).0
}

/// Like [`pack`], also returning the column index of each input event.
pub(crate) fn assign_columns<'a, T: TimeBounded>(
    group: &[&'a T],
    rule: OverlapRule,
) -> (Vec<Column<'a, T>>, Vec<usize>) {
    group.iter().fold(
        (Vec::<Column<'a, T>>::new(), Vec::with_capacity(group.len())),
        |(mut columns, mut assigned), &event| {
            let time = event.timeslot();
            let fits = columns
                .iter()
                .position(|col| !time.overlaps_with(col.last().timeslot(), rule));

            let idx = match fits {
                Some(idx) => {
                    columns[idx].push(event);
                    idx
                }
                None => {
                    columns.push(Column::new(event));
                    columns.len() - 1
                }
            };
            assigned.push(idx);
            (columns, assigned)
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Timeslot;
    use chrono::{TimeZone, Utc};

    fn slot(id: &str, from: (u32, u32), to: (u32, u32)) -> Timeslot {
        Timeslot::new(
            Utc.with_ymd_and_hms(2021, 3, 1, from.0, from.1, 0).unwrap(),
            Utc.with_ymd_and_hms(2021, 3, 1, to.0, to.1, 0).unwrap(),
        )
        .with_id(id)
    }

    fn layout<'a>(columns: &[Column<'a, Timeslot>]) -> Vec<Vec<&'a str>> {
        columns
            .iter()
            .map(|c| c.events().iter().map(|e| e.id.as_str()).collect())
            .collect()
    }

    #[test]
    fn test_two_overlapping() {
        let a = slot("a", (9, 0), (10, 0));
        let b = slot("b", (9, 30), (10, 30));
        let cols = pack(&[&a, &b], OverlapRule::Inclusive);
        assert_eq!(layout(&cols), vec![vec!["a"], vec!["b"]]);
    }

    #[test]
    fn test_three_mutually_overlapping() {
        let a = slot("a", (9, 0), (11, 0));
        let b = slot("b", (9, 15), (10, 15));
        let c = slot("c", (9, 30), (9, 45));
        let cols = pack(&[&a, &b, &c], OverlapRule::Inclusive);
        assert_eq!(cols.len(), 3);
    }

    #[test]
    fn test_reuses_first_free_column() {
        let a = slot("a", (9, 0), (9, 30));
        let b = slot("b", (9, 0), (11, 0));
        let c = slot("c", (9, 45), (10, 15));
        let cols = pack(&[&a, &b, &c], OverlapRule::Inclusive);
        assert_eq!(layout(&cols), vec![vec!["a", "c"], vec!["b"]]);
    }

    #[test]
    fn test_touching_gets_new_column() {
        let a = slot("a", (9, 0), (10, 0));
        let b = slot("b", (9, 0), (11, 0));
        let c = slot("c", (10, 0), (10, 30));
        let inclusive = pack(&[&a, &b, &c], OverlapRule::Inclusive);
        assert_eq!(layout(&inclusive), vec![vec!["a"], vec!["b"], vec!["c"]]);

        let strict = pack(&[&a, &b, &c], OverlapRule::AllowBackToBack);
        assert_eq!(layout(&strict), vec![vec!["a", "c"], vec!["b"]]);
    }

    #[test]
    fn test_duplicates() {
        let a = slot("a", (9, 0), (10, 0));
        let b = slot("b", (9, 0), (10, 0));
        assert_eq!(pack(&[&a, &b], OverlapRule::Inclusive).len(), 2);
    }

    #[test]
    fn test_assignment_follows_input_order() {
        let a = slot("a", (9, 0), (9, 30));
        let b = slot("b", (9, 0), (11, 0));
        let c = slot("c", (9, 45), (10, 15));
        let (_, assigned) = assign_columns(&[&a, &b, &c], OverlapRule::Inclusive);
        assert_eq!(assigned, vec![0, 1, 0]);
    }

    #[test]
    fn test_empty_group() {
        assert!(pack::<Timeslot>(&[], OverlapRule::Inclusive).is_empty());
    }
}
