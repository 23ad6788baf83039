//! Render geometry.
//!
//! Horizontal placement is a fraction of the day column:
//! `left = column_index / column_count`, `width = 1 / column_count`.
//! Vertical placement is in pixels from local midnight of the rendering
//! time zone, using a fixed pixels-per-hour scale.

use chrono::{DateTime, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{TimeBounded, Timeslot};

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Pixels-per-hour scale of the calendar grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerticalScale {
    /// Height of one hour row in pixels.
    pub pixels_per_hour: f64,
}

impl Default for VerticalScale {
    fn default() -> Self {
        Self {
            pixels_per_hour: 48.0,
        }
    }
}

impl VerticalScale {
    /// Creates a scale with the given hour height.
    pub fn new(pixels_per_hour: f64) -> Self {
        Self { pixels_per_hour }
    }

    /// Offset of `instant` from local midnight in `tz` (pixels).
    pub fn top<Tz: TimeZone>(&self, instant: DateTime<Utc>, tz: &Tz) -> f64 {
        let local = instant.with_timezone(tz);
        let seconds = f64::from(local.num_seconds_from_midnight());
        seconds / SECONDS_PER_HOUR * self.pixels_per_hour
    }

    /// Height of `time` (pixels). Inverted timeslots get zero height.
    pub fn height(&self, time: &Timeslot) -> f64 {
        let seconds = time.duration().num_seconds().max(0) as f64;
        seconds / SECONDS_PER_HOUR * self.pixels_per_hour
    }
}

/// Where one event sits in its day's layout.
#[derive(Debug)]
pub struct Placement<'a, T> {
    /// The input event, passed through.
    pub event: &'a T,
    /// Index of the overlap group within the day.
    pub group_index: usize,
    /// Column within the group.
    pub column_index: usize,
    /// Number of columns in the group.
    pub column_count: usize,
}

// Manual impls: `&'a T` is `Copy` whatever `T` is.
impl<T> Clone for Placement<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Placement<'_, T> {}

/// Rectangle for one event: `left`/`width` are fractions, `top`/`height`
/// are pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Pixels from local midnight.
    pub top: f64,
    /// Fraction of the day column width.
    pub left: f64,
    /// Fraction of the day column width.
    pub width: f64,
    /// Pixels.
    pub height: f64,
}

impl<'a, T: TimeBounded> Placement<'a, T> {
    /// `column_index / column_count`.
    #[inline]
    pub fn left_fraction(&self) -> f64 {
        self.column_index as f64 / self.column_count as f64
    }

    /// `1 / column_count`.
    #[inline]
    pub fn width_fraction(&self) -> f64 {
        1.0 / self.column_count as f64
    }

    /// The event's timeslot, unmodified.
    #[inline]
    pub fn timeslot(&self) -> &'a Timeslot {
        self.event.timeslot()
    }

    /// The event's id.
    #[inline]
    pub fn id(&self) -> &'a str {
        self.event.id()
    }

    /// Full rectangle in the rendering time zone.
    pub fn geometry<Tz: TimeZone>(&self, scale: &VerticalScale, tz: &Tz) -> Geometry {
        let time = self.timeslot();
        Geometry {
            top: scale.top(time.from, tz),
            left: self.left_fraction(),
            width: self.width_fraction(),
            height: scale.height(time),
        }
    }
}
