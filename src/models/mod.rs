//! Calendar domain models.
//!
//! | Type | Tutorbook meaning |
//! |------|-------------------|
//! | [`Timeslot`] | When a meeting happens, or a window of free time |
//! | [`Availability`] | All free windows of one person |
//! | [`Event`] | A meeting as handed to the layout engine |
//! | [`TimeBounded`] | Seam letting the engine read any caller type |

mod availability;
mod event;
mod timeslot;

pub use availability::Availability;
pub use event::{Event, TimeBounded};
pub use timeslot::{OverlapRule, Timeslot};
