//! Calendar layout for Tutorbook meetings.
//!
//! Provides the timeslot and availability models used to schedule
//! tutoring meetings, and the interval layout engine that places a day's
//! meetings in side-by-side columns on a calendar grid.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Timeslot`, `Availability`, `Event`,
//!   and the `TimeBounded` seam
//! - **`layout`**: Sorting, overlap groups, column packing, geometry,
//!   day/week bucketing, `LayoutConfig`
//! - **`validation`**: Input integrity checks (inverted intervals,
//!   duplicate IDs, recurrence metadata)
//! - **`error`**: `LayoutError` and the crate `Result`
//!
//! # Architecture
//!
//! Pure, synchronous computation over borrowed input. Persistence, search,
//! email and rendering live in the surrounding application; this crate
//! never performs I/O and never installs a `tracing` subscriber.

pub mod error;
pub mod layout;
pub mod models;
pub mod validation;

pub use error::{LayoutError, Result};
