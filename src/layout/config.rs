//! Layout configuration.
//!
//! Defaults reproduce the Tutorbook calendar grid: inclusive overlap for
//! packing, a new group at the running end instant, input order for equal
//! timeslots, and 48 pixels per hour.

use serde::{Deserialize, Serialize};

use super::VerticalScale;
use crate::error::Result;
use crate::models::OverlapRule;

/// How events with identical timeslots are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Keep input order (stable sort). Identical timeslots then take
    /// columns in the order they were passed in.
    #[default]
    InputOrder,
    /// Deterministic by event ID (lexicographic), then input order.
    ById,
}

/// Layout engine options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Predicate deciding whether an event fits after a column's last event.
    pub overlap_rule: OverlapRule,
    /// Keep an event starting exactly at the group's running end in that group.
    pub touching_joins_group: bool,
    /// Ordering of events with identical timeslots.
    pub tie_break: TieBreak,
    /// Fail with `InvalidInterval` when an event has `from > to`.
    pub reject_inverted: bool,
    /// Pixel scale for vertical geometry.
    pub vertical_scale: VerticalScale,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            overlap_rule: OverlapRule::Inclusive,
            touching_joins_group: false,
            tie_break: TieBreak::InputOrder,
            reject_inverted: true,
            vertical_scale: VerticalScale::default(),
        }
    }
}

impl LayoutConfig {
    /// Parses a configuration from TOML; missing keys take defaults.
    ///
    /// ```
    /// use tutor_calendar::layout::{LayoutConfig, TieBreak};
    ///
    /// let config = LayoutConfig::from_toml_str(r#"
    ///     tie_break = "by_id"
    ///     [vertical_scale]
    ///     pixels_per_hour = 60.0
    /// "#).unwrap();
    /// assert_eq!(config.tie_break, TieBreak::ById);
    /// assert!(config.reject_inverted);
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Sets the packing overlap rule.
    pub fn with_overlap_rule(mut self, rule: OverlapRule) -> Self {
        self.overlap_rule = rule;
        self
    }

    /// Sets whether touching events stay in the current group.
    pub fn with_touching_joins_group(mut self, joins: bool) -> Self {
        self.touching_joins_group = joins;
        self
    }

    /// Sets the tie-break for identical timeslots.
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Sets whether inverted intervals are rejected.
    pub fn with_reject_inverted(mut self, reject: bool) -> Self {
        self.reject_inverted = reject;
        self
    }

    /// Sets the vertical pixel scale.
    pub fn with_vertical_scale(mut self, scale: VerticalScale) -> Self {
        self.vertical_scale = scale;
        self
    }
}
