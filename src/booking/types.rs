use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// What a tap on the current anchor date (or earlier) does while a selection
/// is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorTapPolicy {
    /// `day <= anchor` restarts the selection at `day`; only a strictly later
    /// day completes a range.
    Restart,
    /// `day == anchor` completes a one-day range; only a strictly earlier day
    /// restarts.
    SingleDay,
}

/// Policy used by [`DateRangeSelector::new`](super::DateRangeSelector::new)
pub const ANCHOR_TAP_POLICY: AnchorTapPolicy = AnchorTapPolicy::Restart;

impl AnchorTapPolicy {
    /// Whether tapping `day` while anchored at `anchor` closes the range
    pub fn completes_range(self, anchor: NaiveDate, day: NaiveDate) -> bool {
        match self {
            AnchorTapPolicy::Restart => day > anchor,
            AnchorTapPolicy::SingleDay => day >= anchor,
        }
    }
}

impl Default for AnchorTapPolicy {
    fn default() -> Self {
        ANCHOR_TAP_POLICY
    }
}

/// Selection progress of a date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SelectionState {
    Empty,
    Anchored { anchor: NaiveDate },
    Range { start: NaiveDate, end: NaiveDate },
}

/// Per-day flags a calendar needs to draw a selected span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayMark {
    pub is_range_start: bool,
    pub is_range_end: bool,
    pub highlighted: bool,
}

/// Billing unit chosen by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingMode {
    Hourly,
    Daily,
}

/// Pricing knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Hours billed for one calendar day in daily mode
    #[serde(default = "default_hours_per_day")]
    pub hours_per_day: f64,
}

fn default_hours_per_day() -> f64 {
    24.0
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            hours_per_day: default_hours_per_day(),
        }
    }
}

/// Outcome of price resolution.
///
/// `Pending` and `InvalidDuration` are kept apart from a zero price so callers
/// can tell "not chosen yet" from "free".
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Quote {
    /// Nothing (or not enough) selected yet
    Pending,
    /// The to-time is not after the from-time
    InvalidDuration,
    Priced {
        mode: BookingMode,
        /// Billed hours (hourly) or calendar days (daily)
        units: f64,
        amount_cents: i64,
    },
}

impl Quote {
    pub fn amount_cents(&self) -> Option<i64> {
        match self {
            Quote::Priced { amount_cents, .. } => Some(*amount_cents),
            _ => None,
        }
    }

    pub fn is_priced(&self) -> bool {
        matches!(self, Quote::Priced { .. })
    }
}
