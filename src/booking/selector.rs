use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use super::types::{AnchorTapPolicy, DayMark, SelectionState, ANCHOR_TAP_POLICY};

/// Turns a stream of day taps into a date range.
///
/// Never rejects input: every tap moves the selection to a well-defined state.
/// A tap while a full range is selected always starts over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRangeSelector {
    state: SelectionState,
    policy: AnchorTapPolicy,
}

impl DateRangeSelector {
    /// Empty selector using [`ANCHOR_TAP_POLICY`]
    pub fn new() -> Self {
        Self::with_policy(ANCHOR_TAP_POLICY)
    }

    pub fn with_policy(policy: AnchorTapPolicy) -> Self {
        Self {
            state: SelectionState::Empty,
            policy,
        }
    }

    /// Apply a tap on `day` and return the resulting state
    pub fn on_day_selected(&mut self, day: NaiveDate) -> SelectionState {
        let next = match self.state {
            SelectionState::Anchored { anchor } if self.policy.completes_range(anchor, day) => {
                SelectionState::Range {
                    start: anchor,
                    end: day,
                }
            }
            SelectionState::Empty
            | SelectionState::Anchored { .. }
            | SelectionState::Range { .. } => SelectionState::Anchored { anchor: day },
        };
        debug!(?day, from = ?self.state, to = ?next, "day selected");
        self.state = next;
        next
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn policy(&self) -> AnchorTapPolicy {
        self.policy
    }

    /// First endpoint picked, if any
    pub fn anchor(&self) -> Option<NaiveDate> {
        match self.state {
            SelectionState::Empty => None,
            SelectionState::Anchored { anchor } => Some(anchor),
            SelectionState::Range { start, .. } => Some(start),
        }
    }

    /// Second endpoint, only once a range exists
    pub fn end(&self) -> Option<NaiveDate> {
        match self.state {
            SelectionState::Range { end, .. } => Some(end),
            _ => None,
        }
    }

    /// `(start, end)` once both endpoints are picked
    pub fn range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match self.state {
            SelectionState::Range { start, end } => Some((start, end)),
            _ => None,
        }
    }

    /// Drop the selection but keep the policy
    pub fn clear(&mut self) {
        self.state = SelectionState::Empty;
    }

    /// Calendar marking for the current selection.
    ///
    /// A range marks every day from start to end inclusive. An anchor alone is
    /// a single day that is both start and end.
    pub fn marking(&self) -> BTreeMap<NaiveDate, DayMark> {
        match self.state {
            SelectionState::Empty => BTreeMap::new(),
            SelectionState::Anchored { anchor } => BTreeMap::from([(
                anchor,
                DayMark {
                    is_range_start: true,
                    is_range_end: true,
                    highlighted: true,
                },
            )]),
            SelectionState::Range { start, end } => start
                .iter_days()
                .take_while(|day| *day <= end)
                .map(|day| {
                    (
                        day,
                        DayMark {
                            is_range_start: day == start,
                            is_range_end: day == end,
                            highlighted: true,
                        },
                    )
                })
                .collect(),
        }
    }
}

impl Default for DateRangeSelector {
    fn default() -> Self {
        Self::new()
    }
}

/// Number of calendar days in `[start, end]`, both ends included
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}
