use chrono::{NaiveDate, NaiveTime};

use super::selector::{days_inclusive, DateRangeSelector};
use super::types::{BookingMode, PricingConfig, Quote, SelectionState};

/// Reservation-flow state for one screen.
///
/// Daily bookings price the selected date range. Hourly bookings also carry a
/// from/to time of day, which only exists in that mode, and are priced from
/// the times once at least one day is picked.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingWindow {
    Daily {
        range: DateRangeSelector,
    },
    Hourly {
        range: DateRangeSelector,
        from_time: Option<NaiveTime>,
        to_time: Option<NaiveTime>,
    },
}

impl BookingWindow {
    pub fn new(mode: BookingMode) -> Self {
        Self::with_selector(mode, DateRangeSelector::new())
    }

    pub fn with_selector(mode: BookingMode, range: DateRangeSelector) -> Self {
        match mode {
            BookingMode::Daily => BookingWindow::Daily { range },
            BookingMode::Hourly => BookingWindow::Hourly {
                range,
                from_time: None,
                to_time: None,
            },
        }
    }

    pub fn mode(&self) -> BookingMode {
        match self {
            BookingWindow::Daily { .. } => BookingMode::Daily,
            BookingWindow::Hourly { .. } => BookingMode::Hourly,
        }
    }

    /// Switch billing mode. The date selection survives; times are dropped
    /// when leaving hourly mode and start unset when entering it.
    pub fn set_mode(&mut self, mode: BookingMode) {
        if self.mode() == mode {
            return;
        }
        *self = Self::with_selector(mode, self.selector().clone());
    }

    pub fn selector(&self) -> &DateRangeSelector {
        match self {
            BookingWindow::Daily { range } | BookingWindow::Hourly { range, .. } => range,
        }
    }

    pub fn on_day_selected(&mut self, day: NaiveDate) -> SelectionState {
        match self {
            BookingWindow::Daily { range } | BookingWindow::Hourly { range, .. } => {
                range.on_day_selected(day)
            }
        }
    }

    /// Returns false (and changes nothing) outside hourly mode
    pub fn set_from_time(&mut self, time: NaiveTime) -> bool {
        match self {
            BookingWindow::Hourly { from_time, .. } => {
                *from_time = Some(time);
                true
            }
            BookingWindow::Daily { .. } => false,
        }
    }

    /// Returns false (and changes nothing) outside hourly mode
    pub fn set_to_time(&mut self, time: NaiveTime) -> bool {
        match self {
            BookingWindow::Hourly { to_time, .. } => {
                *to_time = Some(time);
                true
            }
            BookingWindow::Daily { .. } => false,
        }
    }

    /// Hours between from- and to-time. `None` until both are set or when the
    /// to-time is not after the from-time.
    pub fn duration_hours(&self) -> Option<f64> {
        match self {
            BookingWindow::Hourly {
                from_time: Some(from),
                to_time: Some(to),
                ..
            } if to > from => Some((*to - *from).num_minutes() as f64 / 60.0),
            _ => None,
        }
    }

    /// Price for a location billed at `price_per_hour`.
    /// Nothing is priced before a day has been picked.
    pub fn quote(&self, price_per_hour: f64, pricing: &PricingConfig) -> Quote {
        match self {
            BookingWindow::Daily { range } => match range.range() {
                Some((start, end)) => {
                    let days = days_inclusive(start, end) as f64;
                    priced(BookingMode::Daily, days, price_per_hour * pricing.hours_per_day)
                }
                None => Quote::Pending,
            },
            BookingWindow::Hourly { range, .. } if range.anchor().is_none() => Quote::Pending,
            BookingWindow::Hourly {
                from_time: Some(_),
                to_time: Some(_),
                ..
            } => match self.duration_hours() {
                Some(hours) => priced(BookingMode::Hourly, hours, price_per_hour),
                None => Quote::InvalidDuration,
            },
            BookingWindow::Hourly { .. } => Quote::Pending,
        }
    }
}

fn priced(mode: BookingMode, units: f64, rate: f64) -> Quote {
    Quote::Priced {
        mode,
        units,
        amount_cents: (rate * units * 100.0).round() as i64,
    }
}
