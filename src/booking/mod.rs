pub mod selector;
pub mod types;
pub mod window;

pub use selector::{days_inclusive, DateRangeSelector};
pub use types::{
    AnchorTapPolicy, BookingMode, DayMark, PricingConfig, Quote, SelectionState,
    ANCHOR_TAP_POLICY,
};
pub use window::BookingWindow;
