pub mod booking;
pub mod catalog;
pub mod models;
pub mod settings;
pub mod store;

pub use booking::{BookingMode, BookingWindow, DateRangeSelector, Quote};
pub use models::{Location, Review};
pub use store::{LocationStore, StoreHandle};
