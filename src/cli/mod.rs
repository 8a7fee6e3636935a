pub mod convert;
pub mod currencies;
pub mod setup;
pub mod share;
pub mod trend;
pub mod ui;
