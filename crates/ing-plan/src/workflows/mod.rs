pub mod calendar;
pub mod dashboard;
pub mod portfolio;
pub mod screening;
pub mod snapshot;
