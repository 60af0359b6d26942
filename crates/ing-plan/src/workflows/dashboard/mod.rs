//! HTTP-facing composition of the screening engine, the portfolio report, and
//! a snapshot source.

pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use router::dashboard_router;
pub use service::{DashboardService, DashboardServiceError, ScreeningRequest};
