//! Request orchestration over ports: cache discipline, degraded-data
//! fallback policies, response assembly.

pub mod chart_service;
pub mod portfolio_service;

pub use chart_service::ChartService;
pub use portfolio_service::PortfolioService;
