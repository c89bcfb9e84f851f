pub mod comparison_service;
pub mod projection_service;

pub use comparison_service::ComparisonService;
pub use projection_service::{CategoryTotals, ProjectionReport, ProjectionService};
