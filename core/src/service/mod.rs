pub mod aggregate;
pub mod dto;
pub mod filter;
pub mod tardiness_service;

pub use aggregate::{aggregate, AggregationResult, EmployeeSummary, ManagerSummary};
pub use dto::{Annotation, ReportData, SeriesPoint, TimeSeries};
pub use filter::filter;
pub use tardiness_service::{AddEntry, TardinessService};
