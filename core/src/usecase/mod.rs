pub mod report;

#[cfg(test)]
mod report_test;

pub use report::{build_report, time_series, ReportUseCase};
