use chrono::NaiveDate;
use serde::Serialize;

use crate::model::record::TardinessRecord;
use crate::model::scope::ReportScope;
use crate::service::aggregate::AggregationResult;

/// Free-text note pinned to a date on the time-series charts.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub date: NaiveDate,
    pub text: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub minutes_late: u32,
}

/// One employee's filtered records in chronological order.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TimeSeries {
    pub employee: String,
    pub points: Vec<SeriesPoint>,
}

impl TimeSeries {
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.points.first()?.date;
        let last = self.points.last()?.date;
        Some((first, last))
    }

    pub fn max_minutes(&self) -> u32 {
        self.points.iter().map(|p| p.minutes_late).max().unwrap_or(0)
    }
}

/// Everything one render pass needs. Renderers read only from this value.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportData {
    pub scope: ReportScope,
    pub records: Vec<TardinessRecord>,
    pub aggregation: AggregationResult,
    pub series: Vec<TimeSeries>,
    pub note: Option<Annotation>,
}

impl ReportData {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn employee_count(&self) -> usize {
        self.series.len()
    }
}
