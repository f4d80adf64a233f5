use std::collections::HashMap;

use tracing::debug;

use crate::model::record::TardinessRecord;
use crate::model::scope::ReportScope;
use crate::repository::TardinessRepository;
use crate::service::aggregate::aggregate;
use crate::service::dto::{Annotation, ReportData, SeriesPoint, TimeSeries};
use crate::service::filter::filter;
use crate::service::tardiness_service::TardinessService;

pub struct ReportUseCase<'a, R: TardinessRepository> {
    service: &'a TardinessService<R>,
}

impl<'a, R: TardinessRepository> ReportUseCase<'a, R> {
    pub fn new(service: &'a TardinessService<R>) -> Self {
        Self { service }
    }

    pub fn build(&self, scope: ReportScope, note: Option<Annotation>) -> ReportData {
        build_report(&self.service.records(), scope, note)
    }
}

/// Filters once and derives the aggregation and the time series from the
/// same filtered set.
pub fn build_report(records: &[TardinessRecord], scope: ReportScope, note: Option<Annotation>) -> ReportData {
    let filtered = filter(records, scope);
    let aggregation = aggregate(&filtered);
    let series = time_series(&filtered);
    debug!(
        scope = %scope.label(),
        records = filtered.len(),
        employees = series.len(),
        "built report data"
    );

    ReportData {
        scope,
        records: filtered,
        aggregation,
        series,
        note,
    }
}

/// One series per employee in first-seen order; points sorted by date,
/// same-day points keep their input order.
pub fn time_series(records: &[TardinessRecord]) -> Vec<TimeSeries> {
    let mut series: Vec<TimeSeries> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let pos = *index.entry(record.employee.as_str()).or_insert_with(|| {
            series.push(TimeSeries {
                employee: record.employee.clone(),
                points: Vec::new(),
            });
            series.len() - 1
        });
        series[pos].points.push(SeriesPoint {
            date: record.date,
            minutes_late: record.minutes_late,
        });
    }

    for s in &mut series {
        s.points.sort_by_key(|p| p.date);
    }
    series
}
