use crate::model::record::TardinessRecord;
use crate::model::scope::ReportScope;

/// Records whose date falls inside the scope's window, in input order.
pub fn filter(records: &[TardinessRecord], scope: ReportScope) -> Vec<TardinessRecord> {
    records
        .iter()
        .filter(|r| scope.contains(r.date))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::Manager;
    use chrono::{Duration, NaiveDate};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn sample() -> Vec<TardinessRecord> {
        // Sunday 2023-12-31 through Monday 2024-01-08, one record per day.
        (0..9)
            .map(|i| {
                TardinessRecord::new("Alice", d(2023, 12, 31) + Duration::days(i), i as u32, Manager::Unassigned)
            })
            .collect()
    }

    #[test]
    fn test_all_time_is_identity() {
        let records = sample();
        assert_eq!(filter(&records, ReportScope::AllTime), records);
    }

    #[test]
    fn test_week_covers_monday_through_sunday() {
        let records = sample();
        for anchor in 1..=7 {
            let out = filter(&records, ReportScope::Week(d(2024, 1, anchor)));
            let dates: Vec<_> = out.iter().map(|r| r.date).collect();
            assert_eq!(dates.first(), Some(&d(2024, 1, 1)));
            assert_eq!(dates.last(), Some(&d(2024, 1, 7)));
            assert_eq!(dates.len(), 7);
        }
    }

    #[test]
    fn test_single_day() {
        let records = sample();
        let out = filter(&records, ReportScope::Day(d(2024, 1, 3)));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].minutes_late, 3);
    }

    #[test]
    fn test_empty_window_is_ok() {
        let out = filter(&sample(), ReportScope::Day(d(1999, 1, 1)));
        assert!(out.is_empty());
    }
}
