use chrono::NaiveDate;

use crate::time::{week_end, week_start};

/// Time window governing which records enter a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportScope {
    Day(NaiveDate),
    Week(NaiveDate),
    #[default]
    AllTime,
}

impl ReportScope {
    /// Inclusive `[start, end]` bounds, `None` when unbounded.
    pub fn window(&self) -> Option<(NaiveDate, NaiveDate)> {
        match *self {
            ReportScope::Day(anchor) => Some((anchor, anchor)),
            ReportScope::Week(anchor) => Some((week_start(anchor), week_end(anchor))),
            ReportScope::AllTime => None,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match self.window() {
            Some((start, end)) => start <= date && date <= end,
            None => true,
        }
    }

    pub fn label(&self) -> String {
        match self.window() {
            None => "All time".to_string(),
            Some((start, _)) if matches!(self, ReportScope::Day(_)) => {
                format!("Day {}", start.format("%Y-%m-%d"))
            }
            Some((start, end)) => format!(
                "Week {} to {}",
                start.format("%Y-%m-%d"),
                end.format("%Y-%m-%d")
            ),
        }
    }

    /// Filename-safe form used for exported documents.
    pub fn slug(&self) -> String {
        match self.window() {
            None => "all_time".to_string(),
            Some((start, _)) if matches!(self, ReportScope::Day(_)) => {
                format!("day_{}", start.format("%Y-%m-%d"))
            }
            Some((start, _)) => format!("week_{}", start.format("%Y-%m-%d")),
        }
    }
}
