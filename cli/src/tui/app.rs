use tardy_core::render::report::{bar_charts, series_charts};
use tardy_core::render::Chart;
use tardy_core::ReportData;

/// One chart per screen, in report order.
pub struct ViewerApp {
    pub data: ReportData,
    pub pages: Vec<Chart>,
    pub current: usize,
}

impl ViewerApp {
    pub fn new(data: ReportData) -> Self {
        let mut pages = bar_charts(&data);
        pages.extend(series_charts(&data).into_iter().map(Chart::Line));
        Self {
            data,
            pages,
            current: 0,
        }
    }

    pub fn next_page(&mut self) {
        if self.current + 1 < self.pages.len() {
            self.current += 1;
        }
    }

    pub fn previous_page(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    pub fn current_chart(&self) -> Option<&Chart> {
        self.pages.get(self.current)
    }

    pub fn has_previous(&self) -> bool {
        self.current > 0
    }

    pub fn has_next(&self) -> bool {
        self.current + 1 < self.pages.len()
    }

    pub fn page_label(&self) -> String {
        format!("{} / {}", self.current + 1, self.pages.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tardy_core::{build_report, Manager, ReportScope, TardinessRecord};

    fn app(employees: usize) -> ViewerApp {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let records: Vec<_> = (0..employees)
            .map(|i| TardinessRecord::new(format!("E{i}"), date, 5, Manager::Unassigned))
            .collect();
        ViewerApp::new(build_report(&records, ReportScope::AllTime, None))
    }

    #[test]
    fn test_pages_in_report_order() {
        let app = app(2);
        assert_eq!(app.pages.len(), 6);
        assert!(matches!(app.pages[0], Chart::Bar(_)));
        assert!(matches!(app.pages[4], Chart::Line(_)));
        assert_eq!(app.pages[5].title(), "Late Minutes Over Time for E1");
    }

    #[test]
    fn test_navigation_clamps() {
        let mut app = app(1);
        app.previous_page();
        assert_eq!(app.current, 0);
        assert!(!app.has_previous());

        for _ in 0..10 {
            app.next_page();
        }
        assert_eq!(app.current, 4);
        assert!(!app.has_next());
        assert_eq!(app.page_label(), "5 / 5");
    }
}
