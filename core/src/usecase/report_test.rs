#[cfg(test)]
mod tests {
    use crate::error::Result;
    use crate::model::org::OrgDirectory;
    use crate::model::scope::ReportScope;
    use crate::model::store::RecordStore;
    use crate::repository::TardinessRepository;
    use crate::service::dto::Annotation;
    use crate::service::tardiness_service::{AddEntry, TardinessService};
    use crate::usecase::report::{build_report, ReportUseCase};
    use chrono::NaiveDate;
    use std::cell::RefCell;

    struct MockRepo {
        store: RefCell<RecordStore>,
    }

    impl TardinessRepository for &MockRepo {
        fn load(&self) -> Result<RecordStore> {
            Ok(self.store.borrow().clone())
        }
        fn save(&self, store: &RecordStore) -> Result<()> {
            *self.store.borrow_mut() = store.clone();
            Ok(())
        }
    }

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, day).unwrap()
    }

    fn service(repo: &MockRepo) -> TardinessService<&MockRepo> {
        let org = OrgDirectory::new(
            [
                ("Mgr".to_string(), vec!["Alice".to_string(), "Bob".to_string()]),
                ("Lead".to_string(), vec!["Cara".to_string()]),
            ]
            .into(),
        )
        .unwrap();
        TardinessService::new(repo, org).unwrap()
    }

    #[test]
    fn test_all_time_report_for_single_manager() {
        let repo = MockRepo { store: RefCell::new(RecordStore::new()) };
        let mut service = service(&repo);
        service.add_entry(AddEntry::new("Alice", d(1, 1), 10)).unwrap();
        service.add_entry(AddEntry::new("Alice", d(1, 2), 5)).unwrap();

        let report = ReportUseCase::new(&service).build(ReportScope::AllTime, None);
        let alice = report.aggregation.employee("Alice").unwrap();
        assert_eq!((alice.total_minutes, alice.instance_count), (15, 2));
        let mgr = report.aggregation.manager("Mgr").unwrap();
        assert_eq!((mgr.total_minutes, mgr.distinct_employees), (15, 1));
        assert_eq!(report.employee_count(), 1);
    }

    #[test]
    fn test_week_report_uses_one_filtered_set() {
        let repo = MockRepo { store: RefCell::new(RecordStore::new()) };
        let mut service = service(&repo);
        service.add_entry(AddEntry::new("Alice", d(1, 3), 10)).unwrap();
        service.add_entry(AddEntry::new("Bob", d(1, 7), 4)).unwrap();
        service.add_entry(AddEntry::new("Cara", d(1, 8), 20)).unwrap();
        service.add_entry(AddEntry::new("Stray", d(1, 1), 2)).unwrap();

        let report = ReportUseCase::new(&service).build(ReportScope::Week(d(1, 3)), None);
        assert_eq!(report.records.len(), 3);
        assert_eq!(report.aggregation.total_minutes(), 16);
        assert!(report.aggregation.employee("Cara").is_none());
        assert_eq!(report.aggregation.manager("Unassigned").unwrap().total_minutes, 2);

        let series_total: u64 = report
            .series
            .iter()
            .flat_map(|s| &s.points)
            .map(|p| p.minutes_late as u64)
            .sum();
        assert_eq!(series_total, report.aggregation.total_minutes());
    }

    #[test]
    fn test_series_are_chronological() {
        let repo = MockRepo { store: RefCell::new(RecordStore::new()) };
        let mut service = service(&repo);
        service.add_entry(AddEntry::new("Alice", d(3, 1), 1)).unwrap();
        service.add_entry(AddEntry::new("Bob", d(1, 1), 2)).unwrap();
        service.add_entry(AddEntry::new("Alice", d(1, 15), 3)).unwrap();

        let note = Annotation { date: d(2, 1), text: "policy change".into() };
        let report = build_report(&service.records(), ReportScope::AllTime, Some(note.clone()));

        let names: Vec<_> = report.series.iter().map(|s| s.employee.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
        let alice_dates: Vec<_> = report.series[0].points.iter().map(|p| p.date).collect();
        assert_eq!(alice_dates, vec![d(1, 15), d(3, 1)]);
        assert_eq!(report.series[0].date_range(), Some((d(1, 15), d(3, 1))));
        assert_eq!(report.note, Some(note));
    }

    #[test]
    fn test_empty_period() {
        let repo = MockRepo { store: RefCell::new(RecordStore::new()) };
        let mut service = service(&repo);
        service.add_entry(AddEntry::new("Alice", d(1, 1), 10)).unwrap();

        let report = ReportUseCase::new(&service).build(ReportScope::Day(d(6, 1)), None);
        assert!(report.is_empty());
        assert!(report.aggregation.is_empty());
        assert!(report.series.is_empty());
    }
}
