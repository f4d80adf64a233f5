use clap::ValueEnum;
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use tardy_core::StoredRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    /// Storage order, the order positions refer to
    #[default]
    Position,
    Name,
    Date,
    Manager,
}

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Minutes Late")]
    minutes: u32,
    #[tabled(rename = "Manager")]
    manager: String,
}

/// Pairs each record with its position, then orders by `key`. Positions
/// stay those of the unsorted input.
pub fn sorted_rows(records: &[StoredRecord], key: SortKey) -> Vec<(usize, &StoredRecord)> {
    let mut rows: Vec<_> = records.iter().enumerate().collect();
    match key {
        SortKey::Position => {}
        SortKey::Name => rows.sort_by(|a, b| {
            a.1.record
                .employee
                .to_lowercase()
                .cmp(&b.1.record.employee.to_lowercase())
                .then(a.1.record.date.cmp(&b.1.record.date))
        }),
        SortKey::Date => rows.sort_by_key(|(_, r)| r.record.date),
        SortKey::Manager => rows.sort_by(|a, b| {
            a.1.record
                .manager
                .sheet_name()
                .cmp(b.1.record.manager.sheet_name())
                .then(a.1.record.date.cmp(&b.1.record.date))
        }),
    }
    rows
}

pub fn show_records(records: &[StoredRecord], key: SortKey) {
    if records.is_empty() {
        println!("No records found.");
        return;
    }

    let rows: Vec<RecordRow> = sorted_rows(records, key)
        .into_iter()
        .map(|(position, stored)| RecordRow {
            position,
            id: stored.id.to_string(),
            name: stored.record.employee.clone(),
            date: stored.record.date.format("%Y-%m-%d").to_string(),
            minutes: stored.record.minutes_late,
            manager: stored.record.manager.to_string(),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    println!("{}", table);
    println!("{} record(s)", records.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tardy_core::{Manager, RecordId, TardinessRecord};

    fn stored(id: u64, name: &str, day: u32, manager: Manager) -> StoredRecord {
        StoredRecord {
            id: RecordId(id),
            record: TardinessRecord::new(name, NaiveDate::from_ymd_opt(2024, 1, day).unwrap(), 5, manager),
        }
    }

    #[test]
    fn test_sort_keeps_positions() {
        let records = vec![
            stored(1, "bob", 3, Manager::Known("Zed".into())),
            stored(2, "Alice", 5, Manager::Unassigned),
            stored(3, "alice", 1, Manager::Known("Amy".into())),
        ];

        let by_name: Vec<_> = sorted_rows(&records, SortKey::Name).iter().map(|(p, _)| *p).collect();
        assert_eq!(by_name, vec![2, 1, 0]);

        let by_date: Vec<_> = sorted_rows(&records, SortKey::Date).iter().map(|(p, _)| *p).collect();
        assert_eq!(by_date, vec![2, 0, 1]);

        let by_manager: Vec<_> = sorted_rows(&records, SortKey::Manager).iter().map(|(p, _)| *p).collect();
        assert_eq!(by_manager, vec![2, 1, 0]);

        let unsorted: Vec<_> = sorted_rows(&records, SortKey::Position).iter().map(|(p, _)| *p).collect();
        assert_eq!(unsorted, vec![0, 1, 2]);
    }
}
