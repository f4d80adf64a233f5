use std::io;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::error::{Result, TardyError};
use crate::model::record::StoredRecord;

/// Row of the single-table variant, where the manager is a column instead
/// of a sheet.
#[derive(Serialize, Debug)]
struct FlatRow<'a> {
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Minutes Late")]
    minutes_late: u32,
    #[serde(rename = "Manager")]
    manager: &'a str,
}

const FLAT_HEADER: [&str; 4] = ["Name", "Date", "Minutes Late", "Manager"];

/// Writes the header even when there are no records.
pub fn write_flat<W: io::Write>(records: &[StoredRecord], writer: W) -> Result<usize> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(FLAT_HEADER)?;
    for stored in records {
        let record = &stored.record;
        wtr.serialize(FlatRow {
            name: &record.employee,
            date: record.date,
            minutes_late: record.minutes_late,
            manager: record.manager.sheet_name(),
        })?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(records.len())
}

pub fn export_flat_csv(records: &[StoredRecord], path: &Path) -> Result<usize> {
    let file = std::fs::File::create(path).map_err(|e| TardyError::io(path, e))?;
    let count = write_flat(records, file)?;
    info!(path = %path.display(), rows = count, "exported flat csv");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::{Manager, RecordId, TardinessRecord};

    #[test]
    fn test_flat_csv_has_manager_column() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let records = vec![
            StoredRecord {
                id: RecordId(1),
                record: TardinessRecord::new("Alice", date, 10, Manager::Known("Mgr".into())),
            },
            StoredRecord {
                id: RecordId(2),
                record: TardinessRecord::new("Temp", date, 0, Manager::Unassigned),
            },
        ];

        let mut out = Vec::new();
        assert_eq!(write_flat(&records, &mut out).unwrap(), 2);
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Name,Date,Minutes Late,Manager");
        assert_eq!(lines[1], "Alice,2024-01-02,10,Mgr");
        assert_eq!(lines[2], "Temp,2024-01-02,0,Unassigned");
    }

    #[test]
    fn test_empty_export_keeps_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flat.csv");
        assert_eq!(export_flat_csv(&[], &path).unwrap(), 0);
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().collect::<Vec<_>>(), vec!["Name,Date,Minutes Late,Manager"]);
    }
}
