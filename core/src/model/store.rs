use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::model::org::OrgDirectory;
use crate::model::record::{Manager, RecordId, SheetRow, StoredRecord, TardinessRecord};

/// Tardiness records partitioned by manager, one sheet per manager.
///
/// Sheets are kept in manager-name order and rows in insertion order, which
/// together define the combined order returned by [`RecordStore::all`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RecordStore {
    #[serde(default = "first_id")]
    next_id: u64,
    #[serde(default)]
    sheets: BTreeMap<String, Vec<SheetRow>>,
}

fn first_id() -> u64 {
    1
}

impl Default for RecordStore {
    fn default() -> Self {
        Self {
            next_id: first_id(),
            sheets: BTreeMap::new(),
        }
    }
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores the id counter and drops empty sheets after deserializing a
    /// file that may have been edited by hand.
    pub fn normalize(&mut self) {
        self.sheets.retain(|_, rows| !rows.is_empty());
        let max_id = self
            .sheets
            .values()
            .flatten()
            .map(|row| row.id.0)
            .max()
            .unwrap_or(0);
        self.next_id = self.next_id.max(max_id + 1);
    }

    pub fn append(&mut self, record: TardinessRecord) -> StoredRecord {
        let id = RecordId(self.next_id);
        self.next_id += 1;

        let row = SheetRow {
            id,
            name: record.employee.clone(),
            date: record.date,
            minutes_late: record.minutes_late,
        };
        self.sheets
            .entry(record.manager.sheet_name().to_string())
            .or_default()
            .push(row);

        StoredRecord { id, record }
    }

    pub fn all(&self) -> Vec<StoredRecord> {
        self.sheets
            .iter()
            .flat_map(|(sheet, rows)| {
                let manager = Manager::from_sheet(sheet);
                rows.iter().map(move |row| row.to_record(manager.clone()))
            })
            .collect()
    }

    pub fn records(&self) -> Vec<TardinessRecord> {
        self.all().into_iter().map(|stored| stored.record).collect()
    }

    pub fn partition(&self, manager: &Manager) -> Vec<StoredRecord> {
        self.sheets
            .get(manager.sheet_name())
            .map(|rows| rows.iter().map(|row| row.to_record(manager.clone())).collect())
            .unwrap_or_default()
    }

    pub fn partition_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sheets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn next_id(&self) -> RecordId {
        RecordId(self.next_id)
    }

    /// Maps positions in the [`RecordStore::all`] order to row ids.
    /// Out-of-range positions are skipped.
    pub fn ids_at_positions(&self, positions: &BTreeSet<usize>) -> BTreeSet<RecordId> {
        self.all()
            .into_iter()
            .enumerate()
            .filter(|(pos, _)| positions.contains(pos))
            .map(|(_, stored)| stored.id)
            .collect()
    }

    /// Removes the given rows and returns how many were present.
    pub fn remove_ids(&mut self, ids: &BTreeSet<RecordId>) -> usize {
        let before = self.len();
        for rows in self.sheets.values_mut() {
            rows.retain(|row| !ids.contains(&row.id));
        }
        self.sheets.retain(|_, rows| !rows.is_empty());
        before - self.len()
    }

    /// Re-derives every row's sheet from the directory. Rows of employees the
    /// directory does not list stay in their current sheet, which carries
    /// the manual override they were added with.
    pub fn repartition(&mut self, org: &OrgDirectory) {
        let old = std::mem::take(&mut self.sheets);
        for (sheet, rows) in old {
            for row in rows {
                let target = match org.resolve_manager(&row.name) {
                    Manager::Known(manager) => manager,
                    Manager::Unassigned => sheet.clone(),
                };
                self.sheets.entry(target).or_default().push(row);
            }
        }
    }
}
