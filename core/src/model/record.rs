use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Partition name used for employees without a resolvable manager.
pub const UNASSIGNED: &str = "Unassigned";

/// Stable row identity, assigned once at append time and never reused
/// within a data file.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Manager {
    Known(String),
    Unassigned,
}

impl Manager {
    pub fn from_sheet(name: &str) -> Self {
        if name == UNASSIGNED {
            Manager::Unassigned
        } else {
            Manager::Known(name.to_string())
        }
    }

    pub fn sheet_name(&self) -> &str {
        match self {
            Manager::Known(name) => name,
            Manager::Unassigned => UNASSIGNED,
        }
    }
}

impl fmt::Display for Manager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sheet_name())
    }
}

/// One observed instance of an employee arriving late.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TardinessRecord {
    pub employee: String,
    pub date: NaiveDate,
    pub minutes_late: u32,
    pub manager: Manager,
}

impl TardinessRecord {
    pub fn new(employee: impl Into<String>, date: NaiveDate, minutes_late: u32, manager: Manager) -> Self {
        Self {
            employee: employee.into(),
            date,
            minutes_late,
            manager,
        }
    }
}

/// A record as held by the store, together with its row identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    pub id: RecordId,
    pub record: TardinessRecord,
}

/// On-disk row of a manager sheet. The manager is implied by the sheet.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    #[serde(rename = "Id")]
    pub id: RecordId,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Minutes Late")]
    pub minutes_late: u32,
}

impl SheetRow {
    pub fn to_record(&self, manager: Manager) -> StoredRecord {
        StoredRecord {
            id: self.id,
            record: TardinessRecord {
                employee: self.name.clone(),
                date: self.date,
                minutes_late: self.minutes_late,
                manager,
            },
        }
    }
}
