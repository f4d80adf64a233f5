use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::info;

use crate::config::Limits;
use crate::error::{Result, TardyError};
use crate::model::org::{OrgDirectory, OrgTable};
use crate::model::record::{RecordId, StoredRecord, TardinessRecord};
use crate::model::store::RecordStore;
use crate::repository::TardinessRepository;

/// Add request as it arrives from a form or the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddEntry {
    pub name: String,
    pub date: NaiveDate,
    pub minutes_late: i64,
    pub manager_override: Option<String>,
}

impl AddEntry {
    pub fn new(name: impl Into<String>, date: NaiveDate, minutes_late: i64) -> Self {
        Self {
            name: name.into(),
            date,
            minutes_late,
            manager_override: None,
        }
    }

    pub fn with_manager(mut self, manager: impl Into<String>) -> Self {
        self.manager_override = Some(manager.into());
        self
    }
}

/// Validates and applies mutations, persisting after each one.
///
/// Every successful write is followed by a reload from the repository, so
/// the in-memory store always mirrors what is on disk. A failed write leaves
/// the in-memory store as it was before the call.
pub struct TardinessService<R: TardinessRepository> {
    repo: R,
    org: OrgDirectory,
    limits: Limits,
    store: RecordStore,
}

impl<R: TardinessRepository> TardinessService<R> {
    pub fn new(repo: R, org: OrgDirectory) -> Result<Self> {
        let store = repo.load()?;
        Ok(Self {
            repo,
            org,
            limits: Limits::default(),
            store,
        })
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn all(&self) -> Vec<StoredRecord> {
        self.store.all()
    }

    pub fn records(&self) -> Vec<TardinessRecord> {
        self.store.records()
    }

    pub fn org(&self) -> &OrgDirectory {
        &self.org
    }

    /// Replaces the org table. Existing rows are only re-partitioned by the
    /// next delete.
    pub fn reload_org(&mut self, table: OrgTable) -> Result<()> {
        self.org.reload(table)?;
        Ok(())
    }

    pub fn reload(&mut self) -> Result<()> {
        self.store = self.repo.load()?;
        Ok(())
    }

    pub fn add_entry(&mut self, entry: AddEntry) -> Result<StoredRecord> {
        let record = self.validate(entry)?;

        let mut next = self.store.clone();
        let stored = next.append(record);
        self.repo.save(&next)?;
        self.reload()?;

        info!(
            id = %stored.id,
            employee = stored.record.employee.as_str(),
            manager = %stored.record.manager,
            minutes = stored.record.minutes_late,
            "added entry"
        );
        Ok(stored)
    }

    /// Deletes by row id. Ids that are not present are ignored.
    pub fn delete_entries(&mut self, ids: &BTreeSet<RecordId>) -> Result<usize> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut next = self.store.clone();
        let removed = next.remove_ids(ids);
        if removed == 0 {
            return Ok(0);
        }
        next.repartition(&self.org);
        self.repo.save(&next)?;
        self.reload()?;

        info!(removed, remaining = self.store.len(), "deleted entries");
        Ok(removed)
    }

    /// Deletes by position in the order of [`TardinessService::all`].
    pub fn delete_positions(&mut self, positions: &BTreeSet<usize>) -> Result<usize> {
        let ids = self.store.ids_at_positions(positions);
        self.delete_entries(&ids)
    }

    fn validate(&self, entry: AddEntry) -> Result<TardinessRecord> {
        let name = entry.name.trim();
        if name.is_empty() {
            return Err(TardyError::validation("employee name is required"));
        }
        if entry.minutes_late < 0 {
            return Err(TardyError::validation(format!(
                "minutes late must not be negative (got {})",
                entry.minutes_late
            )));
        }
        let minutes = u32::try_from(entry.minutes_late).map_err(|_| {
            TardyError::validation(format!("minutes late is too large (got {})", entry.minutes_late))
        })?;
        if let Some(max) = self.limits.max_minutes_late {
            if minutes > max {
                return Err(TardyError::validation(format!(
                    "minutes late must be at most {} (got {})",
                    max, minutes
                )));
            }
        }

        let manager = self.org.assign(name, entry.manager_override.as_deref());
        Ok(TardinessRecord::new(name, entry.date, minutes, manager))
    }
}
