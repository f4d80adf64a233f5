use std::collections::{BTreeMap, HashMap};

use tracing::warn;

use crate::config::ConfigError;
use crate::model::record::{Manager, UNASSIGNED};

/// Manager name -> employees, as written in the config file.
pub type OrgTable = BTreeMap<String, Vec<String>>;

/// Static org hierarchy with an employee -> manager reverse index.
#[derive(Debug, Clone, Default)]
pub struct OrgDirectory {
    table: OrgTable,
    index: HashMap<String, String>,
}

impl OrgDirectory {
    /// Builds the directory, rejecting empty names and employees listed
    /// under more than one manager. Names are stored trimmed.
    pub fn new(table: OrgTable) -> Result<Self, ConfigError> {
        let (table, index) = build(&table)?;
        Ok(Self { table, index })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Swaps in a new table. On error the current table stays in place.
    pub fn reload(&mut self, table: OrgTable) -> Result<(), ConfigError> {
        let (table, index) = build(&table)?;
        self.table = table;
        self.index = index;
        Ok(())
    }

    pub fn resolve_manager(&self, employee: &str) -> Manager {
        match self.index.get(employee.trim()) {
            Some(manager) => Manager::Known(manager.clone()),
            None => Manager::Unassigned,
        }
    }

    /// Manager for a new or re-partitioned row. The directory wins for
    /// listed employees; the override only applies to unlisted ones.
    pub fn assign(&self, employee: &str, manager_override: Option<&str>) -> Manager {
        let resolved = self.resolve_manager(employee);
        let manager_override = manager_override
            .map(str::trim)
            .filter(|m| !m.is_empty());

        match (resolved, manager_override) {
            (Manager::Known(manager), Some(requested)) => {
                if manager != requested {
                    warn!(
                        employee,
                        requested,
                        manager = manager.as_str(),
                        "manager override ignored for listed employee"
                    );
                }
                Manager::Known(manager)
            }
            (Manager::Known(manager), None) => Manager::Known(manager),
            (Manager::Unassigned, Some(requested)) => Manager::from_sheet(requested),
            (Manager::Unassigned, None) => Manager::Unassigned,
        }
    }

    pub fn managers(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }

    pub fn employees_of(&self, manager: &str) -> &[String] {
        self.table
            .get(manager.trim())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// Trimmed copy of `table` plus its reverse index. Keys that trim to the
/// same manager are merged; repeats under one manager are dropped.
fn build(table: &OrgTable) -> Result<(OrgTable, HashMap<String, String>), ConfigError> {
    let mut normalized = OrgTable::new();
    let mut index: HashMap<String, String> = HashMap::new();

    for (manager, employees) in table {
        let manager = manager.trim();
        if manager.is_empty() {
            return Err(ConfigError::Validation("manager name must not be empty".into()));
        }
        if manager == UNASSIGNED {
            return Err(ConfigError::Validation(format!(
                "'{}' is reserved and cannot be used as a manager name",
                UNASSIGNED
            )));
        }

        for employee in employees {
            let employee = employee.trim();
            if employee.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "empty employee name under manager '{}'",
                    manager
                )));
            }
            match index.get(employee) {
                Some(first) if first != manager => {
                    return Err(ConfigError::DuplicateEmployee {
                        employee: employee.to_string(),
                        first: first.clone(),
                        second: manager.to_string(),
                    });
                }
                Some(_) => {}
                None => {
                    index.insert(employee.to_string(), manager.to_string());
                    normalized
                        .entry(manager.to_string())
                        .or_default()
                        .push(employee.to_string());
                }
            }
        }
        normalized.entry(manager.to_string()).or_default();
    }

    Ok((normalized, index))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, &[&str])]) -> OrgTable {
        entries
            .iter()
            .map(|(m, es)| (m.to_string(), es.iter().map(|e| e.to_string()).collect()))
            .collect()
    }

    #[test]
    fn test_resolve_known_and_unknown() {
        let org = OrgDirectory::new(table(&[("Mgr", &["Alice", "Bob"])])).unwrap();
        assert_eq!(org.resolve_manager("Alice"), Manager::Known("Mgr".into()));
        assert_eq!(org.resolve_manager("  Bob "), Manager::Known("Mgr".into()));
        assert_eq!(org.resolve_manager("Carol"), Manager::Unassigned);
    }

    #[test]
    fn test_manager_can_report_to_another_manager() {
        let org = OrgDirectory::new(table(&[
            ("Director", &["Lead"]),
            ("Lead", &["Alice"]),
        ]))
        .unwrap();
        assert_eq!(org.resolve_manager("Lead"), Manager::Known("Director".into()));
        assert_eq!(org.resolve_manager("Alice"), Manager::Known("Lead".into()));
    }

    #[test]
    fn test_duplicate_employee_rejected() {
        let err = OrgDirectory::new(table(&[("A", &["Alice"]), ("B", &["Alice"])])).unwrap_err();
        match err {
            ConfigError::DuplicateEmployee { employee, first, second } => {
                assert_eq!(employee, "Alice");
                assert_eq!(first, "A");
                assert_eq!(second, "B");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_repeat_under_same_manager_allowed() {
        let org = OrgDirectory::new(table(&[("A", &["Alice", "Alice"])])).unwrap();
        assert_eq!(org.len(), 1);
    }

    #[test]
    fn test_names_are_stored_trimmed() {
        let org = OrgDirectory::new(table(&[(" Mgr ", &[" Alice ", "Bob"]), ("Mgr", &["Cy", "Bob"])])).unwrap();
        assert_eq!(org.managers().collect::<Vec<_>>(), vec!["Mgr"]);
        assert_eq!(org.employees_of("Mgr"), ["Alice", "Bob", "Cy"]);
        assert_eq!(org.employees_of(" Mgr "), ["Alice", "Bob", "Cy"]);
        assert_eq!(org.resolve_manager("Alice"), Manager::Known("Mgr".into()));
    }

    #[test]
    fn test_empty_names_rejected() {
        assert!(OrgDirectory::new(table(&[("A", &["  "])])).is_err());
        assert!(OrgDirectory::new(table(&[(" ", &["Alice"])])).is_err());
        assert!(OrgDirectory::new(table(&[(UNASSIGNED, &["Alice"])])).is_err());
    }

    #[test]
    fn test_assign_override_only_for_unlisted() {
        let org = OrgDirectory::new(table(&[("Mgr", &["Alice"])])).unwrap();
        assert_eq!(org.assign("Alice", Some("Other")), Manager::Known("Mgr".into()));
        assert_eq!(org.assign("Temp", Some("Other")), Manager::Known("Other".into()));
        assert_eq!(org.assign("Temp", Some("  ")), Manager::Unassigned);
        assert_eq!(org.assign("Temp", None), Manager::Unassigned);
    }

    #[test]
    fn test_reload_keeps_old_table_on_error() {
        let mut org = OrgDirectory::new(table(&[("Mgr", &["Alice"])])).unwrap();
        assert!(org.reload(table(&[("A", &["X"]), ("B", &["X"])])).is_err());
        assert_eq!(org.resolve_manager("Alice"), Manager::Known("Mgr".into()));

        org.reload(table(&[("New", &["Alice"])])).unwrap();
        assert_eq!(org.resolve_manager("Alice"), Manager::Known("New".into()));
    }
}
