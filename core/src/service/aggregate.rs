use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::model::record::{Manager, TardinessRecord};

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct EmployeeSummary {
    pub name: String,
    pub total_minutes: u64,
    pub instance_count: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ManagerSummary {
    pub manager: String,
    pub total_minutes: u64,
    pub distinct_employees: usize,
}

/// Per-employee and per-manager totals over one filtered record set.
///
/// Summaries are held in first-seen order of their key. The ranked views
/// sort descending with a stable sort, so equal values keep that order.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct AggregationResult {
    employees: Vec<EmployeeSummary>,
    managers: Vec<ManagerSummary>,
}

impl AggregationResult {
    pub fn employee(&self, name: &str) -> Option<&EmployeeSummary> {
        self.employees.iter().find(|e| e.name == name)
    }

    pub fn manager(&self, name: &str) -> Option<&ManagerSummary> {
        self.managers.iter().find(|m| m.manager == name)
    }

    /// Employees in first-seen order.
    pub fn employees(&self) -> &[EmployeeSummary] {
        &self.employees
    }

    pub fn managers(&self) -> &[ManagerSummary] {
        &self.managers
    }

    pub fn employees_by_minutes(&self) -> Vec<&EmployeeSummary> {
        ranked(&self.employees, |e| e.total_minutes)
    }

    pub fn employees_by_instances(&self) -> Vec<&EmployeeSummary> {
        ranked(&self.employees, |e| e.instance_count as u64)
    }

    pub fn managers_by_minutes(&self) -> Vec<&ManagerSummary> {
        ranked(&self.managers, |m| m.total_minutes)
    }

    pub fn managers_by_distinct(&self) -> Vec<&ManagerSummary> {
        ranked(&self.managers, |m| m.distinct_employees as u64)
    }

    pub fn total_minutes(&self) -> u64 {
        self.employees.iter().map(|e| e.total_minutes).sum()
    }

    pub fn total_instances(&self) -> usize {
        self.employees.iter().map(|e| e.instance_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}

fn ranked<T, F>(items: &[T], key: F) -> Vec<&T>
where
    F: Fn(&T) -> u64,
{
    let mut out: Vec<&T> = items.iter().collect();
    // Descending, stable.
    out.sort_by(|a, b| key(b).cmp(&key(a)));
    out
}

/// Groups the records by employee and by manager. Records without a
/// manager are counted under `Unassigned`, never dropped.
pub fn aggregate(records: &[TardinessRecord]) -> AggregationResult {
    let mut employees: Vec<EmployeeSummary> = Vec::new();
    let mut employee_index: HashMap<&str, usize> = HashMap::new();

    let mut managers: Vec<ManagerSummary> = Vec::new();
    let mut manager_index: HashMap<&Manager, usize> = HashMap::new();
    let mut manager_members: Vec<HashSet<&str>> = Vec::new();

    for record in records {
        let pos = *employee_index.entry(record.employee.as_str()).or_insert_with(|| {
            employees.push(EmployeeSummary {
                name: record.employee.clone(),
                total_minutes: 0,
                instance_count: 0,
            });
            employees.len() - 1
        });
        let entry = &mut employees[pos];
        entry.total_minutes += u64::from(record.minutes_late);
        entry.instance_count += 1;

        let pos = *manager_index.entry(&record.manager).or_insert_with(|| {
            managers.push(ManagerSummary {
                manager: record.manager.sheet_name().to_string(),
                total_minutes: 0,
                distinct_employees: 0,
            });
            manager_members.push(HashSet::new());
            managers.len() - 1
        });
        managers[pos].total_minutes += u64::from(record.minutes_late);
        manager_members[pos].insert(record.employee.as_str());
    }

    for (summary, members) in managers.iter_mut().zip(&manager_members) {
        summary.distinct_employees = members.len();
    }

    AggregationResult { employees, managers }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn rec(name: &str, day: u32, minutes: u32, manager: Option<&str>) -> TardinessRecord {
        let manager = manager.map(|m| Manager::Known(m.into())).unwrap_or(Manager::Unassigned);
        TardinessRecord::new(name, d(day), minutes, manager)
    }

    #[test]
    fn test_single_employee_scenario() {
        let records = vec![rec("Alice", 1, 10, Some("Mgr")), rec("Alice", 2, 5, Some("Mgr"))];
        let result = aggregate(&records);

        let alice = result.employee("Alice").unwrap();
        assert_eq!((alice.total_minutes, alice.instance_count), (15, 2));
        let mgr = result.manager("Mgr").unwrap();
        assert_eq!((mgr.total_minutes, mgr.distinct_employees), (15, 1));
    }

    #[test]
    fn test_unassigned_bucket() {
        let records = vec![rec("Alice", 1, 10, Some("Mgr")), rec("Ghost", 1, 4, None)];
        let result = aggregate(&records);

        let bucket = result.manager("Unassigned").unwrap();
        assert_eq!(bucket.total_minutes, 4);
        assert_eq!(bucket.distinct_employees, 1);
        assert_eq!(result.employee("Ghost").unwrap().total_minutes, 4);
    }

    #[test]
    fn test_totals_match_input_and_are_order_independent() {
        let records = vec![
            rec("A", 1, 3, Some("M1")),
            rec("B", 2, 9, Some("M1")),
            rec("A", 3, 4, Some("M2")),
            rec("C", 4, 0, None),
            rec("B", 5, 1, Some("M1")),
        ];
        let input_total: u64 = records.iter().map(|r| r.minutes_late as u64).sum();

        let forward = aggregate(&records);
        assert_eq!(forward.total_minutes(), input_total);
        assert_eq!(forward.total_instances(), records.len());

        let mut reversed = records.clone();
        reversed.reverse();
        let backward = aggregate(&reversed);
        for e in forward.employees() {
            assert_eq!(backward.employee(&e.name), Some(e));
        }
        for m in forward.managers() {
            assert_eq!(backward.manager(&m.manager), Some(m));
        }
    }

    #[test]
    fn test_idempotent_and_input_untouched() {
        let records = vec![rec("A", 1, 3, Some("M1")), rec("B", 2, 9, None)];
        let snapshot = records.clone();
        assert_eq!(aggregate(&records), aggregate(&records));
        assert_eq!(records, snapshot);
    }

    #[test]
    fn test_rankings_descending_with_first_seen_ties() {
        let records = vec![
            rec("Low", 1, 1, Some("M")),
            rec("TieA", 1, 5, Some("M")),
            rec("TieB", 1, 5, Some("N")),
            rec("High", 1, 9, Some("N")),
            rec("Low", 2, 1, Some("M")),
            rec("Low", 3, 1, Some("M")),
        ];
        let result = aggregate(&records);

        let by_minutes: Vec<_> = result.employees_by_minutes().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(by_minutes, vec!["High", "TieA", "TieB", "Low"]);

        let by_count: Vec<_> = result.employees_by_instances().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(by_count, vec!["Low", "TieA", "TieB", "High"]);

        let by_manager: Vec<_> = result.managers_by_minutes().iter().map(|m| m.manager.as_str()).collect();
        assert_eq!(by_manager, vec!["N", "M"]);

        // M: Low, TieA; N: TieB, High -> tie, first seen wins.
        let by_distinct: Vec<_> = result.managers_by_distinct().iter().map(|m| m.manager.as_str()).collect();
        assert_eq!(by_distinct, vec!["M", "N"]);
    }

    #[test]
    fn test_empty_input() {
        let result = aggregate(&[]);
        assert!(result.is_empty());
        assert_eq!(result.total_minutes(), 0);
        assert!(result.managers().is_empty());
    }
}
