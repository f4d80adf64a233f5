use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use tardy_core::ReportData;

pub const NO_DATA: &str = "No data available for the selected period.";

#[derive(Tabled)]
struct EmployeeRow {
    #[tabled(rename = "Employee")]
    name: String,
    #[tabled(rename = "Total Late Minutes")]
    minutes: u64,
    #[tabled(rename = "Late Instances")]
    instances: usize,
}

#[derive(Tabled)]
struct ManagerRow {
    #[tabled(rename = "Manager")]
    manager: String,
    #[tabled(rename = "Total Late Minutes")]
    minutes: u64,
    #[tabled(rename = "Tardy Employees")]
    distinct: usize,
}

fn styled(mut table: Table) -> Table {
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    table
}

pub fn show_summary(data: &ReportData) {
    println!(
        "\n\x1b[1;36m{}\x1b[0m ({} record(s), {} min)",
        data.scope.label(),
        data.aggregation.total_instances(),
        data.aggregation.total_minutes()
    );

    let employees: Vec<EmployeeRow> = data
        .aggregation
        .employees_by_minutes()
        .into_iter()
        .map(|e| EmployeeRow {
            name: e.name.clone(),
            minutes: e.total_minutes,
            instances: e.instance_count,
        })
        .collect();
    println!("{}", styled(Table::new(employees)));

    let managers: Vec<ManagerRow> = data
        .aggregation
        .managers_by_minutes()
        .into_iter()
        .map(|m| ManagerRow {
            manager: m.manager.clone(),
            minutes: m.total_minutes,
            distinct: m.distinct_employees,
        })
        .collect();
    println!("{}", styled(Table::new(managers)));
}
