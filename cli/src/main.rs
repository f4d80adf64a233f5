mod add;
mod list;
mod summary;
mod tui;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser};
use tardy_core::render::{export_pdf, write_chart_images};
use tardy_core::{
    export_flat_csv, load_config_or_default, parse_date, today, AppConfig, Annotation,
    FileTardinessRepository, RecordId, ReportScope, ReportUseCase, TardinessService,
};
use tracing_subscriber::EnvFilter;

use crate::list::SortKey;
use crate::summary::NO_DATA;

#[derive(Parser)]
#[command(name = "tardy")]
#[command(about = "Record employee tardiness and build per-manager reports", long_about = None)]
struct Cli {
    /// Config file (default: ~/.tardy/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Data file, overriding `data_file` from the config
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Record a late arrival (usage: add Jane Doe date:yesterday min:15 mgr:Dana)
    Add {
        /// Employee name followed by key:value fields (date, minutes, manager)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        args: Vec<String>,
    },
    /// Delete records by id, or by position with --position
    Delete {
        #[arg(required = true)]
        targets: Vec<u64>,
        /// Treat the arguments as positions as shown by `list`
        #[arg(long)]
        position: bool,
    },
    /// List all records
    List {
        #[arg(long, value_enum, default_value_t = SortKey::Position)]
        sort: SortKey,
    },
    /// Print summary tables and write the chart images
    Report {
        #[command(flatten)]
        scope: ScopeArgs,
        #[command(flatten)]
        note: NoteArgs,
        /// Output directory (default: output_dir from the config)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Write the PDF report
    Export {
        #[command(flatten)]
        scope: ScopeArgs,
        #[command(flatten)]
        note: NoteArgs,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Export every record into one CSV table
    ExportCsv { path: PathBuf },
    /// Browse the report charts in the terminal
    View {
        #[command(flatten)]
        scope: ScopeArgs,
        #[command(flatten)]
        note: NoteArgs,
    },
    /// Show the org directory
    Org {
        /// Print the manager a single employee resolves to
        #[arg(long)]
        resolve: Option<String>,
    },
}

#[derive(Args, Debug, Default)]
#[group(multiple = false)]
struct ScopeArgs {
    /// Single day (default today)
    #[arg(long, num_args = 0..=1, default_missing_value = "today", value_name = "DATE")]
    day: Option<String>,
    /// Monday to Sunday week containing DATE (default today)
    #[arg(long, num_args = 0..=1, default_missing_value = "today", value_name = "DATE")]
    week: Option<String>,
    /// Every record (default)
    #[arg(long)]
    all: bool,
}

impl ScopeArgs {
    fn resolve(&self, today: NaiveDate) -> Result<ReportScope> {
        if self.all {
            return Ok(ReportScope::AllTime);
        }
        if let Some(day) = &self.day {
            return Ok(ReportScope::Day(parse_date(day, today)?));
        }
        if let Some(week) = &self.week {
            return Ok(ReportScope::Week(parse_date(week, today)?));
        }
        Ok(ReportScope::AllTime)
    }
}

#[derive(Args, Debug, Default)]
struct NoteArgs {
    /// Note drawn on the time-series charts
    #[arg(long)]
    note: Option<String>,
    /// Date of the note (default today)
    #[arg(long, requires = "note", value_name = "DATE")]
    note_date: Option<String>,
}

impl NoteArgs {
    fn resolve(&self, today: NaiveDate) -> Result<Option<Annotation>> {
        let Some(text) = self.note.as_deref().map(str::trim).filter(|t| !t.is_empty()) else {
            return Ok(None);
        };
        let date = match &self.note_date {
            Some(d) => parse_date(d, today)?,
            None => today,
        };
        Ok(Some(Annotation {
            date,
            text: text.to_string(),
        }))
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("TARDY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_service(cli: &Cli, config: &AppConfig) -> Result<TardinessService<FileTardinessRepository>> {
    let data_file = cli.data_file.clone().or_else(|| config.data_file.clone());
    let repo = FileTardinessRepository::new(data_file)?;
    let path = repo.path().to_path_buf();
    let org = config.org_directory()?;
    let service = TardinessService::new(repo, org)
        .with_context(|| format!("failed to open {}", path.display()))?
        .with_limits(config.limits.clone());
    Ok(service)
}

fn output_dir(out: Option<PathBuf>, config: &AppConfig) -> PathBuf {
    out.unwrap_or_else(|| config.output_dir())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = load_config_or_default(cli.config.as_deref()).context("failed to load config")?;
    let today = today();

    match &cli.command {
        Commands::Add { args } => {
            let entry = add::build_entry(args, today)?;
            let mut service = open_service(&cli, &config)?;
            let stored = service.add_entry(entry)?;
            println!("Added: {} (ID: {})", stored.record.employee, stored.id);
            println!("  Date: {}", stored.record.date.format("%Y-%m-%d"));
            println!("  Minutes late: {}", stored.record.minutes_late);
            println!("  Manager: {}", stored.record.manager);
        }
        Commands::Delete { targets, position } => {
            let mut service = open_service(&cli, &config)?;
            let removed = if *position {
                let positions: BTreeSet<usize> = targets.iter().map(|&p| p as usize).collect();
                service.delete_positions(&positions)?
            } else {
                let ids: BTreeSet<RecordId> = targets.iter().map(|&id| RecordId(id)).collect();
                service.delete_entries(&ids)?
            };
            if removed == 0 {
                println!("No matching records.");
            } else {
                println!("Deleted {} record(s).", removed);
            }
        }
        Commands::List { sort } => {
            let service = open_service(&cli, &config)?;
            list::show_records(&service.all(), *sort);
        }
        Commands::Report { scope, note, out } => {
            let service = open_service(&cli, &config)?;
            let data = ReportUseCase::new(&service).build(scope.resolve(today)?, note.resolve(today)?);
            if data.is_empty() {
                println!("{}", NO_DATA);
                return Ok(());
            }
            summary::show_summary(&data);
            let dir = output_dir(out.clone(), &config);
            let written = write_chart_images(&data, &dir)
                .with_context(|| format!("failed to write charts to {}", dir.display()))?;
            println!("Wrote {} chart(s) to {}", written.len(), dir.display());
        }
        Commands::Export { scope, note, out } => {
            let service = open_service(&cli, &config)?;
            let data = ReportUseCase::new(&service).build(scope.resolve(today)?, note.resolve(today)?);
            if data.is_empty() {
                println!("{}", NO_DATA);
                return Ok(());
            }
            let dir = output_dir(out.clone(), &config);
            let path = export_pdf(&data, &dir)
                .with_context(|| format!("failed to export report to {}", dir.display()))?;
            println!("Report saved: {}", path.display());
        }
        Commands::ExportCsv { path } => {
            let service = open_service(&cli, &config)?;
            let count = export_flat_csv(&service.all(), path)
                .with_context(|| format!("failed to export {}", path.display()))?;
            println!("Exported {} record(s) to {}", count, path.display());
        }
        Commands::View { scope, note } => {
            let service = open_service(&cli, &config)?;
            let data = ReportUseCase::new(&service).build(scope.resolve(today)?, note.resolve(today)?);
            if data.is_empty() {
                println!("{}", NO_DATA);
                return Ok(());
            }
            tui::run(data)?;
        }
        Commands::Org { resolve } => {
            let org = config.org_directory()?;
            match resolve {
                Some(name) => println!("{} -> {}", name.trim(), org.resolve_manager(name)),
                None => show_org(&org, cli.config.as_deref()),
            }
        }
    }
    Ok(())
}

fn show_org(org: &tardy_core::OrgDirectory, config: Option<&Path>) {
    if org.is_empty() {
        match config {
            Some(path) => println!("No managers configured in {}.", path.display()),
            None => println!("No managers configured."),
        }
        return;
    }
    for manager in org.managers() {
        println!("{}", manager);
        for employee in org.employees_of(manager) {
            println!("  {}", employee);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, day).unwrap()
    }

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_scope_flags() {
        let cli = Cli::parse_from(["tardy", "report", "--week", "2024-01-03"]);
        let Commands::Report { scope, .. } = cli.command else {
            panic!("expected report");
        };
        assert_eq!(scope.resolve(d(2, 1)).unwrap(), ReportScope::Week(d(1, 3)));

        let cli = Cli::parse_from(["tardy", "export", "--day"]);
        let Commands::Export { scope, .. } = cli.command else {
            panic!("expected export");
        };
        assert_eq!(scope.resolve(d(2, 1)).unwrap(), ReportScope::Day(d(2, 1)));

        assert_eq!(ScopeArgs::default().resolve(d(2, 1)).unwrap(), ReportScope::AllTime);
        assert!(Cli::try_parse_from(["tardy", "report", "--day", "--all"]).is_err());
    }

    #[test]
    fn test_note_defaults_to_today() {
        let note = NoteArgs {
            note: Some(" bus strike ".into()),
            note_date: None,
        };
        let resolved = note.resolve(d(2, 1)).unwrap().unwrap();
        assert_eq!(resolved.date, d(2, 1));
        assert_eq!(resolved.text, "bus strike");

        let blank = NoteArgs {
            note: Some("  ".into()),
            note_date: None,
        };
        assert_eq!(blank.resolve(d(2, 1)).unwrap(), None);
    }
}
