pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod render;
pub mod repository;
pub mod service;
pub mod time;
pub mod usecase;

pub use config::{load_config, load_config_or_default, AppConfig, ConfigError, Limits};
pub use error::{Result, TardyError};
pub use input::{expand_key, parse_args, ParsedInput};
pub use model::{Manager, OrgDirectory, OrgTable, RecordId, ReportScope, StoredRecord, TardinessRecord};
pub use repository::{export_flat_csv, FileTardinessRepository, TardinessRepository};
pub use service::{AddEntry, Annotation, ReportData, TardinessService};
pub use time::{parse_date, today};
pub use usecase::{build_report, ReportUseCase};
