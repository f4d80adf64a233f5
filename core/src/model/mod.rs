pub mod org;
pub mod record;
pub mod scope;
pub mod store;

pub use org::{OrgDirectory, OrgTable};
pub use record::{Manager, RecordId, SheetRow, StoredRecord, TardinessRecord, UNASSIGNED};
pub use scope::ReportScope;
pub use store::RecordStore;
