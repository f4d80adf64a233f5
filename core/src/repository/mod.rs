pub mod file;
pub mod flat;
pub mod traits;

// Re-export
pub use file::FileTardinessRepository;
pub use flat::{export_flat_csv, write_flat};
pub use traits::TardinessRepository;
