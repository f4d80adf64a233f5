use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::config::default_app_dir;
use crate::error::{Result, TardyError};
use crate::model::store::RecordStore;
use crate::repository::traits::TardinessRepository;

const DEFAULT_FILE_NAME: &str = "tardiness.json";

/// JSON workbook on disk: one sheet per manager.
///
/// Writes go to a temporary file in the same directory which then replaces
/// the data file, so a reader sees either the old or the new workbook.
/// There is no locking; with two concurrent writers the last one wins.
#[derive(Clone, Debug)]
pub struct FileTardinessRepository {
    file_path: PathBuf,
}

impl FileTardinessRepository {
    pub fn new(file_path: Option<PathBuf>) -> Result<Self> {
        let path = match file_path {
            Some(path) => path,
            None => {
                let dir = default_app_dir().ok_or_else(|| {
                    TardyError::io(
                        DEFAULT_FILE_NAME,
                        io::Error::new(io::ErrorKind::NotFound, "could not determine home directory"),
                    )
                })?;
                dir.join(DEFAULT_FILE_NAME)
            }
        };
        Ok(FileTardinessRepository { file_path: path })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn read_store(&self) -> Result<RecordStore> {
        let content = match fs::read_to_string(&self.file_path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.file_path.display(), "data file absent, starting empty");
                return Ok(RecordStore::new());
            }
            Err(e) => return Err(TardyError::io(&self.file_path, e)),
        };
        if content.trim().is_empty() {
            return Ok(RecordStore::new());
        }

        let mut store: RecordStore =
            serde_json::from_str(&content).map_err(|source| TardyError::Corrupt {
                path: self.file_path.clone(),
                source,
            })?;
        store.normalize();
        debug!(path = %self.file_path.display(), rows = store.len(), "loaded data file");
        Ok(store)
    }

    fn write_store(&self, store: &RecordStore) -> Result<()> {
        let dir = match self.file_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| TardyError::io(&dir, e))?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| TardyError::io(&dir, e))?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, store)
                .map_err(|e| TardyError::io(&self.file_path, io::Error::from(e)))?;
            writer.flush().map_err(|e| TardyError::io(&self.file_path, e))?;
        }
        tmp.as_file()
            .sync_all()
            .map_err(|e| TardyError::io(&self.file_path, e))?;
        tmp.persist(&self.file_path)
            .map_err(|e| TardyError::io(&self.file_path, e.error))?;

        debug!(path = %self.file_path.display(), rows = store.len(), "flushed data file");
        Ok(())
    }
}

impl TardinessRepository for FileTardinessRepository {
    fn load(&self) -> Result<RecordStore> {
        self.read_store()
    }

    fn save(&self, store: &RecordStore) -> Result<()> {
        self.write_store(store)
    }
}
