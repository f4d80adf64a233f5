use crate::error::Result;
use crate::model::store::RecordStore;

/// Persistence seam for the partitioned record store. Every save rewrites
/// the whole store.
pub trait TardinessRepository {
    fn load(&self) -> Result<RecordStore>;
    fn save(&self, store: &RecordStore) -> Result<()>;
}
