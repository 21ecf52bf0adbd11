pub mod error;
pub mod ids;
pub mod queries;
pub mod sessions;
pub mod store;

use std::sync::Mutex;

use tracing::info;

pub use error::StoreError;
pub use store::DataStore;

/// Owns the workspace's single `DataStore` behind one lock. Every operation
/// runs as one closure under that lock, so a check and the mutation that
/// follows it can never interleave with another request.
pub struct Database {
    store: Mutex<DataStore>,
}

impl Database {
    pub fn new() -> Self {
        info!("In-memory data store initialised");
        Self {
            store: Mutex::new(DataStore::default()),
        }
    }

    pub fn with_store<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut DataStore) -> Result<T, E>,
        E: From<StoreError>,
    {
        let mut store = self.store.lock().map_err(|_| StoreError::LockPoisoned)?;
        f(&mut store)
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}
