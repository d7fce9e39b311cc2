//! Data store entries

mod entry_store;

pub use entry_store::OpenCloudDataStore;
