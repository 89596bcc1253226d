// Adapters layer: concrete implementations of the domain ports (storage, file formats).

pub mod observations_csv;
pub mod storage;

pub use storage::LocalStorage;
