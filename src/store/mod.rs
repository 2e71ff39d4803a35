pub mod files;
pub mod queries;

pub use files::{DataFile, DataStore};
