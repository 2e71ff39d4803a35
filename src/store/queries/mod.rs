pub mod categories;
pub mod settings;
pub mod transactions;
