pub mod category;
pub mod settings;
pub mod transaction;

pub use category::NewCategory;
pub use settings::{NewSettings, Settings};
pub use transaction::{NewTransaction, Transaction, TransactionKind};
