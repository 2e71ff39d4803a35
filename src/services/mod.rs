pub mod filter;
pub mod reports;
