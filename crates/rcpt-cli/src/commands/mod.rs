pub mod config;
pub mod process;
pub mod receipts;
