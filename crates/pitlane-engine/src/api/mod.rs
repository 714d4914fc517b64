pub mod config;
pub mod error;
pub mod site;
pub mod types;
