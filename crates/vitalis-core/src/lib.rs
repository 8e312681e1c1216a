pub mod chat;
pub mod clock;
pub mod config;
pub mod daily_log;
pub mod error;
pub mod generation;
pub mod health_info;
pub mod patient;
pub mod prediction;
pub mod report;
pub mod schema;
pub mod secret;
pub mod session;
pub mod store;

// Re-export common error type
pub use error::{Result, VitalisError};
