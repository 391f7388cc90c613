pub mod engine;
pub mod error;
pub mod session;
pub mod static_log;
