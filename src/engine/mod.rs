pub mod classify;
pub mod client;
pub mod error;
pub mod fetch;
pub mod probe;
pub mod runner;
pub mod types;
