pub mod cli;
pub mod engine;
pub mod output;
pub mod tui;
