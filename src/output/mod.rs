pub mod console;
pub mod csv;
pub mod json;
pub mod simple;
