//! Console output and run report export

pub mod console;
pub mod json;
