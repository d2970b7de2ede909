pub mod executor;
pub mod variety;

pub use executor::{read_rows, ImportExecutor};
