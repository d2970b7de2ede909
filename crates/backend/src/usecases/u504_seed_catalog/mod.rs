pub mod executor;

pub use executor::{repair_mojibake, SeedExecutor};
