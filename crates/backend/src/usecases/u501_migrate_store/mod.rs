pub mod executor;

pub use executor::{CategoryRemap, MigrationExecutor};
