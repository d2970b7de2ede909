pub mod executor;

pub use executor::CleanupExecutor;
