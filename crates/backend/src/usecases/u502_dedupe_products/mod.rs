pub mod executor;

pub use executor::{group_duplicates, select_keeper, DedupeExecutor, DuplicateGroup};
