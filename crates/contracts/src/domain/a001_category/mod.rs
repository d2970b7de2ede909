pub mod aggregate;

pub use aggregate::{name_key, Category, CategoryDraft, CategoryId, CategorySummary};
