pub mod aggregate;

pub use aggregate::{normalized_title, Product, ProductDraft, ProductId};
