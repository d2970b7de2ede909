//! Shared data types for the catalog maintenance backend:
//! aggregates, enums and use-case request/report types.

pub mod domain;
pub mod enums;
pub mod usecases;
