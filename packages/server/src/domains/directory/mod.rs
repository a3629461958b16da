//! Directory domain - read-only user and product summaries
//!
//! Requests reference users and products by id; responses embed the summaries
//! resolved through this domain.

pub mod models;
pub mod store;

pub use models::{Price, ProductImage, ProductSummary, UserSummary};
pub use store::{Directory, MemoryDirectory, PostgresDirectory};
