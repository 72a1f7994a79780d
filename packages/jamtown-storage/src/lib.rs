//! Persistence for the artist catalog.
//!
//! [`catalog::CatalogStore`] is the seam the retrieval pipeline ranks through. The Postgres
//! implementation lives in [`catalog::PgCatalog`], and [`memory::MemoryCatalog`] keeps the same
//! ordering rules in process.

pub mod catalog;
pub mod db;
pub mod memory;
pub mod models;
pub mod queries;
pub mod schema;
pub mod vector;

mod error;

pub use catalog::{BoxFuture, CatalogStore, PgCatalog};
pub use error::{Error, Result};
pub use memory::MemoryCatalog;
