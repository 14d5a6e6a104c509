//! Oracle adapters backing the core's read-only lookups.
mod catalog;

pub use catalog::CatalogOracleImpl;
