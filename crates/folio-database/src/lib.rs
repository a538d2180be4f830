//! # folio-database
//!
//! SQLite connection management and the repository implementations for
//! all Folio entities, in two flavours: sqlx-backed and in-memory. The
//! backend is chosen at startup from [`DatabaseConfig`](folio_core::config::DatabaseConfig).

pub mod backend;
pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;

pub use backend::Repositories;
pub use connection::DatabasePool;
