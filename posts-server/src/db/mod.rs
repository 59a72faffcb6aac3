//! Database layer - connection pool, schema, and the posts repository
//!
//! # Design Principles
//!
//! - Connection pool (default 5 connections) - no Arc<Mutex<Connection>>
//! - One parameterized statement per repository call, no transactions
//! - Zero rows matched is the only condition mapped to NotFound

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::PgPostRepo;
