//! Repository implementations for database access
//!
//! Each repository translates one store call into one statement.

pub mod posts;

pub use posts::PgPostRepo;
