//! posts-server: CRUD HTTP API for posts
//!
//! Serves `/posts` from either an in-memory store or a Postgres table,
//! both behind the [`store::PostStore`] trait.

pub mod db;
pub mod http;
pub mod models;
pub mod state;
pub mod store;

pub use http::{build_router, run_server, ServerConfig, ServerError};
pub use models::{Post, PostDraft, PostId};
pub use state::AppState;
pub use store::{MemoryStore, PostStore, StoreError};
