//! Domain models with validation at construction
//!
//! Path ids and request bodies are validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod post;

pub use validation::ValidationError;
pub use post::{Post, PostDraft, PostId};
