//! Types shared by every sprite editor crate: node tags and field schema,
//! the typed sprite document, and the error taxonomy.

pub mod document;
pub mod domain;
pub mod error;

pub use error::{ErrorCode, SpriteError, SpriteResult};
