//! Typed JSON:API records: documents, resources, relationships and ids.

pub mod document;
pub mod id;
pub mod resource;

pub use document::*;
pub use id::*;
pub use resource::*;
