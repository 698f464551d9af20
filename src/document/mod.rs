//! JSON:API document deserialization.
//!
//! # Main Components
//!
//! - [`DocumentDeserializer`] - resolves `included` resources into relationships
//!   and delegates each resource to a [`ResourceDeserializer`]
//! - [`RelatedResources`] - the `(type, id)` index over `included`
//! - [`ResourceDeserializer`] - the per-resource collaborator, with [`from_fn`]
//!   and [`SerdeResourceDeserializer`]
//! - [`DocumentOptions`] - serde-loadable document shape
//!
//! # Testing
//!
//! See [`mock`] module for a recording resource deserializer and logger.

pub mod config;
pub mod deserializer;
pub mod mock;
pub mod pipeline;
pub mod related_resources;

pub use config::*;
pub use deserializer::*;
pub use pipeline::*;
pub use related_resources::*;
