#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # JSON:API Document
//!
//! > **Side-loaded JSON:API documents, resolved into your own types.**
//!
//! A JSON:API response keeps related resources out of line: relationships carry
//! only `{ "type", "id" }` references, and the full objects sit in a top-level
//! `included` array. This crate puts them back together. It indexes `included`,
//! swaps each selected relationship reference for the resource it points at,
//! and passes every enriched resource to a deserializer you supply.
//!
//! ## 🏗️ Design Philosophy
//!
//! - **Explicit configuration**: a [`DocumentDeserializer`](document::DocumentDeserializer)
//!   is built once with its resource deserializer and relationship selection,
//!   then reused for every payload of that shape.
//! - **Typed where it matters**: `type`, `id` and `relationships` are typed
//!   fields; `attributes` and everything else stay plain JSON.
//! - **No surprises for the caller**: the input payload is read, never mutated.
//!   The enriched tree is built in the document's own parsed copy.
//!
//! ## 🚀 Core Concepts
//!
//! ### Resolving relationships
//! The shape of the reference decides the shape of the result. A to-one
//! reference becomes one resource; a to-many array becomes an array of the
//! same length and order, with `null` where a reference is not in `included`.
//! Without `included` nothing is resolved at all.
//!
//! ### Resource ids
//! Ids may be strings or numbers. [`ResourceId`](model::ResourceId) orders
//! numbers numerically, strings lexically, and numbers before strings, so a
//! type group can be binary searched even when a server mixes them.
//!
//! ### Mocking
//! See the [`document::mock`] module for a recording resource deserializer and
//! logger.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Records ([`model`])
//! - **Role**: serde-backed JSON:API documents, resources and relationships.
//! - **Key items**: [`Document`](model::Document), [`Resource`](model::Resource),
//!   [`RelationshipData`](model::RelationshipData).
//!
//! ### 2. The Engine ([`document`])
//! - **Role**: the `included` index, the relationship merge and the delegation
//!   to your resource deserializer.
//! - **Key items**: [`DocumentDeserializer`](document::DocumentDeserializer),
//!   [`RelatedResources`](document::RelatedResources),
//!   [`ResourceDeserializer`](document::ResourceDeserializer).
//!
//! ### 3. The Plumbing ([`runtime`])
//! - **Role**: the injected logging port and `tracing` setup.
//! - **Key items**: [`DeserializeLogger`](runtime::DeserializeLogger),
//!   [`setup_tracing`](runtime::setup_tracing).
//!
//! ### 4. Errors ([`error`])
//! - **Key items**: [`DocumentError`](error::DocumentError).
//!
//! ## 🚀 Quick Start
//!
//! ```ignore
//! use jsonapi_document::document::{DocumentDeserializer, SerdeResourceDeserializer};
//!
//! let articles = DocumentDeserializer::builder("ArticlesDocument")
//!     .resource_deserializer(SerdeResourceDeserializer::<Article>::new())
//!     .relationship_to_include(["author"])
//!     .build();
//!
//! let all = articles.call(&payload)?.into_vec();
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod document;
pub mod error;
pub mod model;
pub mod runtime;

pub use document::{Deserialized, DocumentDeserializer};
pub use error::DocumentError;
pub use model::{Document, Resource, ResourceId};
