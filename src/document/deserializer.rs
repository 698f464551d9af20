//! # Resource Deserializers
//!
//! A [`DocumentDeserializer`](super::DocumentDeserializer) resolves relationships
//! and then hands every enriched [`Resource`] to a [`ResourceDeserializer`],
//! which turns it into the application's own type.
//!
//! - Closures plug in through [`from_fn`].
//! - [`SerdeResourceDeserializer`] covers the common case of reading the
//!   resource straight into a `#[derive(Deserialize)]` struct.

use crate::error::BoxError;
use crate::model::Resource;
use serde::de::DeserializeOwned;
use std::fmt;
use std::marker::PhantomData;

/// Turns one enriched resource into an application value.
///
/// Errors are boxed and passed through to the caller of the document
/// deserializer without being inspected.
pub trait ResourceDeserializer: Send + Sync {
    type Output;

    fn deserialize(&self, resource: Resource) -> Result<Self::Output, BoxError>;
}

/// Adapts a closure into a [`ResourceDeserializer`].
///
/// ```ignore
/// let titles = from_fn(|resource: Resource| {
///     Ok::<_, std::io::Error>(resource.attribute("title").cloned())
/// });
/// ```
pub fn from_fn<F, T, E>(f: F) -> FromFn<F>
where
    F: Fn(Resource) -> Result<T, E> + Send + Sync,
    E: Into<BoxError>,
{
    FromFn { f }
}

/// See [`from_fn`].
#[derive(Clone)]
pub struct FromFn<F> {
    f: F,
}

impl<F> fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromFn").finish_non_exhaustive()
    }
}

impl<F, T, E> ResourceDeserializer for FromFn<F>
where
    F: Fn(Resource) -> Result<T, E> + Send + Sync,
    E: Into<BoxError>,
{
    type Output = T;

    fn deserialize(&self, resource: Resource) -> Result<T, BoxError> {
        (self.f)(resource).map_err(Into::into)
    }
}

/// Reads the enriched resource, rendered back to JSON, into `T`.
///
/// `T` sees the resource exactly as JSON:API lays it out (`type`, `id`,
/// `attributes`, `relationships.<name>.data`), with relationship data already
/// replaced by the included resources.
pub struct SerdeResourceDeserializer<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> SerdeResourceDeserializer<T> {
    pub fn new() -> Self {
        Self { _marker: PhantomData }
    }
}

impl<T> Default for SerdeResourceDeserializer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for SerdeResourceDeserializer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SerdeResourceDeserializer<{}>", std::any::type_name::<T>())
    }
}

impl<T: DeserializeOwned> ResourceDeserializer for SerdeResourceDeserializer<T> {
    type Output = T;

    fn deserialize(&self, resource: Resource) -> Result<T, BoxError> {
        let value = serde_json::to_value(resource)?;
        Ok(serde_json::from_value(value)?)
    }
}
