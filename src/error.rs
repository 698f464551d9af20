//! # Errors
//!
//! Every entry point of the crate reports failures through [`DocumentError`].
//! Unresolvable relationship references are *not* errors: they surface as
//! `null` linkage and it is up to the resource deserializer to reject them.

/// Boxed error produced by a resource deserializer.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while deserializing a JSON:API document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The document deserializer was built without a resource deserializer.
    #[error("{deserializer}: no resource deserializer configured")]
    NoDeserializableResource { deserializer: String },

    /// A resource or reference is missing `type`/`id`, or the payload is not
    /// shaped like a JSON:API document at all.
    #[error("Malformed JSON:API payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    /// The payload has no `data` member, or `data` is `null`.
    #[error("JSON:API payload has no primary data")]
    MissingData,

    /// Returned by the resource deserializer; the inner error is passed through as is.
    #[error("Resource deserializer failed: {0}")]
    Resource(#[source] BoxError),
}

impl DocumentError {
    /// Returns the resource deserializer's own error, if that is what failed.
    pub fn resource_error<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            DocumentError::Resource(inner) => inner.downcast_ref::<E>(),
            _ => None,
        }
    }
}
