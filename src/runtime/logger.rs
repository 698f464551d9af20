//! # Deserialization Logging
//!
//! The document deserializer reports every resource it is about to hand to the
//! resource deserializer through a [`DeserializeLogger`]. The logger is injected
//! at build time, so tests can swap in a
//! [`RecordingLogger`](crate::document::mock::RecordingLogger) or a [`NoopLogger`].
//!
//! [`TracingLogger`] is the default. With `RUST_LOG=info` it prints one compact
//! line per resource; `RUST_LOG=debug` adds the full enriched payload:
//!
//! ```text
//! DEBUG Deserializing payload deserializer="ArticlesDocument" resource=Resource { .. }
//!  INFO Deserializing deserializer="ArticlesDocument" resource_type="articles" id=1
//! ```

use crate::model::Resource;
use tracing::{debug, info};

/// Receives one record per resource, after its relationships are merged.
pub trait DeserializeLogger: Send + Sync {
    fn deserializing(&self, deserializer: &str, resource: &Resource);
}

/// Emits structured `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl DeserializeLogger for TracingLogger {
    fn deserializing(&self, deserializer: &str, resource: &Resource) {
        debug!(deserializer, ?resource, "Deserializing payload");
        info!(
            deserializer,
            resource_type = %resource.resource_type,
            id = %resource.id,
            "Deserializing"
        );
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl DeserializeLogger for NoopLogger {
    fn deserializing(&self, _deserializer: &str, _resource: &Resource) {}
}
