use crate::error::BoxError;

/// Initializes the tracing/logging infrastructure for the application.
///
/// Installs a compact `tracing-subscriber` formatter filtered by `RUST_LOG`:
/// - `RUST_LOG=info` - one line per deserialized resource
/// - `RUST_LOG=debug` - adds full resource payloads, index and selection details
/// - `RUST_LOG=jsonapi_document=debug` - debug only for this crate
///
/// Returns an error instead of panicking when a global subscriber is already
/// installed, so it is safe to call from several tests.
///
/// # Example
///
/// ```ignore
/// setup_tracing()?;
/// tracing::info!("Application started");
/// ```
pub fn setup_tracing() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init()
}
