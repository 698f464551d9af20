//! Runtime concerns shared by every document deserializer.
//!
//! - [`DeserializeLogger`] - the logging port injected into deserializers,
//!   with [`TracingLogger`] and [`NoopLogger`] implementations
//! - [`setup_tracing`] - installs a `tracing` subscriber driven by `RUST_LOG`

pub mod logger;
pub mod subscriber;

pub use logger::*;
pub use subscriber::*;
