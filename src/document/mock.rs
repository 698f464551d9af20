//! # Mock Collaborators
//!
//! Utilities for testing document deserializers in isolation.
//!
//! - [`MockResourceDeserializer`] records every resource it receives and
//!   answers from a queue of expectations.
//! - [`RecordingLogger`] captures log records instead of emitting them.
//!
//! Both are cheap handles over shared state: pass a clone to the builder and
//! keep the original for assertions.

use crate::document::ResourceDeserializer;
use crate::error::BoxError;
use crate::model::Resource;
use crate::runtime::DeserializeLogger;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Error returned by [`MockResourceDeserializer`] when told to fail.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Mock deserializer error: {0}")]
pub struct MockError(pub String);

/// A resource deserializer with expectation tracking.
///
/// # Example
/// ```ignore
/// let mock = MockResourceDeserializer::<String>::new();
/// mock.expect_call().return_ok("first".to_string());
/// mock.expect_call().return_err("boom");
///
/// let document = DocumentDeserializer::builder("Test")
///     .resource_deserializer(mock.clone())
///     .build();
/// // Use document in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockResourceDeserializer<T> {
    expectations: Arc<Mutex<VecDeque<Result<T, MockError>>>>,
    received: Arc<Mutex<Vec<Resource>>>,
}

impl<T> Clone for MockResourceDeserializer<T> {
    fn clone(&self) -> Self {
        Self {
            expectations: self.expectations.clone(),
            received: self.received.clone(),
        }
    }
}

impl<T> Default for MockResourceDeserializer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MockResourceDeserializer<T> {
    /// Creates a mock with no expectations.
    pub fn new() -> Self {
        Self {
            expectations: Arc::new(Mutex::new(VecDeque::new())),
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Expects one more call.
    pub fn expect_call(&self) -> CallExpectationBuilder<T> {
        CallExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Every resource passed in so far, in call order.
    pub fn received(&self) -> Vec<Resource> {
        self.received.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.received.lock().unwrap().len()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

impl<T: Send> ResourceDeserializer for MockResourceDeserializer<T> {
    type Output = T;

    fn deserialize(&self, resource: Resource) -> Result<T, BoxError> {
        self.received.lock().unwrap().push(resource);
        let expectation = self.expectations.lock().unwrap().pop_front();
        match expectation {
            Some(response) => response.map_err(Into::into),
            None => panic!("Unexpected call to mock resource deserializer"),
        }
    }
}

/// Builder for a single call expectation.
pub struct CallExpectationBuilder<T> {
    expectations: Arc<Mutex<VecDeque<Result<T, MockError>>>>,
}

impl<T> CallExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: T) {
        self.expectations.lock().unwrap().push_back(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, message: impl Into<String>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Err(MockError(message.into())));
    }
}

/// One captured log record.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub deserializer: String,
    pub resource: Resource,
}

/// A [`DeserializeLogger`] that keeps every record in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DeserializeLogger for RecordingLogger {
    fn deserializing(&self, deserializer: &str, resource: &Resource) {
        self.entries.lock().unwrap().push(LogEntry {
            deserializer: deserializer.to_string(),
            resource: resource.clone(),
        });
    }
}
