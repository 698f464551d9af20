//! # Document Deserializer
//!
//! [`DocumentDeserializer`] walks the primary `data` of a JSON:API document,
//! replaces relationship references with the full resources found in
//! `included`, and hands each enriched resource to the configured
//! [`ResourceDeserializer`].
//!
//! ## Pipeline
//!
//! 1. No resource deserializer configured? Fail with
//!    [`DocumentError::NoDeserializableResource`] before reading the payload.
//! 2. Parse the payload into a [`Document`]. The caller's value is never modified.
//! 3. Index `included` ([`RelatedResources`]).
//! 4. Pick the relationships to resolve: the configured list, or every
//!    relationship on the first resource of `data`. Nothing is resolved when
//!    `included` is absent or empty.
//! 5. For each resource, in order: merge, log, deserialize. The first error
//!    stops the walk.

use super::{DocumentOptions, RelatedResources, ResourceDeserializer};
use crate::error::DocumentError;
use crate::model::{Document, PrimaryData, RelationshipData, Resource};
use crate::runtime::{DeserializeLogger, TracingLogger};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Result of [`DocumentDeserializer::call`]: one value for a single-resource
/// document, an ordered list for a collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Deserialized<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> Deserialized<T> {
    pub fn is_many(&self) -> bool {
        matches!(self, Deserialized::Many(_))
    }

    pub fn one(self) -> Option<T> {
        match self {
            Deserialized::One(value) => Some(value),
            Deserialized::Many(_) => None,
        }
    }

    pub fn many(self) -> Option<Vec<T>> {
        match self {
            Deserialized::Many(values) => Some(values),
            Deserialized::One(_) => None,
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            Deserialized::One(value) => vec![value],
            Deserialized::Many(values) => values,
        }
    }
}

/// Deserializes JSON:API documents of one shape.
///
/// The configuration is fixed at build time and shared by every call, so one
/// instance can serve any number of payloads. Each call builds its own
/// [`RelatedResources`] index.
///
/// # Example
///
/// ```ignore
/// let articles = DocumentDeserializer::builder("ArticlesDocument")
///     .resource_deserializer(SerdeResourceDeserializer::<Article>::new())
///     .relationship_to_include(["author"])
///     .build();
///
/// let result = articles.call(&payload)?;
/// ```
pub struct DocumentDeserializer<T> {
    name: String,
    resource_deserializer: Option<Arc<dyn ResourceDeserializer<Output = T>>>,
    relationship_to_include: Option<Vec<String>>,
    logger: Arc<dyn DeserializeLogger>,
}

impl<T> Clone for DocumentDeserializer<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            resource_deserializer: self.resource_deserializer.clone(),
            relationship_to_include: self.relationship_to_include.clone(),
            logger: self.logger.clone(),
        }
    }
}

impl<T> fmt::Debug for DocumentDeserializer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentDeserializer")
            .field("name", &self.name)
            .field("has_resource_deserializer", &self.resource_deserializer.is_some())
            .field("relationship_to_include", &self.relationship_to_include)
            .finish()
    }
}

impl<T> DocumentDeserializer<T> {
    /// Starts a new configuration. `name` identifies this deserializer in log
    /// records and errors.
    pub fn builder(name: impl Into<String>) -> DocumentDeserializerBuilder<T> {
        DocumentDeserializerBuilder {
            name: name.into(),
            resource_deserializer: None,
            relationship_to_include: None,
            logger: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn relationship_to_include(&self) -> Option<&[String]> {
        self.relationship_to_include.as_deref()
    }

    /// Deserializes a JSON payload.
    #[instrument(skip_all, fields(deserializer = %self.name))]
    pub fn call(&self, payload: &Value) -> Result<Deserialized<T>, DocumentError> {
        let deserializer = self.require_deserializer()?;
        let document = Document::from_value(payload)?;
        self.deserialize_document(deserializer, document)
    }

    /// Deserializes a JSON payload given as text.
    #[instrument(skip_all, fields(deserializer = %self.name))]
    pub fn call_str(&self, payload: &str) -> Result<Deserialized<T>, DocumentError> {
        let deserializer = self.require_deserializer()?;
        let document: Document = payload.parse()?;
        self.deserialize_document(deserializer, document)
    }

    /// Deserializes an already parsed document.
    #[instrument(skip_all, fields(deserializer = %self.name))]
    pub fn call_document(&self, document: Document) -> Result<Deserialized<T>, DocumentError> {
        let deserializer = self.require_deserializer()?;
        self.deserialize_document(deserializer, document)
    }

    /// Streams the results for a collection document to `on_resource`, in order.
    ///
    /// A document whose `data` is a single resource produces no callbacks.
    #[instrument(skip_all, fields(deserializer = %self.name))]
    pub fn process_each_resource<F>(&self, payload: &Value, on_resource: F) -> Result<(), DocumentError>
    where
        F: FnMut(T),
    {
        let deserializer = self.require_deserializer()?;
        let document = Document::from_value(payload)?;
        self.stream_document(deserializer, document, on_resource)
    }

    /// Like [`process_each_resource`](Self::process_each_resource), for a parsed document.
    #[instrument(skip_all, fields(deserializer = %self.name))]
    pub fn process_each_document<F>(&self, document: Document, on_resource: F) -> Result<(), DocumentError>
    where
        F: FnMut(T),
    {
        let deserializer = self.require_deserializer()?;
        self.stream_document(deserializer, document, on_resource)
    }

    fn require_deserializer(&self) -> Result<&dyn ResourceDeserializer<Output = T>, DocumentError> {
        self.resource_deserializer
            .as_deref()
            .ok_or_else(|| DocumentError::NoDeserializableResource {
                deserializer: self.name.clone(),
            })
    }

    fn deserialize_document(
        &self,
        deserializer: &dyn ResourceDeserializer<Output = T>,
        document: Document,
    ) -> Result<Deserialized<T>, DocumentError> {
        let Document { data, included } = document;
        let merger = self.merger_for(&data, included);

        match data {
            PrimaryData::Single(resource) => {
                let value = self.deserialize_resource(deserializer, &merger, *resource)?;
                Ok(Deserialized::One(value))
            }
            PrimaryData::Collection(resources) => resources
                .into_iter()
                .map(|resource| self.deserialize_resource(deserializer, &merger, resource))
                .collect::<Result<Vec<_>, _>>()
                .map(Deserialized::Many),
        }
    }

    fn stream_document<F>(
        &self,
        deserializer: &dyn ResourceDeserializer<Output = T>,
        document: Document,
        mut on_resource: F,
    ) -> Result<(), DocumentError>
    where
        F: FnMut(T),
    {
        let Document { data, included } = document;
        if !data.is_collection() {
            debug!("Single resource document, nothing to stream");
            return Ok(());
        }
        let merger = self.merger_for(&data, included);

        if let PrimaryData::Collection(resources) = data {
            for resource in resources {
                on_resource(self.deserialize_resource(deserializer, &merger, resource)?);
            }
        }
        Ok(())
    }

    fn merger_for(&self, data: &PrimaryData, included: Vec<Resource>) -> RelationshipMerger {
        let related = RelatedResources::new(included);
        let selection = select_relationships(self.relationship_to_include.as_deref(), data, &related);
        debug!(?selection, "Relationships to resolve");
        RelationshipMerger { related, selection }
    }

    fn deserialize_resource(
        &self,
        deserializer: &dyn ResourceDeserializer<Output = T>,
        merger: &RelationshipMerger,
        mut resource: Resource,
    ) -> Result<T, DocumentError> {
        merger.merge(&mut resource);
        self.logger.deserializing(&self.name, &resource);
        deserializer.deserialize(resource).map_err(DocumentError::Resource)
    }
}

/// `None` means "resolve nothing", which is always the answer without `included`.
fn select_relationships(
    configured: Option<&[String]>,
    data: &PrimaryData,
    related: &RelatedResources,
) -> Option<Vec<String>> {
    if related.is_empty() {
        return None;
    }
    let selection = match configured {
        Some(keys) => keys.to_vec(),
        None => data
            .representative()
            .map(Resource::relationship_names)
            .unwrap_or_default(),
    };
    Some(selection)
}

/// Swaps relationship references for the included resources they point at.
struct RelationshipMerger {
    related: RelatedResources,
    selection: Option<Vec<String>>,
}

impl RelationshipMerger {
    fn merge(&self, resource: &mut Resource) {
        let Some(selection) = &self.selection else {
            return;
        };
        let Some(relationships) = resource.relationships.as_mut() else {
            return;
        };
        for key in selection {
            let Some(relationship) = relationships.get_mut(key) else {
                continue;
            };
            relationship.data = relationship.data.take().map(|data| self.resolve(data));
        }
    }

    fn resolve(&self, data: RelationshipData) -> RelationshipData {
        match data {
            RelationshipData::One(reference) => match self.lookup(&reference) {
                Some(resource) => RelationshipData::One(Box::new(resource)),
                None => RelationshipData::Null,
            },
            RelationshipData::Many(references) => RelationshipData::Many(
                references
                    .iter()
                    .map(|reference| reference.as_ref().and_then(|r| self.lookup(r)))
                    .collect(),
            ),
            RelationshipData::Null => RelationshipData::Null,
        }
    }

    fn lookup(&self, reference: &Resource) -> Option<Resource> {
        self.related
            .get(&reference.resource_type, &reference.id)
            .cloned()
    }
}

/// Builder for [`DocumentDeserializer`].
pub struct DocumentDeserializerBuilder<T> {
    name: String,
    resource_deserializer: Option<Arc<dyn ResourceDeserializer<Output = T>>>,
    relationship_to_include: Option<Vec<String>>,
    logger: Option<Arc<dyn DeserializeLogger>>,
}

impl<T> DocumentDeserializerBuilder<T> {
    pub fn resource_deserializer<D>(mut self, deserializer: D) -> Self
    where
        D: ResourceDeserializer<Output = T> + 'static,
    {
        self.resource_deserializer = Some(Arc::new(deserializer));
        self
    }

    pub fn shared_resource_deserializer(
        mut self,
        deserializer: Arc<dyn ResourceDeserializer<Output = T>>,
    ) -> Self {
        self.resource_deserializer = Some(deserializer);
        self
    }

    /// Resolves only these relationships. Without this, every relationship on
    /// the first resource of `data` is resolved.
    pub fn relationship_to_include<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.relationship_to_include = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    pub fn options(mut self, options: DocumentOptions) -> Self {
        self.relationship_to_include = options.relationship_to_include;
        self
    }

    /// Replaces the default [`TracingLogger`].
    pub fn logger<L>(mut self, logger: L) -> Self
    where
        L: DeserializeLogger + 'static,
    {
        self.logger = Some(Arc::new(logger));
        self
    }

    pub fn shared_logger(mut self, logger: Arc<dyn DeserializeLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn build(self) -> DocumentDeserializer<T> {
        let logger: Arc<dyn DeserializeLogger> = match self.logger {
            Some(logger) => logger,
            None => Arc::new(TracingLogger),
        };
        DocumentDeserializer {
            name: self.name,
            resource_deserializer: self.resource_deserializer,
            relationship_to_include: self.relationship_to_include,
            logger,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::mock::{MockResourceDeserializer, RecordingLogger};
    use crate::model::{Relationship, ResourceId};
    use serde_json::json;

    fn articles_payload() -> Value {
        json!({
            "data": {
                "type": "articles",
                "id": "1",
                "relationships": {
                    "author": { "data": { "type": "people", "id": "9" } },
                    "comments": { "data": [
                        { "type": "comments", "id": "12" },
                        { "type": "comments", "id": "404" },
                        { "type": "comments", "id": "5" }
                    ] }
                }
            },
            "included": [
                { "type": "comments", "id": "5", "attributes": { "body": "First!" } },
                { "type": "people", "id": "9", "attributes": { "name": "Dan" } },
                { "type": "comments", "id": "12", "attributes": { "body": "I like XML better" } }
            ]
        })
    }

    #[test]
    fn test_to_many_keeps_order_and_nulls_unresolved_entries() {
        let mock = MockResourceDeserializer::<()>::new();
        mock.expect_call().return_ok(());
        let document = DocumentDeserializer::builder("Articles")
            .resource_deserializer(mock.clone())
            .logger(RecordingLogger::new())
            .build();

        document.call(&articles_payload()).unwrap();

        let received = mock.received();
        let comments = match &received[0].relationship("comments").unwrap().data {
            Some(RelationshipData::Many(comments)) => comments.clone(),
            other => panic!("expected to-many data, got {:?}", other),
        };
        assert_eq!(comments.len(), 3);
        assert_eq!(comments[0].as_ref().unwrap().attribute("body").unwrap(), "I like XML better");
        assert!(comments[1].is_none());
        assert_eq!(comments[2].as_ref().unwrap().attribute("body").unwrap(), "First!");
        mock.verify();
    }

    #[test]
    fn test_selection_limits_what_gets_resolved() {
        let mock = MockResourceDeserializer::<()>::new();
        mock.expect_call().return_ok(());
        let document = DocumentDeserializer::builder("Articles")
            .resource_deserializer(mock.clone())
            .relationship_to_include(["author", "not-a-relationship"])
            .logger(RecordingLogger::new())
            .build();

        document.call(&articles_payload()).unwrap();

        let article = &mock.received()[0];
        match &article.relationship("author").unwrap().data {
            Some(RelationshipData::One(author)) => assert_eq!(author.attribute("name").unwrap(), "Dan"),
            other => panic!("expected resolved author, got {:?}", other),
        }
        match &article.relationship("comments").unwrap().data {
            Some(RelationshipData::Many(comments)) => {
                assert!(comments.iter().all(|c| c.as_ref().unwrap().attributes.is_none()))
            }
            other => panic!("expected untouched comments, got {:?}", other),
        }
    }

    #[test]
    fn test_unresolved_to_one_becomes_null() {
        let related = RelatedResources::new(vec![Resource::new("people", 1)]);
        let merger = RelationshipMerger {
            related,
            selection: Some(vec!["owner".into(), "missing".into(), "vacant".into()]),
        };
        let mut resource = Resource::new("pets", 1)
            .with_relationship("owner", Relationship::to_one(Resource::new("people", 2)))
            .with_relationship("missing", Relationship::empty())
            .with_relationship("vacant", Relationship::null());

        merger.merge(&mut resource);

        assert_eq!(
            resource.relationship("owner").unwrap().data,
            Some(RelationshipData::Null)
        );
        assert!(resource.relationship("missing").unwrap().data.is_none());
        assert_eq!(resource.relationship("vacant"), Some(&Relationship::null()));
    }

    #[test]
    fn test_default_selection_comes_from_first_resource() {
        let data = PrimaryData::Collection(vec![
            Resource::new("a", 1)
                .with_relationship("x", Relationship::empty())
                .with_relationship("y", Relationship::empty()),
            Resource::new("a", 2).with_relationship("z", Relationship::empty()),
        ]);
        let related = RelatedResources::new(vec![Resource::new("b", 1)]);

        assert_eq!(
            select_relationships(None, &data, &related),
            Some(vec!["x".to_string(), "y".to_string()])
        );
        assert_eq!(
            select_relationships(Some(&["z".to_string()]), &data, &related),
            Some(vec!["z".to_string()])
        );
        assert_eq!(select_relationships(None, &data, &RelatedResources::default()), None);
    }

    #[test]
    fn test_caller_payload_is_not_modified() {
        let mock = MockResourceDeserializer::<()>::new();
        mock.expect_call().return_ok(());
        let document = DocumentDeserializer::builder("Articles")
            .resource_deserializer(mock.clone())
            .logger(RecordingLogger::new())
            .build();
        let payload = articles_payload();

        document.call(&payload).unwrap();

        assert_eq!(payload, articles_payload());
    }

    #[test]
    fn test_numeric_and_string_ids_do_not_cross_resolve() {
        let mock = MockResourceDeserializer::<()>::new();
        mock.expect_call().return_ok(());
        let document = DocumentDeserializer::builder("Pets")
            .resource_deserializer(mock.clone())
            .logger(RecordingLogger::new())
            .build();

        document
            .call(&json!({
                "data": {
                    "type": "pets", "id": 1,
                    "relationships": { "owner": { "data": { "type": "people", "id": "2" } } }
                },
                "included": [{ "type": "people", "id": 2 }]
            }))
            .unwrap();

        assert_eq!(
            mock.received()[0].relationship("owner").unwrap().data,
            Some(RelationshipData::Null)
        );
        assert_eq!(mock.received()[0].id, ResourceId::from(1));
    }

    #[test]
    fn test_deserialized_accessors() {
        assert_eq!(Deserialized::One(1).into_vec(), vec![1]);
        assert_eq!(Deserialized::Many(vec![1, 2]).many(), Some(vec![1, 2]));
        assert!(Deserialized::<u8>::Many(vec![]).is_many());
        assert_eq!(Deserialized::Many(vec![1]).one(), None);
    }
}
