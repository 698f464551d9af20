use super::ResourceId;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A `{ "type": ..., "id": ... }` reference to a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: ResourceId,
}

impl ResourceIdentifier {
    pub fn new(resource_type: impl Into<String>, id: impl Into<ResourceId>) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }
}

/// A JSON:API resource object.
///
/// `type`, `id` and `relationships` are typed because the merge logic works on
/// them. `attributes` stays an open JSON object, and any other member
/// (`links`, `meta`, ...) is carried through untouched in `extra`.
///
/// A bare reference inside a relationship is read as a `Resource` with only
/// `type` and `id` set, so merging can swap it for the full included resource
/// without changing the shape of the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: ResourceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<IndexMap<String, Relationship>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Resource {
    /// Creates a resource with no attributes or relationships.
    pub fn new(resource_type: impl Into<String>, id: impl Into<ResourceId>) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: id.into(),
            attributes: None,
            relationships: None,
            extra: Map::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes
            .get_or_insert_with(Map::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn with_relationship(mut self, name: impl Into<String>, relationship: Relationship) -> Self {
        self.relationships
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), relationship);
        self
    }

    pub fn identifier(&self) -> ResourceIdentifier {
        ResourceIdentifier {
            resource_type: self.resource_type.clone(),
            id: self.id.clone(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.as_ref()?.get(name)
    }

    pub fn relationship(&self, name: &str) -> Option<&Relationship> {
        self.relationships.as_ref()?.get(name)
    }

    /// Relationship names in payload order.
    pub fn relationship_names(&self) -> Vec<String> {
        self.relationships
            .as_ref()
            .map(|relationships| relationships.keys().cloned().collect())
            .unwrap_or_default()
    }
}

/// A relationship object: `{ "data": <linkage>, ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// `None` when the member is absent (linkage not provided). An explicit
    /// `null` reads as [`RelationshipData::Null`].
    #[serde(
        default,
        deserialize_with = "present_linkage",
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<RelationshipData>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Relationship {
    pub fn to_one(resource: Resource) -> Self {
        Self {
            data: Some(RelationshipData::One(Box::new(resource))),
            extra: Map::new(),
        }
    }

    pub fn to_many(resources: impl IntoIterator<Item = Resource>) -> Self {
        Self {
            data: Some(RelationshipData::Many(resources.into_iter().map(Some).collect())),
            extra: Map::new(),
        }
    }

    /// A relationship with no `data` member.
    pub fn empty() -> Self {
        Self {
            data: None,
            extra: Map::new(),
        }
    }

    /// A relationship whose `data` is `null`.
    pub fn null() -> Self {
        Self {
            data: Some(RelationshipData::Null),
            extra: Map::new(),
        }
    }
}

// Called only when `data` is present, so `null` must not collapse into `None`.
fn present_linkage<'de, D>(deserializer: D) -> Result<Option<RelationshipData>, D::Error>
where
    D: Deserializer<'de>,
{
    RelationshipData::deserialize(deserializer).map(Some)
}

/// Relationship linkage. The cardinality comes from the JSON shape alone:
/// an object is to-one, an array is to-many.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelationshipData {
    /// `None` entries are references that did not resolve against `included`.
    Many(Vec<Option<Resource>>),
    One(Box<Resource>),
    /// Empty to-one linkage, or a to-one reference that did not resolve.
    Null,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_to_one_and_to_many_linkage() {
        let resource: Resource = serde_json::from_value(json!({
            "type": "articles",
            "id": "1",
            "relationships": {
                "author": { "data": { "type": "people", "id": "9" } },
                "comments": { "data": [
                    { "type": "comments", "id": "5" },
                    { "type": "comments", "id": "12" }
                ] },
                "editor": { "data": null },
                "tags": { "links": { "related": "/articles/1/tags" } }
            }
        }))
        .unwrap();

        assert_eq!(
            resource.relationship_names(),
            vec!["author", "comments", "editor", "tags"]
        );
        match &resource.relationship("author").unwrap().data {
            Some(RelationshipData::One(person)) => {
                assert_eq!(person.identifier(), ResourceIdentifier::new("people", "9"))
            }
            other => panic!("expected to-one linkage, got {:?}", other),
        }
        match &resource.relationship("comments").unwrap().data {
            Some(RelationshipData::Many(comments)) => assert_eq!(comments.len(), 2),
            other => panic!("expected to-many linkage, got {:?}", other),
        }
        assert_eq!(
            resource.relationship("editor").unwrap().data,
            Some(RelationshipData::Null)
        );
        let tags = resource.relationship("tags").unwrap();
        assert!(tags.data.is_none());
        assert!(tags.extra.contains_key("links"));
    }

    #[test]
    fn keeps_unknown_members() {
        let value = json!({
            "type": "articles",
            "id": 1,
            "attributes": { "title": "JSON:API" },
            "meta": { "views": 3 }
        });
        let resource: Resource = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(resource.attribute("title"), Some(&json!("JSON:API")));
        assert_eq!(serde_json::to_value(&resource).unwrap(), value);
    }

    #[test]
    fn absent_and_null_linkage_round_trip_unchanged() {
        let value = json!({
            "type": "articles",
            "id": 1,
            "relationships": {
                "tags": { "links": { "related": "/articles/1/tags" } },
                "editor": { "data": null }
            }
        });
        let resource: Resource = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(serde_json::to_value(&resource).unwrap(), value);
    }

    #[test]
    fn rejects_resource_without_type() {
        let result = serde_json::from_value::<Resource>(json!({ "id": 1 }));
        assert!(result.is_err());
    }

    #[test]
    fn builder_helpers_produce_expected_json() {
        let resource = Resource::new("test", 1)
            .with_attribute("name", "widget")
            .with_relationship("owner", Relationship::to_one(Resource::new("people", 2)));
        assert_eq!(
            serde_json::to_value(&resource).unwrap(),
            json!({
                "type": "test",
                "id": 1,
                "attributes": { "name": "widget" },
                "relationships": {
                    "owner": { "data": { "type": "people", "id": 2 } }
                }
            })
        );
    }
}
