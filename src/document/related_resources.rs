//! # Related Resource Index
//!
//! Built once per document from its `included` array. Resources are grouped by
//! `type` and each group is sorted by [`ResourceId`], so a reference resolves
//! with one hash lookup and one binary search (`O(log n)` in the group size).

use crate::model::{Resource, ResourceId, ResourceIdentifier};
use std::collections::HashMap;
use tracing::debug;

/// Read-only lookup of side-loaded resources by `(type, id)`.
///
/// An empty index (no `included`, or an empty array) answers every lookup
/// with `None`. If a group holds duplicate ids, the lookup returns whichever
/// of them the binary search lands on.
#[derive(Debug, Clone, Default)]
pub struct RelatedResources {
    resources: HashMap<String, Vec<Resource>>,
    len: usize,
}

impl RelatedResources {
    pub fn new(included: Vec<Resource>) -> Self {
        let len = included.len();
        let mut resources: HashMap<String, Vec<Resource>> = HashMap::new();
        for resource in included {
            resources
                .entry(resource.resource_type.clone())
                .or_default()
                .push(resource);
        }
        for group in resources.values_mut() {
            group.sort_by(|a, b| a.id.cmp(&b.id));
        }
        debug!(types = resources.len(), resources = len, "Indexed included resources");

        Self { resources, len }
    }

    /// Looks up the included resource a reference points at.
    pub fn get_resources_for(&self, reference: &ResourceIdentifier) -> Option<&Resource> {
        self.get(&reference.resource_type, &reference.id)
    }

    pub fn get(&self, resource_type: &str, id: &ResourceId) -> Option<&Resource> {
        let group = self.resources.get(resource_type)?;
        group
            .binary_search_by(|candidate| candidate.id.cmp(id))
            .ok()
            .map(|index| &group[index])
    }

    /// Number of indexed resources across all types.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }
}

impl From<Vec<Resource>> for RelatedResources {
    fn from(included: Vec<Resource>) -> Self {
        Self::new(included)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(id: i64, name: &str) -> Resource {
        Resource::new("people", id).with_attribute("name", name)
    }

    #[test]
    fn finds_resource_by_type_and_id() {
        let index = RelatedResources::new(vec![
            person(3, "Carol"),
            Resource::new("comments", 1),
            person(1, "Alice"),
            person(2, "Bob"),
        ]);

        let found = index.get_resources_for(&ResourceIdentifier::new("people", 2)).unwrap();
        assert_eq!(found.attribute("name").unwrap(), "Bob");
        assert_eq!(index.len(), 4);
    }

    #[test]
    fn same_id_under_different_types_does_not_collide() {
        let index = RelatedResources::new(vec![person(1, "Alice"), Resource::new("comments", 1)]);

        let comment = index.get("comments", &ResourceId::from(1)).unwrap();
        assert_eq!(comment.resource_type, "comments");
        assert!(comment.attributes.is_none());
    }

    #[test]
    fn unknown_type_or_id_is_none() {
        let index = RelatedResources::new(vec![person(1, "Alice")]);
        assert!(index.get("robots", &ResourceId::from(1)).is_none());
        assert!(index.get("people", &ResourceId::from(42)).is_none());
        assert!(index.get("people", &ResourceId::from("1")).is_none());
    }

    #[test]
    fn empty_index_fails_closed() {
        let index = RelatedResources::default();
        assert!(index.is_empty());
        assert!(index.get("people", &ResourceId::from(1)).is_none());
        assert_eq!(index.types().count(), 0);
    }

    #[test]
    fn string_ids_use_lexical_order() {
        let ids = ["b", "a", "d", "c", "aa"];
        let index = RelatedResources::new(ids.iter().map(|id| Resource::new("tags", *id)).collect());
        for id in ids {
            assert_eq!(index.get("tags", &ResourceId::from(id)).unwrap().id, ResourceId::from(id));
        }
        assert!(index.get("tags", &ResourceId::from("e")).is_none());
    }

    #[test]
    fn mixed_id_types_in_one_group_still_resolve() {
        let index = RelatedResources::new(vec![
            Resource::new("things", "10"),
            Resource::new("things", 10),
            Resource::new("things", "2"),
            Resource::new("things", 2),
        ]);
        assert_eq!(index.get("things", &ResourceId::from(10)).unwrap().id.as_i64(), Some(10));
        assert_eq!(index.get("things", &ResourceId::from("10")).unwrap().id.as_str(), Some("10"));
        assert_eq!(index.get("things", &ResourceId::from("2")).unwrap().id.as_str(), Some("2"));
        assert_eq!(index.get("things", &ResourceId::from(2)).unwrap().id.as_i64(), Some(2));
    }
}
