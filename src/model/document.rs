use super::Resource;
use crate::error::DocumentError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// The primary `data` of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimaryData {
    Collection(Vec<Resource>),
    Single(Box<Resource>),
}

impl PrimaryData {
    pub fn is_collection(&self) -> bool {
        matches!(self, PrimaryData::Collection(_))
    }

    /// The resource whose relationship names stand in for the whole document
    /// when no explicit selection is configured.
    pub fn representative(&self) -> Option<&Resource> {
        match self {
            PrimaryData::Collection(resources) => resources.first(),
            PrimaryData::Single(resource) => Some(resource),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            PrimaryData::Collection(resources) => resources.len(),
            PrimaryData::Single(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A parsed JSON:API document.
///
/// Only `data` and `included` are read. Top-level `meta`, `links`, `jsonapi`
/// and `errors` are ignored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub data: PrimaryData,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub included: Vec<Resource>,
}

#[derive(Deserialize)]
struct RawDocument {
    #[serde(default)]
    data: Option<PrimaryData>,
    #[serde(default)]
    included: Option<Vec<Resource>>,
}

impl Document {
    pub fn new(data: PrimaryData, included: Vec<Resource>) -> Self {
        Self { data, included }
    }

    /// Parses a document out of `payload` without modifying it.
    pub fn from_value(payload: &Value) -> Result<Self, DocumentError> {
        let raw = RawDocument::deserialize(payload)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawDocument) -> Result<Self, DocumentError> {
        let data = raw.data.ok_or(DocumentError::MissingData)?;
        Ok(Self {
            data,
            included: raw.included.unwrap_or_default(),
        })
    }

    pub fn is_collection(&self) -> bool {
        self.data.is_collection()
    }

    pub fn has_included(&self) -> bool {
        !self.included.is_empty()
    }
}

impl FromStr for Document {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: RawDocument = serde_json::from_str(s)?;
        Self::from_raw(raw)
    }
}
