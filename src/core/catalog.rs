use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One labelled metadata entry attached to a catalog object.
///
/// Depends-on declarations are entries whose label is the reserved
/// depends-on label; the entry key then carries the composite reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetadataEntry {
    pub label: String,
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
}

impl MetadataEntry {
    pub fn new(label: &str, key: &str) -> Self {
        Self {
            label: label.to_string(),
            key: key.to_string(),
            value: None,
        }
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = Some(value.to_string());
        self
    }
}

/// Read-only metadata record for one catalog object, as delivered by the
/// catalog store after bucket/kind/content-type filtering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogObjectMetadata {
    pub bucket_name: String,
    pub name: String,
    pub kind: String,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub metadata_list: Vec<MetadataEntry>,
}

impl CatalogObjectMetadata {
    pub fn new(bucket_name: &str, name: &str, kind: &str) -> Self {
        Self {
            bucket_name: bucket_name.to_string(),
            name: name.to_string(),
            kind: kind.to_string(),
            content_type: None,
            metadata_list: Vec::new(),
        }
    }

    pub fn with_content_type(mut self, content_type: &str) -> Self {
        self.content_type = Some(content_type.to_string());
        self
    }

    pub fn with_metadata(mut self, entry: MetadataEntry) -> Self {
        self.metadata_list.push(entry);
        self
    }
}

/// Read-only existence and kind queries against the catalog store.
///
/// Methods take `&self` so a single lookup can serve concurrent report
/// requests; this subsystem never mutates the catalog.
pub trait CatalogLookup {
    /// Whether (bucket, name) exists in the catalog at the given revision.
    fn object_exists(&self, bucket: &str, name: &str, revision: &str) -> bool;

    /// Kind of an object known to exist; only called after a positive
    /// existence check.
    fn object_kind(&self, bucket: &str, name: &str) -> Result<String>;
}

/// Index over an in-memory object list, for the CLI and tests.
pub struct InMemoryCatalog {
    kinds: HashMap<(String, String), String>,
}

impl InMemoryCatalog {
    pub fn from_objects(objects: &[CatalogObjectMetadata]) -> Self {
        let kinds = objects
            .iter()
            .map(|object| {
                (
                    (object.bucket_name.clone(), object.name.clone()),
                    object.kind.clone(),
                )
            })
            .collect();
        Self { kinds }
    }
}

impl CatalogLookup for InMemoryCatalog {
    fn object_exists(&self, bucket: &str, name: &str, _revision: &str) -> bool {
        self.kinds
            .contains_key(&(bucket.to_string(), name.to_string()))
    }

    fn object_kind(&self, bucket: &str, name: &str) -> Result<String> {
        self.kinds
            .get(&(bucket.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| anyhow!("object {}/{} not found in catalog", bucket, name))
    }
}
