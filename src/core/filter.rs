use serde::{Deserialize, Serialize};

use crate::core::catalog::CatalogObjectMetadata;

/// Object attribute a predicate tests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    BucketName,
    ObjectName,
    Kind,
    ContentType,
    /// Value of the metadata entry with this label, if any.
    MetadataKey(String),
}

/// Comparison operator. `Like` treats a leading or trailing `%` in the
/// operand as a suffix/prefix wildcard, and `%both%` as a contains test;
/// without `%` it behaves as `Eq`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Eq,
    Ne,
    Like,
}

/// Boolean filter expression over catalog object metadata.
///
/// The graph core never evaluates these itself: filtering happens before
/// objects reach the resolver. The tree exists so callers can express the
/// same AND/OR selections the catalog query surface accepts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WhereClause {
    And(Vec<WhereClause>),
    Or(Vec<WhereClause>),
    Predicate {
        field: Field,
        op: Operator,
        value: String,
    },
}

impl WhereClause {
    pub fn eq(field: Field, value: &str) -> Self {
        WhereClause::Predicate {
            field,
            op: Operator::Eq,
            value: value.to_string(),
        }
    }

    /// Recursive interpreter. Empty AND is true, empty OR is false.
    pub fn matches(&self, object: &CatalogObjectMetadata) -> bool {
        match self {
            WhereClause::And(children) => children.iter().all(|child| child.matches(object)),
            WhereClause::Or(children) => children.iter().any(|child| child.matches(object)),
            WhereClause::Predicate { field, op, value } => {
                let attribute = Self::attribute(object, field);
                match attribute {
                    Some(attribute) => Self::compare(&attribute, *op, value),
                    // An absent attribute only satisfies a negative test.
                    None => *op == Operator::Ne,
                }
            }
        }
    }

    /// Keep only the objects matching this clause.
    pub fn filter(&self, objects: &[CatalogObjectMetadata]) -> Vec<CatalogObjectMetadata> {
        objects
            .iter()
            .filter(|object| self.matches(object))
            .cloned()
            .collect()
    }

    fn attribute(object: &CatalogObjectMetadata, field: &Field) -> Option<String> {
        match field {
            Field::BucketName => Some(object.bucket_name.clone()),
            Field::ObjectName => Some(object.name.clone()),
            Field::Kind => Some(object.kind.clone()),
            Field::ContentType => object.content_type.clone(),
            Field::MetadataKey(label) => object
                .metadata_list
                .iter()
                .find(|entry| &entry.label == label)
                .map(|entry| entry.key.clone()),
        }
    }

    fn compare(attribute: &str, op: Operator, value: &str) -> bool {
        match op {
            Operator::Eq => attribute == value,
            Operator::Ne => attribute != value,
            Operator::Like => {
                if let Some(inner) = value
                    .strip_prefix('%')
                    .and_then(|rest| rest.strip_suffix('%'))
                {
                    attribute.contains(inner)
                } else if let Some(suffix) = value.strip_prefix('%') {
                    attribute.ends_with(suffix)
                } else if let Some(prefix) = value.strip_suffix('%') {
                    attribute.starts_with(prefix)
                } else {
                    attribute == value
                }
            }
        }
    }
}
