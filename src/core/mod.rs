pub mod catalog;
pub mod filter;
pub mod graph;
pub mod resolver;
pub mod separator;

pub use catalog::{CatalogLookup, CatalogObjectMetadata, InMemoryCatalog, MetadataEntry};
pub use filter::{Field, Operator, WhereClause};
pub use graph::{CallGraphHolder, DependencyGraph, DependsOn, GraphNode, UNRESOLVED_KIND};
pub use resolver::{DependencyResolver, DEPENDS_ON_LABEL, LATEST_REVISION};
pub use separator::SeparatorUtility;
