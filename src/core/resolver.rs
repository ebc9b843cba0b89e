use anyhow::Result;
use tracing::warn;

use crate::core::catalog::{CatalogLookup, CatalogObjectMetadata};
use crate::core::graph::{CallGraphHolder, UNRESOLVED_KIND};
use crate::core::separator::SeparatorUtility;

/// Reserved metadata label marking a depends-on declaration.
pub const DEPENDS_ON_LABEL: &str = "depends_on";

/// Revision used for existence checks against the catalog.
pub const LATEST_REVISION: &str = "latest";

/// Builds the depends-on call graph for one report request.
///
/// Resolution is best-effort on data: a reference whose target is missing
/// from the catalog still yields a node (marked unresolved) and an edge; a
/// reference that cannot be split into bucket and name is skipped with a
/// warning and the rest of the build continues.
pub struct DependencyResolver {
    separator: SeparatorUtility,
}

impl DependencyResolver {
    pub fn new() -> Self {
        Self {
            separator: SeparatorUtility::default(),
        }
    }

    pub fn with_separator(separator: SeparatorUtility) -> Self {
        Self { separator }
    }

    /// Build a fresh call graph over the given (already filtered) objects.
    ///
    /// Objects that declare no dependency are not registered as nodes; they
    /// appear only if some other object depends on them.
    pub fn build_call_graph(
        &self,
        objects: &[CatalogObjectMetadata],
        lookup: &dyn CatalogLookup,
    ) -> Result<CallGraphHolder> {
        let mut holder = CallGraphHolder::new();

        for object in objects {
            let references = self.collect_depends_on(object);
            if references.is_empty() {
                continue;
            }

            // The referencing object is in the catalog by definition.
            let calling = holder.add_node(&object.bucket_name, &object.name, &object.kind, true);

            for reference in references {
                let (bucket, name) = match self.separator.split(&reference) {
                    Ok(split) => split,
                    Err(err) => {
                        warn!(
                            "skipping dependency reference declared by {}/{}: {err}",
                            object.bucket_name, object.name
                        );
                        continue;
                    }
                };

                let exists = lookup.object_exists(&bucket, &name, LATEST_REVISION);
                let kind = if exists {
                    lookup.object_kind(&bucket, &name)?
                } else {
                    UNRESOLVED_KIND.to_string()
                };

                let called = holder.add_node(&bucket, &name, &kind, exists);
                holder.add_depends_on_edge(calling, called)?;
            }
        }

        Ok(holder)
    }

    /// Composite references declared by one object, in metadata order.
    fn collect_depends_on(&self, object: &CatalogObjectMetadata) -> Vec<String> {
        object
            .metadata_list
            .iter()
            .filter(|entry| entry.label == DEPENDS_ON_LABEL)
            .map(|entry| entry.key.clone())
            .collect()
    }
}

impl Default for DependencyResolver {
    fn default() -> Self {
        Self::new()
    }
}
