use crate::core::graph::CallGraphHolder;
use crate::report::table::{Row, TableModel};

pub const MAIN_TITLE: &str = "Catalog Call Graph Report";

/// Rendering of an absent kind/content-type filter in the info header.
pub const NOT_SPECIFIED: &str = "not specified";

const COLUMNS: [&str; 7] = [
    "Calling bucket",
    "Calling object",
    "Calling kind",
    "Called bucket",
    "Called object",
    "Called kind",
    "Status",
];

/// Status markers for the existence flag of the called object.
pub const STATUS_OK: &str = "ok";
pub const STATUS_MISSING: &str = "missing";

/// Projects a completed call graph into a renderable table model.
///
/// One dependency row per edge, in edge insertion order; any per-path
/// regrouping is left to the renderer and never alters the edge set. The
/// builder succeeds on an empty graph, yielding a header-only model.
pub struct ReportModelBuilder {
    title: String,
}

impl ReportModelBuilder {
    pub fn new() -> Self {
        Self {
            title: MAIN_TITLE.to_string(),
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn build(
        &self,
        holder: &CallGraphHolder,
        kind_filter: Option<&str>,
        content_type_filter: Option<&str>,
    ) -> TableModel {
        let mut model = TableModel::new();

        model.push(Row::title(&self.title));
        model.push(Row::info("Buckets", &join_set(holder.bucket_set())));
        model.push(Row::info("Objects", &join_set(holder.object_set())));
        model.push(Row::info(
            "Kind filter",
            kind_filter.unwrap_or(NOT_SPECIFIED),
        ));
        model.push(Row::info(
            "Content type filter",
            content_type_filter.unwrap_or(NOT_SPECIFIED),
        ));
        model.push(Row::column_header(&COLUMNS));

        for endpoints in holder.edges() {
            // Both indices were handed out by this holder, so the weights
            // are always present.
            let (Some(calling), Some(called)) =
                (holder.node(endpoints.from), holder.node(endpoints.to))
            else {
                continue;
            };
            model.push(Row::dependency(vec![
                calling.bucket_name.clone(),
                calling.object_name.clone(),
                calling.kind.clone(),
                called.bucket_name.clone(),
                called.object_name.clone(),
                called.kind.clone(),
                if called.exists {
                    STATUS_OK.to_string()
                } else {
                    STATUS_MISSING.to_string()
                },
            ]));
        }

        model
    }
}

impl Default for ReportModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn join_set(values: std::collections::BTreeSet<String>) -> String {
    if values.is_empty() {
        return "-".to_string();
    }
    values.into_iter().collect::<Vec<_>>().join(", ")
}
