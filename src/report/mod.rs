pub mod builder;
pub mod document;
pub mod fonts;
pub mod table;

pub use builder::{ReportModelBuilder, MAIN_TITLE, NOT_SPECIFIED, STATUS_MISSING, STATUS_OK};
pub use document::DocumentRenderer;
pub use fonts::{FontConfig, FontSource, ResolvedFonts};
pub use table::{Row, RowStyle, TableModel};

use anyhow::{Context, Result};

use crate::core::catalog::{CatalogLookup, CatalogObjectMetadata};
use crate::core::resolver::DependencyResolver;

/// Full tabular pipeline for one request: resolve the call graph, project it
/// to a table model, render a paginated document. Any rendering failure is
/// surfaced as one wrapped error and no partial output is returned.
pub fn generate_call_graph_report(
    objects: &[CatalogObjectMetadata],
    lookup: &dyn CatalogLookup,
    kind_filter: Option<&str>,
    content_type_filter: Option<&str>,
    fonts: &FontConfig,
) -> Result<Vec<u8>> {
    let holder = DependencyResolver::new()
        .build_call_graph(objects, lookup)
        .context("call graph report generation failed")?;
    let model = ReportModelBuilder::new().build(&holder, kind_filter, content_type_filter);
    DocumentRenderer::new()
        .render(&model, &fonts.resolve())
        .context("call graph report generation failed")
}
