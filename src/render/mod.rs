pub mod dot;
pub mod raster;

pub use dot::DotBackend;
pub use raster::RasterBackend;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::core::catalog::{CatalogLookup, CatalogObjectMetadata};
use crate::core::graph::{CallGraphHolder, GraphNode};
use crate::core::resolver::DependencyResolver;
use crate::report::fonts::{FontConfig, ResolvedFonts};

/// Turns a completed call graph into one image artifact.
///
/// Backends must label nodes as `bucket/name (kind)`, style unresolved nodes
/// distinctly, and preserve edge direction. Node positioning is entirely the
/// backend's concern. Fonts arrive already resolved; a backend that cannot
/// load font files draws with its built-in face, which is exactly the
/// fallback the resolution step produces for missing paths.
pub trait GraphImageBackend {
    fn render(&self, holder: &CallGraphHolder, fonts: &ResolvedFonts) -> Result<Vec<u8>>;

    /// File extension of the produced artifact, without the dot.
    fn extension(&self) -> &'static str;
}

/// Canonical node label shared by all backends.
pub fn node_label(node: &GraphNode) -> String {
    format!(
        "{}/{} ({})",
        node.bucket_name, node.object_name, node.kind
    )
}

/// Drives graph construction and image rendering for one request.
///
/// The artifact is written through a sibling temp file and renamed into
/// place, so a failure at any stage leaves no partial file behind.
pub struct ImageReportDriver<B: GraphImageBackend> {
    resolver: DependencyResolver,
    backend: B,
}

impl<B: GraphImageBackend> ImageReportDriver<B> {
    pub fn new(backend: B) -> Self {
        Self {
            resolver: DependencyResolver::new(),
            backend,
        }
    }

    /// Build the call graph over `objects` and write the rendered image to
    /// `output`. Returns the number of bytes written.
    pub fn generate(
        &self,
        objects: &[CatalogObjectMetadata],
        lookup: &dyn CatalogLookup,
        fonts: &FontConfig,
        output: &Path,
    ) -> Result<usize> {
        let holder = self
            .resolver
            .build_call_graph(objects, lookup)
            .context("call graph image generation failed")?;
        self.write_graph(&holder, &fonts.resolve(), output)
    }

    /// Render an already-built graph to `output`.
    pub fn write_graph(
        &self,
        holder: &CallGraphHolder,
        fonts: &ResolvedFonts,
        output: &Path,
    ) -> Result<usize> {
        let bytes = self
            .backend
            .render(holder, fonts)
            .context("call graph image generation failed")?;

        let tmp = output.with_extension(format!("{}.tmp", self.backend.extension()));
        fs::write(&tmp, &bytes)
            .and_then(|()| fs::rename(&tmp, output))
            .map_err(|err| {
                // Failed rename must not leave the temp file around either.
                let _ = fs::remove_file(&tmp);
                err
            })
            .with_context(|| format!("writing call graph image to {}", output.display()))?;
        Ok(bytes.len())
    }
}
