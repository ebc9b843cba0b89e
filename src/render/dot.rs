//! GraphViz DOT backend: lets an external graphviz toolchain draw the same
//! graph model the raster backend consumes.

use anyhow::Result;
use std::fmt::Write;

use crate::core::graph::CallGraphHolder;
use crate::render::{node_label, GraphImageBackend};
use crate::report::fonts::{FontSource, ResolvedFonts};

pub struct DotBackend {
    name: String,
}

impl DotBackend {
    pub fn new() -> Self {
        Self {
            name: "callgraph".to_string(),
        }
    }
}

impl Default for DotBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphImageBackend for DotBackend {
    fn render(&self, holder: &CallGraphHolder, fonts: &ResolvedFonts) -> Result<Vec<u8>> {
        let mut out = String::with_capacity(4096);
        writeln!(out, "digraph {} {{", sanitize_id(&self.name))?;
        writeln!(out, "  rankdir=\"LR\";")?;
        match &fonts.regular {
            FontSource::File(path) => {
                writeln!(
                    out,
                    "  node [shape=box, fontname=\"{}\"];",
                    escape_label(&path.to_string_lossy())
                )?;
            }
            FontSource::BuiltIn(_) => {
                writeln!(out, "  node [shape=box];")?;
            }
        }

        for (index, node) in holder
            .graph()
            .node_indices()
            .filter_map(|index| holder.node(index).map(|node| (index, node)))
        {
            let style = if node.exists {
                "style=\"filled\", fillcolor=\"lightblue\""
            } else {
                "style=\"dashed\", color=\"red\", fontcolor=\"red\""
            };
            writeln!(
                out,
                "  n{}[label=\"{}\", {}];",
                index.index(),
                escape_label(&node_label(node)),
                style
            )?;
        }

        for endpoints in holder.edges() {
            writeln!(
                out,
                "  n{} -> n{};",
                endpoints.from.index(),
                endpoints.to.index()
            )?;
        }

        writeln!(out, "}}")?;
        Ok(out.into_bytes())
    }

    fn extension(&self) -> &'static str {
        "dot"
    }
}

/// Replace anything that is not a valid DOT identifier character.
fn sanitize_id(input: &str) -> String {
    input
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Escape special characters for DOT labels.
fn escape_label(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
