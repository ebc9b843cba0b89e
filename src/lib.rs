//! # CALLMAP
//!
//! Call-graph construction and report rendering for versioned object catalogs.
//!
//! Callmap takes a list of catalog object metadata records, follows their
//! depends-on references (tolerating dangling ones), and renders the
//! resulting directed graph as a paginated tabular document or a graph image.
//!
//! ## Output Formats
//!
//! - **Table**: paginated plain-document report with aggregate headers
//! - **Image**: PNG raster drawing of the dependency graph
//! - **Dot**: GraphViz source for external layout engines

pub mod core;
pub mod render;
pub mod report;
