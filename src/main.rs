use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

mod core;
mod render;
mod report;

use crate::core::{CatalogObjectMetadata, Field, InMemoryCatalog, WhereClause};
use crate::render::{DotBackend, ImageReportDriver, RasterBackend};
use crate::report::{generate_call_graph_report, FontConfig};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "callmap",
    version = "0.1.0",
    author = "callmap developers",
    about = "Dependency call-graph reports for versioned object catalogs"
)]
struct Cli {
    /// JSON catalog dump (array of catalog object metadata records)
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Output file path
    #[arg(short, long, value_name = "FILE", default_value = "callgraph.txt")]
    output: PathBuf,

    /// Output format: table, image, dot
    #[arg(short, long, value_name = "FORMAT", value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Comma-separated list of authorized bucket names (default: all)
    #[arg(short, long, value_name = "BUCKETS", value_delimiter = ',')]
    buckets: Vec<String>,

    /// Only include objects of this kind
    #[arg(short, long, value_name = "KIND")]
    kind: Option<String>,

    /// Only include objects with this content type
    #[arg(short = 't', long, value_name = "TYPE")]
    content_type: Option<String>,

    /// TTF font for the table report (regular face)
    #[arg(long, value_name = "FILE")]
    font: Option<PathBuf>,

    /// TTF font for the table report (bold face)
    #[arg(long, value_name = "FILE")]
    font_bold: Option<PathBuf>,

    /// TTF font for the table report (italic face)
    #[arg(long, value_name = "FILE")]
    font_italic: Option<PathBuf>,

    /// TTF font for the table report (bold italic face)
    #[arg(long, value_name = "FILE")]
    font_bold_italic: Option<PathBuf>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum OutputFormat {
    Table,
    Image,
    Dot,
}

impl OutputFormat {
    fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Image => "image",
            OutputFormat::Dot => "dot",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let start_time = Instant::now();

    println!("CALLMAP - Catalog Call Graph Reports");
    println!("Input: {}", cli.input.display());
    println!("Output: {}", cli.output.display());
    println!("Format: {}", cli.format.as_str());

    let raw = fs::read_to_string(&cli.input)
        .with_context(|| format!("reading catalog dump {}", cli.input.display()))?;
    let objects: Vec<CatalogObjectMetadata> =
        serde_json::from_str(&raw).context("parsing catalog dump")?;
    println!("Loaded {} catalog objects", objects.len());

    // The lookup sees the whole dump; the graph is built only over the
    // selected objects, so out-of-scope targets still resolve as existing.
    let lookup = InMemoryCatalog::from_objects(&objects);
    let selected = select_objects(&objects, &cli);
    println!("Selected {} objects after filtering", selected.len());

    let fonts = FontConfig {
        regular: cli.font.clone(),
        bold: cli.font_bold.clone(),
        italic: cli.font_italic.clone(),
        bold_italic: cli.font_bold_italic.clone(),
    };

    match cli.format {
        OutputFormat::Table => {
            let bytes = generate_call_graph_report(
                &selected,
                &lookup,
                cli.kind.as_deref(),
                cli.content_type.as_deref(),
                &fonts,
            )?;
            fs::write(&cli.output, bytes)
                .with_context(|| format!("writing report to {}", cli.output.display()))?;
        }
        OutputFormat::Image => {
            let driver = ImageReportDriver::new(RasterBackend::new());
            let written = driver.generate(&selected, &lookup, &fonts, &cli.output)?;
            println!("Image size: {written} bytes");
        }
        OutputFormat::Dot => {
            let driver = ImageReportDriver::new(DotBackend::new());
            driver.generate(&selected, &lookup, &fonts, &cli.output)?;
        }
    }

    println!("Generated {}", cli.output.display());
    println!(
        "Total execution time: {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}

/// Apply bucket/kind/content-type selection as a where-clause over the dump.
fn select_objects(objects: &[CatalogObjectMetadata], cli: &Cli) -> Vec<CatalogObjectMetadata> {
    let mut clauses = Vec::new();

    if !cli.buckets.is_empty() {
        clauses.push(WhereClause::Or(
            cli.buckets
                .iter()
                .map(|bucket| WhereClause::eq(Field::BucketName, bucket.trim()))
                .collect(),
        ));
    }
    if let Some(kind) = &cli.kind {
        clauses.push(WhereClause::eq(Field::Kind, kind));
    }
    if let Some(content_type) = &cli.content_type {
        clauses.push(WhereClause::eq(Field::ContentType, content_type));
    }

    WhereClause::And(clauses).filter(objects)
}
