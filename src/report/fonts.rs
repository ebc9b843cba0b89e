use std::path::{Path, PathBuf};

/// The four font slots a report can override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSlot {
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

/// Where a slot's glyphs come from after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    /// Renderer's built-in default face.
    BuiltIn(&'static str),
    /// User-supplied font file, verified to exist.
    File(PathBuf),
}

/// Request-scoped font configuration.
///
/// Each slot may name a font file; a slot that is unset, or whose path does
/// not exist on disk, silently resolves to the built-in default instead of
/// failing the report. Nothing here touches process-global state, so
/// concurrent reports with different fonts cannot interfere.
#[derive(Debug, Clone, Default)]
pub struct FontConfig {
    pub regular: Option<PathBuf>,
    pub bold: Option<PathBuf>,
    pub italic: Option<PathBuf>,
    pub bold_italic: Option<PathBuf>,
}

/// Fully resolved fonts handed to a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFonts {
    pub regular: FontSource,
    pub bold: FontSource,
    pub italic: FontSource,
    pub bold_italic: FontSource,
}

impl FontConfig {
    pub fn resolve(&self) -> ResolvedFonts {
        ResolvedFonts {
            regular: resolve_slot(self.regular.as_deref(), "sans"),
            bold: resolve_slot(self.bold.as_deref(), "sans-bold"),
            italic: resolve_slot(self.italic.as_deref(), "sans-italic"),
            bold_italic: resolve_slot(self.bold_italic.as_deref(), "sans-bold-italic"),
        }
    }
}

fn resolve_slot(path: Option<&Path>, builtin: &'static str) -> FontSource {
    match path {
        Some(path) if path.exists() => FontSource::File(path.to_path_buf()),
        _ => FontSource::BuiltIn(builtin),
    }
}

impl ResolvedFonts {
    /// Display name of the regular face, used in the document trailer.
    pub fn regular_name(&self) -> String {
        match &self.regular {
            FontSource::BuiltIn(name) => (*name).to_string(),
            FontSource::File(path) => path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "custom".to_string()),
        }
    }
}
