//! Icon manifest: which files to produce, at what size, with which design
//!
//! ```json
//! {
//!   "level": 9,
//!   "icons": [
//!     { "file": "icon.png", "size": 512, "design": "squircle_check" },
//!     { "file": "tray.png", "width": 22, "height": 22, "design": {
//!         "background": { "kind": "solid", "color": "rgba(0, 0, 0, 0)" },
//!         "glyphs": [ ... ]
//!     } }
//!   ]
//! }
//! ```

use crate::design::Design;
use crate::error::{IconError, Result};
use crate::png::{validate_level, DEFAULT_LEVEL};
use crate::sink::validate_relative;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// The desktop app's packaging set.
const DEFAULT_MANIFEST: &str = r#"
{
  "icons": [
    { "file": "32x32.png", "size": 32, "design": "squircle_check" },
    { "file": "128x128.png", "size": 128, "design": "squircle_check" },
    { "file": "128x128@2x.png", "size": 256, "design": "squircle_check" },
    { "file": "icon.png", "size": 512, "design": "squircle_check" },
    { "file": "icon-menubar.png", "width": 22, "height": 22, "design": "menubar_check" }
  ]
}
"#;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Deflate effort, 0..=10.
    #[serde(default = "default_level")]
    pub level: u8,
    pub icons: Vec<IconEntry>,
}

fn default_level() -> u8 {
    DEFAULT_LEVEL
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IconEntry {
    /// Output path, relative to the sink's root.
    pub file: PathBuf,
    /// Square size; ignored when both `width` and `height` are set.
    #[serde(default)]
    pub size: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    pub design: DesignRef,
}

/// Either a preset name or a full inline design.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DesignRef {
    Preset(String),
    Inline(Design),
}

impl DesignRef {
    pub fn resolve(&self) -> Result<Design> {
        match self {
            DesignRef::Preset(name) => Design::preset(name),
            DesignRef::Inline(design) => Ok(design.clone()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            DesignRef::Preset(name) => name,
            DesignRef::Inline(_) => "inline",
        }
    }
}

impl IconEntry {
    pub fn square(file: impl Into<PathBuf>, size: u32, design: &str) -> Self {
        Self {
            file: file.into(),
            size: Some(size),
            width: None,
            height: None,
            design: DesignRef::Preset(design.to_string()),
        }
    }

    /// Resolve `width`/`height`, falling back to `size` for whichever is missing.
    pub fn dimensions(&self) -> Result<(u32, u32)> {
        match (self.width.or(self.size), self.height.or(self.size)) {
            (Some(width), Some(height)) => Ok((width, height)),
            (width, height) => Err(IconError::InvalidDimensions {
                width: width.unwrap_or(0),
                height: height.unwrap_or(0),
            }),
        }
    }
}

impl Manifest {
    pub fn builtin() -> Result<Manifest> {
        Self::from_json(DEFAULT_MANIFEST)
    }

    pub fn from_json(json: &str) -> Result<Manifest> {
        let manifest: Manifest = serde_json::from_str(json)?;
        validate_level(manifest.level)?;
        for entry in &manifest.icons {
            validate_relative(&entry.file)?;
        }
        Ok(manifest)
    }

    pub fn load(path: &Path) -> Result<Manifest> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// One `<size>x<size>.png` entry per size, all using the named preset.
    pub fn for_sizes(design: &str, sizes: &[u32]) -> Result<Manifest> {
        Design::preset(design)?;
        Ok(Manifest {
            level: DEFAULT_LEVEL,
            icons: sizes
                .iter()
                .map(|&size| IconEntry::square(format!("{size}x{size}.png"), size, design))
                .collect(),
        })
    }
}
