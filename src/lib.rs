//! Procedural icon synthesis and a minimal PNG encoder.
//!
//! ```no_run
//! use icon_synth::{design::Design, render_png, png::DEFAULT_LEVEL};
//!
//! let bytes = render_png(&Design::squircle_check(), 512, 512, DEFAULT_LEVEL)?;
//! std::fs::write("icon.png", bytes)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod design;
pub mod error;
pub mod geometry;
pub mod icon_gen;
pub mod manifest;
pub mod png;
pub mod raster;
pub mod sink;

use design::PixelSource;
use error::Result;
use manifest::Manifest;
use raster::Raster;
use sink::IconSink;
use std::path::PathBuf;
use tracing::debug;

pub use error::IconError;

/// Evaluate a design over every pixel of a `width` x `height` image.
pub fn render<S: PixelSource + ?Sized>(source: &S, width: u32, height: u32) -> Result<Raster> {
    raster::synthesize(width, height, |x, y| source.color_at(x, y, width, height))
}

/// Render and encode in one step. Nothing is written anywhere.
pub fn render_png<S: PixelSource + ?Sized>(
    source: &S,
    width: u32,
    height: u32,
    level: u8,
) -> Result<Vec<u8>> {
    let raster = render(source, width, height)?;
    png::encode_raster(&raster, level)
}

/// What was produced for one manifest entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedIcon {
    pub file: PathBuf,
    pub design: String,
    pub width: u32,
    pub height: u32,
    pub bytes: usize,
}

/// Render every manifest entry and hand each PNG to `sink`.
///
/// An entry is fully encoded before anything is written for it, so a bad
/// entry never leaves a partial file behind.
pub fn generate(manifest: &Manifest, sink: &mut dyn IconSink) -> Result<Vec<GeneratedIcon>> {
    let mut generated = Vec::with_capacity(manifest.icons.len());
    for entry in &manifest.icons {
        let (width, height) = entry.dimensions()?;
        let design = entry.design.resolve()?;
        debug!(
            event = "render_icon",
            file = %entry.file.display(),
            design = entry.design.label(),
            width,
            height
        );

        let bytes = render_png(&design, width, height, manifest.level)?;
        sink.write(&entry.file, &bytes)?;

        generated.push(GeneratedIcon {
            file: entry.file.clone(),
            design: entry.design.label().to_string(),
            width,
            height,
            bytes: bytes.len(),
        });
    }
    Ok(generated)
}
