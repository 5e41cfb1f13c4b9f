use crate::{
    design::PRESET_NAMES,
    generate,
    manifest::Manifest,
    png::validate_level,
    sink::{DirSink, IconSink},
    GeneratedIcon,
};
use anyhow::{Context, Result};
use std::path::PathBuf;

// Options the binary hands over after parsing the command line
#[derive(Debug, Clone)]
pub struct Args {
    pub output: PathBuf,
    pub manifest: Option<PathBuf>,
    pub design: Option<String>,
    pub png: Option<Vec<u32>>,
    pub level: Option<u8>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            output: PathBuf::from("./icons"),
            manifest: None,
            design: None,
            png: None,
            level: None,
        }
    }
}

pub fn generate_icons(args: Args) -> Result<Vec<GeneratedIcon>> {
    let manifest = select_manifest(&args)?;

    // Ensure the output directory exists
    std::fs::create_dir_all(&args.output).context("Can't create output directory")?;

    let mut sink = DirSink::new(&args.output);
    generate_into(&manifest, &mut sink)
}

/// Pick the icon set: an ad-hoc `--design`/`--png` request wins over
/// `--manifest`, which wins over the built-in packaging set.
fn select_manifest(args: &Args) -> Result<Manifest> {
    let mut manifest = match (&args.design, &args.png, &args.manifest) {
        (Some(design), sizes, _) => {
            let sizes = sizes.clone().unwrap_or_else(|| vec![512]);
            Manifest::for_sizes(design, &sizes)?
        }
        (None, Some(sizes), _) => Manifest::for_sizes("squircle_check", sizes)?,
        (None, None, Some(path)) => Manifest::load(path)
            .with_context(|| format!("Failed to load manifest {}", path.display()))?,
        (None, None, None) => Manifest::builtin().context("Built-in manifest is invalid")?,
    };

    if let Some(level) = args.level {
        validate_level(level)?;
        manifest.level = level;
    }
    Ok(manifest)
}

fn generate_into(manifest: &Manifest, sink: &mut dyn IconSink) -> Result<Vec<GeneratedIcon>> {
    println!("Generating {} icon(s)...", manifest.icons.len());
    let generated = generate(manifest, sink).context("Failed to generate icons")?;

    for icon in &generated {
        println!(
            "  ✓ Generated {} ({}x{}, {}, {} bytes)",
            icon.file.display(),
            icon.width,
            icon.height,
            icon.design,
            icon.bytes
        );
    }
    Ok(generated)
}

pub fn list_designs() {
    for name in PRESET_NAMES {
        println!("{name}");
    }
}
