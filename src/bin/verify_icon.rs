use anyhow::{Context, Result};
use icon_synth::png::{read_chunks, COLOR_TYPE_RGBA};

fn main() -> Result<()> {
    let paths: Vec<String> = std::env::args().skip(1).collect();
    anyhow::ensure!(!paths.is_empty(), "usage: verify-icon <PNG>...");

    let mut failures = 0;
    for path in &paths {
        match verify(path) {
            Ok(()) => println!("✓ {path}"),
            Err(err) => {
                failures += 1;
                println!("✗ {path}: {err:#}");
            }
        }
    }

    anyhow::ensure!(failures == 0, "{failures} of {} file(s) failed verification", paths.len());
    Ok(())
}

fn verify(path: &str) -> Result<()> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {path}"))?;

    println!("Checking chunks in: {path}");
    let chunks = read_chunks(&bytes)?;
    for chunk in &chunks {
        println!("  {} {:>8} bytes  crc {:#010x}", chunk.kind_str(), chunk.data.len(), chunk.crc());
    }

    let kinds: Vec<&str> = chunks.iter().map(|c| c.kind_str()).collect();
    anyhow::ensure!(
        kinds == ["IHDR", "IDAT", "IEND"],
        "expected IHDR, IDAT, IEND but found {kinds:?}"
    );
    let ihdr = &chunks[0].data;
    anyhow::ensure!(ihdr.len() == 13, "IHDR must be 13 bytes, found {}", ihdr.len());
    anyhow::ensure!(
        ihdr[8] == 8 && ihdr[9] == COLOR_TYPE_RGBA,
        "expected 8-bit RGBA, found bit depth {} color type {}",
        ihdr[8],
        ihdr[9]
    );

    let img = image::load_from_memory(&bytes)
        .context("Failed to decode image")?
        .to_rgba8();
    let transparent = img.pixels().filter(|p| p[3] == 0).count();

    println!("Image dimensions: {}x{}", img.width(), img.height());
    println!("  {transparent} of {} pixels fully transparent", img.width() * img.height());
    Ok(())
}
