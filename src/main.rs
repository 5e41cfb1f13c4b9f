use anyhow::Result;
use clap::Parser;
use icon_synth::icon_gen;
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Debug, Parser)]
#[clap(
    name = "icon-synth",
    about = "Render the app and menu-bar icons as PNG files"
)]
struct Args {
    /// Output directory.
    #[clap(short, long, value_name = "DIR", default_value = "./icons")]
    output: PathBuf,

    /// JSON manifest listing the icons to generate. Defaults to the built-in set.
    #[clap(short, long, value_name = "FILE")]
    manifest: Option<PathBuf>,

    /// Render a single preset design instead of a manifest.
    #[clap(short, long, value_name = "NAME")]
    design: Option<String>,

    /// PNG sizes to generate as <size>x<size>.png.
    #[clap(short, long, value_delimiter = ',', value_name = "SIZES")]
    png: Option<Vec<u32>>,

    /// Deflate compression level (0-10).
    #[clap(short, long, value_name = "LEVEL")]
    level: Option<u8>,

    /// Print the preset design names and exit
    #[clap(long)]
    list_designs: bool,

    /// Log rendering and encoding details
    #[clap(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        );

    tracing_subscriber::registry().with(console_layer).init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.list_designs {
        icon_gen::list_designs();
        return Ok(());
    }

    icon_gen::generate_icons(icon_gen::Args {
        output: args.output,
        manifest: args.manifest,
        design: args.design,
        png: args.png,
        level: args.level,
    })?;
    Ok(())
}
