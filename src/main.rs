use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use normalmap_flip_rs::image_pipeline::{
    ConversionMode, ConversionRequest, NormalMapPipeline, TiffCompression,
};
use normalmap_flip_rs::logger;

use tracing::info;

/// Flip the green (Y) channel of normal maps between OpenGL and DirectX
/// conventions, writing each result next to its source in the same format.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Top-level folder searched recursively for files named like "*normal*map*"
    root: PathBuf,

    /// Conversion direction label; both directions flip Y
    #[arg(long, value_enum, default_value_t = ConversionMode::OpenGlToDirectX)]
    mode: ConversionMode,

    /// Text inserted before the extension of every output (default: _DX or _GL by mode)
    #[arg(long)]
    suffix: Option<String>,

    /// Quality for JPEG outputs
    #[arg(long, default_value_t = 95, value_parser = clap::value_parser!(u8).range(1..=100))]
    jpeg_quality: u8,

    /// Compression for TIFF outputs
    #[arg(long, value_enum, default_value_t = TiffCompression::Lzw)]
    tiff_compression: TiffCompression,

    /// Use horizontal differencing for integer TIFF outputs
    #[arg(long, default_value_t = false)]
    tiff_predictor: bool,
}

fn main() -> anyhow::Result<()> {
    logger::init();
    let cli = Cli::parse();

    let mut builder = ConversionRequest::builder(&cli.root)
        .mode(cli.mode)
        .jpeg_quality(cli.jpeg_quality)
        .tiff_compression(cli.tiff_compression)
        .tiff_predictor(cli.tiff_predictor);
    if let Some(suffix) = cli.suffix {
        builder = builder.suffix(suffix);
    }

    let pipeline = NormalMapPipeline::new(builder.build())?;
    info!("Starting normal map conversion ({})", pipeline.request().mode);

    // Per-file failures are reported in the summary and never change the exit status.
    let summary = pipeline
        .run()
        .with_context(|| format!("cannot convert {}", cli.root.display()))?;
    summary.log_report();

    Ok(())
}
