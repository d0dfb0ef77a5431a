use std::path::{Path, PathBuf};

use tracing::{debug, error, info, instrument, warn};

use crate::image_pipeline::{
    codec::{ImageCodec, TextureFormat, TextureReader, TextureWriter},
    common::error::{ConversionError, Result},
    conversions::summary::{ConversionResult, ConversionSummary, SkipReason},
    conversions::timing::{PipelineTimings, Timer},
    conversions::types::ConversionRequest,
    flip::ChannelFlipper,
    output::OutputNamer,
    scan::{CandidateFilter, PathScanner},
};

/// Converts every normal map below a root directory, one file at a time.
pub struct NormalMapPipeline<R: TextureReader, W: TextureWriter> {
    reader: R,
    writer: W,
    namer: OutputNamer,
    request: ConversionRequest,
}

impl NormalMapPipeline<ImageCodec, ImageCodec> {
    pub fn new(request: ConversionRequest) -> Result<Self> {
        let codec = ImageCodec::new(request.encode_options());
        Self::with_custom(codec.clone(), codec, request)
    }
}

impl<R: TextureReader, W: TextureWriter> NormalMapPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, request: ConversionRequest) -> Result<Self> {
        let namer = OutputNamer::new(request.suffix.clone())?;
        Ok(Self {
            reader,
            writer,
            namer,
            request,
        })
    }

    pub fn request(&self) -> &ConversionRequest {
        &self.request
    }

    /// Walks the request root and converts every candidate.
    ///
    /// Only a missing root aborts the run; per-file problems are recorded in
    /// the summary and the walk moves on.
    #[instrument(skip(self), fields(root = %self.request.root.display(), mode = %self.request.mode))]
    pub fn run(&self) -> Result<ConversionSummary> {
        let scanner = PathScanner::new(&self.request.root)?;
        info!(
            "Converting normal maps under {} (mode={}, suffix={})",
            scanner.root().display(),
            self.request.mode,
            self.request.suffix
        );

        let mut summary = ConversionSummary::default();
        for path in scanner.scan() {
            let result = self.process_file(&path, &mut summary.timings);
            summary.record(result);
        }

        Ok(summary)
    }

    /// Runs one path through filtering and conversion, never failing.
    pub fn process_file(&self, source: &Path, timings: &mut PipelineTimings) -> ConversionResult {
        if !CandidateFilter::is_candidate(source) {
            return ConversionResult::Skipped {
                source: source.to_path_buf(),
                reason: SkipReason::FilenameMismatch,
            };
        }

        if CandidateFilter::has_suffix(source, self.namer.suffix()) {
            debug!("Skipping {}: already converted", source.display());
            return ConversionResult::Skipped {
                source: source.to_path_buf(),
                reason: SkipReason::AlreadyConverted,
            };
        }

        match self.convert_file_with_timings(source, timings) {
            Ok(output) => {
                info!("  - {} -> {}", source.display(), output.display());
                ConversionResult::Converted {
                    source: source.to_path_buf(),
                    output,
                }
            }
            Err(e) if e.is_skip() => {
                warn!("Skipping {}: {}", source.display(), e);
                ConversionResult::from_error(source.to_path_buf(), e)
            }
            Err(e) => {
                error!("Conversion failed for {}: {}", source.display(), e);
                ConversionResult::from_error(source.to_path_buf(), e)
            }
        }
    }

    /// Converts a single file regardless of its name and returns the output path.
    pub fn convert_file<P: AsRef<Path>>(&self, source: P) -> Result<PathBuf> {
        let mut timings = PipelineTimings::new();
        self.convert_file_with_timings(source.as_ref(), &mut timings)
    }

    #[instrument(skip_all, fields(source = %source.display()))]
    pub fn convert_file_with_timings(
        &self,
        source: &Path,
        timings: &mut PipelineTimings,
    ) -> Result<PathBuf> {
        let format = TextureFormat::from_path(source)?;
        let output = self.namer.output_path(source)?;

        let timer = Timer::start("read");
        let data = std::fs::read(source).map_err(|e| {
            ConversionError::InputReadError(format!("{}: {}", source.display(), e))
        })?;
        timer.stop(timings);

        let timer = Timer::start("decode");
        let mut image = self.reader.read_texture(&data, format)?;
        timer.stop(timings);

        let timer = Timer::start("flip");
        ChannelFlipper::flip_green(&mut image)?;
        timer.stop(timings);

        let timer = Timer::start("encode");
        let bytes = self.writer.write_texture(image, format)?;
        timer.stop(timings);

        let timer = Timer::start("write");
        self.namer.write(source, &output, &bytes)?;
        timer.stop(timings);

        Ok(output)
    }
}
