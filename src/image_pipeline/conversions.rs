//! Pipeline conversions module
//!
//! Orchestrates scanning, decoding, flipping and writing for a whole tree,
//! and aggregates the per-file outcomes into a summary.

mod normal_map;
mod summary;
mod timing;
pub mod types;


pub use normal_map::NormalMapPipeline;
pub use summary::{
    ConversionResult, ConversionSummary, FailureReport, FailureStage, SkipReason, SkipReport,
};
pub use timing::{PipelineTimings, StepTiming, Timer};
pub use types::{ConversionMode, ConversionRequest, ConversionRequestBuilder};
