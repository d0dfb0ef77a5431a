//! Per-file outcomes and the run summary built from them

use std::fmt;
use std::path::PathBuf;

use tracing::{error, info, warn};

use crate::image_pipeline::common::error::ConversionError;
use crate::image_pipeline::conversions::timing::PipelineTimings;

/// Why a file was left alone without counting as a failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Name lacks the normal-map keywords or a supported extension
    FilenameMismatch,
    /// Stem already carries the configured suffix
    AlreadyConverted,
    UnsupportedFormat(String),
    /// Decoded image has this many channels but lacks red, green or blue
    MissingChannel(usize),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::FilenameMismatch => write!(f, "not a normal map name"),
            SkipReason::AlreadyConverted => write!(f, "already converted"),
            SkipReason::UnsupportedFormat(detail) => write!(f, "unsupported format ({detail})"),
            SkipReason::MissingChannel(channels) => {
                write!(f, "not an RGB image ({channels} channel(s))")
            }
        }
    }
}

/// Stage a conversion died in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    /// Root or suffix problems; these normally abort the run before any file
    Setup,
    Read,
    Decode,
    Encode,
    Write,
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureStage::Setup => "setup",
            FailureStage::Read => "read",
            FailureStage::Decode => "decode",
            FailureStage::Encode => "encode",
            FailureStage::Write => "write",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConversionResult {
    Converted {
        source: PathBuf,
        output: PathBuf,
    },
    Skipped {
        source: PathBuf,
        reason: SkipReason,
    },
    Failed {
        source: PathBuf,
        stage: FailureStage,
        reason: String,
    },
}

impl ConversionResult {
    /// Classifies a per-file error into a skip or a failure.
    pub fn from_error(source: PathBuf, err: ConversionError) -> Self {
        let stage = match err {
            ConversionError::UnsupportedFormat(detail) => {
                return ConversionResult::Skipped {
                    source,
                    reason: SkipReason::UnsupportedFormat(detail),
                };
            }
            ConversionError::MissingChannel(channels) => {
                return ConversionResult::Skipped {
                    source,
                    reason: SkipReason::MissingChannel(channels),
                };
            }
            ConversionError::InputReadError(_) => FailureStage::Read,
            ConversionError::DecodeError(_) => FailureStage::Decode,
            ConversionError::EncodeError(_) => FailureStage::Encode,
            ConversionError::OutputWriteError(_) | ConversionError::IoError(_) => FailureStage::Write,
            ConversionError::NotFound(_) | ConversionError::InvalidSuffix(_) => FailureStage::Setup,
        };

        ConversionResult::Failed {
            source,
            stage,
            reason: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FailureReport {
    pub source: PathBuf,
    pub stage: FailureStage,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkipReport {
    pub source: PathBuf,
    pub reason: SkipReason,
}

/// Totals for one run
#[derive(Debug, Default, Clone)]
pub struct ConversionSummary {
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Files whose names did not look like normal maps; not listed individually
    pub rejected: usize,
    pub skips: Vec<SkipReport>,
    pub failures: Vec<FailureReport>,
    pub timings: PipelineTimings,
}

impl ConversionSummary {
    pub fn record(&mut self, result: ConversionResult) {
        match result {
            ConversionResult::Converted { .. } => self.converted += 1,
            ConversionResult::Skipped {
                reason: SkipReason::FilenameMismatch,
                ..
            } => self.rejected += 1,
            ConversionResult::Skipped { source, reason } => {
                self.skipped += 1;
                self.skips.push(SkipReport { source, reason });
            }
            ConversionResult::Failed {
                source,
                stage,
                reason,
            } => {
                self.failed += 1;
                self.failures.push(FailureReport {
                    source,
                    stage,
                    reason,
                });
            }
        }
    }

    /// Candidates that reached the pipeline, i.e. everything but rejected names.
    pub fn candidates(&self) -> usize {
        self.converted + self.skipped + self.failed
    }

    pub fn log_report(&self) {
        if self.candidates() == 0 {
            warn!("No matching normal map files found (file names must contain both 'normal' and 'map')");
        }

        info!(
            converted = self.converted,
            skipped = self.skipped,
            failed = self.failed,
            "Done: {} converted, {} skipped, {} failed",
            self.converted,
            self.skipped,
            self.failed
        );

        for skip in &self.skips {
            info!("  skipped {}: {}", skip.source.display(), skip.reason);
        }
        for failure in &self.failures {
            error!(
                "  failed {} at {}: {}",
                failure.source.display(),
                failure.stage,
                failure.reason
            );
        }

        self.timings.log_summary();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_class_errors_are_skips() {
        let result = ConversionResult::from_error(
            PathBuf::from("a_normal_map.png"),
            ConversionError::MissingChannel(1),
        );
        assert!(matches!(
            result,
            ConversionResult::Skipped {
                reason: SkipReason::MissingChannel(1),
                ..
            }
        ));
    }

    #[test]
    fn test_failures_carry_stage_and_reason() {
        let result = ConversionResult::from_error(
            PathBuf::from("a_normal_map.png"),
            ConversionError::DecodeError("truncated".to_string()),
        );
        let ConversionResult::Failed { stage, reason, .. } = result else {
            panic!("expected failure");
        };
        assert_eq!(stage, FailureStage::Decode);
        assert!(reason.contains("truncated"));
    }

    #[test]
    fn test_setup_errors_are_not_write_failures() {
        for err in [
            ConversionError::NotFound(PathBuf::from("gone")),
            ConversionError::InvalidSuffix(String::new()),
        ] {
            let result = ConversionResult::from_error(PathBuf::from("a_normal_map.png"), err);
            assert!(matches!(
                result,
                ConversionResult::Failed {
                    stage: FailureStage::Setup,
                    ..
                }
            ));
        }

        let result = ConversionResult::from_error(
            PathBuf::from("a_normal_map.png"),
            ConversionError::OutputWriteError("disk full".to_string()),
        );
        assert!(matches!(
            result,
            ConversionResult::Failed {
                stage: FailureStage::Write,
                ..
            }
        ));
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = ConversionSummary::default();
        summary.record(ConversionResult::Converted {
            source: PathBuf::from("a_normal_map.png"),
            output: PathBuf::from("a_normal_map_DX.png"),
        });
        summary.record(ConversionResult::Skipped {
            source: PathBuf::from("albedo.png"),
            reason: SkipReason::FilenameMismatch,
        });
        summary.record(ConversionResult::Skipped {
            source: PathBuf::from("a_normal_map_DX.png"),
            reason: SkipReason::AlreadyConverted,
        });
        summary.record(ConversionResult::Failed {
            source: PathBuf::from("b_normal_map.png"),
            stage: FailureStage::Write,
            reason: "disk full".to_string(),
        });

        assert_eq!(
            (summary.converted, summary.skipped, summary.failed, summary.rejected),
            (1, 1, 1, 1)
        );
        assert_eq!(summary.candidates(), 3);
        assert_eq!(summary.failures[0].reason, "disk full");
        assert_eq!(summary.skips[0].reason, SkipReason::AlreadyConverted);
    }
}
