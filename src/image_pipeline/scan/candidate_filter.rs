use std::path::Path;

use crate::image_pipeline::codec::TextureFormat;

/// Filename heuristic that picks out normal maps.
///
/// Both keywords are required so that albedo or roughness maps that happen to
/// contain one of them are left alone. Only the file stem is inspected, never
/// the parent directories.
pub struct CandidateFilter;

impl CandidateFilter {
    pub const KEYWORDS: [&'static str; 2] = ["normal", "map"];

    pub fn is_candidate(path: &Path) -> bool {
        let has_supported_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(TextureFormat::from_extension)
            .is_some();

        has_supported_extension && Self::stem_matches(path)
    }

    fn stem_matches(path: &Path) -> bool {
        let Some(stem) = path.file_stem() else {
            return false;
        };
        let stem = stem.to_string_lossy().to_lowercase();
        Self::KEYWORDS.iter().all(|keyword| stem.contains(keyword))
    }

    /// True when the stem already ends with `suffix` (case-insensitive), i.e.
    /// the file is the output of an earlier run with the same suffix.
    pub fn has_suffix(path: &Path, suffix: &str) -> bool {
        if suffix.is_empty() {
            return false;
        }
        path.file_stem()
            .map(|stem| {
                stem.to_string_lossy()
                    .to_lowercase()
                    .ends_with(&suffix.to_lowercase())
            })
            .unwrap_or(false)
    }
}
