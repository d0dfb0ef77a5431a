//! Candidate discovery module
//!
//! Walks a directory tree and decides which files look like normal maps.

mod candidate_filter;
mod path_scanner;

pub use candidate_filter::CandidateFilter;
pub use path_scanner::PathScanner;
