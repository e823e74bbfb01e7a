// Trend extraction and insight derivation over a raw market payload.
// Each stage reads the same payload independently; `analyzer` ties them together.

pub mod analyzer;
pub mod dom;
pub mod history;
pub mod insights;
pub mod trends;
pub mod velocity;

pub use analyzer::{AnalysisOutcome, MarketAnalyzer};
