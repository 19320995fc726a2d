pub mod analysis;
pub mod config;
pub mod error;
pub mod ingest;
pub mod report;
pub mod responses;
pub mod transcript;
pub mod utils;

pub use analysis::{AnalysisResult, analyze, analyze_messages};
pub use config::{AnalysisConfig, Config, Objective};
pub use error::{Result, SignalLabError};
pub use transcript::{Message, parse_transcript};
