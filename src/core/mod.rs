// Run configuration shared by the library and both binaries
pub mod config;

pub use config::{AnalysisOptions, ReportOptions};
