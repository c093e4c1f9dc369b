//! Run diagnostics: per-stage timings and the serializable pipeline report.

pub mod report;
pub mod timing;

pub use report::{BankDescriptor, ClassSummary, InputDescriptor, PipelineReport};
pub use timing::{elapsed_ms, StageTiming, TimingBreakdown};
