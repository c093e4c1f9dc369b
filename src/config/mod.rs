pub mod demo;
pub mod pipeline;

pub use demo::{load_config, DatasetConfig, DemoConfig, OutputConfig};
pub use pipeline::{ClassifierParams, PcaParams, PipelineConfig};
