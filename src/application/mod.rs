pub mod pipeline;

pub use pipeline::{OperationPipeline, PipelineConfig, PipelineRun, PipelineState};
