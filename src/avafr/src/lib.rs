#[macro_use]
extern crate log;

mod pipeline;
pub use pipeline::{PipelineConfig, PipelineCounts, PipelineOutput, ReadinessPipeline, score_prepared};

pub mod ingest;
pub mod report;
pub mod synthetic;

pub use avafr_db::DatabaseHandler;
