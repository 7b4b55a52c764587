pub mod extraction;
pub mod adjustment;
pub mod processor; // Scan orchestrator: pages → raw record → adjusted outcome

pub use processor::{PipelineReport, ScanPipeline};
