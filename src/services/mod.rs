pub mod exporter;
pub mod submitter;

pub use exporter::{ExportArtifact, ResultExporter};
pub use submitter::{BatchSubmitter, SubmissionResult};
