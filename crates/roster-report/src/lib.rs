//! Exports for a compiled roster: dataset JSON/CSV, validation report and
//! text summary.

pub mod dataset;
pub mod error;
pub mod export;
pub mod sink;
pub mod summary;

pub use dataset::{
    DatasetDocument, DatasetMetadata, FORMAT_VERSION, read_dataset_json, to_csv_bytes,
    to_json_bytes,
};
pub use error::{ExportError, Result};
pub use export::{ExportSummary, WrittenArtifact, export};
pub use sink::{ArtifactSink, DirectorySink};
pub use summary::render_summary;
