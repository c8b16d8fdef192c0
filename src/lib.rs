// Fixture Exporter - extractor test tables to JSON fixtures
// Filters skipped test cases and writes the rest as a pretty-printed document

// Module declarations
pub mod config;
pub mod encode;
pub mod error;
pub mod exporter;
pub mod extractors;
pub mod fixtures;
pub mod record;
pub mod source;

// Re-exports for convenience
pub use error::{ErrorCode, ExportError};
pub use exporter::{export, ExportSummary, FixtureExporter};
pub use record::{CaseMap, CaseValue, OpaqueValue, TestCaseRecord};
pub use source::{EmbeddedSource, JsonFileSource, RecordSource};
