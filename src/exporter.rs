//! Fixture exporter: drop skipped test cases, write the rest as JSON.
//!
//! A record is exported iff it has no top-level `skip` key. The value of the
//! key is not inspected, so `"skip": false` still excludes the record.
//! Survivors keep their relative order and are written as one pretty-printed
//! JSON array, replacing whatever was at the destination before.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::OutputConfig;
use crate::encode::{self, FallbackEncoder, JsonLayout, NullFallback};
use crate::error::ExportError;
use crate::record::TestCaseRecord;

/// Outcome of a successful export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    pub total: usize,
    pub skipped: usize,
    pub exported: usize,
    pub destination: PathBuf,
}

/// Filters test cases and serializes them to disk.
pub struct FixtureExporter {
    fallback: Box<dyn FallbackEncoder>,
    layout: JsonLayout,
}

impl Default for FixtureExporter {
    fn default() -> Self {
        Self {
            fallback: Box::new(NullFallback),
            layout: JsonLayout::default(),
        }
    }
}

impl FixtureExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self {
            fallback: config.opaque_values.encoder(),
            layout: config.layout(),
        }
    }

    pub fn with_fallback(mut self, fallback: Box<dyn FallbackEncoder>) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_layout(mut self, layout: JsonLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Render the exportable records to a string, exactly as `export` writes them.
    pub fn render<'a, I>(&self, records: I) -> Result<String, ExportError>
    where
        I: IntoIterator<Item = &'a TestCaseRecord>,
    {
        let kept = retain_exportable(records);
        let mut out = Vec::new();
        encode::write_document(&mut out, &kept, self.fallback.as_ref(), self.layout)?;
        String::from_utf8(out).map_err(|err| ExportError::Serialization {
            reason: err.to_string(),
        })
    }

    /// Write every record without a `skip` key to `destination`.
    ///
    /// The parent directory must already exist. An existing file is
    /// overwritten; a failure part way through may leave a truncated file.
    pub fn export<'a, I>(
        &self,
        records: I,
        destination: &Path,
    ) -> Result<ExportSummary, ExportError>
    where
        I: IntoIterator<Item = &'a TestCaseRecord>,
    {
        let mut total = 0usize;
        let kept = retain_exportable(records.into_iter().inspect(|_| total += 1));
        let skipped = total - kept.len();

        let file = File::create(destination).map_err(|err| ExportError::output(destination, err))?;
        let mut writer = BufWriter::new(file);
        encode::write_document(&mut writer, &kept, self.fallback.as_ref(), self.layout).map_err(
            |err| {
                if err.is_io() {
                    ExportError::output(destination, err)
                } else {
                    ExportError::from(err)
                }
            },
        )?;
        writer
            .flush()
            .map_err(|err| ExportError::output(destination, err))?;

        tracing::info!(
            destination = %destination.display(),
            total,
            skipped,
            exported = kept.len(),
            "exported test cases"
        );

        Ok(ExportSummary {
            total,
            skipped,
            exported: kept.len(),
            destination: destination.to_path_buf(),
        })
    }
}

/// True when `record` must be left out of the export.
pub fn is_skipped(record: &TestCaseRecord) -> bool {
    record.is_skipped()
}

/// Records without a `skip` key, in their original order.
pub fn retain_exportable<'a, I>(records: I) -> Vec<&'a TestCaseRecord>
where
    I: IntoIterator<Item = &'a TestCaseRecord>,
{
    records
        .into_iter()
        .filter(|record| {
            let skip = is_skipped(record);
            if skip {
                tracing::debug!(url = ?record.get("url"), "skipping test case");
            }
            !skip
        })
        .collect()
}

/// Export with the default layout and null fallback.
pub fn export<'a, I>(records: I, destination: &Path) -> Result<ExportSummary, ExportError>
where
    I: IntoIterator<Item = &'a TestCaseRecord>,
{
    FixtureExporter::default().export(records, destination)
}

#[cfg(test)]
mod tests;
