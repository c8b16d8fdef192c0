//! Where test case records come from.
//!
//! The exporter takes records as a parameter; a [`RecordSource`] is what
//! produces them. [`EmbeddedSource`] reads an extractor's static table,
//! [`JsonFileSource`] re-reads a JSON dump from disk.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::ExportError;
use crate::extractors;
use crate::record::TestCaseRecord;

/// Provider of a test case collection.
pub trait RecordSource {
    /// Short label used in logs and error messages.
    fn describe(&self) -> String;

    fn load(&self) -> Result<Cow<'_, [TestCaseRecord]>, ExportError>;
}

/// Test table embedded for a named extractor.
#[derive(Debug, Clone)]
pub struct EmbeddedSource {
    extractor: String,
}

impl EmbeddedSource {
    pub fn new(extractor: impl Into<String>) -> Self {
        Self {
            extractor: extractor.into(),
        }
    }
}

impl Default for EmbeddedSource {
    fn default() -> Self {
        Self::new(extractors::DEFAULT_EXTRACTOR)
    }
}

impl RecordSource for EmbeddedSource {
    fn describe(&self) -> String {
        format!("extractor {}", self.extractor)
    }

    fn load(&self) -> Result<Cow<'_, [TestCaseRecord]>, ExportError> {
        extractors::test_cases(&self.extractor)
            .map(Cow::Borrowed)
            .ok_or_else(|| ExportError::UnknownExtractor {
                name: self.extractor.clone(),
            })
    }
}

/// JSON array of test case objects on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for JsonFileSource {
    fn describe(&self) -> String {
        self.path().display().to_string()
    }

    fn load(&self) -> Result<Cow<'_, [TestCaseRecord]>, ExportError> {
        let contents = fs::read_to_string(self.path())
            .map_err(|err| ExportError::input(self.describe(), err))?;
        let records = records_from_json(&contents).map_err(|err| match err {
            ExportError::InputUnavailable { reason, .. } => {
                ExportError::input(self.describe(), reason)
            }
            other => other,
        })?;
        tracing::debug!(
            path = %self.path().display(),
            count = records.len(),
            "loaded test cases from file"
        );
        Ok(Cow::Owned(records))
    }
}

/// Parse a JSON document holding an array of objects into records.
pub fn records_from_json(contents: &str) -> Result<Vec<TestCaseRecord>, ExportError> {
    let value: Value =
        serde_json::from_str(contents).map_err(|err| ExportError::input("JSON document", err))?;
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(ExportError::input(
                "JSON document",
                format!("expected an array of test cases, found {}", json_kind(&other)),
            ))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(object) => Ok(TestCaseRecord::from_json_object(object)),
            other => Err(ExportError::InvalidRecord {
                index,
                reason: format!("found {}", json_kind(&other)),
            }),
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
