//! Loader for exported fixture documents.
//!
//! This is the consumer side of the export: client test suites read the
//! written `tests.json` back into typed fixtures, ignore URL-only entries and
//! compare extracted metadata against the declared values. Declared strings
//! may carry a `md5:` or `re:` prefix instead of a literal value.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ExportError;

/// One exported test case, typed for consumers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractorFixture {
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,
    #[serde(default, deserialize_with = "nullable")]
    pub only_matching: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub info_dict: InfoDict,
}

impl ExtractorFixture {
    /// URL-only fixtures check URL matching and carry no metadata to verify.
    pub fn is_runnable(&self) -> bool {
        !self.only_matching
    }
}

/// Metadata an extractor is expected to produce for a fixture.
///
/// Counts are kept as raw JSON: exported type markers arrive as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfoDict {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub ext: String,
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub uploader: String,
    #[serde(deserialize_with = "nullable")]
    pub uploader_id: String,
    pub uploader_url: Option<String>,
    pub channel_id: Option<String>,
    pub channel_url: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub upload_date: String,
    pub description: Option<String>,
    #[serde(deserialize_with = "nullable_items")]
    pub categories: Vec<String>,
    #[serde(deserialize_with = "nullable_items")]
    pub tags: Vec<String>,
    pub duration: Option<u64>,
    pub view_count: Value,
    pub like_count: Value,
    pub dislike_count: Value,
    pub start_time: Option<u64>,
    pub end_time: Option<u64>,
}

/// Fixtures loaded from one exported document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixtureSet {
    pub source: Option<PathBuf>,
    pub fixtures: Vec<ExtractorFixture>,
}

impl FixtureSet {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ExportError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|err| ExportError::fixture(path.display().to_string(), err))?;
        let fixtures = parse_fixtures(&contents)
            .map_err(|err| ExportError::fixture(path.display().to_string(), err))?;
        Ok(Self {
            source: Some(path.to_path_buf()),
            fixtures,
        })
    }

    pub fn from_json(data: &str) -> Result<Self, ExportError> {
        let fixtures =
            parse_fixtures(data).map_err(|err| ExportError::fixture("<inline>", err))?;
        Ok(Self {
            source: None,
            fixtures,
        })
    }

    /// Fixtures with metadata to verify, in document order.
    pub fn runnable(&self) -> impl Iterator<Item = &ExtractorFixture> {
        self.fixtures.iter().filter(|fixture| fixture.is_runnable())
    }

    /// Fixture whose declared video id is `id`.
    pub fn find(&self, id: &str) -> Option<&ExtractorFixture> {
        self.fixtures.iter().find(|fixture| fixture.info_dict.id == id)
    }

    pub fn len(&self) -> usize {
        self.fixtures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixtures.is_empty()
    }
}

/// Treat an explicit `null` like a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// List whose entries may be `null`; null entries are dropped.
fn nullable_items<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Option::<Vec<Option<String>>>::deserialize(deserializer)?;
    Ok(items.into_iter().flatten().flatten().collect())
}

fn parse_fixtures(data: &str) -> serde_json::Result<Vec<ExtractorFixture>> {
    serde_json::from_str(data)
}

/// Declared value for a string field.
#[derive(Debug, Clone)]
pub enum Expectation {
    /// Lowercase hex MD5 digest of the actual value.
    Md5(String),
    /// Pattern the actual value must match.
    Pattern(Regex),
    Exact(String),
}

impl Expectation {
    pub fn parse(declared: &str) -> Result<Self, ExportError> {
        if let Some(digest) = declared.strip_prefix("md5:") {
            Ok(Expectation::Md5(digest.to_ascii_lowercase()))
        } else if let Some(pattern) = declared.strip_prefix("re:") {
            Regex::new(pattern)
                .map(Expectation::Pattern)
                .map_err(|err| ExportError::fixture(declared, err))
        } else {
            Ok(Expectation::Exact(declared.to_string()))
        }
    }

    pub fn matches(&self, actual: &str) -> bool {
        match self {
            Expectation::Md5(digest) => format!("{:x}", md5::compute(actual.as_bytes())) == *digest,
            Expectation::Pattern(pattern) => pattern.is_match(actual),
            Expectation::Exact(expected) => expected == actual,
        }
    }
}
