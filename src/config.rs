//! Configuration for fixture export runs
//!
//! Settings are read from an optional JSON file so output layout and the
//! source table can be changed without rebuilding. Every field has a default,
//! so a partial file (or none at all) is valid. Command-line flags override
//! whatever the file says.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::encode::{JsonLayout, OpaquePolicy};
use crate::extractors::DEFAULT_EXTRACTOR;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_PATH: &str = "fixture_exporter.json";

/// Exported document location, next to the crate's test data.
pub const DEFAULT_OUTPUT_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/tests.json");

/// Complete exporter configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExporterConfig {
    pub source: SourceConfig,
    pub output: OutputConfig,
}

/// Where test cases are read from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Embedded extractor table to export
    pub extractor: String,
    /// JSON dump to read instead of the embedded table
    pub input: Option<PathBuf>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            extractor: DEFAULT_EXTRACTOR.to_string(),
            input: None,
        }
    }
}

/// How and where the document is written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
    /// Spaces per nesting level
    pub indent_width: usize,
    /// Escape non-ASCII characters as \uXXXX
    pub ensure_ascii: bool,
    /// What to emit for values JSON cannot represent
    pub opaque_values: OpaquePolicy,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            indent_width: 4,
            ensure_ascii: true,
            opaque_values: OpaquePolicy::Null,
        }
    }
}

impl OutputConfig {
    pub fn layout(&self) -> JsonLayout {
        JsonLayout {
            indent_width: self.indent_width,
            ensure_ascii: self.ensure_ascii,
        }
    }
}

impl ExporterConfig {
    /// Load configuration from JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// The parsed configuration, or the defaults when the file is missing or
    /// invalid. Problems are logged rather than returned.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::debug!(
                    "[Config] No config file at {:?}. Using defaults.",
                    path.as_ref()
                );
                Self::default()
            }
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Load configuration from the working directory
    pub fn load() -> Self {
        Self::load_from_file(DEFAULT_CONFIG_PATH)
    }
}
