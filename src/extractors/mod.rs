//! Embedded extractor test tables.
//!
//! Each extractor declares its test cases as process-wide static data,
//! initialized on first access. The exporter never reaches in here directly;
//! callers look a table up by name and pass it in.

use crate::record::TestCaseRecord;

pub mod youtube;

/// Extractor exported when none is named.
pub const DEFAULT_EXTRACTOR: &str = "youtube";

const REGISTRY: &[(&str, fn() -> &'static [TestCaseRecord])] = &[
    ("youtube", youtube::watch_cases),
    ("youtube:playlist", youtube::playlist_cases),
];

/// Names of every registered extractor, in registration order.
pub fn names() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|(name, _)| *name)
}

/// Test table for `name`, if registered.
pub fn test_cases(name: &str) -> Option<&'static [TestCaseRecord]> {
    REGISTRY
        .iter()
        .find(|(registered, _)| registered.eq_ignore_ascii_case(name))
        .map(|(_, table)| table())
}
