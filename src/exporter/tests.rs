use std::fs;

use regex::Regex;
use serde_json::{json, Value};

use super::*;
use crate::encode::DescriptiveFallback;
use crate::extractors;
use crate::record::{CaseMap, CaseValue};
use crate::source::records_from_json;

fn named(name: &str) -> TestCaseRecord {
    TestCaseRecord::new().with("name", name)
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn drops_skipped_records_and_keeps_order() {
    let records = vec![
        named("a"),
        named("b").with("skip", "not yet"),
        named("c"),
    ];
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tests.json");

    let summary = export(&records, &path).unwrap();

    assert_eq!(read_json(&path), json!([{"name": "a"}, {"name": "c"}]));
    assert_eq!(
        summary,
        ExportSummary {
            total: 3,
            skipped: 1,
            exported: 2,
            destination: path.clone(),
        }
    );
}

#[test]
fn any_skip_value_excludes() {
    let records = vec![
        named("true").with("skip", true),
        named("false").with("skip", false),
        named("null").with("skip", CaseValue::Null),
        named("list").with("skip", CaseValue::list(["reason"])),
        named("kept"),
    ];
    let kept = retain_exportable(&records);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].get("name").and_then(CaseValue::as_str), Some("kept"));
}

#[test]
fn empty_input_writes_empty_array() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tests.json");

    let summary = export(&Vec::<TestCaseRecord>::new(), &path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    assert_eq!(summary.total, 0);
    assert_eq!(summary.exported, 0);
}

#[test]
fn all_skipped_writes_empty_array() {
    let records = vec![named("a").with("skip", true), named("b").with("skip", "gone")];
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tests.json");

    let summary = export(&records, &path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    assert_eq!(summary.skipped, 2);
}

#[test]
fn opaque_fields_become_null_without_losing_the_rest() {
    let records = vec![TestCaseRecord::new()
        .with("url", "https://www.youtube.com/watch?v=BaW_jenozKc")
        .with(
            "info_dict",
            CaseMap::new()
                .with("id", "BaW_jenozKc")
                .with("view_count", CaseValue::type_marker("int"))
                .with("upload_date", CaseValue::pattern(Regex::new(r"^\d{8}$").unwrap())),
        )];

    let text = FixtureExporter::new().render(&records).unwrap();
    let value: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        value,
        json!([{
            "url": "https://www.youtube.com/watch?v=BaW_jenozKc",
            "info_dict": {"id": "BaW_jenozKc", "view_count": null, "upload_date": null}
        }])
    );
}

#[test]
fn output_round_trips_against_refiltered_input() {
    let input = r#"[
        {"url": "a", "info_dict": {"id": "1", "tags": ["x", "y"]}},
        {"url": "b", "skip": false},
        {"url": "c", "params": {"skip_download": true}, "abr": 129.5}
    ]"#;
    let records = records_from_json(input).unwrap();

    let rendered = FixtureExporter::new().render(&records).unwrap();
    let parsed = records_from_json(&rendered).unwrap();
    let expected: Vec<TestCaseRecord> = records
        .iter()
        .filter(|record| !is_skipped(record))
        .cloned()
        .collect();

    assert_eq!(parsed, expected);
}

#[test]
fn output_uses_four_space_indent_and_preserves_key_order() {
    let records = vec![TestCaseRecord::new()
        .with("url", "https://youtu.be/x")
        .with("only_matching", true)];

    let text = FixtureExporter::new().render(&records).unwrap();

    assert_eq!(
        text,
        "[\n    {\n        \"url\": \"https://youtu.be/x\",\n        \"only_matching\": true\n    }\n]"
    );
}

#[test]
fn overwrites_existing_destination() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tests.json");
    fs::write(&path, "stale content that is much longer than the new document").unwrap();

    export(&[named("fresh")], &path).unwrap();

    assert_eq!(read_json(&path), json!([{"name": "fresh"}]));
}

#[test]
fn missing_parent_directory_is_an_output_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("tests.json");

    let err = export(&[named("a")], &path).unwrap_err();

    match err {
        ExportError::OutputWrite { path: reported, .. } => {
            assert_eq!(reported, path.display().to_string());
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!path.exists());
}

#[test]
fn configured_fallback_and_layout_apply() {
    let output = OutputConfig {
        indent_width: 2,
        ensure_ascii: false,
        opaque_values: crate::encode::OpaquePolicy::Describe,
        ..OutputConfig::default()
    };
    let records = vec![TestCaseRecord::new()
        .with("title", "ä")
        .with("view_count", CaseValue::type_marker("int"))];

    let text = FixtureExporter::from_config(&output).render(&records).unwrap();

    assert_eq!(
        text,
        "[\n  {\n    \"title\": \"ä\",\n    \"view_count\": \"<int>\"\n  }\n]"
    );
}

#[test]
fn builder_overrides_defaults() {
    let records = vec![TestCaseRecord::new().with("count", CaseValue::type_marker("int"))];
    let text = FixtureExporter::new()
        .with_fallback(Box::new(DescriptiveFallback))
        .with_layout(JsonLayout {
            indent_width: 0,
            ensure_ascii: true,
        })
        .render(&records)
        .unwrap();
    assert_eq!(text, "[\n{\n\"count\": \"<int>\"\n}\n]");
}

#[test]
fn embedded_youtube_table_exports_without_skipped_cases() {
    let cases = extractors::test_cases("youtube").unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tests.json");

    let summary = export(cases, &path).unwrap();

    let written = read_json(&path);
    let entries = written.as_array().unwrap();
    assert_eq!(entries.len(), summary.exported);
    assert_eq!(
        summary.exported,
        cases.iter().filter(|case| !case.is_skipped()).count()
    );
    assert!(entries.iter().all(|entry| entry.get("skip").is_none()));
    assert_eq!(entries[0]["info_dict"]["view_count"], Value::Null);
    assert_eq!(entries[0]["info_dict"]["title"], "youtube-dl test video \"'/\\ä↭𝕐");
}
