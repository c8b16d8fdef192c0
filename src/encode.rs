//! JSON encoding for test case records.
//!
//! [`Encoded`] walks a [`CaseValue`] tree and serializes it with `serde`.
//! Values JSON cannot represent are handed to a [`FallbackEncoder`], which
//! decides what to emit instead; the default [`NullFallback`] emits `null`
//! so one odd field never aborts a whole export.
//!
//! [`write_document`] lays the result out the way the fixture consumers
//! expect: pretty printed with a fixed indent and, by default, with every
//! non-ASCII character escaped.

use std::io;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::ser::{Formatter, PrettyFormatter};
use serde_json::Value;

use crate::record::{CaseMap, CaseValue, OpaqueValue};

/// Policy for values with no JSON representation.
pub trait FallbackEncoder {
    fn encode_opaque(&self, value: &OpaqueValue) -> Value;
}

/// Replaces every opaque value with `null`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullFallback;

impl FallbackEncoder for NullFallback {
    fn encode_opaque(&self, _value: &OpaqueValue) -> Value {
        Value::Null
    }
}

/// Keeps a readable trace of opaque values where one exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptiveFallback;

impl FallbackEncoder for DescriptiveFallback {
    fn encode_opaque(&self, value: &OpaqueValue) -> Value {
        match value {
            OpaqueValue::TypeMarker(_) => Value::String(value.describe()),
            OpaqueValue::Pattern(pattern) => Value::String(pattern.as_str().to_string()),
            OpaqueValue::Bytes(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
            OpaqueValue::Callable(_) => Value::Null,
        }
    }
}

/// Configured choice of fallback encoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpaquePolicy {
    #[default]
    Null,
    Describe,
}

impl OpaquePolicy {
    pub fn encoder(self) -> Box<dyn FallbackEncoder> {
        match self {
            OpaquePolicy::Null => Box::new(NullFallback),
            OpaquePolicy::Describe => Box::new(DescriptiveFallback),
        }
    }
}

/// A value paired with the fallback used for its opaque leaves.
pub struct Encoded<'a, T: ?Sized> {
    value: &'a T,
    fallback: &'a dyn FallbackEncoder,
}

impl<'a, T: ?Sized> Encoded<'a, T> {
    pub fn new(value: &'a T, fallback: &'a dyn FallbackEncoder) -> Self {
        Self { value, fallback }
    }
}

impl Serialize for Encoded<'_, CaseValue> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.value {
            CaseValue::Null => serializer.serialize_unit(),
            CaseValue::Bool(flag) => serializer.serialize_bool(*flag),
            CaseValue::Int(int) => serializer.serialize_i64(*int),
            CaseValue::UInt(uint) => serializer.serialize_u64(*uint),
            CaseValue::Float(float) if float.is_finite() => serializer.serialize_f64(*float),
            CaseValue::Float(_) => serializer.serialize_unit(),
            CaseValue::Str(text) => serializer.serialize_str(text),
            CaseValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(&Encoded::new(item, self.fallback))?;
                }
                seq.end()
            }
            CaseValue::Map(map) => Encoded::new(map, self.fallback).serialize(serializer),
            CaseValue::Opaque(opaque) => self.fallback.encode_opaque(opaque).serialize(serializer),
        }
    }
}

impl Serialize for Encoded<'_, CaseMap> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.value.len()))?;
        for (key, value) in self.value.iter() {
            map.serialize_entry(key, &Encoded::new(value, self.fallback))?;
        }
        map.end()
    }
}

impl<'r> Serialize for Encoded<'_, [&'r CaseMap]> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.value.len()))?;
        for record in self.value {
            seq.serialize_element(&Encoded::new(*record, self.fallback))?;
        }
        seq.end()
    }
}

/// Convert a single value to a `serde_json::Value` through the fallback.
pub fn to_json_value(value: &CaseValue, fallback: &dyn FallbackEncoder) -> Value {
    // Keys are always strings and non-finite floats are already nulled.
    serde_json::to_value(Encoded::new(value, fallback)).unwrap_or(Value::Null)
}

/// Layout of the written document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonLayout {
    pub indent_width: usize,
    pub ensure_ascii: bool,
}

impl Default for JsonLayout {
    fn default() -> Self {
        Self {
            indent_width: 4,
            ensure_ascii: true,
        }
    }
}

/// Serialize `records` as a pretty-printed JSON array into `writer`.
pub fn write_document<W: io::Write>(
    writer: W,
    records: &[&CaseMap],
    fallback: &dyn FallbackEncoder,
    layout: JsonLayout,
) -> serde_json::Result<()> {
    let indent = vec![b' '; layout.indent_width];
    let pretty = PrettyFormatter::with_indent(&indent);
    let document = Encoded::new(records, fallback);
    if layout.ensure_ascii {
        let mut serializer = serde_json::Serializer::with_formatter(writer, AsciiFormatter(pretty));
        document.serialize(&mut serializer)
    } else {
        let mut serializer = serde_json::Serializer::with_formatter(writer, pretty);
        document.serialize(&mut serializer)
    }
}

/// Wraps another formatter and escapes every character outside printable ASCII as `\uXXXX`.
struct AsciiFormatter<F>(F);

impl<F: Formatter> Formatter for AsciiFormatter<F> {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (idx, ch) in fragment.char_indices() {
            if (' '..='~').contains(&ch) {
                continue;
            }
            if start < idx {
                writer.write_all(&fragment.as_bytes()[start..idx])?;
            }
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = idx + ch.len_utf8();
        }
        if start < fragment.len() {
            writer.write_all(&fragment.as_bytes()[start..])?;
        }
        Ok(())
    }

    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.begin_array_value(writer, first)
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.begin_object_key(writer, first)
    }

    fn end_object_key<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.end_object_key(writer)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.begin_object_value(writer)
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.end_object_value(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Callable, TestCaseRecord};
    use regex::Regex;

    fn render(records: &[&CaseMap], fallback: &dyn FallbackEncoder, layout: JsonLayout) -> String {
        let mut out = Vec::new();
        write_document(&mut out, records, fallback, layout).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn null_fallback_replaces_every_opaque_value() {
        let record = TestCaseRecord::new()
            .with("id", "BaW_jenozKc")
            .with("view_count", CaseValue::type_marker("int"))
            .with("upload_date", CaseValue::pattern(Regex::new(r"^\d{8}$").unwrap()))
            .with(
                "like_count",
                OpaqueValue::Callable(Callable::new("positive")),
            )
            .with("thumbnail", OpaqueValue::Bytes(vec![0xff, 0xd8]));

        let value = to_json_value(&CaseValue::Map(record), &NullFallback);
        assert_eq!(
            value,
            serde_json::json!({
                "id": "BaW_jenozKc",
                "view_count": null,
                "upload_date": null,
                "like_count": null,
                "thumbnail": null
            })
        );
    }

    #[test]
    fn opaque_values_inside_lists_are_substituted() {
        let value = CaseValue::list([
            CaseValue::from("youtube-dl"),
            CaseValue::type_marker("str"),
        ]);
        assert_eq!(
            to_json_value(&value, &NullFallback),
            serde_json::json!(["youtube-dl", null])
        );
    }

    #[test]
    fn descriptive_fallback_keeps_readable_traces() {
        let record = TestCaseRecord::new()
            .with("view_count", CaseValue::type_marker("int"))
            .with("channel_id", CaseValue::pattern(Regex::new("^UC").unwrap()))
            .with("check", OpaqueValue::Callable(Callable::new("any")));

        let value = to_json_value(&CaseValue::Map(record), &DescriptiveFallback);
        assert_eq!(
            value,
            serde_json::json!({"view_count": "<int>", "channel_id": "^UC", "check": null})
        );
    }

    #[test]
    fn non_finite_floats_encode_as_null() {
        let value = CaseValue::list([f64::NAN, f64::INFINITY, 0.5]);
        assert_eq!(
            to_json_value(&value, &NullFallback),
            serde_json::json!([null, null, 0.5])
        );
    }

    #[test]
    fn pretty_layout_uses_four_space_indent() {
        let record = TestCaseRecord::new()
            .with("url", "https://youtu.be/a")
            .with("tags", CaseValue::list(["x"]));
        let text = render(&[&record], &NullFallback, JsonLayout::default());
        assert_eq!(
            text,
            "[\n    {\n        \"url\": \"https://youtu.be/a\",\n        \"tags\": [\n            \"x\"\n        ]\n    }\n]"
        );
    }

    #[test]
    fn empty_document_is_bare_brackets() {
        assert_eq!(render(&[], &NullFallback, JsonLayout::default()), "[]");
    }

    #[test]
    fn ensure_ascii_escapes_non_ascii_with_surrogates() {
        let record = TestCaseRecord::new().with("title", "ä↭𝕐\"");
        let text = render(
            &[&record],
            &NullFallback,
            JsonLayout {
                indent_width: 0,
                ensure_ascii: true,
            },
        );
        assert!(
            text.contains(r#""title": "\u00e4\u21ad\ud835\udd50\"""#),
            "{text}"
        );

        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed[0]["title"], "ä↭𝕐\"");
    }

    #[test]
    fn ensure_ascii_escapes_delete() {
        let record = TestCaseRecord::new().with("note", "a\u{7f}b~");
        let text = render(&[&record], &NullFallback, JsonLayout::default());
        assert!(text.contains(r#""note": "a\u007fb~""#), "{text}");
    }

    #[test]
    fn raw_utf8_when_ascii_escaping_disabled() {
        let record = TestCaseRecord::new().with("title", "ä↭");
        let text = render(
            &[&record],
            &NullFallback,
            JsonLayout {
                indent_width: 2,
                ensure_ascii: false,
            },
        );
        assert!(text.contains("\"ä↭\""));
        assert!(text.contains("\n  {"));
    }

    #[test]
    fn opaque_policy_selects_encoder() {
        let marker = OpaqueValue::TypeMarker("int");
        assert_eq!(OpaquePolicy::Null.encoder().encode_opaque(&marker), Value::Null);
        assert_eq!(
            OpaquePolicy::Describe.encoder().encode_opaque(&marker),
            Value::String("<int>".into())
        );
    }
}
