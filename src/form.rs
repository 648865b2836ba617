//! Form submissions
//!
//! An ordered set of named fields, each a string or an uploaded file.
//! Uploaded bytes are base64-encoded once, when the file is attached, so
//! they can be forwarded to the vision generator as-is.
//!
//! Field names starting with `_` are hidden parameters: they never count
//! towards completeness and are excluded from the text content.

use std::sync::OnceLock;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use regex::Regex;

use crate::catalog::FeatureSpec;

/// Location used when nothing in the submission looks like a place
pub const DEFAULT_LOCATION: &str = "New York";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: String,
    pub size: usize,
    pub base64: String,
}

impl UploadedFile {
    pub fn from_bytes(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: &[u8],
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            size: bytes.len(),
            base64: STANDARD.encode(bytes),
        }
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    File(UploadedFile),
}

impl FieldValue {
    /// Files always count; strings count when not blank
    pub fn is_filled(&self) -> bool {
        match self {
            FieldValue::Text(text) => !text.trim().is_empty(),
            FieldValue::File(_) => true,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            FieldValue::File(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSubmission {
    fields: Vec<(String, FieldValue)>,
}

impl FormSubmission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style text field
    pub fn with_text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_text(name, value);
        self
    }

    pub fn push_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.insert(name.into(), FieldValue::Text(value.into()));
    }

    pub fn push_file(&mut self, name: impl Into<String>, file: UploadedFile) {
        self.insert(name.into(), FieldValue::File(file));
    }

    /// A repeated name replaces the earlier value in place
    pub fn insert(&mut self, name: String, value: FieldValue) {
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Trimmed, non-blank text of a field
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name)
            .and_then(FieldValue::as_text)
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// Hidden parameter (`_name`)
    pub fn hidden(&self, name: &str) -> Option<&str> {
        if !name.starts_with('_') {
            return None;
        }
        self.text(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Fields whose names do not start with `_`
    pub fn visible_fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields
            .iter()
            .filter(|(name, _)| !name.starts_with('_'))
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn filled_count(&self) -> usize {
        self.visible_fields().filter(|(_, v)| v.is_filled()).count()
    }

    /// No visible field carries a value
    pub fn is_empty(&self) -> bool {
        self.filled_count() == 0
    }

    /// All non-blank visible text, joined with single spaces
    pub fn text_content(&self) -> String {
        self.visible_fields()
            .filter_map(|(_, v)| v.as_text())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Best guess at the place this submission is about.
    ///
    /// Schema-flagged location fields first, then a capitalised place-like
    /// phrase in any text field, then the first segment of `input_0`, then
    /// `New York`.
    pub fn extract_location(&self, spec: &FeatureSpec) -> String {
        for name in spec.location_fields() {
            if let Some(location) = self.text(&name) {
                return location.to_string();
            }
        }

        if let Some(pattern) = place_pattern() {
            let found = self
                .visible_fields()
                .filter_map(|(_, v)| v.as_text())
                .filter(|t| !t.trim().is_empty())
                .find_map(|t| pattern.find(t));
            if let Some(m) = found {
                let place = m.as_str().trim().trim_end_matches(',').trim();
                if !place.is_empty() {
                    return place.to_string();
                }
            }
        }

        self.text("input_0")
            .and_then(|t| t.split(',').next())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_LOCATION)
            .to_string()
    }

    /// First uploaded image, preferring fields the schema declares as image slots
    pub fn image_input(&self, spec: &FeatureSpec) -> Option<&UploadedFile> {
        let declared = self.visible_fields().find_map(|(name, value)| match value {
            FieldValue::File(file)
                if spec
                    .input(name)
                    .is_some_and(|d| d.accept == Some("image/*")) =>
            {
                Some(file)
            }
            _ => None,
        });

        declared.or_else(|| {
            self.visible_fields().find_map(|(_, value)| match value {
                FieldValue::File(file) if file.is_image() => Some(file),
                _ => None,
            })
        })
    }
}

fn place_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(r"\b([A-Z][a-z]+(?:\s+[A-Z][a-z]+)?)\s*,?\s*([A-Z]{2,}|[A-Z][a-z]+)?\b").ok()
        })
        .as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::feature;

    #[test]
    fn test_schema_location_wins() {
        let form = FormSubmission::new()
            .with_text("input_1", "Heavy rain in Paris")
            .with_text("input_0", "  Tokyo, Japan ");
        assert_eq!(form.extract_location(feature(1).unwrap()), "Tokyo, Japan");
    }

    #[test]
    fn test_location_field_position_follows_schema() {
        let form = FormSubmission::new()
            .with_text("input_2", "feeling fine")
            .with_text("input_6", "Cairo, Egypt");
        assert_eq!(form.extract_location(feature(3).unwrap()), "Cairo, Egypt");
    }

    #[test]
    fn test_place_heuristic() {
        let form = FormSubmission::new().with_text("input_1", "traffic near London, UK today");
        assert_eq!(form.extract_location(feature(1).unwrap()), "London, UK");
    }

    #[test]
    fn test_input_zero_segment_fallback() {
        let form = FormSubmission::new().with_text("input_0", "lower manhattan, ny");
        assert_eq!(form.extract_location(feature(4).unwrap()), "lower manhattan");
    }

    #[test]
    fn test_default_location() {
        let form = FormSubmission::new().with_text("input_3", "all lowercase text");
        assert_eq!(form.extract_location(feature(1).unwrap()), DEFAULT_LOCATION);
        assert_eq!(FormSubmission::new().extract_location(feature(7).unwrap()), DEFAULT_LOCATION);
    }

    #[test]
    fn test_text_content_skips_hidden_blank_and_files() {
        let mut form = FormSubmission::new()
            .with_text("input_0", " Hello ")
            .with_text("_targetLanguages", "es")
            .with_text("input_1", "   ")
            .with_text("input_2", "world");
        form.push_file("input_3", UploadedFile::from_bytes("a.wav", "audio/wav", b"RIFF"));
        assert_eq!(form.text_content(), "Hello world");
        assert_eq!(form.hidden("_targetLanguages"), Some("es"));
        assert_eq!(form.hidden("input_0"), None);
    }

    #[test]
    fn test_is_empty() {
        assert!(FormSubmission::new().is_empty());
        assert!(FormSubmission::new()
            .with_text("input_0", " ")
            .with_text("_hint", "x")
            .is_empty());
        assert!(!FormSubmission::new().with_text("input_0", "x").is_empty());
    }

    #[test]
    fn test_repeated_name_replaces() {
        let form = FormSubmission::new()
            .with_text("input_0", "first")
            .with_text("input_0", "second");
        assert_eq!(form.len(), 1);
        assert_eq!(form.text("input_0"), Some("second"));
    }

    #[test]
    fn test_uploaded_file_is_base64_encoded() {
        let file = UploadedFile::from_bytes("x.png", "image/png", b"hello");
        assert_eq!(file.base64, "aGVsbG8=");
        assert_eq!(file.size, 5);
        assert!(file.is_image());
    }

    #[test]
    fn test_image_input_prefers_schema_slot() {
        let spec = feature(2).unwrap();
        let mut form = FormSubmission::new();
        form.push_file("extra", UploadedFile::from_bytes("b.jpg", "image/jpeg", b"b"));
        form.push_file("input_1", UploadedFile::from_bytes("drone.jpg", "image/jpeg", b"d"));
        assert_eq!(form.image_input(spec).map(|f| f.filename.as_str()), Some("drone.jpg"));

        let mut other = FormSubmission::new();
        other.push_file("input_2", UploadedFile::from_bytes("birds.wav", "audio/wav", b"w"));
        assert!(other.image_input(spec).is_none());
    }
}
