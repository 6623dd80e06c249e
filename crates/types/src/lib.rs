//! Identifier type for comment records.
//!
//! Comments created by the service carry a hyphenated UUID v4 string as their id. The backing
//! file is plain JSON and may also hold records whose id is a JSON number (hand-written fixtures,
//! older data). [`CommentId`] keeps both forms without converting between them. Numbers follow
//! JSON number semantics: `1.0` and `1e3` are the integers `1` and `1000`.
//!
//! ## Comparison rules
//! Two comparisons exist and they are deliberately different:
//! - [`CommentId::matches_path`] coerces the id to its string form first, so a stored `1` matches
//!   the path segment `"1"`. Used for lookups by URL path parameter.
//! - `==` is strict: `CommentId::Text("1")` never equals `CommentId::Number(1)`. Used when a JSON
//!   request body carries the id.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Identifier of a stored comment, either a string or a JSON number.
///
/// Whole-valued floats (`1.0`, `1e3`) are normalised to integers when read, so they print and
/// compare like the integers they denote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CommentId {
    Text(String),
    Number(Number),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCommentId {
    Text(String),
    Number(Number),
}

impl<'de> Deserialize<'de> for CommentId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(match RawCommentId::deserialize(deserializer)? {
            RawCommentId::Text(s) => Self::Text(s),
            RawCommentId::Number(n) => Self::Number(normalise_number(n)),
        })
    }
}

// Largest integer an f64 holds exactly (2^53).
const MAX_EXACT_FLOAT_INT: f64 = 9_007_199_254_740_992.0;

fn normalise_number(n: Number) -> Number {
    if !n.is_f64() {
        return n;
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() <= MAX_EXACT_FLOAT_INT => {
            if f >= 0.0 {
                Number::from(f as u64)
            } else {
                Number::from(f as i64)
            }
        }
        _ => n,
    }
}

impl CommentId {
    /// Generates a fresh server-side identifier (hyphenated UUID v4).
    pub fn generate() -> Self {
        Self::Text(uuid::Uuid::new_v4().to_string())
    }

    /// Reads an id out of an arbitrary JSON value.
    ///
    /// Only strings and numbers are identifiers; anything else (null, bool, object, array)
    /// yields `None`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Number(n) => Some(Self::Number(normalise_number(n.clone()))),
            _ => None,
        }
    }

    /// Compares the string form of this id with a raw path parameter.
    pub fn matches_path(&self, raw: &str) -> bool {
        match self {
            Self::Text(s) => s == raw,
            Self::Number(n) => n.to_string() == raw,
        }
    }
}

impl std::fmt::Display for CommentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{}", s),
            Self::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for CommentId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<u64> for CommentId {
    fn from(value: u64) -> Self {
        Self::Number(Number::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn generate_produces_hyphenated_uuid_v4() {
        let id = CommentId::generate();
        let text = id.to_string();
        let parsed = uuid::Uuid::parse_str(&text).expect("generated id should parse as a UUID");
        assert_eq!(parsed.get_version_num(), 4);
        assert_eq!(text.len(), 36);
    }

    #[test]
    fn generate_does_not_repeat() {
        assert_ne!(CommentId::generate(), CommentId::generate());
    }

    #[test]
    fn deserializes_string_and_number_ids() {
        let text: CommentId = serde_json::from_value(json!("abc")).unwrap();
        let number: CommentId = serde_json::from_value(json!(7)).unwrap();

        assert_eq!(text, CommentId::from("abc"));
        assert_eq!(number, CommentId::from(7));
    }

    #[test]
    fn serializes_back_to_original_json_type() {
        assert_eq!(serde_json::to_value(CommentId::from(3)).unwrap(), json!(3));
        assert_eq!(serde_json::to_value(CommentId::from("3")).unwrap(), json!("3"));
    }

    #[test]
    fn matches_path_coerces_numbers() {
        assert!(CommentId::from(42).matches_path("42"));
        assert!(CommentId::from("42").matches_path("42"));
        assert!(!CommentId::from(42).matches_path("042"));
        assert!(!CommentId::from("abc").matches_path("ABC"));
    }

    #[test]
    fn equality_is_strict_across_types() {
        assert_ne!(CommentId::from("1"), CommentId::from(1));
        assert_eq!(CommentId::from(1), CommentId::from(1));
    }

    #[test]
    fn whole_floats_read_as_integers() {
        let one: CommentId = serde_json::from_str("1.0").unwrap();
        let thousand: CommentId = serde_json::from_str("1e3").unwrap();
        let negative: CommentId = serde_json::from_str("-2.0").unwrap();

        assert_eq!(one, CommentId::from(1));
        assert!(one.matches_path("1"));
        assert!(thousand.matches_path("1000"));
        assert_eq!(thousand, CommentId::from(1000));
        assert!(negative.matches_path("-2"));
        assert_eq!(serde_json::to_string(&one).unwrap(), "1");
    }

    #[test]
    fn fractional_floats_keep_their_value() {
        let id: CommentId = serde_json::from_str("1.5").unwrap();
        assert!(id.matches_path("1.5"));
        assert_ne!(id, CommentId::from(1));
    }

    #[test]
    fn from_json_normalises_whole_floats() {
        assert_eq!(CommentId::from_json(&json!(7.0)), Some(CommentId::from(7)));
    }

    #[test]
    fn from_json_rejects_non_scalar_ids() {
        assert_eq!(CommentId::from_json(&json!("x")), Some(CommentId::from("x")));
        assert_eq!(CommentId::from_json(&json!(5)), Some(CommentId::from(5)));
        assert_eq!(CommentId::from_json(&json!(null)), None);
        assert_eq!(CommentId::from_json(&json!(true)), None);
        assert_eq!(CommentId::from_json(&json!({"id": 1})), None);
    }
}
