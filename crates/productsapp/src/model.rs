//! # Domain Model
//!
//! A [`Product`] is an open record: three fields are owned by the service and
//! typed explicitly, everything else the caller sends is carried verbatim in
//! an extension map.
//!
//! ```text
//! {
//!   "id": "lw3k9c2f8q1x7a",              <-- generated, immutable
//!   "created_at": "2024-05-01T10:00:00.123Z",  <-- set once
//!   "updated_at": "2024-05-01T10:05:00.456Z",  <-- bumped on every mutation
//!   "name": "Widget",                    <-- caller fields, passed through
//!   "tags": ["red", {"title": "Blue Widget"}]
//! }
//! ```
//!
//! ## Timestamps
//!
//! Timestamps are RFC 3339 in UTC with millisecond precision and a `Z` suffix.
//! [`now`] truncates the clock to milliseconds so a record held in memory is
//! identical to the same record read back from disk.
//!
//! ## Tags
//!
//! `tags` stays in the extension map since callers own its shape. [`Product::tags`]
//! gives a read-only view: plain strings and objects with a string `title` are
//! recognized; any other element is kept on disk but ignored by filtering.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Caller-supplied fields, as decoded from a JSON object body.
pub type Fields = Map<String, Value>;

/// The ordered set of products persisted as one JSON array.
pub type Collection = Vec<Product>;

/// Keys the service owns. Caller values for these are never merged.
pub const RESERVED_KEYS: [&str; 3] = ["id", "created_at", "updated_at"];

/// Current time, truncated to the precision timestamps are stored with.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub fields: Fields,
}

impl Product {
    /// Build a fresh product. Reserved keys in `fields` are dropped so the
    /// generated id and timestamps always win.
    pub fn new(id: String, fields: Fields, at: DateTime<Utc>) -> Self {
        let mut product = Self {
            id,
            created_at: at,
            updated_at: at,
            fields: Fields::new(),
        };
        product.merge(fields);
        product
    }

    /// Shallow merge: caller fields overwrite same-named fields, everything
    /// else is preserved.
    pub fn merge(&mut self, fields: Fields) {
        for (key, value) in fields {
            if is_reserved(&key) {
                continue;
            }
            self.fields.insert(key, value);
        }
    }

    /// Merge `fields` and stamp `updated_at`.
    pub fn apply_update(&mut self, fields: Fields, at: DateTime<Utc>) {
        self.merge(fields);
        self.updated_at = at;
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Recognized tags, in order. Missing or non-array `tags` yields nothing.
    pub fn tags(&self) -> Vec<Tag<'_>> {
        match self.fields.get("tags") {
            Some(Value::Array(items)) => items.iter().filter_map(Tag::from_value).collect(),
            _ => Vec::new(),
        }
    }
}

pub fn is_reserved(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// A borrowed view of one element of a product's `tags`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag<'a> {
    /// `"red"`
    Plain(&'a str),
    /// `{"title": "Blue Widget", ...}`
    Titled(&'a str),
}

impl<'a> Tag<'a> {
    pub fn from_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Tag::Plain(s)),
            Value::Object(obj) => obj.get("title").and_then(Value::as_str).map(Tag::Titled),
            _ => None,
        }
    }

    /// The text a tag filter is matched against.
    pub fn label(&self) -> &'a str {
        match *self {
            Tag::Plain(s) | Tag::Titled(s) => s,
        }
    }
}

mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|at| at.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
    }

    #[test]
    fn new_product_discards_reserved_caller_keys() {
        let p = Product::new(
            "gen-1".into(),
            fields(json!({
                "id": "caller-id",
                "created_at": "1999-01-01T00:00:00.000Z",
                "name": "Widget"
            })),
            fixed_time(),
        );

        assert_eq!(p.id, "gen-1");
        assert_eq!(p.created_at, fixed_time());
        assert_eq!(p.updated_at, fixed_time());
        assert_eq!(p.get("name"), Some(&json!("Widget")));
        assert!(p.get("id").is_none());
        assert!(p.get("created_at").is_none());
    }

    #[test]
    fn serializes_timestamps_with_millis_and_z() {
        let p = Product::new("a".into(), fields(json!({"price": 5})), fixed_time());
        let value = serde_json::to_value(&p).unwrap();

        assert_eq!(
            value,
            json!({
                "id": "a",
                "created_at": "2024-05-01T10:00:00.000Z",
                "updated_at": "2024-05-01T10:00:00.000Z",
                "price": 5
            })
        );
    }

    #[test]
    fn deserializes_extra_fields_into_extension_map() {
        let p: Product = serde_json::from_value(json!({
            "id": "a",
            "created_at": "2024-05-01T10:00:00.000Z",
            "updated_at": "2024-05-01T12:00:00+02:00",
            "nested": {"x": [1, 2]},
            "flag": true
        }))
        .unwrap();

        assert_eq!(p.updated_at, fixed_time());
        assert_eq!(p.fields.len(), 2);
        assert_eq!(p.get("nested"), Some(&json!({"x": [1, 2]})));
    }

    #[test]
    fn rejects_records_without_id() {
        let result: std::result::Result<Product, _> = serde_json::from_value(json!({
            "created_at": "2024-05-01T10:00:00.000Z",
            "updated_at": "2024-05-01T10:00:00.000Z"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn apply_update_merges_shallowly_and_stamps() {
        let mut p = Product::new(
            "a".into(),
            fields(json!({"name": "X", "price": 5, "meta": {"a": 1}})),
            fixed_time(),
        );
        let later = fixed_time() + chrono::Duration::seconds(30);

        p.apply_update(
            fields(json!({"price": 9, "meta": {"b": 2}, "updated_at": "nope"})),
            later,
        );

        assert_eq!(p.get("name"), Some(&json!("X")));
        assert_eq!(p.get("price"), Some(&json!(9)));
        assert_eq!(p.get("meta"), Some(&json!({"b": 2})));
        assert_eq!(p.created_at, fixed_time());
        assert_eq!(p.updated_at, later);
    }

    #[test]
    fn tags_view_recognizes_strings_and_titled_objects() {
        let p = Product::new(
            "a".into(),
            fields(json!({"tags": ["red", {"title": "Blue Widget", "color": "blue"}, 7, {"name": "x"}]})),
            fixed_time(),
        );

        assert_eq!(p.tags(), vec![Tag::Plain("red"), Tag::Titled("Blue Widget")]);
        assert_eq!(p.tags()[1].label(), "Blue Widget");
    }

    #[test]
    fn tags_view_is_empty_for_missing_or_scalar_tags() {
        let bare = Product::new("a".into(), Fields::new(), fixed_time());
        let scalar = Product::new("b".into(), fields(json!({"tags": "red"})), fixed_time());

        assert!(bare.tags().is_empty());
        assert!(scalar.tags().is_empty());
    }

    #[test]
    fn now_has_millisecond_precision() {
        let at = now();
        assert_eq!(at.timestamp_subsec_nanos() % 1_000_000, 0);
    }
}
