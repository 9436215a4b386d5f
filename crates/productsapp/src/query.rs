//! # Query Engine
//!
//! Listing is a filter followed by a window:
//!
//! 1. **Tag filter**: case-insensitive substring match against each tag's label
//!    (the string itself, or the `title` of an object tag). A product is kept if
//!    any of its tags matches. No filter, or an empty one, keeps everything.
//! 2. **Pagination**: the window `[offset, offset + limit)` of the filtered
//!    sequence. An offset past the end is an empty page, not an error.
//!
//! ## Parameter Coercion
//!
//! Query-string values are coerced leniently rather than rejected. A value is
//! read as optional whitespace, an optional sign, and leading digits; anything
//! after the digits is ignored (`"10abc"` is 10). A value with no leading
//! digits, a negative offset, or a limit below 1 falls back to the default.

use crate::model::Product;

pub const DEFAULT_OFFSET: usize = 0;
pub const DEFAULT_LIMIT: usize = 25;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    pub tag: Option<String>,
    pub offset: usize,
    pub limit: usize,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            tag: None,
            offset: DEFAULT_OFFSET,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ProductQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a query from raw query-string values.
    pub fn from_params(tag: Option<&str>, offset: Option<&str>, limit: Option<&str>) -> Self {
        let offset = offset
            .and_then(coerce_int)
            .filter(|n| *n >= 0)
            .map(to_usize)
            .unwrap_or(DEFAULT_OFFSET);
        let limit = limit
            .and_then(coerce_int)
            .filter(|n| *n > 0)
            .map(to_usize)
            .unwrap_or(DEFAULT_LIMIT);

        Self {
            tag: tag.map(str::to_string),
            offset,
            limit,
        }
        .normalized()
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self.normalized()
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// A limit of 0 is replaced by the default.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = if limit == 0 { DEFAULT_LIMIT } else { limit };
        self
    }

    fn normalized(mut self) -> Self {
        if self.tag.as_deref().is_some_and(str::is_empty) {
            self.tag = None;
        }
        self
    }

    /// Whether `product` passes the tag filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self.tag.as_deref() {
            None | Some("") => true,
            Some(tag) => {
                let needle = tag.to_lowercase();
                product
                    .tags()
                    .iter()
                    .any(|t| t.label().to_lowercase().contains(&needle))
            }
        }
    }

    /// Filter then paginate. The input is left untouched.
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        products
            .iter()
            .filter(|p| self.matches(p))
            .skip(self.offset)
            .take(self.limit)
            .cloned()
            .collect()
    }
}

/// Lenient integer parse: `"  42px"` is 42, `"-3"` is -3, `"abc"` is `None`.
pub fn coerce_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude = rest[..digits_len]
        .bytes()
        .fold(0i64, |acc, b| {
            acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
        });
    Some(if negative { -magnitude } else { magnitude })
}

fn to_usize(n: i64) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{now, Fields};
    use serde_json::{json, Value};

    fn product(id: &str, tags: Value) -> Product {
        let mut fields = Fields::new();
        fields.insert("tags".into(), tags);
        Product::new(id.into(), fields, now())
    }

    fn numbered(n: usize) -> Vec<Product> {
        (0..n)
            .map(|i| Product::new(format!("p{i}"), Fields::new(), now()))
            .collect()
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn defaults() {
        let q = ProductQuery::from_params(None, None, None);
        assert_eq!(q, ProductQuery::default());
        assert_eq!(q.offset, 0);
        assert_eq!(q.limit, 25);
    }

    #[test]
    fn coercion_falls_back_on_garbage() {
        let q = ProductQuery::from_params(None, Some("abc"), Some("lots"));
        assert_eq!((q.offset, q.limit), (DEFAULT_OFFSET, DEFAULT_LIMIT));

        let q = ProductQuery::from_params(None, Some("-4"), Some("0"));
        assert_eq!((q.offset, q.limit), (DEFAULT_OFFSET, DEFAULT_LIMIT));

        let q = ProductQuery::from_params(None, Some(""), Some("-2"));
        assert_eq!((q.offset, q.limit), (DEFAULT_OFFSET, DEFAULT_LIMIT));
    }

    #[test]
    fn coercion_reads_leading_digits() {
        let q = ProductQuery::from_params(None, Some(" 10abc"), Some("2.9"));
        assert_eq!((q.offset, q.limit), (10, 2));
    }

    #[test]
    fn coerce_int_cases() {
        assert_eq!(coerce_int("42"), Some(42));
        assert_eq!(coerce_int("+7"), Some(7));
        assert_eq!(coerce_int("-3x"), Some(-3));
        assert_eq!(coerce_int("  8"), Some(8));
        assert_eq!(coerce_int("x8"), None);
        assert_eq!(coerce_int("-"), None);
        assert_eq!(coerce_int(""), None);
        assert_eq!(coerce_int("99999999999999999999999"), Some(i64::MAX));
    }

    #[test]
    fn empty_tag_is_no_filter() {
        let q = ProductQuery::from_params(Some(""), None, None);
        assert_eq!(q.tag, None);

        let products = vec![product("a", json!([])), product("b", json!(null))];
        assert_eq!(q.apply(&products).len(), 2);
    }

    #[test]
    fn tag_filter_matches_strings_and_titles_case_insensitively() {
        let p = product("a", json!(["red", {"title": "Blue Widget"}]));

        for tag in ["red", "RED", "widget", "Blue W", "e"] {
            assert!(ProductQuery::new().with_tag(tag).matches(&p), "{tag}");
        }
        assert!(!ProductQuery::new().with_tag("green").matches(&p));
    }

    #[test]
    fn products_without_tags_never_match_a_filter() {
        let bare = Product::new("a".into(), Fields::new(), now());
        let empty = product("b", json!([]));
        let q = ProductQuery::new().with_tag("red");

        assert!(!q.matches(&bare));
        assert!(!q.matches(&empty));
    }

    #[test]
    fn unrecognized_tag_shapes_are_skipped() {
        let p = product("a", json!([1, {"name": "red"}, {"title": 5}, "crimson-red"]));
        assert!(ProductQuery::new().with_tag("red").matches(&p));

        let p = product("b", json!([1, {"name": "red"}]));
        assert!(!ProductQuery::new().with_tag("red").matches(&p));
    }

    #[test]
    fn filters_before_paginating() {
        let products = vec![
            product("a", json!(["red"])),
            product("b", json!(["blue"])),
            product("c", json!(["red"])),
            product("d", json!(["red"])),
        ];
        let q = ProductQuery::new().with_tag("red").with_offset(1).with_limit(1);

        assert_eq!(ids(&q.apply(&products)), vec!["c"]);
    }

    #[test]
    fn offset_past_end_is_empty() {
        let products = numbered(3);
        assert!(ProductQuery::new().with_offset(3).apply(&products).is_empty());
        assert!(ProductQuery::new().with_offset(500).apply(&products).is_empty());
    }

    #[test]
    fn windows_reconstruct_the_filtered_set() {
        let products = numbered(23);

        for limit in 1..=7 {
            let mut seen = Vec::new();
            let mut offset = 0;
            loop {
                let page = ProductQuery::new()
                    .with_offset(offset)
                    .with_limit(limit)
                    .apply(&products);
                assert!(page.len() <= limit);
                if page.is_empty() {
                    break;
                }
                seen.extend(page);
                offset += limit;
            }
            assert_eq!(seen, products, "limit {limit}");
        }
    }

    #[test]
    fn apply_does_not_mutate_input() {
        let products = numbered(5);
        let before = products.clone();
        let _ = ProductQuery::new().with_limit(2).apply(&products);
        assert_eq!(products, before);
    }
}
