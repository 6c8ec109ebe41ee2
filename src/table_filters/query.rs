//! Request query values for the `filter` namespace.
//!
//! The registry never looks at a raw request. Callers hand it a [`RequestQuery`],
//! either built directly or parsed from a query string such as
//! `?filter[status]=active&filter[created_at][start]=2020-01-01&page=2`.
//!
//! Only `filter[...]` parameters are kept. Values are stored verbatim: a
//! `filter[created_at]=2020-01-01,2020-01-31` stays one text value. Nested
//! `[start]`/`[end]` keys build a structured [`DateRange`].
//!
//! A key can be present without a value. Submitting the "no filter" select
//! entry sends `filter[status]=`, and clearing both date inputs sends
//! `filter[created_at][start]=&filter[created_at][end]=`. Both are recorded as
//! present and empty, which clears any registered default for that filter.

use crate::error::Result;
use crate::model::{DateRange, FilterValue};
use std::collections::BTreeMap;

/// The query-string namespace holding filter values.
pub const FILTER_NAMESPACE: &str = "filter";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestQuery {
    values: BTreeMap<String, Option<FilterValue>>,
}

impl RequestQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an urlencoded query string, keeping the `filter` namespace.
    ///
    /// A leading `?` is ignored. When a key repeats, the last occurrence wins.
    pub fn parse(query: &str) -> Result<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)?;

        let mut parsed = Self::new();
        for (name, value) in pairs {
            match parse_filter_name(&name) {
                Some((key, None)) => {
                    parsed.insert(key, value);
                }
                Some((key, Some(bound))) => parsed.insert_bound(key, bound, value),
                None => log::trace!("ignoring query parameter {name}"),
            }
        }
        Ok(parsed)
    }

    /// Sets `key`. A blank value is stored as present but empty.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> &mut Self {
        let value = value.into();
        let value = (!value.is_blank()).then_some(value);
        self.values.insert(key.into(), value);
        self
    }

    /// Marks `key` as present without a value.
    pub fn insert_empty(&mut self, key: impl Into<String>) -> &mut Self {
        self.values.insert(key.into(), None);
        self
    }

    /// `None` when the key is absent, `Some(None)` when it is present but empty.
    pub fn get(&self, key: &str) -> Option<Option<&FilterValue>> {
        self.values.get(key).map(Option::as_ref)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn insert_bound(&mut self, key: String, bound: Bound, value: String) {
        let mut range = match self.values.remove(&key) {
            Some(Some(FilterValue::Range(range))) => range,
            _ => DateRange::default(),
        };
        let value = (!value.is_empty()).then_some(value);
        match bound {
            Bound::Start => range.start = value,
            Bound::End => range.end = value,
        }
        self.insert(key, range);
    }
}

impl<K: Into<String>, V: Into<FilterValue>> FromIterator<(K, V)> for RequestQuery {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Self::new();
        for (key, value) in iter {
            query.insert(key, value);
        }
        query
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    Start,
    End,
}

/// Splits `filter[key]` / `filter[key][start]` into the key and optional bound.
///
/// Anything else, including unknown nested segments, is not a filter parameter.
fn parse_filter_name(name: &str) -> Option<(String, Option<Bound>)> {
    let rest = name.strip_prefix(FILTER_NAMESPACE)?.strip_prefix('[')?;
    let (key, rest) = rest.split_once(']')?;
    if key.is_empty() {
        return None;
    }

    let bound = match rest {
        "" => None,
        "[start]" => Some(Bound::Start),
        "[end]" => Some(Bound::End),
        _ => return None,
    };
    Some((key.to_string(), bound))
}
