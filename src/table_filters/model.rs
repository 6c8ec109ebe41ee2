use serde::{Deserialize, Serialize};

/// The kind of control a filter renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    Select,
    DateRange,
}

impl std::fmt::Display for FilterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterKind::Select => write!(f, "select"),
            FilterKind::DateRange => write!(f, "date_range"),
        }
    }
}

/// One selectable entry of a select filter.
///
/// Deserializes from either a bare string (used as both value and label) or a
/// `{ "value": ..., "label": ... }` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "OptionRepr")]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl FilterOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

impl<V: Into<String>, L: Into<String>> From<(V, L)> for FilterOption {
    fn from((value, label): (V, L)) -> Self {
        Self::new(value, label)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OptionRepr {
    Bare(String),
    Pair { value: String, label: Option<String> },
}

impl From<OptionRepr> for FilterOption {
    fn from(repr: OptionRepr) -> Self {
        match repr {
            OptionRepr::Bare(value) => Self::new(value.clone(), value),
            OptionRepr::Pair { value, label } => {
                let label = label.unwrap_or_else(|| value.clone());
                Self::new(value, label)
            }
        }
    }
}

/// Bounds of a date-range value. Either side may be missing while the user is
/// still picking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

/// The value of a filter, taken verbatim from registration or the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Text(String),
    Range(DateRange),
}

impl FilterValue {
    /// Empty text, or a range with no non-empty bound. A submitted form sends
    /// these for "no filter" and for cleared date inputs.
    pub fn is_blank(&self) -> bool {
        match self {
            FilterValue::Text(text) => text.is_empty(),
            FilterValue::Range(range) => {
                range.start.as_deref().unwrap_or_default().is_empty()
                    && range.end.as_deref().unwrap_or_default().is_empty()
            }
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<DateRange> for FilterValue {
    fn from(range: DateRange) -> Self {
        FilterValue::Range(range)
    }
}

/// A filter attached to a table.
///
/// Registered definitions hold the default `value`; live copies produced per
/// request carry the value resolved against the request query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub key: String,
    pub label: String,
    pub kind: FilterKind,
    pub options: Vec<FilterOption>,
    pub value: Option<FilterValue>,
    pub no_filter_option: bool,
    pub no_filter_option_label: String,
    pub timezone: Option<String>,
}

impl Filter {
    /// Whether this filter currently narrows the table.
    pub fn is_enabled(&self) -> bool {
        self.value.is_some()
    }

    /// The current value when it is plain text.
    pub fn text_value(&self) -> Option<&str> {
        match &self.value {
            Some(FilterValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// The options offered by the select control.
    ///
    /// The synthetic "no filter" entry (empty value) leads the list only while the
    /// filter has no value.
    pub fn control_options(&self) -> Vec<FilterOption> {
        let mut options = Vec::with_capacity(self.options.len() + 1);
        if self.no_filter_option && self.value.is_none() {
            options.push(FilterOption::new("", self.no_filter_option_label.clone()));
        }
        options.extend(self.options.iter().cloned());
        options
    }
}

/// Turns an identifier into a human-readable label: `created_at` -> `Created At`.
///
/// Words break on `_`, `-`, whitespace and lower-to-upper case transitions;
/// each word is title-cased.
pub fn headline(key: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for ch in key.chars() {
        if ch == '_' || ch == '-' || ch.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|word| title_case(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Upper-cases the first letter after any non-alphanumeric character
/// (`address.city` -> `Address.City`), lower-cases the rest.
fn title_case(word: &str) -> String {
    let mut titled = String::with_capacity(word.len());
    let mut at_boundary = true;
    for ch in word.chars() {
        if at_boundary {
            titled.extend(ch.to_uppercase());
        } else {
            titled.extend(ch.to_lowercase());
        }
        at_boundary = !ch.is_alphanumeric();
    }
    titled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select(value: Option<&str>, no_filter_option: bool) -> Filter {
        Filter {
            key: "status".into(),
            label: "Status".into(),
            kind: FilterKind::Select,
            options: vec![
                FilterOption::new("active", "Active"),
                FilterOption::new("banned", "Banned"),
            ],
            value: value.map(FilterValue::from),
            no_filter_option,
            no_filter_option_label: "-".into(),
            timezone: None,
        }
    }

    #[test]
    fn test_headline() {
        assert_eq!(headline("created_at"), "Created At");
        assert_eq!(headline("status"), "Status");
        assert_eq!(headline("userId"), "User Id");
        assert_eq!(headline("order-total"), "Order Total");
        assert_eq!(headline("  spaced   out "), "Spaced Out");
        assert_eq!(headline("LOUD_KEY"), "Loud Key");
        assert_eq!(headline("address.city"), "Address.City");
        assert_eq!(headline(""), "");
    }

    #[test]
    fn test_control_options_prepends_no_filter_entry_without_value() {
        let options = select(None, true).control_options();
        assert_eq!(options.len(), 3);
        assert_eq!(options[0], FilterOption::new("", "-"));
        assert_eq!(options[1].value, "active");
    }

    #[test]
    fn test_control_options_skips_no_filter_entry_with_value() {
        let options = select(Some("active"), true).control_options();
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].value, "active");
    }

    #[test]
    fn test_control_options_without_no_filter_option() {
        let options = select(None, false).control_options();
        assert_eq!(options.len(), 2);
    }

    #[test]
    fn test_is_enabled_and_text_value() {
        assert!(!select(None, true).is_enabled());

        let filter = select(Some("banned"), true);
        assert!(filter.is_enabled());
        assert_eq!(filter.text_value(), Some("banned"));
    }

    #[test]
    fn test_blank_values() {
        assert!(FilterValue::from("").is_blank());
        assert!(!FilterValue::from(" ").is_blank());
        assert!(!FilterValue::from("active").is_blank());

        assert!(FilterValue::Range(DateRange::default()).is_blank());
        assert!(FilterValue::Range(DateRange {
            start: Some(String::new()),
            end: Some(String::new()),
        })
        .is_blank());
        assert!(!FilterValue::Range(DateRange {
            start: None,
            end: Some("2020-01-31".into()),
        })
        .is_blank());
    }

    #[test]
    fn test_option_deserializes_from_string_or_pair() {
        let options: Vec<FilterOption> = serde_json::from_str(
            r#"["active", {"value": "banned", "label": "Banned"}, {"value": "x"}]"#,
        )
        .unwrap();

        assert_eq!(options[0], FilterOption::new("active", "active"));
        assert_eq!(options[1], FilterOption::new("banned", "Banned"));
        assert_eq!(options[2], FilterOption::new("x", "x"));
    }

    #[test]
    fn test_value_serialization_shapes() {
        let text = FilterValue::from("42");
        assert_eq!(serde_json::to_string(&text).unwrap(), r#""42""#);

        let range = FilterValue::Range(DateRange {
            start: Some("2020-01-01".into()),
            end: None,
        });
        assert_eq!(
            serde_json::to_string(&range).unwrap(),
            r#"{"start":"2020-01-01"}"#
        );

        let parsed: FilterValue =
            serde_json::from_str(r#"{"start":"a","end":"b"}"#).unwrap();
        assert_eq!(
            parsed,
            FilterValue::Range(DateRange {
                start: Some("a".into()),
                end: Some("b".into()),
            })
        );
    }
}
