use crate::error::{FilterError, Result};
use crate::model::{FilterOption, FilterValue};
use crate::registry::{DateRangeFilter, SelectFilter};
use crate::table::Table;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const CONFIG_FILENAME: &str = "filters.json";
const DEFAULT_TABLE_NAME: &str = "table";

/// A table and its filters, stored as JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableConfig {
    #[serde(default = "default_table_name")]
    pub name: String,

    #[serde(default)]
    pub filters: Vec<FilterConfig>,

    /// Class list overrides for the rendered markup, by theme name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub classes: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterConfig {
    Select {
        key: String,
        #[serde(default)]
        options: Vec<FilterOption>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default: Option<String>,
        #[serde(default = "default_no_filter_option")]
        no_filter_option: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        no_filter_option_label: Option<String>,
    },
    DateRange {
        key: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default: Option<FilterValue>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timezone: Option<String>,
    },
}

impl FilterConfig {
    pub fn key(&self) -> &str {
        match self {
            FilterConfig::Select { key, .. } | FilterConfig::DateRange { key, .. } => key,
        }
    }
}

fn default_table_name() -> String {
    DEFAULT_TABLE_NAME.to_string()
}

fn default_no_filter_option() -> bool {
    true
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            name: default_table_name(),
            filters: Vec::new(),
            classes: BTreeMap::new(),
        }
    }
}

impl TableConfig {
    /// Load config from the given file, or return defaults if not found
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            log::info!("no table config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: TableConfig = serde_json::from_str(&content)?;
        log::debug!(
            "loaded table {:?} with {} filters from {}",
            config.name,
            config.filters.len(),
            path.display()
        );
        Ok(config)
    }

    /// Save config to the given file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Builds the table, registering filters in file order.
    ///
    /// Filters must have a non-empty key. A repeated key replaces the earlier entry,
    /// like any other registration.
    pub fn to_table(&self) -> Result<Table> {
        let mut table = Table::new(self.name.clone());

        for (position, filter) in self.filters.iter().enumerate() {
            if filter.key().trim().is_empty() {
                return Err(FilterError::InvalidConfig(format!(
                    "filter #{} has an empty key",
                    position + 1
                )));
            }

            match filter.clone() {
                FilterConfig::Select {
                    key,
                    options,
                    label,
                    default,
                    no_filter_option,
                    no_filter_option_label,
                } => {
                    let mut select =
                        SelectFilter::new(key, options).no_filter_option(no_filter_option);
                    if let Some(label) = label {
                        select = select.label(label);
                    }
                    if let Some(default) = default {
                        select = select.default_value(default);
                    }
                    if let Some(label) = no_filter_option_label {
                        select = select.no_filter_option_label(label);
                    }
                    table.select_filter(select);
                }
                FilterConfig::DateRange {
                    key,
                    label,
                    default,
                    timezone,
                } => {
                    let mut range = DateRangeFilter::new(key);
                    if let Some(label) = label {
                        range = range.label(label);
                    }
                    if let Some(default) = default {
                        range = range.default_value(default);
                    }
                    if let Some(timezone) = timezone {
                        range = range.timezone(timezone);
                    }
                    table.date_range_filter(range);
                }
            }
        }

        Ok(table)
    }

    /// The config written by `init`.
    pub fn sample() -> Self {
        Self {
            name: "users".to_string(),
            filters: vec![
                FilterConfig::Select {
                    key: "status".to_string(),
                    options: vec![
                        FilterOption::new("active", "Active"),
                        FilterOption::new("pending", "Pending"),
                        FilterOption::new("banned", "Banned"),
                    ],
                    label: None,
                    default: None,
                    no_filter_option: true,
                    no_filter_option_label: Some("Any status".to_string()),
                },
                FilterConfig::DateRange {
                    key: "created_at".to_string(),
                    label: Some("Signed up".to_string()),
                    default: None,
                    timezone: Some("UTC".to_string()),
                },
            ],
            classes: BTreeMap::new(),
        }
    }
}
