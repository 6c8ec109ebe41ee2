//! # Table Filters
//!
//! Select and date-range filters for server-rendered tables, with their state kept
//! in the request query string.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs)                                     │
//! │  - Loads a table config, prints values / markup             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  View (view/)                                               │
//! │  - Live filters → HTML via formkit templates                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Table / Registry (table.rs, registry.rs)                   │
//! │  - Filter definitions, upsert by key                        │
//! │  - Live filters, enabled state, key → value map             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Request (query.rs)                                         │
//! │  - `filter[...]` values parsed from the query string        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Definitions vs. live filters
//!
//! Definitions are registered once when the table is set up and hold default values.
//! Each render takes the parsed request query and produces *live* copies whose value
//! is the request's value where present. Definitions are never mutated by a request,
//! so a configured table can be shared by any number of renders.
//!
//! Request values are passed through unvalidated. Whatever turns filter values into
//! a database query is responsible for checking them.
//!
//! ```rust
//! use table_filters::model::FilterValue;
//! use table_filters::query::RequestQuery;
//! use table_filters::registry::{DateRangeFilter, SelectFilter};
//! use table_filters::table::Table;
//! use table_filters::view::FilterView;
//!
//! let mut users = Table::new("users");
//! users
//!     .select_filter(SelectFilter::new("status", [("active", "Active"), ("banned", "Banned")]))
//!     .date_range_filter(DateRangeFilter::new("created_at").timezone("UTC"));
//!
//! let query = RequestQuery::parse("?filter[status]=banned&page=2").unwrap();
//! let values = users.filter_values(&query);
//! assert_eq!(values["status"], Some(FilterValue::from("banned")));
//! assert_eq!(values["created_at"], None);
//!
//! let html = users.render_filters(&FilterView::new().unwrap(), &query).unwrap();
//! assert!(html.contains(r#"<option value="banned" selected>Banned</option>"#));
//! ```
//!
//! ## Module Overview
//!
//! - [`model`]: `Filter`, its kind, options and values; label derivation
//! - [`registry`]: `FilterRegistry` and the registration builders
//! - [`table`]: `Table`, which owns a registry
//! - [`query`]: `RequestQuery`, the request's filter values
//! - [`view`]: `FilterView`, the HTML rendering
//! - [`config`]: JSON table configuration
//! - [`error`]: Error types

pub mod config;
pub mod error;
pub mod model;
pub mod query;
pub mod registry;
pub mod table;
pub mod view;
