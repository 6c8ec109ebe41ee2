//! # Formkit - Themed HTML Template Rendering
//!
//! A small layer over [minijinja](https://docs.rs/minijinja) for rendering HTML
//! form fragments whose CSS classes live outside the templates.
//!
//! ## The Problem
//!
//! Server-rendered components carry long utility-class lists (`bg-gray-100 p-3
//! text-xs uppercase ...`). Inlining them in templates makes the markup hard to read
//! and impossible to re-skin without editing every template.
//!
//! ## The Solution
//!
//! Formkit separates concerns:
//! - **Templates** define structure using Jinja2 syntax (via minijinja)
//! - **Classes** are registered by semantic name in a [`Theme`] and looked up with
//!   the `classes()` template function
//! - **Escaping** is always HTML, whatever the template name
//!
//! ## Quick Example
//!
//! ```rust
//! use formkit::{render, Theme};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Data {
//!     title: String,
//! }
//!
//! let theme = Theme::new().add("heading", "text-xs uppercase");
//!
//! let template = r#"<h3 class="{{ classes('heading') }}">{{ title }}</h3>"#;
//!
//! let output = render(template, &Data { title: "Status".into() }, &theme).unwrap();
//! assert_eq!(output, r#"<h3 class="text-xs uppercase">Status</h3>"#);
//! ```
//!
//! ## Renderer for Multiple Templates
//!
//! Components usually need several templates (a wrapper plus one per control). Use
//! [`Renderer`] to compile them once and render by name:
//!
//! ```rust
//! use formkit::{Renderer, Theme};
//! use serde::Serialize;
//!
//! let theme = Theme::new().add("input", "text-sm");
//!
//! let mut renderer = Renderer::new(theme);
//! renderer
//!     .add_template("input", r#"<input class="{{ classes('input') }}" name="{{ name }}">"#)
//!     .unwrap();
//!
//! #[derive(Serialize)]
//! struct Input { name: String }
//!
//! let html = renderer.render("input", &Input { name: "status".into() }).unwrap();
//! assert_eq!(html, r#"<input class="text-sm" name="status">"#);
//! ```

use minijinja::value::Rest;
use minijinja::{AutoEscape, Environment};
use serde::Serialize;
use std::collections::HashMap;

pub use minijinja::Error;

/// Default prefix used when a class name is not registered.
pub const DEFAULT_MISSING_CLASS_PREFIX: &str = "missing-class";

/// A collection of named class lists.
///
/// When a name is not found, `{prefix}-{name}` is emitted instead so the gap is
/// visible in the rendered markup (defaults to `missing-class-{name}`).
///
/// # Example
///
/// ```rust
/// use formkit::Classes;
///
/// let classes = Classes::new()
///     .add("heading", "text-xs uppercase")
///     .add("body", "p-2");
///
/// assert_eq!(classes.apply("heading"), "text-xs uppercase");
/// assert_eq!(classes.apply("typo"), "missing-class-typo");
/// ```
#[derive(Debug, Clone)]
pub struct Classes {
    classes: HashMap<String, String>,
    missing_prefix: String,
}

impl Default for Classes {
    fn default() -> Self {
        Self {
            classes: HashMap::new(),
            missing_prefix: DEFAULT_MISSING_CLASS_PREFIX.to_string(),
        }
    }
}

impl Classes {
    /// Creates an empty class registry with the default missing prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the prefix emitted for unknown names. An empty prefix makes unknown
    /// names render as nothing.
    pub fn missing_prefix(mut self, prefix: &str) -> Self {
        self.missing_prefix = prefix.to_string();
        self
    }

    /// Adds a named class list. Returns self for chaining.
    ///
    /// If a name already exists, it is replaced.
    pub fn add(mut self, name: &str, classes: &str) -> Self {
        self.classes.insert(name.to_string(), classes.to_string());
        self
    }

    /// Resolves a name to its class list.
    pub fn apply(&self, name: &str) -> String {
        match self.classes.get(name) {
            Some(classes) => classes.clone(),
            None if self.missing_prefix.is_empty() => String::new(),
            None => format!("{}-{}", self.missing_prefix, name),
        }
    }

    /// Returns true if a class list with the given name exists.
    pub fn has(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// A named set of classes used when rendering templates.
#[derive(Debug, Clone, Default)]
pub struct Theme {
    classes: Classes,
}

impl Theme {
    /// Creates an empty theme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a theme from an existing [`Classes`] collection.
    pub fn from_classes(classes: Classes) -> Self {
        Self { classes }
    }

    /// Adds a named class list, returning the updated theme for chaining.
    pub fn add(mut self, name: &str, classes: &str) -> Self {
        self.classes = self.classes.add(name, classes);
        self
    }

    /// Returns the underlying classes.
    pub fn classes(&self) -> &Classes {
        &self.classes
    }
}

/// Renders a one-off template with the given theme.
///
/// The template is HTML-escaped like every formkit template. Prefer [`Renderer`]
/// when the same template is rendered repeatedly.
pub fn render<T: Serialize>(template: &str, data: &T, theme: &Theme) -> Result<String, Error> {
    let mut env = html_environment(theme.clone());
    env.add_template_owned("_inline".to_string(), template.to_string())?;
    let tmpl = env.get_template("_inline")?;
    tmpl.render(data)
}

/// A renderer with pre-registered templates.
///
/// Templates are compiled once on registration and rendered by name.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new(theme: Theme) -> Self {
        Self {
            env: html_environment(theme),
        }
    }

    /// Registers a named template.
    ///
    /// The template is compiled immediately; errors are returned if syntax is invalid.
    pub fn add_template(&mut self, name: &str, source: &str) -> Result<(), Error> {
        self.env
            .add_template_owned(name.to_string(), source.to_string())
    }

    /// Renders a registered template with the given data.
    ///
    /// # Errors
    ///
    /// Returns an error if the template name is not found or rendering fails.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, Error> {
        let tmpl = self.env.get_template(name)?;
        tmpl.render(data)
    }
}

/// Builds an environment that always escapes HTML and exposes `classes()`.
fn html_environment(theme: Theme) -> Environment<'static> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::Html);
    register_classes_function(&mut env, theme);
    env
}

/// Registers `classes(name, ...)`, which joins the class lists of every name given.
fn register_classes_function(env: &mut Environment<'static>, theme: Theme) {
    let classes = theme.classes;
    env.add_function("classes", move |names: Rest<String>| -> String {
        names
            .iter()
            .map(|name| classes.apply(name))
            .filter(|resolved| !resolved.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    });
}
