//! Render context
//!
//! Values are stored already typed. The renderer asks each one for its
//! [`ContextValue::render`] form: text is HTML-escaped, markup is not.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

/// A single value that can be substituted into a view
#[derive(Debug, Clone, PartialEq)]
pub enum ContextValue {
    /// Plain text, escaped when substituted into a view
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// Pre-rendered markup, inserted as-is
    Html(String),
}

impl fmt::Display for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) | Self::Html(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl ContextValue {
    /// Text as it appears in a rendered view
    pub fn render(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => html_escape::encode_safe(s),
            Self::Html(s) => Cow::Borrowed(s),
            other => Cow::Owned(other.to_string()),
        }
    }
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ContextValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for ContextValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for ContextValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for ContextValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Key-value data handed from an action to the renderer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    values: HashMap<String, ContextValue>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ContextValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a pre-rendered HTML fragment
    #[must_use]
    pub fn with_html(mut self, key: impl Into<String>, html: impl Into<String>) -> Self {
        self.values
            .insert(key.into(), ContextValue::Html(html.into()));
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ContextValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.values.get(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
