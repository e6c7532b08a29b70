//! Mock data source for the demo controllers
//!
//! Collections live in an embedded JSON document; there is no persistence.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::Deserialize;

use crate::logger;

const EMBEDDED_DATA: &str = include_str!("data.json");

/// Fallbacks used when a collection is missing a field
pub const DEFAULT_TITLE: &str = "Default Title";
pub const DEFAULT_MESSAGE: &str = "No message.";

/// One page worth of listing data
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageData {
    pub title: Option<String>,
    pub message: Option<String>,
    pub items: Vec<String>,
}

impl PageData {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or(DEFAULT_MESSAGE)
    }
}

/// Named collections of page data
#[derive(Debug, Default)]
pub struct Database {
    collections: HashMap<String, PageData>,
}

impl Database {
    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        Ok(Self {
            collections: serde_json::from_str(source)?,
        })
    }

    /// Process-wide instance over the embedded document. A malformed
    /// document is logged and yields an empty database.
    pub fn shared() -> &'static Self {
        static DATABASE: OnceLock<Database> = OnceLock::new();
        DATABASE.get_or_init(|| {
            Self::from_json(EMBEDDED_DATA).unwrap_or_else(|e| {
                logger::log_error(&format!("Embedded mock data is invalid: {e}"));
                Self::default()
            })
        })
    }

    /// Unknown collections come back empty
    pub fn get_data(&self, collection: &str) -> PageData {
        self.collections.get(collection).cloned().unwrap_or_default()
    }
}

/// Reads one collection on behalf of a controller
#[derive(Debug, Clone, Copy)]
pub struct PageModel {
    collection: &'static str,
    database: &'static Database,
}

impl PageModel {
    pub fn new(collection: &'static str) -> Self {
        Self {
            collection,
            database: Database::shared(),
        }
    }

    pub fn page_data(&self) -> PageData {
        self.database.get_data(self.collection)
    }
}
