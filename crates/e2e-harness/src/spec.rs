//! Spec Files
//!
//! A spec file is TOML with one `[[test]]` table per test case. Each test is
//! a list of steps run against a freshly mounted board.
//!
//! ```toml
//! [[test]]
//! name = "creates an item"
//! steps = [
//!     { action = "fill", field = "user_id", value = "alice" },
//!     { action = "submit" },
//!     { action = "expect_message", text = "Item created successfully." },
//! ]
//! ```

use std::path::Path;

use item_board_core::ItemId;
use serde::{Deserialize, Deserializer};

use crate::error::{HarnessError, Result};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpecFile {
    #[serde(rename = "test", default)]
    pub tests: Vec<TestCase>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TestCase {
    pub name: String,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// Either a literal id or `"last"`, the item most recently created by the test
#[derive(Debug, Clone, PartialEq)]
pub enum ItemRef {
    Last,
    Id(ItemId),
}

impl<'de> Deserialize<'de> for ItemRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(match ItemId::deserialize(deserializer)? {
            ItemId::Text(s) if s == "last" => ItemRef::Last,
            id => ItemRef::Id(id),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Type into a form field
    Fill { field: String, value: String },
    /// Press "Create Item"
    Submit,
    /// Reload the list from the server
    Reload,
    /// Press "Delete" on a card
    Delete { item: ItemRef },
    ExpectMessage { text: String },
    /// Card is listed; optional fields must match
    ExpectItem {
        item: ItemRef,
        #[serde(default)]
        user_id: Option<String>,
        #[serde(default)]
        keywords: Option<String>,
        #[serde(default)]
        description: Option<String>,
    },
    ExpectNoItem { item: ItemRef },
    ExpectCount { count: usize },
    ExpectDraft { field: String, value: String },
    /// Draft is empty again with a new placeholder image
    ExpectDraftReset,
}

impl SpecFile {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| HarnessError::io(path, e))?;
        Self::parse(&raw, path)
    }

    pub fn parse(raw: &str, path: &Path) -> Result<Self> {
        toml::from_str(raw).map_err(|source| HarnessError::SpecParse {
            path: path.to_path_buf(),
            source,
        })
    }
}
