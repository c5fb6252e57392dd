use indexmap::IndexMap;
use serde::Serialize;

/// One record as returned by the SQL client, before any transformation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub date_created: String,
    pub content_id: String,
    pub content_html: String,
}

/// Flattened `tag -> content` mapping built from a row's markup.
///
/// Keys keep the position of their first insertion; inserting an existing key
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Document {
    entries: IndexMap<String, String>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Removes `key` and keeps the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A transformed row, ready for the writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportDocument {
    Json(Document),
    Markdown { frontmatter: Document, body: String },
}

/// Per-run token that marks the end of every row in the client's output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Separator(String);

impl Separator {
    pub fn generate() -> Self {
        Self::from_hash(rand::random::<i64>())
    }

    pub fn from_hash(hash: i64) -> Self {
        Self(format!("------{}-----", hash))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl std::fmt::Display for Separator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub written: usize,
    pub skipped: usize,
}
