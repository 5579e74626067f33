//! Message catalogs (`.pot` templates and per-locale `.po` files).
//!
//! - `po`: reading and writing the gettext text format through `polib`
//! - `merge`: template building (path rewriting, deduplication)
//! - `json`: conversion to the JSON document loaded by the web client

pub mod json;
pub mod merge;
pub mod po;

use std::{fmt, path::Path};

use anyhow::Result;

/// A source location a message was extracted from.
///
/// Ordered by path, then line, which is the order occurrences are written in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Occurrence {
    pub path: String,
    pub line: Option<usize>,
}

impl Occurrence {
    pub fn new(path: impl Into<String>, line: usize) -> Self {
        Self {
            path: path.into(),
            line: Some(line),
        }
    }
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}", self.path, line),
            None => write!(f, "{}", self.path),
        }
    }
}

/// One message of a catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageEntry {
    pub msgctxt: Option<String>,
    pub msgid: String,
    pub msgid_plural: Option<String>,
    pub msgstr: String,
    /// Plural translations by index; only meaningful when `msgid_plural` is set.
    pub msgstr_plural: Vec<String>,
    pub occurrences: Vec<Occurrence>,
    /// Extracted comment (`#.`), lines joined with `\n`.
    pub comment: Option<String>,
    pub flags: Vec<String>,
    /// Obsolete entries are never written out.
    pub obsolete: bool,
}

impl MessageEntry {
    pub fn new(msgid: impl Into<String>) -> Self {
        Self {
            msgid: msgid.into(),
            ..Default::default()
        }
    }

    pub fn with_context(mut self, msgctxt: impl Into<String>) -> Self {
        self.msgctxt = Some(msgctxt.into());
        self
    }

    pub fn with_plural(mut self, msgid_plural: impl Into<String>) -> Self {
        self.msgid_plural = Some(msgid_plural.into());
        self
    }

    pub fn with_occurrence(mut self, path: impl Into<String>, line: usize) -> Self {
        self.occurrences.push(Occurrence::new(path, line));
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn is_fuzzy(&self) -> bool {
        self.flags.iter().any(|f| f == "fuzzy")
    }

    /// True when at least one translation string is non-empty.
    pub fn is_translated(&self) -> bool {
        if self.msgid_plural.is_some() {
            self.msgstr_plural.iter().any(|s| !s.is_empty())
        } else {
            !self.msgstr.is_empty()
        }
    }

    /// Deduplication identity: context and message id.
    pub fn key(&self) -> (Option<&str>, &str) {
        (self.msgctxt.as_deref(), self.msgid.as_str())
    }
}

/// An ordered collection of message entries plus header metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    /// Header `Key: Value` pairs in file order.
    pub header: Vec<(String, String)>,
    pub entries: Vec<MessageEntry>,
}

impl Catalog {
    /// Empty template with the header Babel would generate.
    pub fn template(project: &str, version: &str) -> Self {
        let project_id = format!("{} {}", project, version).trim().to_string();
        let header = [
            ("Project-Id-Version", project_id.as_str()),
            ("MIME-Version", "1.0"),
            ("Content-Type", "text/plain; charset=utf-8"),
            ("Content-Transfer-Encoding", "8bit"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        Self {
            header,
            entries: Vec::new(),
        }
    }

    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.header
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_metadata(&mut self, key: &str, value: &str) {
        match self.header.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.header.push((key.to_string(), value.to_string())),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        po::read(path)
    }

    /// Write the catalog to `path`, replacing any previous file atomically.
    pub fn save(&self, path: &Path) -> Result<()> {
        po::write(self, path)
    }
}
