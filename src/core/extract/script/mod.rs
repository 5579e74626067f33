//! Extraction from UI script files (`.ts`/`.tsx`).
//!
//! Calls are recognized through an explicit list of [`CallRule`]s. Two backends
//! implement [`ScriptExtractor`]: an in-process one built on swc, and one that
//! drives the external `gettext-extract` tool.

pub mod gettext_extract;
pub mod swc;

use std::path::Path;

use anyhow::{Result, bail};
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

pub use gettext_extract::GettextExtractBackend;
pub use swc::SwcBackend;

use crate::{
    config::{Config, ScriptBackendKind},
    core::{catalog::MessageEntry, tools::ToolRunner},
};

/// A translation call shape, e.g. `this._trans._np` with context at 0, text at 1
/// and plural text at 2.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CallRule {
    pub expression: String,
    pub arguments: RuleArguments,
}

/// Argument positions of a [`CallRule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleArguments {
    pub text: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_plural: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<usize>,
}

static DEFAULT_RECEIVERS: [&str; 2] = ["trans", "this._trans"];

impl CallRule {
    pub fn new(expression: &str, text: usize, text_plural: Option<usize>, context: Option<usize>) -> Self {
        Self {
            expression: expression.to_string(),
            arguments: RuleArguments {
                text,
                text_plural,
                context,
            },
        }
    }

    /// The gettext method family on the `trans` and `this._trans` receivers.
    pub fn defaults() -> Vec<CallRule> {
        let methods: [(&str, usize, Option<usize>, Option<usize>); 8] = [
            ("__", 0, None, None),
            ("gettext", 0, None, None),
            ("_n", 0, Some(1), None),
            ("ngettext", 0, Some(1), None),
            ("_p", 1, None, Some(0)),
            ("pgettext", 1, None, Some(0)),
            ("_np", 1, Some(2), Some(0)),
            ("npgettext", 1, Some(2), Some(0)),
        ];

        methods
            .iter()
            .flat_map(|&(method, text, plural, context)| {
                DEFAULT_RECEIVERS.iter().map(move |receiver| {
                    CallRule::new(&format!("{}.{}", receiver, method), text, plural, context)
                })
            })
            .collect()
    }

    /// Check that the expression is a dotted member path and that argument
    /// positions do not overlap.
    pub fn validate(&self) -> Result<()> {
        if self.expression.is_empty()
            || self
                .expression
                .split('.')
                .any(|segment| !is_identifier(segment))
        {
            bail!("expression must be a dotted member path");
        }

        let args = &self.arguments;
        let mut positions = vec![args.text];
        positions.extend(args.text_plural);
        positions.extend(args.context);
        let count = positions.len();
        positions.sort_unstable();
        positions.dedup();
        if positions.len() != count {
            bail!("argument positions must be distinct");
        }

        Ok(())
    }

    /// Highest argument index the rule reads.
    pub fn max_position(&self) -> usize {
        let args = &self.arguments;
        args.text
            .max(args.text_plural.unwrap_or(0))
            .max(args.context.unwrap_or(0))
    }
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// A script file that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Default)]
pub struct ScriptExtraction {
    pub entries: Vec<MessageEntry>,
    pub parse_failures: Vec<ParseFailure>,
}

#[enum_dispatch]
pub trait ScriptExtractor {
    /// Extract entries from the script files under `root`.
    ///
    /// Occurrence paths may be absolute or relative to `root`; the catalog
    /// builder normalizes them.
    fn extract(&self, root: &Path, runner: &dyn ToolRunner) -> Result<ScriptExtraction>;
}

#[enum_dispatch(ScriptExtractor)]
#[derive(Debug, Clone)]
pub enum ScriptBackend {
    Swc(SwcBackend),
    GettextExtract(GettextExtractBackend),
}

impl ScriptBackend {
    pub fn from_config(config: &Config, verbose: bool) -> Self {
        let script = &config.script;
        match script.backend {
            ScriptBackendKind::Swc => ScriptBackend::Swc(SwcBackend {
                patterns: script.patterns.clone(),
                ignore: script.ignore.clone(),
                skip_folders: config.skip_folders.clone(),
                rules: script.rules.clone(),
                verbose,
            }),
            ScriptBackendKind::GettextExtract => {
                ScriptBackend::GettextExtract(GettextExtractBackend {
                    command: config.tools.gettext_extract.clone(),
                    patterns: script.patterns.clone(),
                    ignore: script.ignore.clone(),
                    rules: script.rules.clone(),
                })
            }
        }
    }
}
