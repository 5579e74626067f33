//! Script extraction through the external `gettext-extract` tool.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde_json::{Value, json};
use tempfile::{Builder, NamedTempFile};

use super::{CallRule, ScriptExtraction, ScriptExtractor};
use crate::{
    core::{
        catalog::Catalog,
        tools::{ToolInvocation, ToolRunner},
    },
    error::Tool,
};

#[derive(Debug, Clone)]
pub struct GettextExtractBackend {
    pub command: Vec<String>,
    pub patterns: Vec<String>,
    pub ignore: Vec<String>,
    pub rules: Vec<CallRule>,
}

impl GettextExtractBackend {
    /// Tool configuration. Multiple patterns are combined into one brace
    /// alternative, since the tool takes a single pattern.
    fn tool_config(&self, output: &Path) -> Value {
        let pattern = match self.patterns.as_slice() {
            [single] => single.clone(),
            many => format!("{{{}}}", many.join(",")),
        };

        json!({
            "js": {
                "parsers": self.rules,
                "glob": {
                    "pattern": pattern,
                    "options": { "ignore": self.ignore },
                },
                "comments": { "otherLineLeading": true },
            },
            "headers": { "Language": "" },
            "output": output.display().to_string(),
        })
    }
}

fn temp_file(suffix: &str) -> Result<NamedTempFile> {
    Builder::new()
        .prefix("langpack-")
        .suffix(suffix)
        .tempfile()
        .context("Failed to create temporary file")
}

impl ScriptExtractor for GettextExtractBackend {
    fn extract(&self, root: &Path, runner: &dyn ToolRunner) -> Result<ScriptExtraction> {
        // Both files are removed when dropped, whatever happens below.
        let output = temp_file(".pot")?;
        let config = temp_file(".json")?;

        let config_json = serde_json::to_string_pretty(&self.tool_config(output.path()))
            .context("Failed to serialize gettext-extract config")?;
        fs::write(config.path(), config_json)
            .with_context(|| format!("Failed to write {}", config.path().display()))?;

        let invocation = ToolInvocation::new(Tool::GettextExtract, "extract", &self.command)?
            .arg("--config")
            .arg(config.path().display().to_string())
            .current_dir(root);
        runner.run(&invocation)?;

        let raw = fs::read_to_string(output.path())
            .with_context(|| format!("Failed to read {}", output.path().display()))?;
        // The tool omits the header flags line.
        fs::write(output.path(), format!("#, fuzzy\n{}", raw))
            .with_context(|| format!("Failed to write {}", output.path().display()))?;
        let catalog = Catalog::from_file(output.path())?;

        Ok(ScriptExtraction {
            entries: catalog.entries,
            parse_failures: Vec::new(),
        })
    }
}
