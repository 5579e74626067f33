//! General-source extraction through `pybabel extract`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tempfile::Builder;

use crate::{
    config::SourceMapping,
    core::{catalog::Catalog, context::TranslateContext, tools::babel_extract},
};

/// Babel mapping file content, one `[method: pattern]` section per pattern.
pub fn mapping_config(mappings: &[SourceMapping]) -> String {
    let mut out = String::new();
    for mapping in mappings {
        for pattern in &mapping.patterns {
            out.push_str(&format!("[{}: {}]\n", mapping.method, pattern));
        }
    }
    out
}

/// Extract the strings of `files` (all under `root`) into the template at
/// `pot_path`. Template references are relative to `root`.
///
/// With no input files the tool is not run and a header-only template is
/// written instead.
pub fn extract_strings(
    ctx: &TranslateContext,
    root: &Path,
    files: &[PathBuf],
    pot_path: &Path,
    project: &str,
    version: &str,
) -> Result<()> {
    if files.is_empty() {
        return Catalog::template(project, version).save(pot_path);
    }

    let mapping = Builder::new()
        .prefix("langpack-mapping-")
        .suffix(".cfg")
        .tempfile()
        .context("Failed to create temporary mapping file")?;
    fs::write(mapping.path(), mapping_config(&ctx.config.source_mapping))
        .with_context(|| format!("Failed to write {}", mapping.path().display()))?;

    let invocation = babel_extract(
        &ctx.config.tools.babel,
        root,
        pot_path,
        project,
        version,
        mapping.path(),
        files,
    )?;
    ctx.runner.run(&invocation)?;

    Ok(())
}
