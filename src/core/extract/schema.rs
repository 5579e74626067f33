//! Extraction from JSON settings schemas.
//!
//! Schemas are found through manifest files (`package.json` by default) that
//! point at a schema directory. Each `*.json` schema contributes its top-level
//! `title`/`description` and the `title`/`description` of every property.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde_json::Value;

use crate::{
    config::{LineMatch, NEWLINE_PLACEHOLDER, SchemaConfig},
    core::{
        catalog::{MessageEntry, Occurrence, merge::relativize},
        scanner::find_source_files,
    },
};

/// Line numbers (1-based) of the lines quoting `value` as `"value"` or
/// `'value'`, after decoding `\n` escapes in each line.
///
/// With `LineMatch::Last` only the last match is returned. Without any match
/// the result is `[0]`.
pub fn get_line(lines: &[&str], value: &str, mode: LineMatch) -> Vec<usize> {
    let double = format!("\"{}\"", value);
    let single = format!("'{}'", value);

    let matches: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.replace("\\n", "\n");
            line.contains(&double) || line.contains(&single)
        })
        .map(|(idx, _)| idx + 1)
        .collect();

    match (mode, matches.last()) {
        (_, None) => vec![0],
        (LineMatch::Last, Some(&last)) => vec![last],
        (LineMatch::All, Some(_)) => matches,
    }
}

/// Schema files referenced by the manifests under `root`, sorted.
pub fn find_schema_files(
    root: &Path,
    settings: &SchemaConfig,
    skip_folders: &[String],
    verbose: bool,
) -> Result<Vec<PathBuf>> {
    let manifests = find_source_files(
        root,
        std::slice::from_ref(&settings.manifest),
        skip_folders,
        verbose,
    );

    let mut schema_files = Vec::new();
    for manifest in manifests {
        let content = fs::read_to_string(&manifest)
            .with_context(|| format!("Failed to read {}", manifest.display()))?;
        let data: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON file: {}", manifest.display()))?;

        let Some(schema_dir) = data.pointer(&settings.dir_pointer).and_then(Value::as_str) else {
            continue;
        };
        let Some(parent) = manifest.parent() else {
            continue;
        };
        let schema_dir = parent.join(schema_dir);
        if !schema_dir.is_dir() {
            continue;
        }

        let entries = fs::read_dir(&schema_dir)
            .with_context(|| format!("Failed to read directory {}", schema_dir.display()))?;
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                schema_files.push(path);
            }
        }
    }

    schema_files.sort();
    Ok(schema_files)
}

/// Extract entries from every schema under `root`.
///
/// Occurrence paths are relative to `root`. Newlines in values are replaced
/// by the newline placeholder until the template is deduplicated.
pub fn extract_schema_strings(
    root: &Path,
    settings: &SchemaConfig,
    skip_folders: &[String],
    verbose: bool,
) -> Result<Vec<MessageEntry>> {
    let root_str = root.to_string_lossy();
    let mut entries = Vec::new();

    for path in find_schema_files(root, settings, skip_folders, verbose)? {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let schema: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON file: {}", path.display()))?;
        let lines: Vec<&str> = content.split('\n').collect();
        let ref_path = relativize(&path.to_string_lossy(), &root_str);

        let mut push = |value: &str, context: Option<&str>| {
            let mut entry = MessageEntry::new(value.replace('\n', NEWLINE_PLACEHOLDER));
            entry.msgctxt = context.map(String::from);
            entry.occurrences = get_line(&lines, value, settings.line_match)
                .into_iter()
                .map(|line| Occurrence::new(ref_path.as_str(), line))
                .collect();
            entries.push(entry);
        };

        let context = Some(settings.context.as_str());
        for key in ["title", "description"] {
            if let Some(value) = schema.get(key).and_then(Value::as_str) {
                push(value, context);
            }
        }

        if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
            for property in properties.values() {
                if let Some(title) = property.get("title").and_then(Value::as_str) {
                    push(title, None);
                }
                if let Some(description) = property.get("description").and_then(Value::as_str) {
                    push(description, context);
                }
            }
        }
    }

    Ok(entries)
}
