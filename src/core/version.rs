//! Version lookup for the catalog header.

use std::{fs, path::Path, sync::LazyLock};

use anyhow::{Context, Result};
use regex::Regex;
use serde_json::Value;

static DUNDER_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^__version__\s*=\s*['"]([^'"]+)['"]"#).expect("valid regex")
});

static VERSION_INFO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^version_info\s*=\s*\w*\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)")
        .expect("valid regex")
});

/// Read the version of `project` inside `repo_root`.
///
/// Looks at `<project>/__init__.py`, then `<project>/_version.py`, then
/// `<project>/package.json`. Returns an empty string when nothing is found.
pub fn get_version(repo_root: &Path, project: &str) -> Result<String> {
    let project_dir = repo_root.join(project);

    for name in ["__init__.py", "_version.py"] {
        let path = project_dir.join(name);
        if path.is_file() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            if let Some(version) = python_version(&content) {
                return Ok(version);
            }
        }
    }

    let pkg_path = project_dir.join("package.json");
    if pkg_path.is_file() {
        let content = fs::read_to_string(&pkg_path)
            .with_context(|| format!("Failed to read {}", pkg_path.display()))?;
        let data: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON file: {}", pkg_path.display()))?;
        if let Some(version) = data.get("version").and_then(Value::as_str) {
            return Ok(version.to_string());
        }
    }

    Ok(String::new())
}

fn python_version(content: &str) -> Option<String> {
    if let Some(caps) = DUNDER_VERSION.captures(content) {
        return Some(caps[1].to_string());
    }

    VERSION_INFO
        .captures(content)
        .map(|caps| format!("{}.{}.{}", &caps[1], &caps[2], &caps[3]))
}
