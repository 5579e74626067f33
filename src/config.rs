use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::extract::script::CallRule;

pub const CONFIG_FILE_NAME: &str = ".langpackrc.json";

/// Placeholder for embedded newlines in schema text until the template is written.
pub const NEWLINE_PLACEHOLDER: &str = "</br/>";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_skip_folders")]
    pub skip_folders: Vec<String>,
    #[serde(default = "default_platform_project")]
    pub platform_project: String,
    #[serde(default = "default_extensions_folder")]
    pub extensions_folder: String,
    #[serde(default = "default_language_packs_folder")]
    pub language_packs_folder: String,
    #[serde(default = "default_package_prefix")]
    pub package_prefix: String,
    #[serde(default = "default_cookiecutter_template")]
    pub cookiecutter_template: String,
    #[serde(default = "default_source_mapping")]
    pub source_mapping: Vec<SourceMapping>,
    #[serde(default)]
    pub script: ScriptConfig,
    #[serde(default)]
    pub schema: SchemaConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
}

/// One `[method: pattern]` section of the Babel extraction mapping.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceMapping {
    pub method: String,
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScriptBackendKind {
    #[default]
    Swc,
    GettextExtract,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptConfig {
    #[serde(default)]
    pub backend: ScriptBackendKind,
    #[serde(default = "default_script_patterns")]
    pub patterns: Vec<String>,
    #[serde(default = "default_script_ignore")]
    pub ignore: Vec<String>,
    #[serde(default = "CallRule::defaults")]
    pub rules: Vec<CallRule>,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            backend: ScriptBackendKind::default(),
            patterns: default_script_patterns(),
            ignore: default_script_ignore(),
            rules: CallRule::defaults(),
        }
    }
}

/// Which matching lines of a schema file are recorded for an extracted string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineMatch {
    #[default]
    Last,
    All,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaConfig {
    #[serde(default = "default_schema_manifest")]
    pub manifest: String,
    #[serde(default = "default_schema_dir_pointer")]
    pub dir_pointer: String,
    #[serde(default = "default_schema_context")]
    pub context: String,
    #[serde(default)]
    pub line_match: LineMatch,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            manifest: default_schema_manifest(),
            dir_pointer: default_schema_dir_pointer(),
            context: default_schema_context(),
            line_match: LineMatch::default(),
        }
    }
}

/// Command prefixes for the external tools, e.g. `["python", "-m", "babel.messages.frontend"]`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolsConfig {
    #[serde(default = "default_babel")]
    pub babel: Vec<String>,
    #[serde(default = "default_gettext_extract")]
    pub gettext_extract: Vec<String>,
    #[serde(default = "default_cookiecutter")]
    pub cookiecutter: Vec<String>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            babel: default_babel(),
            gettext_extract: default_gettext_extract(),
            cookiecutter: default_cookiecutter(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    [".ts", ".py"].map(String::from).to_vec()
}

fn default_skip_folders() -> Vec<String> {
    [
        "tests",
        "test",
        "node_modules",
        "lib",
        ".git",
        ".ipynb_checkpoints",
    ]
    .map(String::from)
    .to_vec()
}

fn default_platform_project() -> String {
    "jupyterlab".to_string()
}

fn default_extensions_folder() -> String {
    "jupyterlab_extensions".to_string()
}

fn default_language_packs_folder() -> String {
    "language-packs".to_string()
}

fn default_package_prefix() -> String {
    "jupyterlab-language-pack-".to_string()
}

fn default_cookiecutter_template() -> String {
    "https://github.com/jupyterlab/language-pack-cookiecutter".to_string()
}

fn default_source_mapping() -> Vec<SourceMapping> {
    vec![SourceMapping {
        method: "python".to_string(),
        patterns: vec!["**.py".to_string()],
    }]
}

fn default_script_patterns() -> Vec<String> {
    ["packages/**/*.ts", "packages/**/*.tsx"]
        .map(String::from)
        .to_vec()
}

fn default_script_ignore() -> Vec<String> {
    vec!["packages/**/*.spec.ts".to_string()]
}

fn default_schema_manifest() -> String {
    "package.json".to_string()
}

fn default_schema_dir_pointer() -> String {
    "/jupyterlab/schemaDir".to_string()
}

fn default_schema_context() -> String {
    "schema".to_string()
}

fn default_babel() -> Vec<String> {
    vec!["pybabel".to_string()]
}

fn default_gettext_extract() -> Vec<String> {
    vec!["gettext-extract".to_string()]
}

fn default_cookiecutter() -> Vec<String> {
    vec!["cookiecutter".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            skip_folders: default_skip_folders(),
            platform_project: default_platform_project(),
            extensions_folder: default_extensions_folder(),
            language_packs_folder: default_language_packs_folder(),
            package_prefix: default_package_prefix(),
            cookiecutter_template: default_cookiecutter_template(),
            source_mapping: default_source_mapping(),
            script: ScriptConfig::default(),
            schema: SchemaConfig::default(),
            tools: ToolsConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern is invalid, a tool command is empty,
    /// or a call rule does not name its text argument consistently.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.script.patterns {
            Pattern::new(pattern).with_context(|| {
                format!("Invalid glob pattern in 'script.patterns': \"{}\"", pattern)
            })?;
        }

        for pattern in &self.script.ignore {
            Pattern::new(pattern).with_context(|| {
                format!("Invalid glob pattern in 'script.ignore': \"{}\"", pattern)
            })?;
        }

        for rule in &self.script.rules {
            rule.validate()
                .with_context(|| format!("Invalid rule in 'script.rules': \"{}\"", rule.expression))?;
        }

        if !self.schema.dir_pointer.is_empty() && !self.schema.dir_pointer.starts_with('/') {
            bail!(
                "'schema.dirPointer' must be a JSON pointer starting with '/': \"{}\"",
                self.schema.dir_pointer
            );
        }

        for (name, command) in [
            ("babel", &self.tools.babel),
            ("gettextExtract", &self.tools.gettext_extract),
            ("cookiecutter", &self.tools.cookiecutter),
        ] {
            if command.is_empty() {
                bail!("Tool command 'tools.{}' must not be empty", name);
            }
        }

        Ok(())
    }

    /// Name of the distribution package for a locale, e.g. `jupyterlab-language-pack-pt_BR`.
    pub fn package_name(&self, locale: &str) -> String {
        format!("{}{}", self.package_prefix, locale)
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Path the config was read from, `None` when using defaults.
    pub path: Option<PathBuf>,
}

pub fn read_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    let config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;
    config.validate()?;
    Ok(config)
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => Ok(ConfigLoadResult {
            config: read_config_file(&path)?,
            path: Some(path),
        }),
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use crate::config::*;
    use pretty_assertions::assert_eq;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.extensions, vec![".ts", ".py"]);
        assert!(config.skip_folders.contains(&"node_modules".to_string()));
        assert_eq!(config.platform_project, "jupyterlab");
        assert_eq!(config.script.backend, ScriptBackendKind::Swc);
        assert_eq!(config.script.rules.len(), 16);
        assert_eq!(config.schema.line_match, LineMatch::Last);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_config() {
        let json = r#"{
              "skipFolders": ["vendor"],
              "platformProject": "notebook",
              "script": { "backend": "gettext-extract" },
              "schema": { "lineMatch": "all" },
              "tools": { "babel": ["python", "-m", "babel.messages.frontend"] }
          }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.skip_folders, vec!["vendor"]);
        assert_eq!(config.platform_project, "notebook");
        assert_eq!(config.script.backend, ScriptBackendKind::GettextExtract);
        assert_eq!(config.script.patterns, default_script_patterns());
        assert_eq!(config.schema.line_match, LineMatch::All);
        assert_eq!(config.schema.manifest, "package.json");
        assert_eq!(
            config.tools.babel,
            vec!["python", "-m", "babel.messages.frontend"]
        );
        assert_eq!(config.tools.cookiecutter, vec!["cookiecutter"]);
        assert_eq!(config.extensions, default_extensions());
    }

    #[test]
    fn test_find_config_file() {
        let dir = tempdir().unwrap();
        let sub_dir = dir.path().join("packages").join("app");
        fs::create_dir_all(&sub_dir).unwrap();

        let config_path = dir.path().join(CONFIG_FILE_NAME);
        File::create(&config_path).unwrap();

        let found = find_config_file(&sub_dir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_stops_at_git_root() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        assert!(find_config_file(dir.path()).is_none());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "extensions": [".py"] }"#,
        )
        .unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(result.path.is_some());
        assert_eq!(result.config.extensions, vec![".py"]);
    }

    #[test]
    fn test_load_config_default_when_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(result.path.is_none());
        assert_eq!(result.config.extensions, default_extensions());
    }

    #[test]
    fn test_validate_invalid_script_pattern() {
        let mut config = Config::default();
        config.script.ignore = vec!["packages/**/[invalid".to_string()];
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("script.ignore"));
    }

    #[test]
    fn test_validate_empty_tool_command() {
        let mut config = Config::default();
        config.tools.cookiecutter = Vec::new();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("cookiecutter"));
    }

    #[test]
    fn test_validate_relative_dir_pointer() {
        let mut config = Config::default();
        config.schema.dir_pointer = "jupyterlab/schemaDir".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_config_with_invalid_pattern_fails() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "script": { "patterns": ["[invalid"] } }"#,
        )
        .unwrap();

        assert!(load_config(dir.path()).is_err());
    }

    #[test]
    fn test_package_name() {
        let config = Config::default();
        assert_eq!(config.package_name("pt_BR"), "jupyterlab-language-pack-pt_BR");
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let json = default_config_json().unwrap();
        assert!(json.contains("skipFolders"));
        assert!(json.contains("dirPointer"));
        assert!(json.contains("\"backend\": \"swc\""));
        assert!(json.contains("\"textPlural\""));
    }
}
