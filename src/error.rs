//! Error kinds that callers may want to distinguish.
//!
//! Most functions return `anyhow::Result`; the variants here are wrapped into
//! `anyhow::Error` and can be recovered with `downcast_ref::<TranslateError>()`.

use std::path::PathBuf;

use thiserror::Error;

/// External tools driven as subprocesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Babel,
    GettextExtract,
    Cookiecutter,
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tool::Babel => write!(f, "babel"),
            Tool::GettextExtract => write!(f, "gettext-extract"),
            Tool::Cookiecutter => write!(f, "cookiecutter"),
        }
    }
}

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("Invalid locale '{locale}'")]
    InvalidLocale { locale: String },

    #[error("Output dir `{}` not found!", path.display())]
    MissingOutputDir { path: PathBuf },

    #[error("Catalog `{}` not found", path.display())]
    CatalogNotFound { path: PathBuf },

    #[error("{tool} executable `{program}` could not be started: {reason}")]
    ToolNotFound {
        tool: Tool,
        program: String,
        reason: String,
    },

    #[error("{tool} {action} failed{}{}", code.map(|c| format!(" with exit code {}", c)).unwrap_or_default(), format_stderr(stderr))]
    ToolFailed {
        tool: Tool,
        action: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Failed to parse catalog {}: {message}", path.display())]
    CatalogParse { path: PathBuf, message: String },
}

fn format_stderr(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    }
}
