use std::path::PathBuf;

use super::super::exit_status::ExitStatus;
use crate::{
    api::CompileSummary,
    core::{extract::TemplateSummary, sync::UpdateSummary},
};

/// Outcome of one locale tag passed to `check-locale`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleCheck {
    pub locale: String,
    /// English display name; `None` when the tag is invalid.
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitSummary {
    pub path: PathBuf,
    pub created: bool,
}

#[derive(Debug)]
pub enum CommandSummary {
    Extract(TemplateSummary),
    Update(UpdateSummary),
    Compile(CompileSummary),
    CheckLocale(Vec<LocaleCheck>),
    Init(InitSummary),
}

/// Result of running a langpack command.
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
}

impl CommandResult {
    pub fn new(summary: CommandSummary) -> Self {
        Self { summary }
    }

    /// Number of script files that failed to parse during extraction.
    pub fn parse_error_count(&self) -> usize {
        match &self.summary {
            CommandSummary::Extract(template) => template.parse_failures.len(),
            CommandSummary::Update(update) => update.template.parse_failures.len(),
            _ => 0,
        }
    }

    pub fn exit_status(&self) -> ExitStatus {
        let failed = match &self.summary {
            CommandSummary::CheckLocale(checks) => checks.iter().any(|c| c.name.is_none()),
            CommandSummary::Init(init) => !init.created,
            _ => false,
        };
        if failed {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}
