//! External tools driven as subprocesses.
//!
//! Every subprocess goes through [`ToolRunner`], so orchestration code can be
//! exercised with a recording runner instead of real `pybabel`/`cookiecutter`.

use std::{
    fmt,
    path::{Path, PathBuf},
    process::{Command, Stdio},
    rc::Rc,
};

use anyhow::{Result, anyhow};
use colored::Colorize;

use crate::error::{Tool, TranslateError};

/// Longest stderr excerpt kept in a `ToolFailed` error.
const MAX_STDERR_LEN: usize = 2000;

/// A fully resolved command line for one tool run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub tool: Tool,
    /// Short verb used in error messages (`extract`, `compile`, ...).
    pub action: String,
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

impl ToolInvocation {
    /// Start an invocation from a configured argv prefix (e.g. `["pybabel"]`).
    pub fn new(tool: Tool, action: &str, command: &[String]) -> Result<Self> {
        let (program, prefix) = command
            .split_first()
            .ok_or_else(|| anyhow!("No command configured for {}", tool))?;
        Ok(Self {
            tool,
            action: action.to_string(),
            program: program.clone(),
            args: prefix.to_vec(),
            cwd: None,
        })
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }
}

impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
}

pub trait ToolRunner {
    /// Run the invocation to completion.
    ///
    /// A program that cannot be started is `TranslateError::ToolNotFound`; a
    /// non-zero exit status is `TranslateError::ToolFailed`.
    fn run(&self, invocation: &ToolInvocation) -> Result<ToolOutput>;
}

impl<R: ToolRunner + ?Sized> ToolRunner for Rc<R> {
    fn run(&self, invocation: &ToolInvocation) -> Result<ToolOutput> {
        (**self).run(invocation)
    }
}

/// Runs tools with `std::process::Command`, blocking until they exit.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner {
    pub verbose: bool,
}

impl ProcessRunner {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl ToolRunner for ProcessRunner {
    fn run(&self, invocation: &ToolInvocation) -> Result<ToolOutput> {
        if self.verbose {
            eprintln!("{} {}", "running:".bold().cyan(), invocation);
        }

        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(cwd) = &invocation.cwd {
            command.current_dir(cwd);
        }

        let output = command.output().map_err(|e| TranslateError::ToolNotFound {
            tool: invocation.tool,
            program: invocation.program.clone(),
            reason: e.to_string(),
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(TranslateError::ToolFailed {
                tool: invocation.tool,
                action: invocation.action.clone(),
                code: output.status.code(),
                stderr: tail(&stderr, MAX_STDERR_LEN).to_string(),
            }
            .into());
        }

        if self.verbose && !stderr.trim().is_empty() {
            eprintln!("{}", stderr.trim_end().dimmed());
        }

        Ok(ToolOutput { stdout, stderr })
    }
}

/// Last `max` bytes of `s`, moved forward to a char boundary.
fn tail(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut start = s.len() - max;
    while !s.is_char_boundary(start) {
        start += 1;
    }
    &s[start..]
}

// ============================================================
// Babel command lines
// ============================================================

/// `pybabel extract` run from `root`.
///
/// Babel writes each reference relative to its working directory, so the files
/// are passed relative to `root` and the template references come out the same
/// way wherever the command was launched from.
pub fn babel_extract(
    command: &[String],
    root: &Path,
    pot_path: &Path,
    project: &str,
    version: &str,
    mapping: &Path,
    files: &[PathBuf],
) -> Result<ToolInvocation> {
    Ok(ToolInvocation::new(Tool::Babel, "extract", command)?
        .args([
            "extract".to_string(),
            "--no-wrap".to_string(),
            "--charset=utf-8".to_string(),
            "-o".to_string(),
            pot_path.display().to_string(),
            format!("--project={}", project),
            format!("--version={}", version),
            format!("--mapping={}", mapping.display()),
        ])
        .args(files.iter().map(|f| {
            f.strip_prefix(root)
                .unwrap_or(f)
                .display()
                .to_string()
        }))
        .current_dir(root))
}

/// `pybabel init` (`update == false`) or `pybabel update`.
pub fn babel_sync(
    command: &[String],
    update: bool,
    domain: &str,
    pot_path: &Path,
    locale_dir: &Path,
    locale: &str,
) -> Result<ToolInvocation> {
    let action = if update { "update" } else { "init" };
    Ok(ToolInvocation::new(Tool::Babel, action, command)?.args([
        action.to_string(),
        format!("--domain={}", domain),
        format!("--input-file={}", pot_path.display()),
        format!("--output-dir={}", locale_dir.display()),
        format!("--locale={}", locale),
    ]))
}

pub fn babel_compile(
    command: &[String],
    domain: &str,
    locale_dir: &Path,
    locale: &str,
) -> Result<ToolInvocation> {
    Ok(ToolInvocation::new(Tool::Babel, "compile", command)?.args([
        "compile".to_string(),
        format!("--domain={}", domain),
        format!("--dir={}", locale_dir.display()),
        format!("--locale={}", locale),
    ]))
}
