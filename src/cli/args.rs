//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract-package` / `update-package` / `compile-package`: catalogs kept
//!   inside a single package repository
//! - `extract-language-pack` / `update-language-pack` / `compile-language-pack`:
//!   catalogs kept in the language-pack repository
//! - `check-locale`: validate locale tags
//! - `init`: write a default `.langpackrc.json`

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        self.global.verbose
    }
}

/// Options accepted by every command.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Print tool invocations and per-file warnings
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (default: search upwards for .langpackrc.json)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct PackageArgs {
    /// Repository containing the project sources
    pub repo: PathBuf,

    /// Project name, also used as the gettext domain
    pub project: String,
}

#[derive(Debug, Args)]
pub struct PackageLocalesArgs {
    #[command(flatten)]
    pub package: PackageArgs,

    /// Locales to process (default: every locale already present)
    pub locales: Vec<String>,
}

#[derive(Debug, Args)]
pub struct LanguagePackArgs {
    /// Repository containing the project sources
    pub repo: PathBuf,

    /// Language-pack repository
    pub lp_repo: PathBuf,

    /// Project name, also used as the gettext domain
    pub project: String,
}

#[derive(Debug, Args)]
pub struct LanguagePackLocalesArgs {
    #[command(flatten)]
    pub pack: LanguagePackArgs,

    /// Locales to process (default: every locale already present)
    pub locales: Vec<String>,
}

#[derive(Debug, Args)]
pub struct CompileLanguagePackArgs {
    /// Language-pack repository
    pub lp_repo: PathBuf,

    /// Project name, also used as the gettext domain
    pub project: String,

    /// Locales to compile (default: every locale already present)
    pub locales: Vec<String>,
}

#[derive(Debug, Args)]
pub struct CheckLocaleArgs {
    /// Locale tags such as `fr`, `pt_BR` or `zh_Hans_CN`
    #[arg(required = true)]
    pub locales: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Regenerate the template of a package
    ExtractPackage(PackageArgs),
    /// Regenerate the template and synchronize the catalogs of a package
    UpdatePackage(PackageLocalesArgs),
    /// Compile the catalogs of a package to .mo and JSON
    CompilePackage(PackageLocalesArgs),
    /// Regenerate a project template inside the language-pack repository
    ExtractLanguagePack(LanguagePackArgs),
    /// Regenerate and synchronize project catalogs inside the language-pack repository
    UpdateLanguagePack(LanguagePackLocalesArgs),
    /// Compile project catalogs and move them into the per-locale language packs
    CompileLanguagePack(CompileLanguagePackArgs),
    /// Validate locale tags
    CheckLocale(CheckLocaleArgs),
    /// Initialize a new .langpackrc.json configuration file
    Init,
}
