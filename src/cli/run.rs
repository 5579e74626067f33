//! Dispatch of a parsed command line to its handler.
//!
//! Commands that touch a repository load the configuration first, searching
//! upwards from the repository they operate on unless `--config` is given.

use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult,
        check_locale::check_locale,
        compile::{compile_language_pack, compile_package},
        extract::{extract_language_pack, extract_package},
        init::init,
        load_context,
        update::{update_language_pack, update_package},
    },
};

pub fn run(Arguments { global, command }: Arguments) -> Result<CommandResult> {
    let Some(command) = command else {
        bail!("No command provided. Use --help to see available commands.")
    };

    match command {
        Command::ExtractPackage(args) => extract_package(&load_context(&global, &args.repo)?, args),
        Command::UpdatePackage(args) => {
            update_package(&load_context(&global, &args.package.repo)?, args)
        }
        Command::CompilePackage(args) => {
            compile_package(&load_context(&global, &args.package.repo)?, args)
        }
        Command::ExtractLanguagePack(args) => {
            extract_language_pack(&load_context(&global, &args.repo)?, args)
        }
        Command::UpdateLanguagePack(args) => {
            update_language_pack(&load_context(&global, &args.pack.repo)?, args)
        }
        Command::CompileLanguagePack(args) => {
            compile_language_pack(&load_context(&global, &args.lp_repo)?, args)
        }
        Command::CheckLocale(args) => Ok(check_locale(args)),
        Command::Init => init(),
    }
}
