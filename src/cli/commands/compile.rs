use anyhow::Result;

use super::{CommandResult, CommandSummary};
use crate::{
    api,
    cli::args::{CompileLanguagePackArgs, PackageLocalesArgs},
    core::TranslateContext,
};

pub fn compile_package(ctx: &TranslateContext, args: PackageLocalesArgs) -> Result<CommandResult> {
    let PackageLocalesArgs { package, locales } = args;
    let summary = api::compile_package(ctx, &package.repo, &package.project, &locales)?;
    Ok(CommandResult::new(CommandSummary::Compile(summary)))
}

pub fn compile_language_pack(
    ctx: &TranslateContext,
    args: CompileLanguagePackArgs,
) -> Result<CommandResult> {
    let summary = api::compile_language_pack(ctx, &args.lp_repo, &args.project, &args.locales)?;
    Ok(CommandResult::new(CommandSummary::Compile(summary)))
}
