use anyhow::Result;

use super::{CommandResult, CommandSummary};
use crate::{
    api,
    cli::args::{LanguagePackLocalesArgs, PackageLocalesArgs},
    core::TranslateContext,
};

pub fn update_package(ctx: &TranslateContext, args: PackageLocalesArgs) -> Result<CommandResult> {
    let PackageLocalesArgs { package, locales } = args;
    let summary = api::update_package(ctx, &package.repo, &package.project, &locales)?;
    Ok(CommandResult::new(CommandSummary::Update(summary)))
}

pub fn update_language_pack(
    ctx: &TranslateContext,
    args: LanguagePackLocalesArgs,
) -> Result<CommandResult> {
    let LanguagePackLocalesArgs { pack, locales } = args;
    let summary =
        api::update_language_pack(ctx, &pack.repo, &pack.lp_repo, &pack.project, &locales)?;
    Ok(CommandResult::new(CommandSummary::Update(summary)))
}
