use anyhow::Result;

use super::{CommandResult, CommandSummary};
use crate::{
    api,
    cli::args::{LanguagePackArgs, PackageArgs},
    core::TranslateContext,
};

pub fn extract_package(ctx: &TranslateContext, args: PackageArgs) -> Result<CommandResult> {
    let template = api::extract_package(ctx, &args.repo, &args.project)?;
    Ok(CommandResult::new(CommandSummary::Extract(template)))
}

pub fn extract_language_pack(ctx: &TranslateContext, args: LanguagePackArgs) -> Result<CommandResult> {
    let template = api::extract_language_pack(ctx, &args.repo, &args.lp_repo, &args.project)?;
    Ok(CommandResult::new(CommandSummary::Extract(template)))
}
