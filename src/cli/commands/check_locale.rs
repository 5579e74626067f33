use super::{CommandResult, CommandSummary, LocaleCheck};
use crate::{cli::args::CheckLocaleArgs, core::locale::Locale};

pub fn check_locale(args: CheckLocaleArgs) -> CommandResult {
    let checks = args
        .locales
        .into_iter()
        .map(|locale| {
            let name = Locale::parse(&locale)
                .ok()
                .map(|parsed| parsed.english_name().to_string());
            LocaleCheck { locale, name }
        })
        .collect();

    CommandResult::new(CommandSummary::CheckLocale(checks))
}
