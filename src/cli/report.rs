//! Report formatting and printing utilities.
//!
//! Separate from the operations so that langpack can be used as a library.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{CommandResult, CommandSummary, InitSummary, LocaleCheck};
use crate::{
    api::{CompileSummary, CompiledCatalog},
    core::{extract::TemplateSummary, sync::UpdateSummary},
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print the outcome of a command to stdout, and the parse warning to stderr.
pub fn print(result: &CommandResult, verbose: bool) {
    print_to(result, &mut io::stdout().lock());
    print_parse_warning(result.parse_error_count(), verbose);
}

pub fn print_to<W: Write>(result: &CommandResult, writer: &mut W) {
    match &result.summary {
        CommandSummary::Extract(template) => print_template_to(template, writer),
        CommandSummary::Update(update) => print_update_to(update, writer),
        CommandSummary::Compile(compile) => print_compile_to(compile, writer),
        CommandSummary::CheckLocale(checks) => print_locale_checks_to(checks, writer),
        CommandSummary::Init(init) => print_init_to(init, writer),
    }
}

/// Print a warning about files that could not be parsed.
pub fn print_parse_warning(count: usize, verbose: bool) {
    print_parse_warning_to(count, verbose, &mut io::stderr().lock());
}

/// Print a parse warning to a custom writer.
pub fn print_parse_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be parsed (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

fn print_template_to<W: Write>(template: &TemplateSummary, writer: &mut W) {
    let version = if template.version.is_empty() {
        String::new()
    } else {
        format!(" (version {})", template.version)
    };
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Wrote {}{}", template.pot_path.display(), version).green()
    );
    let _ = writeln!(
        writer,
        "  {} from {}, {}, {}",
        plural(template.entries, "message"),
        plural(template.source_files, "source file"),
        plural(template.script_entries, "script string"),
        plural(template.schema_entries, "schema string"),
    );
}

fn print_update_to<W: Write>(update: &UpdateSummary, writer: &mut W) {
    print_template_to(&update.template, writer);

    for catalog in &update.catalogs {
        let _ = writeln!(
            writer,
            "{} {} {}",
            SUCCESS_MARK.green(),
            format!("{:<8}", catalog.action.to_string()).green(),
            catalog.po_path.display()
        );
    }
}

fn print_compile_to<W: Write>(compile: &CompileSummary, writer: &mut W) {
    if compile.catalogs.is_empty() {
        let _ = writeln!(
            writer,
            "{} no catalogs to compile for {}",
            "warning:".bold().yellow(),
            compile.project.bold()
        );
        return;
    }

    for catalog in &compile.catalogs {
        print_compiled_catalog_to(catalog, writer);
    }
}

fn print_compiled_catalog_to<W: Write>(catalog: &CompiledCatalog, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {} {}",
        SUCCESS_MARK.green(),
        format!("Compiled {}", catalog.locale).green(),
        catalog.po_path.display()
    );

    match &catalog.placed {
        Some(placed) => {
            if placed.scaffolded {
                let _ = writeln!(
                    writer,
                    "  {} {}",
                    "scaffolded".cyan(),
                    placed.package_name.bold()
                );
            }
            for file in &placed.files {
                let _ = writeln!(writer, "  {} {}", "-->".blue(), file.display());
            }
        }
        None => {
            for file in [&catalog.mo_path, &catalog.json_path] {
                let _ = writeln!(writer, "  {} {}", "-->".blue(), file.display());
            }
        }
    }
}

fn print_locale_checks_to<W: Write>(checks: &[LocaleCheck], writer: &mut W) {
    for check in checks {
        match &check.name {
            Some(name) => {
                let _ = writeln!(
                    writer,
                    "{} {} {}",
                    SUCCESS_MARK.green(),
                    check.locale.green(),
                    format!("({})", name).dimmed()
                );
            }
            None => {
                let _ = writeln!(
                    writer,
                    "{} {}",
                    FAILURE_MARK.red(),
                    format!("Invalid locale '{}'", check.locale).red()
                );
            }
        }
    }
}

fn print_init_to<W: Write>(init: &InitSummary, writer: &mut W) {
    if init.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", init.path.display()).green()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} already exists",
            "error:".bold().red(),
            init.path.display()
        );
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::core::{
        extract::script::ParseFailure,
        pack::PlacedArtifacts,
        sync::{SyncAction, SyncedCatalog},
    };

    fn strip_ansi(s: &str) -> String {
        let mut result = String::new();
        let mut chars = s.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                while let Some(&next) = chars.peek() {
                    chars.next();
                    if next == 'm' {
                        break;
                    }
                }
            } else {
                result.push(c);
            }
        }
        result
    }

    fn render(summary: CommandSummary) -> String {
        let mut output = Vec::new();
        print_to(&CommandResult::new(summary), &mut output);
        strip_ansi(&String::from_utf8(output).unwrap())
    }

    fn template() -> TemplateSummary {
        TemplateSummary {
            pot_path: PathBuf::from("app/locale/app.pot"),
            version: "1.0.0".to_string(),
            source_files: 1,
            script_entries: 3,
            schema_entries: 0,
            entries: 4,
            parse_failures: vec![ParseFailure {
                path: "packages/ui/src/broken.ts".to_string(),
                error: "Expected ';'".to_string(),
            }],
        }
    }

    #[test]
    fn test_print_template() {
        let output = render(CommandSummary::Extract(template()));

        insta::assert_snapshot!(output, @r"
        ✓ Wrote app/locale/app.pot (version 1.0.0)
          4 messages from 1 source file, 3 script strings, 0 schema strings
        ");
    }

    #[test]
    fn test_print_update_lists_catalogs() {
        let output = render(CommandSummary::Update(UpdateSummary {
            template: template(),
            catalogs: vec![
                SyncedCatalog {
                    locale: "de".to_string(),
                    po_path: PathBuf::from("app/locale/de/LC_MESSAGES/app.po"),
                    action: SyncAction::Init,
                },
                SyncedCatalog {
                    locale: "fr".to_string(),
                    po_path: PathBuf::from("app/locale/fr/LC_MESSAGES/app.po"),
                    action: SyncAction::Update,
                },
            ],
        }));

        assert!(output.contains("✓ created  app/locale/de/LC_MESSAGES/app.po"));
        assert!(output.contains("✓ updated  app/locale/fr/LC_MESSAGES/app.po"));
    }

    #[test]
    fn test_print_compiled_and_placed() {
        let po_path = PathBuf::from("lp/jupyterlab/locale/es/LC_MESSAGES/jupyterlab.po");
        let output = render(CommandSummary::Compile(CompileSummary {
            project: "jupyterlab".to_string(),
            catalogs: vec![CompiledCatalog {
                locale: "es".to_string(),
                mo_path: po_path.with_extension("mo"),
                json_path: po_path.with_extension("json"),
                po_path,
                placed: Some(PlacedArtifacts {
                    package_name: "jupyterlab-language-pack-es".to_string(),
                    scaffolded: true,
                    files: vec![PathBuf::from("pack/jupyterlab.mo")],
                }),
            }],
        }));

        assert!(output.contains("Compiled es"));
        assert!(output.contains("scaffolded jupyterlab-language-pack-es"));
        assert!(output.contains("--> pack/jupyterlab.mo"));
        assert!(!output.contains("LC_MESSAGES/jupyterlab.mo"));
    }

    #[test]
    fn test_print_empty_compile() {
        let output = render(CommandSummary::Compile(CompileSummary {
            project: "my_ext".to_string(),
            catalogs: Vec::new(),
        }));

        assert_eq!(output, "warning: no catalogs to compile for my_ext\n");
    }

    #[test]
    fn test_print_locale_checks() {
        let output = render(CommandSummary::CheckLocale(vec![
            LocaleCheck {
                locale: "fr".to_string(),
                name: Some("French".to_string()),
            },
            LocaleCheck {
                locale: "xx_YY".to_string(),
                name: None,
            },
        ]));

        insta::assert_snapshot!(output, @r"
        ✓ fr (French)
        ✘ Invalid locale 'xx_YY'
        ");
    }

    #[test]
    fn test_parse_warning_only_without_verbose() {
        let mut output = Vec::new();
        print_parse_warning_to(2, false, &mut output);
        let stripped = strip_ansi(&String::from_utf8(output).unwrap());
        assert_eq!(
            stripped,
            "warning: 2 file(s) could not be parsed (use -v for details)\n"
        );

        let mut output = Vec::new();
        print_parse_warning_to(2, true, &mut output);
        assert!(output.is_empty());

        let mut output = Vec::new();
        print_parse_warning_to(0, false, &mut output);
        assert!(output.is_empty());
    }
}
