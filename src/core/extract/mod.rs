//! Template extraction: general sources, UI scripts and settings schemas are
//! combined into one `<project>.pot` per project.

pub mod schema;
pub mod script;
pub mod source;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use self::script::{ParseFailure, ScriptBackend, ScriptExtractor};
use crate::core::{
    catalog::{
        Catalog,
        merge::{fix_locations, remove_duplicates},
    },
    context::TranslateContext,
    locale::LOCALE_FOLDER,
    scanner::find_packages_source_files,
    version::get_version,
};

/// What went into a freshly built template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSummary {
    pub pot_path: PathBuf,
    pub version: String,
    pub source_files: usize,
    pub script_entries: usize,
    pub schema_entries: usize,
    /// Entries in the deduplicated template.
    pub entries: usize,
    pub parse_failures: Vec<ParseFailure>,
}

/// Build `<locale_dir>/<project>.pot` from the sources under `root`.
///
/// Occurrence paths are rewritten relative to `root` before the script and
/// schema entries are appended. Duplicates are merged in a second pass.
pub fn create_catalog(
    ctx: &TranslateContext,
    root: &Path,
    locale_dir: &Path,
    project: &str,
    version: &str,
) -> Result<TemplateSummary> {
    let config = &ctx.config;
    let pot_path = locale_dir.join(format!("{}.pot", project));

    let files: Vec<PathBuf> = find_packages_source_files(
        root,
        &config.extensions,
        &config.skip_folders,
        ctx.verbose,
    )
    .into_values()
    .flatten()
    .collect();
    source::extract_strings(ctx, root, &files, &pot_path, project, version)?;

    let script = ScriptBackend::from_config(config, ctx.verbose).extract(root, ctx.runner.as_ref())?;
    let schema_entries =
        schema::extract_schema_strings(root, &config.schema, &config.skip_folders, ctx.verbose)?;

    let script_count = script.entries.len();
    let schema_count = schema_entries.len();

    let mut catalog = Catalog::from_file(&pot_path)?;
    let mut appended = script.entries;
    appended.extend(schema_entries);
    fix_locations(&mut catalog, root, appended);
    let catalog = remove_duplicates(catalog);
    catalog.save(&pot_path)?;
    let entries = catalog.entries.len();

    Ok(TemplateSummary {
        pot_path,
        version: version.to_string(),
        source_files: files.len(),
        script_entries: script_count,
        schema_entries: schema_count,
        entries,
        parse_failures: script.parse_failures,
    })
}

/// Regenerate the template of `project` under `<output_dir>/locale/`.
pub fn extract_translations(
    ctx: &TranslateContext,
    root: &Path,
    output_dir: &Path,
    project: &str,
) -> Result<TemplateSummary> {
    let version = get_version(root, project)?;

    let locale_dir = output_dir.join(LOCALE_FOLDER);
    fs::create_dir_all(&locale_dir)
        .with_context(|| format!("Failed to create directory {}", locale_dir.display()))?;

    create_catalog(ctx, root, &locale_dir, project, &version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        catalog::Occurrence,
        tools::{ToolOutput, testing::RecordingRunner},
    };
    use pretty_assertions::assert_eq;
    use std::rc::Rc;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    /// `path` relative to `base`, with `..` for every base component not shared.
    fn relative_to(path: &Path, base: &Path) -> PathBuf {
        let path: Vec<_> = path.components().collect();
        let base: Vec<_> = base.components().collect();
        let common = path.iter().zip(&base).take_while(|(a, b)| a == b).count();
        let mut rel = PathBuf::new();
        for _ in common..base.len() {
            rel.push("..");
        }
        rel.extend(&path[common..]);
        rel
    }

    /// Stands in for `pybabel extract`: references to `handlers.py` are written
    /// relative to the working directory of the run, the way Babel does.
    fn fake_babel() -> RecordingRunner {
        RecordingRunner::with_effect(|inv| {
            let idx = inv.args.iter().position(|a| a == "-o").unwrap();
            let pot = &inv.args[idx + 1];
            let cwd = match &inv.cwd {
                Some(dir) => dir.clone(),
                None => std::env::current_dir().unwrap(),
            };
            let file = inv.args.iter().find(|a| a.ends_with("handlers.py")).unwrap();
            let reference = relative_to(&cwd.join(file), &cwd);
            let content = format!(
                concat!(
                    "#, fuzzy\n",
                    "msgid \"\"\n",
                    "msgstr \"\"\n",
                    "\"Project-Id-Version: app 2.1.0\\n\"\n",
                    "\"Content-Type: text/plain; charset=utf-8\\n\"\n",
                    "\n",
                    "#: {path}:12\n",
                    "msgid \"Settings\"\n",
                    "msgstr \"\"\n",
                    "\n",
                    "#: {path}:3\n",
                    "msgid \"Save\"\n",
                    "msgstr \"\"\n",
                ),
                path = reference.display()
            );
            fs::write(pot, content).unwrap();
            Ok(ToolOutput::default())
        })
    }

    #[test]
    fn test_extract_translations_builds_deduplicated_template() {
        let repo = tempdir().unwrap();
        let root = repo.path();
        write(root, "app/__init__.py", "__version__ = '2.1.0'\n");
        write(root, "app/handlers.py", "_('Save')\n");
        write(
            root,
            "packages/ui/src/index.ts",
            "trans.__('Save');\ntrans.__('Close');\n",
        );
        write(
            root,
            "packages/ui/package.json",
            r#"{ "jupyterlab": { "schemaDir": "schema" } }"#,
        );
        write(
            root,
            "packages/ui/schema/plugin.json",
            "{\n  \"title\": \"UI\",\n  \"description\": \"UI settings\"\n}\n",
        );

        let runner = Rc::new(fake_babel());
        let ctx = TranslateContext::for_tests(Rc::clone(&runner));
        let output_dir = root.join("app");

        let summary = extract_translations(&ctx, root, &output_dir, "app").unwrap();

        assert_eq!(summary.pot_path, output_dir.join("locale/app.pot"));
        assert_eq!(summary.version, "2.1.0");
        assert_eq!(summary.script_entries, 2);
        assert_eq!(summary.schema_entries, 2);
        assert_eq!(runner.actions(), vec!["extract"]);
        let babel_call = &runner.calls.borrow()[0];
        assert!(babel_call.args.contains(&"--version=2.1.0".to_string()));
        assert_eq!(babel_call.cwd.as_deref(), Some(root));

        let catalog = Catalog::from_file(&summary.pot_path).unwrap();
        assert_eq!(catalog.metadata("Project-Id-Version"), Some("app 2.1.0"));

        let save = catalog.entries.iter().find(|e| e.msgid == "Save").unwrap();
        assert_eq!(
            save.occurrences,
            vec![
                Occurrence::new("app/handlers.py", 3),
                Occurrence::new("packages/ui/src/index.ts", 1),
            ]
        );

        let ids: Vec<&str> = catalog.entries.iter().map(|e| e.msgid.as_str()).collect();
        assert_eq!(ids, vec!["Save", "Settings", "UI", "UI settings", "Close"]);
        assert_eq!(summary.entries, 5);
    }

    #[test]
    fn test_empty_repository_yields_header_only_template() {
        let repo = tempdir().unwrap();
        let runner = Rc::new(RecordingRunner::new());
        let ctx = TranslateContext::for_tests(Rc::clone(&runner));

        let summary = extract_translations(&ctx, repo.path(), &repo.path().join("out"), "empty").unwrap();

        assert!(runner.calls.borrow().is_empty());
        assert_eq!(summary.entries, 0);
        let content = fs::read_to_string(&summary.pot_path).unwrap();
        assert!(content.contains("Project-Id-Version: empty"));
    }
}
