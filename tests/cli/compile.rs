use anyhow::Result;
use serde_json::Value;

use crate::CliTest;

const CATALOG_ES: &str = concat!(
    "msgid \"\"\n",
    "msgstr \"\"\n",
    "\"Language: es\\n\"\n",
    "\"Plural-Forms: nplurals=2; plural=(n != 1);\\n\"\n",
    "\n",
    "msgid \"File\"\n",
    "msgstr \"Archivo\"\n",
    "\n",
    "#, fuzzy\n",
    "msgid \"Edit\"\n",
    "msgstr \"Editar\"\n",
);

#[test]
fn test_compile_package_missing_output_dir() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().args(["compile-package", ".", "app"]).output()?;

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Output dir"), "stderr: {}", stderr);
    assert!(stderr.contains("not found!"), "stderr: {}", stderr);

    Ok(())
}

#[test]
fn test_compile_package_without_catalogs() -> Result<()> {
    let test = CliTest::with_file("app/__init__.py", "")?;

    let output = test.command().args(["compile-package", ".", "app"]).output()?;

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "warning: no catalogs to compile for app\n"
    );

    Ok(())
}

#[test]
fn test_compile_package_missing_catalog() -> Result<()> {
    let test = CliTest::with_file("app/__init__.py", "")?;

    let output = test
        .command()
        .args(["compile-package", ".", "app", "fr"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("LC_MESSAGES/app.po` not found"),
        "stderr: {}",
        stderr
    );

    Ok(())
}

#[cfg(unix)]
mod with_fake_tools {
    use super::*;

    /// Stands in for `pybabel compile`: writes the `.mo` next to the catalog.
    const FAKE_BABEL: &str = r#"
for arg in "$@"; do
  case "$arg" in
    --domain=*) domain="${arg#--domain=}" ;;
    --dir=*) dir="${arg#--dir=}" ;;
    --locale=*) locale="${arg#--locale=}" ;;
  esac
done
if [ "$1" = "compile" ]; then
  printf 'mo' > "$dir/$locale/LC_MESSAGES/$domain.mo"
fi
"#;

    fn with_fake_tools() -> Result<CliTest> {
        let test = CliTest::with_file("fake_babel.sh", FAKE_BABEL)?;
        let config = serde_json::json!({
            "tools": {
                "babel": ["/bin/sh", test.root().join("fake_babel.sh")],
                "cookiecutter": ["/bin/sh", "-c", "exit 0"],
            }
        });
        test.write_file(".langpackrc.json", &config.to_string())?;
        Ok(test)
    }

    #[test]
    fn test_compile_package_writes_mo_and_json() -> Result<()> {
        let test = with_fake_tools()?;
        test.write_file("app/locale/es/LC_MESSAGES/app.po", CATALOG_ES)?;

        let output = test.command().args(["compile-package", ".", "app"]).output()?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(
            output.status.success(),
            "stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        assert!(stdout.contains("✓ Compiled es"), "stdout: {}", stdout);
        assert!(test.root().join("app/locale/es/LC_MESSAGES/app.mo").is_file());

        let bundle: Value =
            serde_json::from_str(&test.read_file("app/locale/es/LC_MESSAGES/app.json")?)?;
        assert_eq!(bundle["File"], serde_json::json!(["Archivo"]));
        assert!(bundle.get("Edit").is_none());
        assert_eq!(bundle[""]["language"], "es");
        assert_eq!(bundle[""]["domain"], "app");

        Ok(())
    }

    #[test]
    fn test_compile_language_pack_moves_platform_artifacts() -> Result<()> {
        let test = with_fake_tools()?;
        test.write_file("jupyterlab/locale/es/LC_MESSAGES/jupyterlab.po", CATALOG_ES)?;

        let output = test
            .command()
            .args(["compile-language-pack", ".", "jupyterlab", "es"])
            .output()?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(
            output.status.success(),
            "stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        assert!(
            stdout.contains("scaffolded jupyterlab-language-pack-es"),
            "stdout: {}",
            stdout
        );

        let module_dir = test
            .root()
            .join("language-packs/jupyterlab-language-pack-es/jupyterlab_language_pack_es");
        assert!(module_dir.join("jupyterlab.mo").is_file());
        assert!(module_dir.join("jupyterlab.json").is_file());
        assert!(
            !test
                .root()
                .join("jupyterlab/locale/es/LC_MESSAGES/jupyterlab.mo")
                .exists()
        );

        Ok(())
    }

    #[test]
    fn test_tool_failure_is_reported() -> Result<()> {
        let test = CliTest::with_file(
            ".langpackrc.json",
            r#"{ "tools": { "babel": ["/bin/sh", "-c", "echo boom >&2; exit 3"] } }"#,
        )?;
        test.write_file("app/locale/es/LC_MESSAGES/app.po", CATALOG_ES)?;

        let output = test.command().args(["compile-package", ".", "app"]).output()?;

        assert_eq!(output.status.code(), Some(2));
        assert_eq!(
            String::from_utf8_lossy(&output.stderr),
            "Error: babel compile failed with exit code 3: boom\n"
        );

        Ok(())
    }
}
