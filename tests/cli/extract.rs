use anyhow::Result;

use crate::CliTest;

/// Repository with UI scripts and a settings schema but no Python sources, so
/// no external tool is needed.
fn script_only_repo() -> Result<CliTest> {
    let test = CliTest::with_file(".langpackrc.json", r#"{ "extensions": [".py"] }"#)?;
    test.write_file("app/package.json", r#"{ "name": "app", "version": "0.3.0" }"#)?;
    test.write_file(
        "packages/ui/src/index.ts",
        concat!(
            "trans.__('Open');\n",
            "// Shown in the status bar\n",
            "this._trans._n('One file', '%1 files', count);\n",
        ),
    )?;
    test.write_file("packages/ui/src/broken.ts", "const = ;\n")?;
    test.write_file(
        "packages/ui/package.json",
        r#"{ "jupyterlab": { "schemaDir": "schema" } }"#,
    )?;
    test.write_file(
        "packages/ui/schema/plugin.json",
        "{\n  \"title\": \"Open\",\n  \"description\": \"Open files\"\n}\n",
    )?;
    Ok(test)
}

#[test]
fn test_extract_package_writes_template() -> Result<()> {
    let test = script_only_repo()?;

    let output = test.command().args(["extract-package", ".", "app"]).output()?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "stderr: {}", stderr);
    assert!(stdout.contains("(version 0.3.0)"), "stdout: {}", stdout);
    assert!(
        stderr.contains("warning: 1 file(s) could not be parsed (use -v for details)"),
        "stderr: {}",
        stderr
    );

    let pot = test.read_file("app/locale/app.pot")?;
    assert!(pot.contains("Project-Id-Version: app 0.3.0"));
    assert!(pot.contains("#: packages/ui/src/index.ts:1\nmsgid \"Open\""));
    assert!(pot.contains("Shown in the status bar"));
    assert!(pot.contains("msgid \"One file\"\nmsgid_plural \"%1 files\""));
    assert!(pot.contains("msgctxt \"schema\"\nmsgid \"Open\""));
    assert!(pot.contains("msgctxt \"schema\"\nmsgid \"Open files\""));
    assert_eq!(pot.matches("msgid \"Open\"").count(), 2);

    Ok(())
}

#[test]
fn test_extract_language_pack_for_extension() -> Result<()> {
    let test = script_only_repo()?;

    let output = test
        .command()
        .args(["extract-language-pack", ".", "lp", "My-Ext"])
        .output()?;

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(
        test.root()
            .join("lp/jupyterlab_extensions/my_ext/locale/my_ext.pot")
            .is_file()
    );

    Ok(())
}

#[test]
fn test_update_package_rejects_invalid_locale_first() -> Result<()> {
    let test = script_only_repo()?;

    let output = test
        .command()
        .args(["update-package", ".", "app", "es", "xx_YY"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert_eq!(
        String::from_utf8_lossy(&output.stderr),
        "Error: Invalid locale 'xx_YY'\n"
    );
    assert!(!test.root().join("app/locale").exists());

    Ok(())
}
