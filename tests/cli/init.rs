use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::CliTest;

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .langpackrc.json

    ----- stderr -----
    ");

    let content = test.read_file(".langpackrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["platformProject"], "jupyterlab");
    assert_eq!(parsed["tools"]["babel"], serde_json::json!(["pybabel"]));
    assert!(
        parsed["script"]["rules"]
            .as_array()
            .is_some_and(|rules| rules.len() == 16)
    );
    assert!(content.contains("  "), "Config should use 2-space indentation");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".langpackrc.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    error: .langpackrc.json already exists

    ----- stderr -----
    ");
    assert_eq!(test.read_file(".langpackrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::with_file(".langpackrc.json", r#"{ "tools": { "babel": [] } }"#)?;
    test.write_file("app/__init__.py", "")?;

    let output = test
        .command()
        .args(["compile-package", ".", "app"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("Error: "), "stderr: {}", stderr);

    Ok(())
}
