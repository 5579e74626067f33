use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::CliTest;

#[test]
fn test_check_locale_valid() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().args(["check-locale", "fr", "pt_BR"]).output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✓ fr (French)"), "stdout: {}", stdout);
    assert!(stdout.contains("✓ pt_BR"), "stdout: {}", stdout);

    Ok(())
}

#[test]
fn test_check_locale_invalid() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().args(["check-locale", "xx_YY", "pt-BR"]), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    ✘ Invalid locale 'xx_YY'
    ✘ Invalid locale 'pt-BR'

    ----- stderr -----
    ");

    Ok(())
}
