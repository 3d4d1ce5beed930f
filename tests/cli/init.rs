use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, run};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let (stdout, _, code) = run(test.command().arg("init"))?;
    assert_eq!(code, 0);
    assert_eq!(stdout, "\u{2713} Created .dsdbrc.json\n");
    assert!(test.root().join(".dsdbrc.json").exists());

    let content = test.read_file(".dsdbrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["systemTokenPrefix"], "md.sys");
    assert_eq!(parsed["prettyOutput"], true);
    assert!(parsed["context"].as_object().is_some_and(|c| c.is_empty()));
    assert!(
        content.contains("  "),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".dsdbrc.json", "{}")?;

    let (stdout, stderr, code) = run(test.command().arg("init"))?;
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert_eq!(stderr, "Error: .dsdbrc.json already exists\n");
    assert_eq!(test.read_file(".dsdbrc.json")?, "{}");

    Ok(())
}
