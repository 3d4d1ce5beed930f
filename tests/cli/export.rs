use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::{CliTest, run};

#[test]
fn test_export_system_tokens() -> Result<()> {
    let test = CliTest::with_fixture()?;

    let (stdout, stderr, code) = run(&mut test.document_command("export"))?;
    assert_eq!(code, 0);

    let exported: Value = serde_json::from_str(&stdout)?;
    assert_eq!(
        exported,
        json!({
            "md.sys.color.on-primary": "255 255 255",
            "md.sys.color.primary": "103 80 164",
            "md.sys.color.scrim": "0 0 0"
        })
    );

    assert!(stderr.contains("warning: alpha 0.32 dropped; exported as opaque"));
    assert!(stderr.contains("--> md.sys.color.scrim"));
    assert!(stderr.contains("1 finding (1 warning, 0 notes)"));
    assert_eq!(stderr.matches("alpha 0.32").count(), 1);

    Ok(())
}

#[test]
fn test_export_deny_findings() -> Result<()> {
    let test = CliTest::with_fixture()?;

    let (stdout, _, code) = run(test.document_command("export").arg("--deny-findings"))?;
    assert_eq!(code, 1);
    assert!(stdout.contains("md.sys.color.primary"));

    let (_, _, code) = run(test
        .document_command("export")
        .args(["--prefix", "md.sys.color.primary", "--deny-findings"]))?;
    assert_eq!(code, 0);

    Ok(())
}

#[test]
fn test_export_component_to_file() -> Result<()> {
    let test = CliTest::with_fixture()?;

    let (stdout, stderr, code) = run(test.document_command("export").args([
        "--component",
        "button",
        "-c",
        "density=compact",
        "-o",
        "out/button.json",
    ]))?;
    assert_eq!(code, 0);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Wrote 6 tokens to out/button.json"));

    let exported: Value = serde_json::from_str(&test.read_file("out/button.json")?)?;
    assert_eq!(exported["md.comp.button.container.height"], "32px");
    assert_eq!(exported["md.comp.button.container.shape"], "20px");
    assert_eq!(
        exported["md.comp.button.label-text.weight"],
        json!({ "value": 500, "type": "weight" })
    );
    assert!(exported.get("md.comp.button.icon.size").is_none());

    assert!(stderr.contains("--> md.comp.button.icon.size"));
    assert!(stderr.contains("deprecated-token"));
    assert!(stderr.contains("undefined-value"));

    Ok(())
}

#[test]
fn test_export_config_context_and_cli_override() -> Result<()> {
    let test = CliTest::with_fixture()?;
    test.write_file(
        ".dsdbrc.json",
        r#"{ "context": { "theme": "dark" }, "prettyOutput": false }"#,
    )?;

    let (stdout, _, _) = run(test
        .document_command("export")
        .args(["--prefix", "md.sys.color.primary"]))?;
    assert_eq!(stdout, "{\"md.sys.color.primary\":\"208 188 255\"}\n");

    let (stdout, _, _) = run(test
        .document_command("export")
        .args(["--prefix", "md.sys.color.primary", "-c", "theme=light"]))?;
    assert_eq!(stdout, "{\"md.sys.color.primary\":\"103 80 164\"}\n");

    Ok(())
}

#[test]
fn test_export_token_filter() -> Result<()> {
    let test = CliTest::with_fixture()?;
    test.write_file(
        ".dsdbrc.json",
        r#"{ "tokenFilter": ["md.sys.color.*primary"] }"#,
    )?;

    let (stdout, stderr, code) = run(&mut test.document_command("export"))?;
    assert_eq!(code, 0);

    let exported: Value = serde_json::from_str(&stdout)?;
    let keys: Vec<&str> = exported
        .as_object()
        .map(|map| map.keys().map(String::as_str).collect())
        .unwrap_or_default();
    assert_eq!(keys, vec!["md.sys.color.on-primary", "md.sys.color.primary"]);
    assert!(!stderr.contains("scrim"));

    Ok(())
}

#[test]
fn test_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::with_fixture()?;
    test.write_file(".dsdbrc.json", r#"{ "tokenFilter": ["[oops"] }"#)?;

    let (_, stderr, code) = run(&mut test.document_command("export"))?;
    assert_eq!(code, 2);
    assert!(stderr.contains("tokenFilter"));

    Ok(())
}

#[test]
fn test_component_and_prefix_conflict() -> Result<()> {
    let test = CliTest::with_fixture()?;

    let (_, stderr, code) = run(test
        .document_command("export")
        .args(["--component", "Button", "--prefix", "md.sys"]))?;
    assert_eq!(code, 2);
    assert!(stderr.contains("cannot be used with"));

    Ok(())
}
