use anyhow::Result;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, run};

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let (stdout, _, code) = run(&mut test.command())?;
    assert_eq!(code, 0);
    assert!(stdout.contains("Usage: dsdb"));
    assert!(stdout.contains("resolve"));

    Ok(())
}

#[test]
fn test_summary() -> Result<()> {
    let test = CliTest::with_fixture()?;

    let (stdout, _, code) = run(&mut test.document_command("summary"))?;
    assert_eq!(code, 0);
    assert!(stdout.starts_with("Material 3 (systems/m3)\nFixture design system\n"));

    let counts: Vec<Vec<&str>> = stdout
        .lines()
        .map(|line| line.rsplitn(2, "  ").map(str::trim).collect())
        .collect();
    assert!(counts.contains(&vec!["11", "tokens"]));
    assert!(counts.contains(&vec!["2", "components"]));
    assert!(counts.contains(&vec!["md", "token prefix"]));

    Ok(())
}

#[test]
fn test_verbose_notes_default_config() -> Result<()> {
    let test = CliTest::with_fixture()?;

    let (_, stderr, code) = run(test.document_command("summary").arg("-v"))?;
    assert_eq!(code, 0);
    assert!(stderr.contains("No .dsdbrc.json found, using default configuration"));

    let (_, stderr, _) = run(&mut test.document_command("summary"))?;
    assert!(!stderr.contains("No .dsdbrc.json found"));

    Ok(())
}

#[test]
fn test_missing_document_is_an_error() -> Result<()> {
    let test = CliTest::new()?;

    let (stdout, stderr, code) = run(test.command().args(["summary", "missing.json"]))?;
    assert_eq!(code, 2);
    assert!(stdout.is_empty());
    assert!(stderr.starts_with("Error: Failed to read missing.json"));

    Ok(())
}

#[test]
fn test_invalid_document_is_an_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("tokens.json", r#"{ "components": [] }"#)?;

    let (_, stderr, code) = run(&mut test.document_command("summary"))?;
    assert_eq!(code, 2);
    assert!(stderr.contains("Failed to load tokens.json"));
    assert!(stderr.contains("\"system\" root object not found"));

    Ok(())
}

#[test]
fn test_components_search() -> Result<()> {
    let test = CliTest::with_fixture()?;

    let (stdout, _, code) = run(test.document_command("components").args(["--search", "btn"]))?;
    assert_eq!(code, 0);
    assert_eq!(
        stdout,
        "Button  systems/m3/components/button  (2 token sets)\n"
    );

    let (stdout, _, _) = run(test.document_command("components").args(["-s", "dialog"]))?;
    assert_eq!(stdout, "No components match 'dialog'\n");

    Ok(())
}

#[test]
fn test_resolve_follows_context() -> Result<()> {
    let test = CliTest::with_fixture()?;

    let (stdout, _, code) = run(test
        .document_command("resolve")
        .args(["md.sys.color.primary", "-c", "theme=dark"]))?;
    assert_eq!(code, 0);
    assert!(stdout.contains("context: density=default, platform=android, theme=dark"));
    assert!(stdout.contains("* [dark]"));
    assert!(stdout.contains("value: 208 188 255"));

    Ok(())
}

#[test]
fn test_resolve_unknown_token() -> Result<()> {
    let test = CliTest::with_fixture()?;

    let (_, stderr, code) = run(test.document_command("resolve").arg("md.sys.color.nope"))?;
    assert_eq!(code, 2);
    assert_eq!(stderr, "Error: Token 'md.sys.color.nope' not found\n");

    Ok(())
}

#[test]
fn test_unknown_context_tag() -> Result<()> {
    let test = CliTest::with_fixture()?;

    let (_, stderr, code) = run(test
        .document_command("resolve")
        .args(["md.sys.color.primary", "-c", "theme=sepia"]))?;
    assert_eq!(code, 2);
    assert_eq!(
        stderr,
        "Error: Invalid --context theme=sepia: Context dimension 'theme' has no tag 'sepia'\n"
    );

    Ok(())
}

#[test]
fn test_malformed_context_flag() -> Result<()> {
    let test = CliTest::with_fixture()?;

    let (_, stderr, code) = run(test
        .document_command("resolve")
        .args(["md.sys.color.primary", "-c", "dark"]))?;
    assert_eq!(code, 2);
    assert!(stderr.contains("expected DIMENSION=TAG"));

    Ok(())
}

#[test]
fn test_contexts_for_system_tokens() -> Result<()> {
    let test = CliTest::with_fixture()?;

    let (stdout, _, code) = run(&mut test.document_command("contexts"))?;
    assert_eq!(code, 0);
    assert!(stdout.starts_with("md.sys (3 tokens)"));
    assert!(stdout.contains("density (Density)  not relevant"));
    assert!(stdout.contains("theme (Theme)  relevant"));
    assert!(stdout.contains("platform (Platform)  not relevant"));

    Ok(())
}

#[test]
fn test_contexts_for_component() -> Result<()> {
    let test = CliTest::with_fixture()?;

    let (stdout, _, code) = run(test
        .document_command("contexts")
        .args(["--component", "button", "-c", "density=compact"]))?;
    assert_eq!(code, 0);
    assert!(stdout.starts_with("Button (8 tokens)"));
    assert!(stdout.contains("density (Density)  relevant"));
    assert!(stdout.contains("  * compact"));

    Ok(())
}

#[test]
fn test_tree() -> Result<()> {
    let test = CliTest::with_fixture()?;

    let (stdout, _, code) = run(test
        .document_command("tree")
        .args(["--component", "Button", "-c", "theme=dark"]))?;
    assert_eq!(code, 0);

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "Button");
    assert_eq!(lines[1], "md.comp.button (Button)");
    assert!(stdout.contains("      md.comp.button.container.color  208 188 255"));

    Ok(())
}

#[test]
fn test_tree_unknown_component() -> Result<()> {
    let test = CliTest::with_fixture()?;

    let (_, stderr, code) = run(test.document_command("tree").args(["--component", "Dialog"]))?;
    assert_eq!(code, 2);
    assert_eq!(stderr, "Error: Component 'Dialog' not found\n");

    Ok(())
}

#[test]
fn test_map_prefix() -> Result<()> {
    let test = CliTest::with_fixture()?;

    let (stdout, _, code) = run(test.document_command("map").args(["--prefix", "md.sys"]))?;
    assert_eq!(code, 0);
    assert_snapshot!(stdout, @r"
    md.sys (3)
      color (3)
        on-primary  COLOR
        primary  COLOR
        scrim  COLOR
    ");

    Ok(())
}

#[test]
fn test_map_unknown_prefix() -> Result<()> {
    let test = CliTest::with_fixture()?;

    let (_, stderr, code) = run(test.document_command("map").args(["--prefix", "md.ref"]))?;
    assert_eq!(code, 2);
    assert_eq!(stderr, "Error: No tokens under prefix 'md.ref'\n");

    Ok(())
}
