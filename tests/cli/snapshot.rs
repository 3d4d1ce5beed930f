use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, run};

#[test]
fn test_snapshot_to_stdout() -> Result<()> {
    let test = CliTest::with_fixture()?;

    let (stdout, _, code) = run(test
        .document_command("snapshot")
        .args(["--component", "Button", "-c", "theme=dark"]))?;
    assert_eq!(code, 0);

    let snapshot: Value = serde_json::from_str(&stdout)?;
    assert_eq!(snapshot["system"], "Material 3");
    assert_eq!(snapshot["component"], "Button");
    assert_eq!(snapshot["context"]["theme"], "dark");

    let set = &snapshot["tokenSets"][0];
    assert_eq!(set["tokenSetName"], "md.comp.button");
    let groups: Vec<&str> = set["groups"]
        .as_array()
        .map(|groups| groups.iter().filter_map(|g| g["displayName"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(groups, vec!["Label", "Container", "Icon"]);

    let color = &set["groups"][1]["children"][0]["tokens"][0];
    assert_eq!(color["tokenName"], "md.comp.button.container.color");
    assert_eq!(color["value"], "208 188 255");
    assert_eq!(color["chain"].as_array().map(Vec::len), Some(3));

    assert_eq!(
        set["ungrouped"][0]["tokenName"],
        "md.comp.button.focus.indicator"
    );

    Ok(())
}

#[test]
fn test_snapshot_to_file() -> Result<()> {
    let test = CliTest::with_fixture()?;

    let (stdout, stderr, code) = run(test
        .document_command("snapshot")
        .args(["--component", "card", "-o", "card.json"]))?;
    assert_eq!(code, 0);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Wrote snapshot of Card to card.json"));

    let snapshot: Value = serde_json::from_str(&test.read_file("card.json")?)?;
    assert_eq!(snapshot["tokenSets"], serde_json::json!([]));

    Ok(())
}
