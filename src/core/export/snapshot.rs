//! Snapshot of a component for one fixed context.
//!
//! Each token set's display-group forest is copied with every token carrying
//! its selected value inline, so the result can be read without the store.

use std::collections::BTreeMap;

use serde::Serialize;

use super::serialize::{StyleValue, serialize};
use crate::core::{
    context::{ActiveContext, TagSet},
    data::{Component, ResolvedValue, Token, TokenValueType},
    hierarchy::{GroupNode, token_sets_for_component},
    resolve::{resolve_chain, select_best},
    store::Dsdb,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot<'a> {
    pub system: &'a str,
    pub component: &'a str,
    /// `dimension -> tag` the values were selected under.
    pub context: BTreeMap<String, String>,
    pub token_sets: Vec<TokenSetSnapshot<'a>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSetSnapshot<'a> {
    pub name: &'a str,
    pub token_set_name: &'a str,
    pub display_name: &'a str,
    pub groups: Vec<GroupSnapshot<'a>>,
    pub ungrouped: Vec<TokenSnapshot<'a>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSnapshot<'a> {
    pub name: &'a str,
    pub display_name: &'a str,
    pub tokens: Vec<TokenSnapshot<'a>>,
    pub children: Vec<GroupSnapshot<'a>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSnapshot<'a> {
    pub name: &'a str,
    pub token_name: &'a str,
    pub display_name: &'a str,
    pub token_value_type: TokenValueType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    /// `null` when no candidate applies.
    pub resolved_value: Option<&'a ResolvedValue>,
    pub value: Option<StyleValue>,
    pub chain: Vec<&'a str>,
}

impl<'a> TokenSnapshot<'a> {
    fn new(dsdb: &'a Dsdb, token: &'a Token, active: &TagSet<'_>) -> Self {
        let candidates = resolve_chain(dsdb, &token.name);
        let best = select_best(&candidates, active);
        Self {
            name: &token.name,
            token_name: &token.token_name,
            display_name: &token.display_name,
            token_value_type: token.token_value_type,
            description: token.description.as_deref(),
            resolved_value: best.map(|r| r.resolved_value),
            value: best.and_then(|r| serialize(r.resolved_value)),
            chain: best.map(|r| r.chain.clone()).unwrap_or_default(),
        }
    }
}

fn group_snapshot<'a>(
    dsdb: &'a Dsdb,
    node: &GroupNode<'a>,
    active: &TagSet<'_>,
) -> GroupSnapshot<'a> {
    GroupSnapshot {
        name: &node.group.name,
        display_name: &node.group.display_name,
        tokens: node
            .tokens
            .iter()
            .map(|&token| TokenSnapshot::new(dsdb, token, active))
            .collect(),
        children: node
            .children
            .iter()
            .map(|child| group_snapshot(dsdb, child, active))
            .collect(),
    }
}

/// Copy `component`'s token sets with values selected under `context`.
pub fn snapshot<'a>(
    dsdb: &'a Dsdb,
    component: &'a Component,
    context: &ActiveContext,
) -> Snapshot<'a> {
    let active = context.tag_names(dsdb);
    let token_sets = token_sets_for_component(dsdb, component)
        .into_iter()
        .map(|set| TokenSetSnapshot {
            name: &set.token_set.name,
            token_set_name: &set.token_set.token_set_name,
            display_name: &set.token_set.display_name,
            groups: set
                .forest
                .roots
                .iter()
                .map(|root| group_snapshot(dsdb, root, &active))
                .collect(),
            ungrouped: set
                .forest
                .ungrouped
                .iter()
                .map(|&token| TokenSnapshot::new(dsdb, token, &active))
                .collect(),
        })
        .collect();

    Snapshot {
        system: &dsdb.info().display_name,
        component: &component.display_name,
        context: context.describe(dsdb),
        token_sets,
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{context::ActiveContext, export::snapshot::*, store::tests::fixture};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_button_snapshot() {
        let dsdb = fixture();
        let button = dsdb.find_component("button").unwrap();
        let snapshot = snapshot(&dsdb, button, &ActiveContext::defaults(&dsdb));

        assert_eq!(snapshot.component, "Button");
        assert_eq!(snapshot.token_sets.len(), 1);
        let set = &snapshot.token_sets[0];
        assert_eq!(set.token_set_name, "md.comp.button");

        let names: Vec<&str> = set.groups.iter().map(|g| g.display_name).collect();
        assert_eq!(names, vec!["Label", "Container", "Icon"]);

        let color = &set.groups[1].children[0].tokens[0];
        assert_eq!(color.token_name, "md.comp.button.container.color");
        assert_eq!(color.value, Some(StyleValue::Scalar("103 80 164".to_string())));
        assert_eq!(color.chain.len(), 3);

        let icon = &set.groups[2].tokens[0];
        assert_eq!(icon.resolved_value, None);
        assert!(icon.chain.is_empty());

        assert_eq!(set.ungrouped.len(), 1);
        assert_eq!(set.ungrouped[0].token_name, "md.comp.button.focus.indicator");
    }

    #[test]
    fn test_snapshot_json_shape() {
        let dsdb = fixture();
        let button = dsdb.find_component("button").unwrap();
        let mut context = ActiveContext::defaults(&dsdb);
        context.apply_override(&dsdb, "density", "compact").unwrap();

        let value = serde_json::to_value(snapshot(&dsdb, button, &context)).unwrap();
        assert_eq!(value["context"]["density"], "compact");

        let height = &value["tokenSets"][0]["groups"][1]["tokens"][0];
        assert_eq!(height["tokenName"], "md.comp.button.container.height");
        assert_eq!(height["tokenValueType"], "LENGTH");
        assert_eq!(
            height["resolvedValue"],
            json!({"length": {"value": 32.0, "unit": "DIPS"}})
        );
        assert_eq!(height["value"], "32px");
        assert_eq!(
            value["tokenSets"][0]["groups"][2]["tokens"][0]["resolvedValue"],
            serde_json::Value::Null
        );
    }

    #[test]
    fn test_component_without_sets() {
        let dsdb = fixture();
        let card = dsdb.find_component("card").unwrap();
        let snapshot = snapshot(&dsdb, card, &ActiveContext::defaults(&dsdb));
        assert!(snapshot.token_sets.is_empty());
    }
}
