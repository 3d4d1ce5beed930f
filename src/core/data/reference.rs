use serde::{Deserialize, Serialize};

use super::value::ResolvedValue;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ValueRef {
    #[serde(default)]
    pub name: String,
}

/// One hop of an alias chain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceNode {
    #[serde(default)]
    pub value: Option<ValueRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub child_nodes: Vec<ReferenceNode>,
}

impl ReferenceNode {
    /// Value identity carried by this node, if any.
    pub fn value_name(&self) -> Option<&str> {
        self.value
            .as_ref()
            .map(|v| v.name.as_str())
            .filter(|name| !name.is_empty())
    }

    /// Depth-first preorder walk of the value identities.
    ///
    /// A node without a value name ends its branch: neither it nor its
    /// children contribute to the chain.
    pub fn flatten(&self) -> Vec<&str> {
        let mut chain = Vec::new();
        self.flatten_into(&mut chain);
        chain
    }

    fn flatten_into<'a>(&'a self, chain: &mut Vec<&'a str>) {
        let Some(name) = self.value_name() else {
            return;
        };
        chain.push(name);
        for child in &self.child_nodes {
            child.flatten_into(chain);
        }
    }
}

/// A candidate value for a token under a set of required context tags.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextualReference {
    /// Full tag names; empty means context-independent default.
    #[serde(default)]
    pub context_tags: Vec<String>,
    #[serde(default)]
    pub reference_tree: Option<ReferenceNode>,
    pub resolved_value: ResolvedValue,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextualReferenceTree {
    #[serde(default)]
    pub contextual_reference_tree: Vec<ContextualReference>,
}
