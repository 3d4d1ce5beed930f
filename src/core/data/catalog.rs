use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub definition: String,
    /// Identities of the token sets this component uses.
    #[serde(default)]
    pub token_sets: Vec<String>,
    #[serde(default)]
    pub alternative_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_display_group: Option<String>,
}

impl Component {
    /// Case-insensitive match on display name, identity, or alternative names.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        std::iter::once(&self.display_name)
            .chain(std::iter::once(&self.name))
            .chain(self.alternative_names.iter())
            .any(|candidate| candidate.to_lowercase().contains(&needle))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSet {
    pub name: String,
    #[serde(default)]
    pub token_set_name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub order: i64,
}

/// Presentation-only grouping node. Parents are referenced by name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayGroup {
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_in_parent_display_group: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_in_parent_token_set: Option<i64>,
}

#[cfg(test)]
mod tests {
    use crate::core::data::catalog::*;

    #[test]
    fn test_component_matches() {
        let component = Component {
            name: "components/fab".to_string(),
            display_name: "Floating action button".to_string(),
            definition: String::new(),
            token_sets: Vec::new(),
            alternative_names: vec!["FAB".to_string()],
            component_display_group: None,
        };
        assert!(component.matches("action"));
        assert!(component.matches("fab"));
        assert!(component.matches("components/"));
        assert!(!component.matches("chip"));
    }
}
