use serde::{Deserialize, Serialize};

/// A context dimension such as theme or density.
///
/// `specificity` only orders dimensions for display; value selection never
/// looks at it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextTagGroup {
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub context_tag_group_name: String,
    #[serde(default)]
    pub default_tag: String,
    #[serde(default)]
    pub specificity: i64,
}

impl ContextTagGroup {
    /// Whether `tag` belongs to this dimension (`<group>/tags/<id>`).
    pub fn owns(&self, tag: &Tag) -> bool {
        tag.name
            .strip_prefix(self.name.as_str())
            .is_some_and(|rest| rest.starts_with("/tags/"))
    }
}

/// One selectable value of a context dimension.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// Full path, e.g. `systems/m3/contextTagGroups/theme/tags/dark`.
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    /// Short name matched against contextual references, e.g. `dark`.
    pub tag_name: String,
    #[serde(default)]
    pub tag_order: String,
}

impl Tag {
    /// Numeric order within the group. Unparseable orders sort last.
    pub fn order_key(&self) -> i64 {
        self.tag_order.trim().parse().unwrap_or(i64::MAX)
    }
}
