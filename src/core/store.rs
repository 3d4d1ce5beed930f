//! The Value Store: an immutable, indexed view of one DSDB document.
//!
//! The whole graph is built once by [`Dsdb::from_json`]. Every reference
//! used by resolution (token identities, value identities, context tags) is
//! checked up front, so later lookups can treat absence as "no value" rather
//! than as corruption.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    data::{
        Component, ContextTagGroup, ContextualReference, ContextualReferenceTree, DisplayGroup,
        Tag, Token, TokenSet, Value, value::RawValue,
    },
    error::LoadError,
};

#[derive(Debug, Deserialize)]
struct Document {
    system: Option<RawSystem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSystem {
    #[serde(default)]
    name: String,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    token_name_prefix: String,
    #[serde(default)]
    dsdb_version: String,
    #[serde(default)]
    revision_id: String,
    #[serde(default)]
    components: Vec<Component>,
    #[serde(default)]
    token_sets: Vec<TokenSet>,
    #[serde(default)]
    tokens: Vec<Token>,
    #[serde(default)]
    values: Vec<RawValue>,
    #[serde(default)]
    display_groups: Vec<DisplayGroup>,
    #[serde(default)]
    context_tag_groups: Vec<ContextTagGroup>,
    #[serde(default)]
    tags: Vec<Tag>,
    #[serde(default)]
    contextual_reference_trees: HashMap<String, ContextualReferenceTree>,
}

/// Descriptive metadata of the design system.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInfo {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub token_name_prefix: String,
    pub dsdb_version: String,
    pub revision_id: String,
}

/// Record counts, matching the lengths of the source arrays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DsdbStats {
    pub components: usize,
    pub token_sets: usize,
    pub tokens: usize,
    pub values: usize,
    pub display_groups: usize,
    pub context_tag_groups: usize,
    pub tags: usize,
    pub contextual_reference_trees: usize,
}

/// Parsed and validated DSDB graph.
#[derive(Debug)]
pub struct Dsdb {
    info: SystemInfo,
    components: Vec<Component>,
    token_sets: Vec<TokenSet>,
    tokens: Vec<Token>,
    values: Vec<Value>,
    display_groups: Vec<DisplayGroup>,
    context_tag_groups: Vec<ContextTagGroup>,
    tags: Vec<Tag>,
    references: HashMap<String, ContextualReferenceTree>,

    token_set_index: HashMap<String, usize>,
    token_index: HashMap<String, usize>,
    alias_index: HashMap<String, usize>,
    value_index: HashMap<String, usize>,
    tag_index: HashMap<String, usize>,
    short_tag_index: HashMap<String, usize>,
}

fn index_by<T>(items: &[T], key: impl Fn(&T) -> &str) -> HashMap<String, usize> {
    let mut index = HashMap::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        // First occurrence wins on duplicate identities.
        index.entry(key(item).to_string()).or_insert(i);
    }
    index
}

impl Dsdb {
    /// Parse a DSDB export and build the indexed graph.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let document: Document = serde_json::from_str(json)?;
        let system = document.system.ok_or(LoadError::MissingSystem)?;
        Self::from_raw(system)
    }

    fn from_raw(raw: RawSystem) -> Result<Self, LoadError> {
        let values = raw
            .values
            .into_iter()
            .map(Value::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let dsdb = Self {
            token_set_index: index_by(&raw.token_sets, |s| s.name.as_str()),
            token_index: index_by(&raw.tokens, |t| t.name.as_str()),
            alias_index: index_by(&raw.tokens, |t| t.token_name.as_str()),
            value_index: index_by(&values, |v| v.name.as_str()),
            tag_index: index_by(&raw.tags, |t| t.name.as_str()),
            short_tag_index: index_by(&raw.tags, |t| t.tag_name.as_str()),
            info: SystemInfo {
                name: raw.name,
                display_name: raw.display_name,
                description: raw.description,
                token_name_prefix: raw.token_name_prefix,
                dsdb_version: raw.dsdb_version,
                revision_id: raw.revision_id,
            },
            components: raw.components,
            token_sets: raw.token_sets,
            tokens: raw.tokens,
            values,
            display_groups: raw.display_groups,
            context_tag_groups: raw.context_tag_groups,
            tags: raw.tags,
            references: raw.contextual_reference_trees,
        };
        dsdb.validate_references()?;

        debug!(
            tokens = dsdb.tokens.len(),
            values = dsdb.values.len(),
            reference_trees = dsdb.references.len(),
            "loaded DSDB '{}'",
            dsdb.info.name
        );
        Ok(dsdb)
    }

    /// Check every identity a reference tree points at.
    fn validate_references(&self) -> Result<(), LoadError> {
        let mut token_names: Vec<&String> = self.references.keys().collect();
        token_names.sort();

        for token in token_names {
            if !self.token_index.contains_key(token) {
                return Err(LoadError::UnknownToken {
                    token: token.clone(),
                });
            }
            for reference in self.contextual_references(token) {
                for tag in &reference.context_tags {
                    if self.resolve_tag(tag).is_none() {
                        return Err(LoadError::UnknownTag {
                            token: token.clone(),
                            tag: tag.clone(),
                        });
                    }
                }
                let chain = reference
                    .reference_tree
                    .as_ref()
                    .map(|tree| tree.flatten())
                    .unwrap_or_default();
                if let Some(missing) = chain.iter().find(|v| !self.value_index.contains_key(**v)) {
                    return Err(LoadError::UnknownValue {
                        token: token.clone(),
                        value: missing.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn info(&self) -> &SystemInfo {
        &self.info
    }

    pub fn stats(&self) -> DsdbStats {
        DsdbStats {
            components: self.components.len(),
            token_sets: self.token_sets.len(),
            tokens: self.tokens.len(),
            values: self.values.len(),
            display_groups: self.display_groups.len(),
            context_tag_groups: self.context_tag_groups.len(),
            tags: self.tags.len(),
            contextual_reference_trees: self.references.len(),
        }
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Look up a component by identity or display name (case-insensitive).
    pub fn find_component(&self, query: &str) -> Option<&Component> {
        self.components
            .iter()
            .find(|c| c.name == query)
            .or_else(|| {
                self.components
                    .iter()
                    .find(|c| c.display_name.eq_ignore_ascii_case(query))
            })
    }

    pub fn token_sets(&self) -> &[TokenSet] {
        &self.token_sets
    }

    pub fn token_set(&self, name: &str) -> Option<&TokenSet> {
        self.token_set_index.get(name).map(|&i| &self.token_sets[i])
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn token(&self, name: &str) -> Option<&Token> {
        self.token_index.get(name).map(|&i| &self.tokens[i])
    }

    pub fn token_by_alias(&self, token_name: &str) -> Option<&Token> {
        self.alias_index.get(token_name).map(|&i| &self.tokens[i])
    }

    /// Look up a token by alias first, then by identity.
    pub fn find_token(&self, query: &str) -> Option<&Token> {
        self.token_by_alias(query).or_else(|| self.token(query))
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.value_index.get(name).map(|&i| &self.values[i])
    }

    pub fn display_groups(&self) -> &[DisplayGroup] {
        &self.display_groups
    }

    pub fn context_tag_groups(&self) -> &[ContextTagGroup] {
        &self.context_tag_groups
    }

    /// Look up a dimension by identity or by `contextTagGroupName`.
    pub fn find_context_tag_group(&self, query: &str) -> Option<&ContextTagGroup> {
        self.context_tag_groups
            .iter()
            .find(|g| g.name == query)
            .or_else(|| {
                self.context_tag_groups
                    .iter()
                    .find(|g| g.context_tag_group_name == query)
            })
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn tag(&self, name: &str) -> Option<&Tag> {
        self.tag_index.get(name).map(|&i| &self.tags[i])
    }

    /// Resolve a tag given either its full name or its short `tagName`.
    pub fn resolve_tag(&self, name: &str) -> Option<&Tag> {
        self.tag(name)
            .or_else(|| self.short_tag_index.get(name).map(|&i| &self.tags[i]))
    }

    /// Tags of one dimension, in document order.
    pub fn tags_for_group(&self, group: &ContextTagGroup) -> Vec<&Tag> {
        self.tags.iter().filter(|tag| group.owns(tag)).collect()
    }

    /// Candidates stored for a token; empty when it has no entry.
    pub fn contextual_references(&self, token_name: &str) -> &[ContextualReference] {
        self.references
            .get(token_name)
            .map(|tree| tree.contextual_reference_tree.as_slice())
            .unwrap_or_default()
    }
}
