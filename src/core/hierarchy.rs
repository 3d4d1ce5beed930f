//! Display-group forests per token set.
//!
//! Groups reference their parent by name only, so the forest is built in two
//! passes: index the groups of the set, then attach children to parents.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::warn;

use super::{
    data::{Component, DisplayGroup, Token, TokenSet, token::is_path_prefix},
    store::Dsdb,
};

/// A display group with its directly attached tokens and child groups.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupNode<'a> {
    pub group: &'a DisplayGroup,
    pub tokens: Vec<&'a Token>,
    pub children: Vec<GroupNode<'a>>,
}

impl<'a> GroupNode<'a> {
    /// Own tokens first, then each child's, depth-first preorder.
    pub fn collect_tokens(&self) -> Vec<&'a Token> {
        let mut tokens = Vec::new();
        self.collect_into(&mut tokens);
        tokens
    }

    fn collect_into(&self, out: &mut Vec<&'a Token>) {
        out.extend(self.tokens.iter().copied());
        for child in &self.children {
            child.collect_into(out);
        }
    }
}

/// Root groups of one token set plus the tokens that sit in no group.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Forest<'a> {
    pub roots: Vec<GroupNode<'a>>,
    pub ungrouped: Vec<&'a Token>,
}

impl<'a> Forest<'a> {
    /// Every token of the forest: grouped tokens root by root, then ungrouped.
    pub fn collect_tokens(&self) -> Vec<&'a Token> {
        let mut tokens: Vec<&'a Token> = self
            .roots
            .iter()
            .flat_map(|root| root.collect_tokens())
            .collect();
        tokens.extend(self.ungrouped.iter().copied());
        tokens
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty() && self.ungrouped.is_empty()
    }
}

struct ForestBuilder<'a> {
    groups: Vec<&'a DisplayGroup>,
    children: HashMap<&'a str, Vec<usize>>,
    tokens: HashMap<&'a str, Vec<&'a Token>>,
    visited: HashSet<usize>,
}

impl<'a> ForestBuilder<'a> {
    fn node(&mut self, index: usize) -> GroupNode<'a> {
        self.visited.insert(index);
        let group = self.groups[index];

        let mut child_indexes = self
            .children
            .get(group.name.as_str())
            .cloned()
            .unwrap_or_default();
        child_indexes.retain(|i| !self.visited.contains(i));
        child_indexes.sort_by_key(|&i| self.groups[i].order_in_parent_display_group.unwrap_or(0));

        let mut children = Vec::with_capacity(child_indexes.len());
        for child in child_indexes {
            // A sibling subtree may have reached this group through a cycle.
            if !self.visited.contains(&child) {
                children.push(self.node(child));
            }
        }

        GroupNode {
            group,
            tokens: self.tokens.remove(group.name.as_str()).unwrap_or_default(),
            children,
        }
    }
}

/// Assemble the forest of `token_set_name` from all groups and tokens.
///
/// A group belongs to the set when its identity is prefixed by the set
/// identity. It is a root when it has no parent or its parent is outside the
/// set. Roots sort by `orderInParentTokenSet`, children by
/// `orderInParentDisplayGroup` and tokens by `orderInDisplayGroup`, with
/// missing orders treated as 0.
pub fn build_forest<'a>(
    display_groups: &'a [DisplayGroup],
    tokens: &'a [Token],
    token_set_name: &str,
) -> Forest<'a> {
    let groups: Vec<&DisplayGroup> = display_groups
        .iter()
        .filter(|group| is_path_prefix(token_set_name, &group.name))
        .collect();
    let in_set: HashMap<&str, usize> = groups
        .iter()
        .enumerate()
        .map(|(i, &group)| (group.name.as_str(), i))
        .rev()
        .collect();

    let mut roots = Vec::new();
    let mut children: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, &group) in groups.iter().enumerate() {
        match group.parent_group.as_deref() {
            Some(parent) if in_set.contains_key(parent) => {
                children.entry(parent).or_default().push(i);
            }
            _ => roots.push(i),
        }
    }

    let mut grouped: HashMap<&str, Vec<&Token>> = HashMap::new();
    let mut ungrouped = Vec::new();
    for token in tokens.iter().filter(|t| t.belongs_to_set(token_set_name)) {
        match token.display_group.as_deref() {
            Some(group) if in_set.contains_key(group) => {
                grouped.entry(group).or_default().push(token);
            }
            Some(group) => {
                warn!(
                    "token '{}' references display group '{}' outside its set",
                    token.token_name, group
                );
                ungrouped.push(token);
            }
            None => ungrouped.push(token),
        }
    }
    for list in grouped.values_mut() {
        list.sort_by_key(|t| t.order_in_display_group.unwrap_or(0));
    }

    let mut builder = ForestBuilder {
        groups,
        children,
        tokens: grouped,
        visited: HashSet::new(),
    };

    roots.sort_by_key(|&i| builder.groups[i].order_in_parent_token_set.unwrap_or(0));
    let mut forest: Vec<GroupNode<'a>> = roots.into_iter().map(|i| builder.node(i)).collect();

    // Groups only reachable through a parent cycle never hang off a root.
    for i in 0..builder.groups.len() {
        if !builder.visited.contains(&i) {
            warn!(
                "display group '{}' is part of a parent cycle; treating it as a root",
                builder.groups[i].name
            );
            let node = builder.node(i);
            forest.push(node);
        }
    }

    Forest {
        roots: forest,
        ungrouped,
    }
}

/// A token set paired with its display-group forest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenSetForest<'a> {
    pub token_set: &'a TokenSet,
    pub forest: Forest<'a>,
}

/// The component's token sets in declared order, each with its forest.
/// Unknown set identities are skipped.
pub fn token_sets_for_component<'a>(
    dsdb: &'a Dsdb,
    component: &Component,
) -> Vec<TokenSetForest<'a>> {
    component
        .token_sets
        .iter()
        .filter_map(|name| {
            let Some(token_set) = dsdb.token_set(name) else {
                warn!(
                    "component '{}' references unknown token set '{}'",
                    component.display_name, name
                );
                return None;
            };
            Some(TokenSetForest {
                token_set,
                forest: build_forest(dsdb.display_groups(), dsdb.tokens(), &token_set.name),
            })
        })
        .collect()
}
