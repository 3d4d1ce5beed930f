//! Token resolution: candidate chains and best-candidate selection.
//!
//! A token owns an ordered list of contextual references. Each becomes a
//! [`Resolution`] (required tags, alias chain, terminal value). Selection is
//! a maximum-cardinality subset match against the active tags:
//!
//! 1. A candidate is eligible when all of its tags are active.
//! 2. The eligible candidate with the most tags wins.
//! 3. Equal tag counts resolve to the earliest candidate in document order.
//! 4. With nothing explicit eligible, the untagged default applies, if any.
//!
//! `ContextTagGroup::specificity` is deliberately absent here; it only orders
//! dimensions for display.

use serde::Serialize;

use super::{
    context::{ActiveContext, TagSet},
    data::{ResolvedValue, Token},
    store::Dsdb,
};

/// One context-conditioned candidate value of a token.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution<'a> {
    /// Distinct required short tag names, in declared order.
    pub context_tags: Vec<&'a str>,
    /// Value identities from the token's own value to the terminal alias.
    pub chain: Vec<&'a str>,
    pub resolved_value: &'a ResolvedValue,
}

impl<'a> Resolution<'a> {
    /// Number of distinct required tags.
    pub fn cardinality(&self) -> usize {
        self.context_tags.len()
    }

    /// A candidate with no required tags applies in every context.
    pub fn is_default(&self) -> bool {
        self.context_tags.is_empty()
    }

    pub fn is_eligible(&self, active: &TagSet<'_>) -> bool {
        self.context_tags.iter().all(|tag| active.contains(tag))
    }

    /// Identity of the last value in the chain.
    pub fn terminal_value(&self) -> Option<&'a str> {
        self.chain.last().copied()
    }
}

/// All candidate resolutions of a token, in stored order.
///
/// Returns an empty list when the token has no contextual references.
pub fn resolve_chain<'a>(dsdb: &'a Dsdb, token_name: &str) -> Vec<Resolution<'a>> {
    dsdb.contextual_references(token_name)
        .iter()
        .map(|reference| {
            let mut context_tags: Vec<&str> = Vec::with_capacity(reference.context_tags.len());
            for tag in &reference.context_tags {
                let short = dsdb
                    .resolve_tag(tag)
                    .map(|t| t.tag_name.as_str())
                    .unwrap_or(tag.as_str());
                if !context_tags.contains(&short) {
                    context_tags.push(short);
                }
            }

            Resolution {
                context_tags,
                chain: reference
                    .reference_tree
                    .as_ref()
                    .map(|tree| tree.flatten())
                    .unwrap_or_default(),
                resolved_value: &reference.resolved_value,
            }
        })
        .collect()
}

/// Pick the candidate that applies under `active`. Never fails; `None`
/// means the token has no value in this context.
pub fn select_best<'r, 'a>(
    candidates: &'r [Resolution<'a>],
    active: &TagSet<'_>,
) -> Option<&'r Resolution<'a>> {
    let mut best: Option<&'r Resolution<'a>> = None;
    for candidate in candidates
        .iter()
        .filter(|c| !c.is_default() && c.is_eligible(active))
    {
        // Strictly greater keeps the first of equally specific candidates.
        if best.is_none_or(|b| candidate.cardinality() > b.cardinality()) {
            best = Some(candidate);
        }
    }

    best.or_else(|| candidates.iter().find(|c| c.is_default()))
}

/// Resolve a token under a context in one step.
pub fn resolve_token<'a>(
    dsdb: &'a Dsdb,
    token: &Token,
    context: &ActiveContext,
) -> Option<Resolution<'a>> {
    let candidates = resolve_chain(dsdb, &token.name);
    let active = context.tag_names(dsdb);
    select_best(&candidates, &active).cloned()
}
