//! Relevance analysis: which context dimensions can change a token set.
//!
//! A dimension is relevant when switching it to any of its other tags, with
//! every other dimension held fixed, changes the terminal value selected for
//! at least one token. A candidate without a reference tree is compared by
//! its resolved value instead. Dimensions are swept in parallel; each task reads the
//! same immutable store and context.

use std::collections::HashMap;

use rayon::prelude::*;
use serde::Serialize;

use super::{
    context::{ActiveContext, TagSet},
    data::{ContextTagGroup, ResolvedValue, Tag, Token},
    resolve::{Resolution, resolve_chain, select_best},
    store::Dsdb,
};

/// A dimension with its tags in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dimension<'a> {
    pub group: &'a ContextTagGroup,
    pub tags: Vec<&'a Tag>,
}

/// Dimensions by ascending specificity, tags by ascending `tagOrder`.
///
/// Both sorts are stable, so equal keys keep document order.
pub fn ordered_dimensions(dsdb: &Dsdb) -> Vec<Dimension<'_>> {
    let mut groups: Vec<&ContextTagGroup> = dsdb.context_tag_groups().iter().collect();
    groups.sort_by_key(|group| group.specificity);

    groups
        .into_iter()
        .map(|group| {
            let mut tags = dsdb.tags_for_group(group);
            tags.sort_by_key(|tag| tag.order_key());
            Dimension { group, tags }
        })
        .collect()
}

/// What a selected candidate ends in.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Outcome<'a> {
    Terminal(&'a str),
    Inline(&'a ResolvedValue),
}

impl<'a> Outcome<'a> {
    fn of(resolution: &Resolution<'a>) -> Self {
        match resolution.terminal_value() {
            Some(name) => Outcome::Terminal(name),
            None => Outcome::Inline(resolution.resolved_value),
        }
    }
}

/// Outcome per (token, active tag set), local to one sweep task.
#[derive(Default)]
struct Memo<'a> {
    outcomes: HashMap<(usize, String), Option<Outcome<'a>>>,
}

impl<'a> Memo<'a> {
    fn outcome(
        &mut self,
        index: usize,
        candidates: &[Resolution<'a>],
        active: &TagSet<'_>,
    ) -> Option<Outcome<'a>> {
        let key = (index, serialize_tags(active));
        *self
            .outcomes
            .entry(key)
            .or_insert_with(|| select_best(candidates, active).map(Outcome::of))
    }
}

fn serialize_tags(tags: &TagSet<'_>) -> String {
    tags.iter().copied().collect::<Vec<_>>().join(",")
}

/// Dimensions whose selection changes at least one token's value under
/// `context`, in display order.
pub fn relevant_dimensions<'a>(
    dsdb: &'a Dsdb,
    tokens: &[&Token],
    context: &ActiveContext,
) -> Vec<&'a ContextTagGroup> {
    let candidates: Vec<Vec<Resolution<'a>>> = tokens
        .iter()
        .map(|token| resolve_chain(dsdb, &token.name))
        .collect();
    let current = context.tag_names(dsdb);

    ordered_dimensions(dsdb)
        .into_par_iter()
        .filter(|dimension| dimension.tags.len() > 1)
        .filter(|dimension| {
            let mut memo = Memo::default();
            let selected = context.selection(&dimension.group.name);

            dimension
                .tags
                .iter()
                .filter(|tag| selected != Some(tag.name.as_str()))
                .any(|tag| {
                    let hypothetical = context
                        .with_selection(&dimension.group.name, &tag.name)
                        .tag_names(dsdb);
                    candidates.iter().enumerate().any(|(index, token_candidates)| {
                        memo.outcome(index, token_candidates, &current)
                            != memo.outcome(index, token_candidates, &hypothetical)
                    })
                })
        })
        .map(|dimension| dimension.group)
        .collect()
}
