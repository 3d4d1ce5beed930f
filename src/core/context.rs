//! The active context: one selected tag per context dimension.
//!
//! The context is a plain value passed to every resolution call. Nothing in
//! the engine keeps a "current selection" of its own.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::{data::ContextTagGroup, error::ContextError, store::Dsdb};

/// Short tag names (`dark`, `compact`) a candidate is matched against.
pub type TagSet<'a> = BTreeSet<&'a str>;

/// Selected tag per dimension, keyed by dimension identity and holding full
/// tag names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ActiveContext {
    selections: BTreeMap<String, String>,
}

impl ActiveContext {
    /// Every dimension set to its declared default tag.
    ///
    /// A dimension without a usable default falls back to its first tag in
    /// document order.
    pub fn defaults(dsdb: &Dsdb) -> Self {
        let selections = dsdb
            .context_tag_groups()
            .iter()
            .filter_map(|group| {
                let tag = dsdb
                    .tag(&group.default_tag)
                    .filter(|tag| group.owns(tag))
                    .or_else(|| dsdb.tags_for_group(group).into_iter().next())?;
                Some((group.name.clone(), tag.name.clone()))
            })
            .collect();
        Self { selections }
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Full name of the tag selected for `group`.
    pub fn selection(&self, group: &str) -> Option<&str> {
        self.selections.get(group).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.selections
            .iter()
            .map(|(group, tag)| (group.as_str(), tag.as_str()))
    }

    pub fn select(&mut self, group: impl Into<String>, tag: impl Into<String>) {
        self.selections.insert(group.into(), tag.into());
    }

    /// A copy of this context with one dimension swapped.
    pub fn with_selection(&self, group: &str, tag: &str) -> Self {
        let mut next = self.clone();
        next.select(group, tag);
        next
    }

    /// Apply a user selection such as `theme=dark`.
    ///
    /// The dimension may be given by identity or `contextTagGroupName`, the
    /// tag by full name or short `tagName`.
    pub fn apply_override(
        &mut self,
        dsdb: &Dsdb,
        dimension: &str,
        tag: &str,
    ) -> Result<(), ContextError> {
        let group = dsdb
            .find_context_tag_group(dimension)
            .ok_or_else(|| ContextError::UnknownDimension(dimension.to_string()))?;
        let selected = find_group_tag(dsdb, group, tag).ok_or_else(|| ContextError::UnknownTag {
            dimension: dimension.to_string(),
            tag: tag.to_string(),
        })?;
        self.select(group.name.clone(), selected);
        Ok(())
    }

    /// Short names of the selected tags. Unknown selections are dropped.
    pub fn tag_names<'a>(&self, dsdb: &'a Dsdb) -> TagSet<'a> {
        self.selections
            .values()
            .filter_map(|name| dsdb.tag(name))
            .map(|tag| tag.tag_name.as_str())
            .collect()
    }

    /// `dimension -> short tag name`, for display and snapshots.
    pub fn describe(&self, dsdb: &Dsdb) -> BTreeMap<String, String> {
        self.selections
            .iter()
            .map(|(group, tag)| {
                let group_name = dsdb
                    .find_context_tag_group(group)
                    .map(|g| g.context_tag_group_name.clone())
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| group.clone());
                let tag_name = dsdb
                    .tag(tag)
                    .map(|t| t.tag_name.clone())
                    .unwrap_or_else(|| tag.clone());
                (group_name, tag_name)
            })
            .collect()
    }
}

fn find_group_tag(dsdb: &Dsdb, group: &ContextTagGroup, tag: &str) -> Option<String> {
    dsdb.tags_for_group(group)
        .into_iter()
        .find(|t| t.name == tag || t.tag_name == tag)
        .map(|t| t.name.clone())
}
