//! The token map: aliases split on `.` into a name tree.

use std::collections::BTreeMap;

use serde::Serialize;

use super::data::Token;

/// One segment of the alias tree. A node may both carry a token and have
/// children (`md.sys.color` next to `md.sys.color.primary`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TokenMapNode<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<&'a Token>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub children: BTreeMap<&'a str, TokenMapNode<'a>>,
}

impl<'a> TokenMapNode<'a> {
    /// Every token at or below this node, preorder with children by name.
    pub fn collect_tokens(&self) -> Vec<&'a Token> {
        let mut tokens = Vec::new();
        self.collect_into(&mut tokens);
        tokens
    }

    fn collect_into(&self, out: &mut Vec<&'a Token>) {
        out.extend(self.token);
        for child in self.children.values() {
            child.collect_into(out);
        }
    }

    /// Number of tokens at or below this node.
    pub fn count(&self) -> usize {
        usize::from(self.token.is_some())
            + self.children.values().map(TokenMapNode::count).sum::<usize>()
    }
}

/// Alias tree over a token list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TokenMap<'a> {
    root: TokenMapNode<'a>,
}

impl<'a> TokenMap<'a> {
    pub fn build(tokens: impl IntoIterator<Item = &'a Token>) -> Self {
        let mut root = TokenMapNode::default();
        for token in tokens {
            let mut node = &mut root;
            for segment in token.token_name.split('.').filter(|s| !s.is_empty()) {
                node = node.children.entry(segment).or_default();
            }
            // Duplicate aliases keep the first token.
            node.token.get_or_insert(token);
        }
        Self { root }
    }

    pub fn root(&self) -> &TokenMapNode<'a> {
        &self.root
    }

    /// The subtree at a dotted path such as `md.sys.color`. An empty path is
    /// the root.
    pub fn find(&self, path: &str) -> Option<&TokenMapNode<'a>> {
        path.split('.')
            .filter(|s| !s.is_empty())
            .try_fold(&self.root, |node, segment| node.children.get(segment))
    }

    /// Tokens under `prefix`; empty when the path does not exist.
    pub fn tokens_under(&self, prefix: &str) -> Vec<&'a Token> {
        self.find(prefix)
            .map(TokenMapNode::collect_tokens)
            .unwrap_or_default()
    }
}
