//! Export of resolved token values.
//!
//! ## Module Structure
//!
//! - `serialize`: One resolved value to a platform-style [`StyleValue`]
//! - `snapshot`: A component's forests with values inlined for one context

pub mod serialize;
pub mod snapshot;

use std::collections::BTreeMap;

use tracing::{debug, debug_span, warn};

use super::{
    context::ActiveContext,
    data::{ResolvedValue, Token},
    resolve::{resolve_chain, select_best},
    store::Dsdb,
};
use crate::findings::{
    DeprecatedTokenFinding, Finding, NonOpaqueColorFinding, UndefinedValueFinding,
    UnresolvedTokenFinding,
};

pub use serialize::{StyleKind, StyleValue, format_length, format_number, serialize};
pub use snapshot::{GroupSnapshot, Snapshot, TokenSetSnapshot, TokenSnapshot, snapshot};

/// Flat `tokenName -> value` map plus what was noticed on the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenExport {
    pub entries: BTreeMap<String, StyleValue>,
    pub findings: Vec<Finding>,
}

/// Serialize the best resolution of each token under `context`.
///
/// Tokens without an applicable or exportable value are left out of the map;
/// nothing stops the export.
pub fn export_tokens(dsdb: &Dsdb, tokens: &[&Token], context: &ActiveContext) -> TokenExport {
    let active = context.tag_names(dsdb);
    let mut ordered: Vec<&Token> = tokens.to_vec();
    ordered.sort_by(|a, b| a.token_name.cmp(&b.token_name));

    let mut export = TokenExport::default();
    for token in ordered {
        let _span = debug_span!("export", token = %token.token_name).entered();

        if let Some(deprecation) = &token.deprecation_message {
            export.findings.push(
                DeprecatedTokenFinding::new(
                    &token.token_name,
                    &deprecation.message,
                    deprecation.replacement_token_name.clone(),
                )
                .into(),
            );
        }

        let candidates = resolve_chain(dsdb, &token.name);
        let Some(best) = select_best(&candidates, &active) else {
            debug!("no applicable value");
            export.findings.push(
                UnresolvedTokenFinding {
                    token_name: token.token_name.clone(),
                    context: describe_context(dsdb, context),
                }
                .into(),
            );
            continue;
        };

        match best.resolved_value {
            ResolvedValue::Undefined(_) => {
                export.findings.push(
                    UndefinedValueFinding {
                        token_name: token.token_name.clone(),
                    }
                    .into(),
                );
                continue;
            }
            ResolvedValue::Color(color) if !color.is_opaque() => {
                export.findings.push(
                    NonOpaqueColorFinding {
                        token_name: token.token_name.clone(),
                        alpha: color.alpha,
                    }
                    .into(),
                );
            }
            _ => {}
        }

        match serialize(best.resolved_value) {
            Some(value) => {
                export
                    .entries
                    .entry(token.token_name.clone())
                    .or_insert(value);
            }
            None => warn!("value of '{}' has nothing to export", token.token_name),
        }
    }
    export
}

fn describe_context(dsdb: &Dsdb, context: &ActiveContext) -> Vec<String> {
    context
        .describe(dsdb)
        .into_iter()
        .map(|(dimension, tag)| format!("{}={}", dimension, tag))
        .collect()
}
