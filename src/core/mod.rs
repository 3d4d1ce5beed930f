//! Token resolution engine over a loaded DSDB document.
//!
//! ## Module Structure
//!
//! - `data`: Record types deserialized from the document
//! - `store`: The indexed, immutable [`Dsdb`] graph
//! - `context`: The [`ActiveContext`] passed to every resolution
//! - `resolve`: Candidate chains and best-candidate selection
//! - `relevance`: Which context dimensions matter for a token list
//! - `hierarchy`: Display-group forests per token set
//! - `token_map`: Alias tree split on `.`
//! - `export`: Value serialization, flat exports and snapshots

pub mod context;
pub mod data;
pub mod error;
pub mod export;
pub mod hierarchy;
pub mod relevance;
pub mod resolve;
pub mod store;
pub mod token_map;

pub use context::{ActiveContext, TagSet};
pub use error::{ContextError, LoadError};
pub use export::{StyleValue, TokenExport, export_tokens, serialize, snapshot};
pub use hierarchy::{Forest, GroupNode, TokenSetForest, build_forest, token_sets_for_component};
pub use relevance::{Dimension, ordered_dimensions, relevant_dimensions};
pub use resolve::{Resolution, resolve_chain, resolve_token, select_best};
pub use store::{Dsdb, DsdbStats, SystemInfo};
pub use token_map::{TokenMap, TokenMapNode};
