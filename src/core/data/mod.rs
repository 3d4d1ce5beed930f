//! Core data types deserialized from a DSDB export.
//!
//! ## Module Structure
//!
//! - `catalog`: Components, token sets and display groups
//! - `context`: Context dimensions (`ContextTagGroup`) and their `Tag`s
//! - `reference`: Contextual reference trees and alias nodes
//! - `token`: Tokens and their value-type tag
//! - `value`: Value records and the `ResolvedValue` sum type

pub mod catalog;
pub mod context;
pub mod reference;
pub mod token;
pub mod value;

pub use catalog::{Component, DisplayGroup, TokenSet};
pub use context::{ContextTagGroup, Tag};
pub use reference::{ContextualReference, ContextualReferenceTree, ReferenceNode, ValueRef};
pub use token::{DeprecationMessage, Token, TokenValueType};
pub use value::{
    AxisValue, Color, CustomComposite, FontNames, Length, LengthUnit, ResolvedValue, RoundedCorners,
    Shape, ShapeDimension, Typography, Value,
};
