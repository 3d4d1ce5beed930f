use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of token value types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenValueType {
    Color,
    Opacity,
    Length,
    Shape,
    Typography,
    FontNames,
    FontWeight,
    FontSize,
    FontTracking,
    LineHeight,
    Elevation,
    AxisValue,
    Duration,
    Numeric,
    CustomComposite,
}

impl fmt::Display for TokenValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenValueType::Color => "COLOR",
            TokenValueType::Opacity => "OPACITY",
            TokenValueType::Length => "LENGTH",
            TokenValueType::Shape => "SHAPE",
            TokenValueType::Typography => "TYPOGRAPHY",
            TokenValueType::FontNames => "FONT_NAMES",
            TokenValueType::FontWeight => "FONT_WEIGHT",
            TokenValueType::FontSize => "FONT_SIZE",
            TokenValueType::FontTracking => "FONT_TRACKING",
            TokenValueType::LineHeight => "LINE_HEIGHT",
            TokenValueType::Elevation => "ELEVATION",
            TokenValueType::AxisValue => "AXIS_VALUE",
            TokenValueType::Duration => "DURATION",
            TokenValueType::Numeric => "NUMERIC",
            TokenValueType::CustomComposite => "CUSTOM_COMPOSITE",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeprecationMessage {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub replacement_token_name: Option<String>,
}

/// A named, typed design variable.
///
/// `name` is the identity used by reference trees and display groups,
/// `token_name` is the dotted alias (`md.sys.color.primary`) used for export.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub name: String,
    pub token_name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub token_name_suffix: String,
    pub token_value_type: TokenValueType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_in_display_group: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_message: Option<DeprecationMessage>,
}

impl Token {
    /// Whether this token lives under the given token set identity.
    pub fn belongs_to_set(&self, token_set_name: &str) -> bool {
        is_path_prefix(token_set_name, &self.name)
    }
}

/// Path-segment aware prefix check: `sets/a` prefixes `sets/a/x` but not `sets/ab`.
pub(crate) fn is_path_prefix(prefix: &str, name: &str) -> bool {
    name.strip_prefix(prefix)
        .is_some_and(|rest| rest.starts_with('/'))
}
