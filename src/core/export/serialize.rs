//! Conversion of resolved values into platform-style scalars.

use serde::Serialize;
use serde_json::{Map, Value as Json};
use tracing::debug;

use crate::core::data::{Length, LengthUnit, ResolvedValue, RoundedCorners, Shape};

/// An exported token value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StyleValue {
    /// `"103 80 164"`, `"40px"`, `"0.38"`.
    Scalar(String),
    /// `{"value": 500, "type": "weight"}`.
    Typed {
        value: Json,
        #[serde(rename = "type")]
        kind: StyleKind,
    },
    /// Token-name references of a composite, passed through.
    References(Map<String, Json>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleKind {
    Weight,
    Tracking,
    Font,
}

/// Serialize one resolved value. `None` means the token gets no entry:
/// the value is undefined or lacks the number it needs.
pub fn serialize(value: &ResolvedValue) -> Option<StyleValue> {
    match value {
        ResolvedValue::Color(color) => {
            if !color.is_opaque() {
                debug!("color alpha {} is not supported, exporting as opaque", color.alpha);
            }
            let [r, g, b] = color.channels();
            Some(StyleValue::Scalar(format!("{} {} {}", r, g, b)))
        }
        ResolvedValue::Opacity(number) | ResolvedValue::Numeric(number) => {
            Some(StyleValue::Scalar(format_number(*number)))
        }
        ResolvedValue::Length(length)
        | ResolvedValue::Elevation(length)
        | ResolvedValue::FontSize(length)
        | ResolvedValue::LineHeight(length) => format_length(length).map(StyleValue::Scalar),
        ResolvedValue::Shape(Shape::Circular) => Some(StyleValue::Scalar("50%".to_string())),
        ResolvedValue::Shape(Shape::RoundedCorners(corners)) => {
            Some(StyleValue::Scalar(format_corners(corners)))
        }
        ResolvedValue::Typography(ty) => {
            let mut refs = Map::new();
            for (key, token_name) in [
                ("fontNameTokenName", &ty.font_name_token_name),
                ("fontWeightTokenName", &ty.font_weight_token_name),
                ("fontSizeTokenName", &ty.font_size_token_name),
                ("fontTrackingTokenName", &ty.font_tracking_token_name),
                ("lineHeightTokenName", &ty.line_height_token_name),
            ] {
                refs.insert(key.to_string(), Json::String(token_name.clone()));
            }
            Some(StyleValue::References(refs))
        }
        ResolvedValue::CustomComposite(composite) => Some(StyleValue::References(
            composite
                .properties
                .iter()
                .map(|(key, token_name)| (key.clone(), Json::String(token_name.clone())))
                .collect(),
        )),
        ResolvedValue::FontWeight(weight) => Some(StyleValue::Typed {
            value: number_value(*weight),
            kind: StyleKind::Weight,
        }),
        ResolvedValue::FontTracking(length) => {
            format_length(length).map(|tracking| StyleValue::Typed {
                value: Json::String(tracking),
                kind: StyleKind::Tracking,
            })
        }
        ResolvedValue::FontNames(names) => {
            let quoted: Vec<String> = names
                .values
                .iter()
                .map(|name| format!("\"{}\"", name))
                .collect();
            Some(StyleValue::Typed {
                value: Json::String(quoted.join(", ")),
                kind: StyleKind::Font,
            })
        }
        ResolvedValue::AxisValue(axis) => axis
            .value
            .as_ref()
            .map(|value| StyleValue::Scalar(format!("'{}' {}", axis.tag, value))),
        ResolvedValue::Undefined(_) => None,
    }
}

/// Number followed by its unit suffix, or `None` without a number.
pub fn format_length(length: &Length) -> Option<String> {
    let value = length.value?;
    let suffix = match length.unit {
        LengthUnit::Dips => "px",
        LengthUnit::Points => "pt",
        LengthUnit::Percent | LengthUnit::Unspecified => "",
    };
    Some(format!("{}{}", format_number(value), suffix))
}

/// Integral numbers print without a fractional part.
pub fn format_number(number: f64) -> String {
    if number.fract() == 0.0 && number.abs() < i64::MAX as f64 {
        format!("{}", number as i64)
    } else {
        format!("{}", number)
    }
}

fn number_value(number: f64) -> Json {
    if number.fract() == 0.0 && number.abs() < i64::MAX as f64 {
        Json::from(number as i64)
    } else {
        Json::from(number)
    }
}

fn format_corners(corners: &RoundedCorners) -> String {
    if let Some(size) = corners.default_size.as_ref().and_then(format_length) {
        return size;
    }
    [
        &corners.top_left,
        &corners.top_right,
        &corners.bottom_right,
        &corners.bottom_left,
    ]
    .map(|corner| {
        corner
            .as_ref()
            .and_then(format_length)
            .unwrap_or_else(|| "0".to_string())
    })
    .join(" ")
}
