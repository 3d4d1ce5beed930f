//! Value records and the `ResolvedValue` sum type.
//!
//! A DSDB value record carries its identity plus exactly one payload key
//! (`color`, `length`, `shape`, ...). The payload is modeled as the closed
//! enum [`ResolvedValue`]; the loader rejects records with zero or several
//! payload keys before the graph is built.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};
use serde_json::Map;

use crate::core::error::LoadError;

/// RGBA color with channels in `0.0..=1.0`.
///
/// Zero channels are omitted by the exporter, so every channel defaults to 0
/// except `alpha`, which defaults to fully opaque.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Color {
    #[serde(default)]
    pub red: f64,
    #[serde(default)]
    pub green: f64,
    #[serde(default)]
    pub blue: f64,
    #[serde(default = "default_alpha")]
    pub alpha: f64,
}

fn default_alpha() -> f64 {
    1.0
}

impl Color {
    pub fn is_opaque(&self) -> bool {
        (self.alpha - 1.0).abs() < f64::EPSILON
    }

    /// Channels scaled to `0..=255`.
    pub fn channels(&self) -> [u8; 3] {
        [self.red, self.green, self.blue].map(to_channel)
    }

    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.channels();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

fn to_channel(c: f64) -> u8 {
    (c * 255.0).round().clamp(0.0, 255.0) as u8
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LengthUnit {
    Dips,
    Percent,
    /// Only used by font specifiers.
    Points,
    #[default]
    #[serde(other)]
    Unspecified,
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthUnit::Dips => write!(f, "DIPS"),
            LengthUnit::Percent => write!(f, "PERCENT"),
            LengthUnit::Points => write!(f, "POINTS"),
            LengthUnit::Unspecified => write!(f, "UNSPECIFIED"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Length {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default)]
    pub unit: LengthUnit,
}

impl Length {
    pub fn new(value: f64, unit: LengthUnit) -> Self {
        Self {
            value: Some(value),
            unit,
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(value) => write!(f, "{:.2} {}", value, self.unit),
            None => write!(f, "- {}", self.unit),
        }
    }
}

pub type ShapeDimension = Length;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundedCorners {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_size: Option<ShapeDimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_left: Option<ShapeDimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_right: Option<ShapeDimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom_right: Option<ShapeDimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom_left: Option<ShapeDimension>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "family")]
pub enum Shape {
    #[serde(rename = "SHAPE_FAMILY_CIRCULAR")]
    Circular,
    #[serde(rename = "SHAPE_FAMILY_ROUNDED_CORNERS")]
    RoundedCorners(RoundedCorners),
}

/// Typography composite: references to the five constituent tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    #[serde(default)]
    pub font_name_token_name: String,
    #[serde(default)]
    pub font_weight_token_name: String,
    #[serde(default)]
    pub font_size_token_name: String,
    #[serde(default)]
    pub font_tracking_token_name: String,
    #[serde(default)]
    pub line_height_token_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct FontNames {
    #[serde(default)]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AxisValue {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Named sub-properties, each referencing another token by alias.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CustomComposite {
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

/// The concrete payload of a value. Exactly one variant is populated.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ResolvedValue {
    Color(Color),
    Opacity(f64),
    Length(Length),
    Shape(Shape),
    #[serde(rename = "type")]
    Typography(Typography),
    Numeric(f64),
    FontWeight(f64),
    FontNames(FontNames),
    FontSize(Length),
    FontTracking(Length),
    LineHeight(Length),
    Elevation(Length),
    AxisValue(AxisValue),
    CustomComposite(CustomComposite),
    Undefined(bool),
}

impl ResolvedValue {
    /// JSON keys that select a variant.
    pub const PAYLOAD_KEYS: &'static [&'static str] = &[
        "color",
        "opacity",
        "length",
        "shape",
        "type",
        "numeric",
        "fontWeight",
        "fontNames",
        "fontSize",
        "fontTracking",
        "lineHeight",
        "elevation",
        "axisValue",
        "customComposite",
        "undefined",
    ];

    pub fn is_undefined(&self) -> bool {
        matches!(self, ResolvedValue::Undefined(_))
    }
}

impl fmt::Display for ResolvedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedValue::Color(color) => {
                write!(f, "{} (alpha {:.2})", color.to_hex(), color.alpha)
            }
            ResolvedValue::Opacity(opacity) => write!(f, "opacity {:.2}", opacity),
            ResolvedValue::Length(length) => write!(f, "{}", length),
            ResolvedValue::Shape(Shape::Circular) => write!(f, "circular"),
            ResolvedValue::Shape(Shape::RoundedCorners(corners)) => match corners.default_size {
                Some(size) => write!(f, "rounded {}", size),
                None => write!(f, "rounded corners"),
            },
            ResolvedValue::Typography(ty) => write!(
                f,
                "type {} / {} / {}",
                ty.font_name_token_name, ty.font_weight_token_name, ty.font_size_token_name
            ),
            ResolvedValue::Numeric(value) => write!(f, "{}", value),
            ResolvedValue::FontWeight(weight) => write!(f, "font weight {}", weight),
            ResolvedValue::FontNames(names) => write!(f, "{}", names.values.join(", ")),
            ResolvedValue::FontSize(length) => write!(f, "font size {}", length),
            ResolvedValue::FontTracking(length) => write!(f, "tracking {}", length),
            ResolvedValue::LineHeight(length) => write!(f, "line height {}", length),
            ResolvedValue::Elevation(length) => write!(f, "elevation {}", length),
            ResolvedValue::AxisValue(axis) => match &axis.value {
                Some(value) => write!(f, "'{}' {}", axis.tag, value),
                None => write!(f, "'{}'", axis.tag),
            },
            ResolvedValue::CustomComposite(composite) => {
                write!(f, "composite of {} properties", composite.properties.len())
            }
            ResolvedValue::Undefined(_) => write!(f, "undefined"),
        }
    }
}

/// A value record: identity, optional alias, and its payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Value {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_name: Option<String>,
    #[serde(flatten)]
    pub value: ResolvedValue,
}

/// Value record as it appears in the document, before payload validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawValue {
    pub name: String,
    #[serde(default)]
    pub token_name: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, serde_json::Value>,
}

impl TryFrom<RawValue> for Value {
    type Error = LoadError;

    fn try_from(raw: RawValue) -> Result<Self, Self::Error> {
        let RawValue {
            name,
            token_name,
            fields,
        } = raw;

        let payload: Map<String, serde_json::Value> = fields
            .into_iter()
            .filter(|(key, _)| ResolvedValue::PAYLOAD_KEYS.contains(&key.as_str()))
            .collect();

        if payload.len() != 1 {
            return Err(LoadError::PayloadCount {
                name,
                found: payload.keys().cloned().collect(),
            });
        }

        let value = serde_json::from_value(serde_json::Value::Object(payload))
            .map_err(|source| LoadError::InvalidValue {
                name: name.clone(),
                source,
            })?;

        Ok(Self {
            name,
            token_name,
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::core::data::value::*;
    use pretty_assertions::assert_eq;

    fn raw(json: &str) -> RawValue {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_color_defaults() {
        let value: ResolvedValue = serde_json::from_str(r#"{"color": {"red": 1}}"#).unwrap();
        assert_eq!(
            value,
            ResolvedValue::Color(Color {
                red: 1.0,
                green: 0.0,
                blue: 0.0,
                alpha: 1.0,
            })
        );
    }

    #[test]
    fn test_color_hex() {
        let color = Color {
            red: 0.403921568627451,
            green: 0.3137254901960784,
            blue: 0.6431372549019608,
            alpha: 1.0,
        };
        assert_eq!(color.to_hex(), "#6750a4");
        assert_eq!(color.channels(), [103, 80, 164]);
        assert!(color.is_opaque());
    }

    #[test]
    fn test_shape_families() {
        let circular: ResolvedValue =
            serde_json::from_str(r#"{"shape": {"family": "SHAPE_FAMILY_CIRCULAR"}}"#).unwrap();
        assert_eq!(circular, ResolvedValue::Shape(Shape::Circular));

        let rounded: ResolvedValue = serde_json::from_str(
            r#"{"shape": {"family": "SHAPE_FAMILY_ROUNDED_CORNERS", "topLeft": {"value": 4, "unit": "DIPS"}}}"#,
        )
        .unwrap();
        let ResolvedValue::Shape(Shape::RoundedCorners(corners)) = rounded else {
            panic!("expected rounded corners");
        };
        assert_eq!(corners.top_left, Some(Length::new(4.0, LengthUnit::Dips)));
        assert_eq!(corners.default_size, None);
    }

    #[test]
    fn test_unknown_unit_is_unspecified() {
        let value: ResolvedValue =
            serde_json::from_str(r#"{"length": {"value": 2, "unit": "EMS"}}"#).unwrap();
        assert_eq!(
            value,
            ResolvedValue::Length(Length::new(2.0, LengthUnit::Unspecified))
        );
    }

    #[test]
    fn test_resolved_value_rejects_two_tags() {
        let result: Result<ResolvedValue, _> =
            serde_json::from_str(r#"{"opacity": 0.5, "numeric": 1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_value_record_with_single_payload() {
        let value = Value::try_from(raw(
            r#"{"name": "values/a", "tokenName": "md.ref.a", "createTime": "2024", "opacity": 0.38}"#,
        ))
        .unwrap();
        assert_eq!(value.name, "values/a");
        assert_eq!(value.token_name.as_deref(), Some("md.ref.a"));
        assert_eq!(value.value, ResolvedValue::Opacity(0.38));
    }

    #[test]
    fn test_value_record_payload_count() {
        let err = Value::try_from(raw(
            r#"{"name": "values/a", "opacity": 0.38, "numeric": 1}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, LoadError::PayloadCount { ref found, .. } if found.len() == 2));

        let err = Value::try_from(raw(r#"{"name": "values/b", "createTime": "x"}"#)).unwrap_err();
        assert!(matches!(err, LoadError::PayloadCount { ref found, .. } if found.is_empty()));
    }

    #[test]
    fn test_value_record_invalid_payload() {
        let err = Value::try_from(raw(r#"{"name": "values/a", "color": "red"}"#)).unwrap_err();
        assert!(matches!(err, LoadError::InvalidValue { .. }));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ResolvedValue::Length(Length::new(40.0, LengthUnit::Dips)).to_string(),
            "40.00 DIPS"
        );
        assert_eq!(
            ResolvedValue::FontNames(FontNames {
                values: vec!["Roboto".to_string(), "Arial".to_string()]
            })
            .to_string(),
            "Roboto, Arial"
        );
        assert_eq!(ResolvedValue::Undefined(true).to_string(), "undefined");
    }
}
