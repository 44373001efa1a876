//! Layout sizing types.
//!
//! Lengths, flex participation and flex container settings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// A geometry value on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "LengthRepr", into = "LengthRepr")]
pub enum Length {
    /// Content-driven. On `x`/`y` this means 0.
    #[default]
    Auto,
    /// Absolute pixels.
    Px(i32),
    /// Percentage of the parent's content box on the same axis.
    Percent(f32),
}

impl Length {
    /// Resolve against a parent content dimension. `None` for `Auto`.
    ///
    /// Percentages round to the nearest pixel. The result may be negative;
    /// callers that resolve sizes clamp it.
    pub fn resolve(&self, parent: i32) -> Option<i32> {
        match *self {
            Length::Auto => None,
            Length::Px(px) => Some(px),
            Length::Percent(p) => Some((p as f64 / 100.0 * parent as f64).round() as i32),
        }
    }

    #[inline]
    pub fn is_auto(&self) -> bool {
        matches!(self, Length::Auto)
    }

    /// Parse, falling back to `Px(0)` on malformed input.
    pub fn parse_lossy(text: &str) -> Self {
        text.parse().unwrap_or_else(|e: LayoutError| {
            tracing::debug!("{}, using 0", e);
            Length::Px(0)
        })
    }
}

impl From<i32> for Length {
    fn from(px: i32) -> Self {
        Length::Px(px)
    }
}

impl From<&str> for Length {
    fn from(text: &str) -> Self {
        Length::parse_lossy(text)
    }
}

impl FromStr for Length {
    type Err = LayoutError;

    /// Accepts `auto`, `50%`, `10px` and bare integers.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || LayoutError::InvalidGeometry(format!("malformed length {s:?}"));

        if s.eq_ignore_ascii_case("auto") {
            return Ok(Length::Auto);
        }
        if let Some(pct) = s.strip_suffix('%') {
            let value: f32 = pct.trim().parse().map_err(|_| invalid())?;
            if !value.is_finite() {
                return Err(invalid());
            }
            return Ok(Length::Percent(value));
        }
        let px = s.strip_suffix("px").unwrap_or(s).trim();
        px.parse::<i32>().map(Length::Px).map_err(|_| invalid())
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Auto => f.write_str("auto"),
            Length::Px(px) => write!(f, "{px}px"),
            Length::Percent(p) => write!(f, "{p}%"),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum LengthRepr {
    Px(i32),
    Text(String),
}

impl From<LengthRepr> for Length {
    fn from(repr: LengthRepr) -> Self {
        match repr {
            LengthRepr::Px(px) => Length::Px(px),
            LengthRepr::Text(text) => Length::parse_lossy(&text),
        }
    }
}

impl From<Length> for LengthRepr {
    fn from(length: Length) -> Self {
        match length {
            Length::Px(px) => LengthRepr::Px(px),
            other => LengthRepr::Text(other.to_string()),
        }
    }
}

/// Main axis direction of a flex container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlexDirection {
    #[default]
    Row,
    RowReverse,
    Column,
    ColumnReverse,
}

impl FlexDirection {
    pub fn is_row(&self) -> bool {
        matches!(self, FlexDirection::Row | FlexDirection::RowReverse)
    }

    pub fn is_reverse(&self) -> bool {
        matches!(self, FlexDirection::RowReverse | FlexDirection::ColumnReverse)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlexWrap {
    #[default]
    NoWrap,
    Wrap,
    /// Wrap, stacking lines from the cross-axis end.
    WrapReverse,
}

/// Alignment on the main axis (direction of flow).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JustifyContent {
    /// Pack children at the start.
    #[default]
    FlexStart,
    /// Pack children at the end.
    FlexEnd,
    Center,
    /// First and last flush with the line edges, equal space between.
    SpaceBetween,
    /// Equal space around each child; edges get half a share.
    SpaceAround,
    /// Equal space between children and at both edges.
    SpaceEvenly,
}

/// Alignment on the cross axis (perpendicular to flow).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignItems {
    /// Stretch auto cross sizes to the line.
    #[default]
    Stretch,
    FlexStart,
    Center,
    FlexEnd,
    /// No text baselines are tracked; behaves like `FlexStart`.
    Baseline,
}

/// Per-child flex participation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlexItem {
    pub grow: f32,
    pub shrink: f32,
    pub basis: Length,
}

impl Default for FlexItem {
    fn default() -> Self {
        Self {
            grow: 0.0,
            shrink: 1.0,
            basis: Length::Auto,
        }
    }
}

impl FlexItem {
    /// Factors below zero are treated as zero.
    pub fn new(grow: f32, shrink: f32, basis: Length) -> Self {
        Self {
            grow: grow.max(0.0),
            shrink: shrink.max(0.0),
            basis,
        }
    }

    pub fn grow(mut self, grow: f32) -> Self {
        self.grow = grow.max(0.0);
        self
    }

    pub fn shrink(mut self, shrink: f32) -> Self {
        self.shrink = shrink.max(0.0);
        self
    }

    pub fn basis(mut self, basis: impl Into<Length>) -> Self {
        self.basis = basis.into();
        self
    }
}

/// Flex container settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlexContainer {
    pub direction: FlexDirection,
    pub wrap: FlexWrap,
    pub justify: JustifyContent,
    pub align: AlignItems,
    /// Space between adjacent items and between lines, in pixels.
    pub gap: i32,
}

impl FlexContainer {
    pub fn row() -> Self {
        Self::default()
    }

    pub fn column() -> Self {
        Self {
            direction: FlexDirection::Column,
            ..Self::default()
        }
    }

    pub fn direction(mut self, direction: FlexDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn wrap(mut self, wrap: FlexWrap) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn justify(mut self, justify: JustifyContent) -> Self {
        self.justify = justify;
        self
    }

    pub fn align(mut self, align: AlignItems) -> Self {
        self.align = align;
        self
    }

    pub fn gap(mut self, gap: i32) -> Self {
        self.gap = gap.max(0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_units() {
        assert_eq!("50%".parse::<Length>().unwrap(), Length::Percent(50.0));
        assert_eq!("10px".parse::<Length>().unwrap(), Length::Px(10));
        assert_eq!(" -4 ".parse::<Length>().unwrap(), Length::Px(-4));
        assert_eq!("AUTO".parse::<Length>().unwrap(), Length::Auto);
    }

    #[test]
    fn malformed_length_is_invalid_geometry() {
        let err = "ten%".parse::<Length>().unwrap_err();
        assert!(matches!(err, LayoutError::InvalidGeometry(_)));
        assert_eq!(Length::parse_lossy("12em"), Length::Px(0));
    }

    #[test]
    fn percent_rounds_against_parent() {
        assert_eq!(Length::Percent(50.0).resolve(101), Some(51));
        assert_eq!(Length::Percent(33.3).resolve(200), Some(67));
        assert_eq!(Length::Percent(150.0).resolve(40), Some(60));
        assert_eq!(Length::Percent(-10.0).resolve(100), Some(-10));
        assert_eq!(Length::Auto.resolve(100), None);
    }

    #[test]
    fn length_deserializes_from_number_or_string() {
        let values: Vec<Length> = serde_json::from_str(r#"[12, "25%", "auto", "bogus"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                Length::Px(12),
                Length::Percent(25.0),
                Length::Auto,
                Length::Px(0)
            ]
        );
    }

    #[test]
    fn flex_item_defaults() {
        let item = FlexItem::default();
        assert_eq!(item.grow, 0.0);
        assert_eq!(item.shrink, 1.0);
        assert!(item.basis.is_auto());
        assert_eq!(FlexItem::new(-1.0, -2.0, Length::Auto).shrink, 0.0);
    }
}
