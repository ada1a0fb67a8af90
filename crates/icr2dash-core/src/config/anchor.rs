//! Screen points and named display anchors

use serde::{Deserialize, Serialize};

/// Integer pixel coordinate in overlay space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Point {
    /// Horizontal offset from the overlay's left edge
    pub x: i32,
    /// Vertical offset from the overlay's top edge
    pub y: i32,
}

impl Point {
    /// Create a point
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A named, non-rotating screen position, optionally tied to a sprite asset
///
/// Anchors place static or swapped sprites: warning lights, LCD digit
/// cells, rollbar stages and the shifter. Rotating needles use
/// [`GaugeSpec`](super::GaugeSpec) instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DisplayAnchor {
    /// Anchor name (e.g. "fuellight", "lcd_speed1")
    pub label: String,
    /// Screen position where the sprite's top-left corner lands
    pub position: Point,
    /// Sprite drawn at this anchor, when the anchor owns one
    pub image_path: Option<String>,
}

impl DisplayAnchor {
    /// Create an anchor without its own sprite
    pub fn new(label: impl Into<String>, position: Point) -> Self {
        Self {
            label: label.into(),
            position,
            image_path: None,
        }
    }

    /// Create an anchor that draws its own sprite
    pub fn with_image(
        label: impl Into<String>,
        position: Point,
        image_path: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            position,
            image_path: Some(image_path.into()),
        }
    }
}
