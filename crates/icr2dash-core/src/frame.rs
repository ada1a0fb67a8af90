//! Frame composition
//!
//! Turns displayed state into an ordered draw list. The planner knows
//! nothing about pixels or image formats; it emits sprite references,
//! positions and rotation angles, and a renderer replays the list back
//! to front. Draw order matters: the cockpit goes down first, then the
//! needles, then the LCD readouts and indicators, then the warning
//! lights, and finally any HUD text.

use serde::{Deserialize, Serialize};

use crate::config::{DashLayout, LcdLayout, Point};
use crate::lights::LightStates;
use crate::needle;
use crate::state::DashState;

/// A drawable sprite, resolved to an asset via
/// [`DashLayout::sprite_path`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteRef {
    /// Cockpit background
    Cockpit,
    /// Needle of the named gauge
    Needle(String),
    /// Low fuel light
    FuelLight,
    /// High temperature light
    TempLight,
    /// Shift light
    RpmLight,
    /// One glyph (0-9) from the LCD digit strip
    LcdDigit(u8),
    /// Anti-roll bar indicator, detents 0-7
    RollbarStage(u8),
    /// Gear lever, gears 1-6
    ShifterGear(u8),
}

/// One sprite placement in a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpritePlacement {
    /// What to draw
    pub sprite: SpriteRef,
    /// Where to draw it
    ///
    /// For needles this is the gauge center; the renderer offsets by
    /// half the rotated sprite size ([`needle::needle_placement`]).
    /// Everything else anchors its top-left corner here.
    pub position: Point,
    /// Rotation in degrees, counterclockwise positive; `None` draws the
    /// sprite unrotated
    pub angle_degrees: Option<f64>,
}

/// HUD text color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HudColor {
    /// Confirmation, e.g. an engaged gear
    Green,
    /// Attention, e.g. a pending shift
    Red,
}

/// Free-floating text drawn over the scaled overlay
///
/// Positions are fractions of the scaled overlay size, so text stays put
/// when the window is resized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudText {
    /// Text to draw
    pub text: String,
    /// Horizontal position, 0.0 (left) to 1.0 (right)
    pub x_ratio: f64,
    /// Vertical position, 0.0 (top) to 1.0 (bottom)
    pub y_ratio: f64,
    /// Text color
    pub color: HudColor,
}

/// One item in a frame plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FrameItem {
    /// A sprite placement
    Sprite(SpritePlacement),
    /// A HUD text
    Text(HudText),
}

/// Ordered draw list for one frame, back to front
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FramePlan {
    /// Items in draw order
    pub items: Vec<FrameItem>,
}

impl FramePlan {
    /// Sprite placements in draw order, skipping HUD text
    pub fn sprites(&self) -> impl Iterator<Item = &SpritePlacement> {
        self.items.iter().filter_map(|item| match item {
            FrameItem::Sprite(placement) => Some(placement),
            FrameItem::Text(_) => None,
        })
    }
}

/// Builds frame plans for one layout
#[derive(Debug, Clone)]
pub struct FramePlanner {
    layout: DashLayout,
    hud_texts: Vec<HudText>,
}

impl FramePlanner {
    /// Create a planner for a layout
    pub fn new(layout: DashLayout) -> Self {
        for gauge in layout.gauges.values() {
            if gauge.is_degenerate() {
                tracing::warn!(
                    "Gauge '{}' has a zero-width value range and will not be drawn",
                    gauge.name
                );
            }
        }
        Self {
            layout,
            hud_texts: Vec::new(),
        }
    }

    /// The layout this planner draws
    pub fn layout(&self) -> &DashLayout {
        &self.layout
    }

    /// Add a HUD text that stays on every frame until cleared
    pub fn push_hud_text(
        &mut self,
        text: impl Into<String>,
        x_ratio: f64,
        y_ratio: f64,
        color: HudColor,
    ) {
        self.hud_texts.push(HudText {
            text: text.into(),
            x_ratio,
            y_ratio,
            color,
        });
    }

    /// Remove all HUD texts
    pub fn clear_hud_texts(&mut self) {
        self.hud_texts.clear();
    }

    /// Compose the draw list for one frame
    ///
    /// Gauges that are missing from the layout or cannot map values are
    /// skipped; the rest of the frame still renders.
    pub fn compose(&self, state: &DashState, lights: &LightStates) -> FramePlan {
        let mut items = vec![FrameItem::Sprite(SpritePlacement {
            sprite: SpriteRef::Cockpit,
            position: Point::new(0, 0),
            angle_degrees: None,
        })];

        let needle_values = [
            ("Tachometer", state.rpm),
            ("Boost", state.boost),
            ("Temperature", state.temp),
            ("Fuel", state.fuel),
            ("Brake bias", state.brake),
            ("Boost knob", f64::from(state.boost_knob)),
        ];
        for (name, value) in needle_values {
            let Some(gauge) = self.layout.get_gauge(name) else {
                continue;
            };
            let Ok(angle) = needle::angle_for(gauge, value) else {
                continue;
            };
            items.push(FrameItem::Sprite(SpritePlacement {
                sprite: SpriteRef::Needle(name.to_string()),
                position: gauge.gauge_center,
                angle_degrees: Some(angle),
            }));
        }

        if lights.rpm {
            items.push(sprite(SpriteRef::RpmLight, self.layout.lights.rpm.position));
        }

        push_speed_digits(&mut items, &self.layout.lcd, state.mph);

        items.push(sprite(
            SpriteRef::LcdDigit(state.gear.min(9)),
            self.layout.lcd.gear,
        ));
        items.push(sprite(
            SpriteRef::RollbarStage(state.front_rollbar.min(7)),
            self.layout.rollbars.front,
        ));
        items.push(sprite(
            SpriteRef::RollbarStage(state.rear_rollbar.min(7)),
            self.layout.rollbars.rear,
        ));

        if (1..=6).contains(&state.gear) {
            items.push(sprite(
                SpriteRef::ShifterGear(state.gear),
                self.layout.shifter.anchor,
            ));
        }

        if lights.fuel {
            items.push(sprite(
                SpriteRef::FuelLight,
                self.layout.lights.fuel.position,
            ));
        }
        if lights.temp {
            items.push(sprite(
                SpriteRef::TempLight,
                self.layout.lights.temp.position,
            ));
        }

        items.extend(self.hud_texts.iter().cloned().map(FrameItem::Text));

        FramePlan { items }
    }
}

fn sprite(sprite: SpriteRef, position: Point) -> FrameItem {
    FrameItem::Sprite(SpritePlacement {
        sprite,
        position,
        angle_degrees: None,
    })
}

/// Speed digits with leading-zero suppression
///
/// The dash LCD blanks leading zeros: 307 shows three digits, 42 two,
/// 7 one. A zero speed still shows its ones digit.
fn push_speed_digits(items: &mut Vec<FrameItem>, lcd: &LcdLayout, mph: f64) {
    let mph = mph.clamp(0.0, 999.0) as u16;
    let hundreds = (mph / 100) as u8;
    let tens = ((mph % 100) / 10) as u8;
    let ones = (mph % 10) as u8;

    if hundreds == 0 && tens != 0 {
        items.push(sprite(SpriteRef::LcdDigit(tens), lcd.speed[1]));
        items.push(sprite(SpriteRef::LcdDigit(ones), lcd.speed[2]));
    } else if hundreds == 0 && tens == 0 {
        items.push(sprite(SpriteRef::LcdDigit(ones), lcd.speed[2]));
    } else {
        items.push(sprite(SpriteRef::LcdDigit(hundreds), lcd.speed[0]));
        items.push(sprite(SpriteRef::LcdDigit(tens), lcd.speed[1]));
        items.push(sprite(SpriteRef::LcdDigit(ones), lcd.speed[2]));
    }
}
