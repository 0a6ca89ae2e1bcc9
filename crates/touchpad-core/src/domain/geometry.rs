//! Button geometry table and hit testing.
//!
//! Buttons live in touchscreen pixel coordinates with the origin at the top-left
//! corner.  A table is an *ordered* list: when two buttons overlap, the one
//! declared first wins.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::contact::UNKNOWN_COORD;

/// Errors that can occur when building a [`GeometryTable`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeometryError {
    /// Two buttons share a name.
    #[error("duplicate button name: {0:?}")]
    DuplicateName(String),

    /// A button has an empty name.
    #[error("button name must not be empty")]
    EmptyName,
}

/// Shape of a button on the screen.
///
/// Serialised with an internal `kind` tag so a TOML entry reads
/// `kind = "circle"` / `kind = "rect"` / `kind = "analog"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ButtonShape {
    /// Hit iff the Euclidean distance to the center is at most `radius`.
    Circle {
        center_x: i32,
        center_y: i32,
        radius: u32,
    },
    /// Hit iff `origin <= p <= origin + extent` on both axes.
    Rect {
        origin_x: i32,
        origin_y: i32,
        width: u32,
        height: u32,
    },
    /// Analog stick area.  Has no hit-test behaviour yet: it never matches.
    Analog {
        center_x: i32,
        center_y: i32,
        radius: u32,
    },
}

impl ButtonShape {
    /// Returns `true` if `(x, y)` falls inside this shape.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        match *self {
            ButtonShape::Circle {
                center_x,
                center_y,
                radius,
            } => {
                let dx = i64::from(x) - i64::from(center_x);
                let dy = i64::from(y) - i64::from(center_y);
                let r = i64::from(radius);
                dx * dx + dy * dy <= r * r
            }
            ButtonShape::Rect {
                origin_x,
                origin_y,
                width,
                height,
            } => {
                let (x, y) = (i64::from(x), i64::from(y));
                let (ox, oy) = (i64::from(origin_x), i64::from(origin_y));
                x >= ox && x <= ox + i64::from(width) && y >= oy && y <= oy + i64::from(height)
            }
            ButtonShape::Analog { .. } => false,
        }
    }
}

/// A named button region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    /// Key name pressed while a contact is on this button (e.g. `"a"`, `"up arrow"`).
    pub name: String,
    #[serde(flatten)]
    pub shape: ButtonShape,
}

impl Button {
    /// Creates a circular button.
    pub fn circle(name: impl Into<String>, center_x: i32, center_y: i32, radius: u32) -> Self {
        Self {
            name: name.into(),
            shape: ButtonShape::Circle {
                center_x,
                center_y,
                radius,
            },
        }
    }

    /// Creates a rectangular button.
    pub fn rect(
        name: impl Into<String>,
        origin_x: i32,
        origin_y: i32,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            name: name.into(),
            shape: ButtonShape::Rect {
                origin_x,
                origin_y,
                width,
                height,
            },
        }
    }
}

/// Immutable, ordered mapping from button name to shape.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GeometryTable {
    buttons: Vec<Button>,
}

impl GeometryTable {
    /// Builds a table, keeping the declared order.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DuplicateName`] if two buttons share a name and
    /// [`GeometryError::EmptyName`] if any name is empty.
    pub fn new(buttons: Vec<Button>) -> Result<Self, GeometryError> {
        for (i, button) in buttons.iter().enumerate() {
            if button.name.is_empty() {
                return Err(GeometryError::EmptyName);
            }
            if buttons[..i].iter().any(|b| b.name == button.name) {
                return Err(GeometryError::DuplicateName(button.name.clone()));
            }
        }
        Ok(Self { buttons })
    }

    /// Layout for the official Raspberry Pi 7" (800x480) touchscreen.
    ///
    /// A/B/X/Y as circles on the right, a D-pad on the left and a home
    /// (`esc`) key along the bottom edge.
    pub fn builtin() -> Self {
        Self {
            buttons: vec![
                Button::circle("a", 683, 224, 20),
                Button::circle("b", 726, 184, 20),
                Button::circle("x", 641, 184, 20),
                Button::circle("y", 683, 144, 20),
                Button::rect("up arrow", 74, 256, 40, 40),
                Button::rect("down arrow", 74, 336, 40, 40),
                Button::rect("left arrow", 34, 296, 40, 40),
                Button::rect("right arrow", 114, 296, 40, 40),
                Button::rect("esc", 375, 440, 50, 30),
            ],
        }
    }

    /// Resolves a point to the first button (in declared order) containing it.
    ///
    /// Returns `None` if no button matches or either coordinate is
    /// [`UNKNOWN_COORD`].
    pub fn resolve(&self, x: i32, y: i32) -> Option<&str> {
        if x == UNKNOWN_COORD || y == UNKNOWN_COORD {
            return None;
        }
        self.buttons
            .iter()
            .find(|b| b.shape.contains(x, y))
            .map(|b| b.name.as_str())
    }

    /// Looks up a button by name.
    pub fn get(&self, name: &str) -> Option<&Button> {
        self.buttons.iter().find(|b| b.name == name)
    }

    /// Iterates buttons in declared order.
    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.buttons.iter()
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
