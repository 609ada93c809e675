// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Rect;

/// Per‑axis element overhang, in content units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CullingMargins {
    /// Horizontal margin.
    pub horizontal: f64,
    /// Vertical margin.
    pub vertical: f64,
}

impl CullingMargins {
    /// Creates margins per axis.
    #[must_use]
    pub const fn new(horizontal: f64, vertical: f64) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Creates equal margins on both axes.
    #[must_use]
    pub const fn uniform(margin: f64) -> Self {
        Self::new(margin, margin)
    }

    /// Returns `true` if both margins are finite and non‑negative.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.horizontal.is_finite()
            && self.vertical.is_finite()
            && self.horizontal >= 0.0
            && self.vertical >= 0.0
    }
}

/// Content‑space region a renderer should materialize.
///
/// A box with zero width or height means nothing is visible.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderingBox {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl RenderingBox {
    /// Creates a box from its origin and size.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A zero‑size box at `(x, y)`.
    #[must_use]
    pub const fn collapsed(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.0, 0.0)
    }

    /// Returns `true` if the box covers no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Returns the box as a Kurbo [`Rect`].
    #[must_use]
    pub fn to_rect(&self) -> Rect {
        Rect::new(
            self.x,
            self.y,
            self.x + self.width,
            self.y + self.height,
        )
    }
}

/// Edges of a loaded region.
///
/// [`LoadedArea::NOTHING`] (all edges at `+∞`) contains no finite region, so
/// the first check against it always asks for a load.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoadedArea {
    /// Left edge.
    pub x_from: f64,
    /// Right edge.
    pub x_to: f64,
    /// Top edge.
    pub y_from: f64,
    /// Bottom edge.
    pub y_to: f64,
}

impl LoadedArea {
    /// Nothing loaded.
    pub const NOTHING: Self = Self {
        x_from: f64::INFINITY,
        x_to: f64::INFINITY,
        y_from: f64::INFINITY,
        y_to: f64::INFINITY,
    };

    /// Returns `true` if `inner` lies entirely within `self`.
    #[must_use]
    pub fn contains(&self, inner: &Self) -> bool {
        inner.x_from >= self.x_from
            && inner.x_to <= self.x_to
            && inner.y_from >= self.y_from
            && inner.y_to <= self.y_to
    }
}

impl Default for LoadedArea {
    fn default() -> Self {
        Self::NOTHING
    }
}

impl From<RenderingBox> for LoadedArea {
    fn from(b: RenderingBox) -> Self {
        Self {
            x_from: b.x,
            x_to: b.x + b.width,
            y_from: b.y,
            y_to: b.y + b.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;

    use super::{CullingMargins, LoadedArea, RenderingBox};

    #[test]
    fn nothing_contains_nothing_finite() {
        let area = LoadedArea::from(RenderingBox::new(0.0, 0.0, 10.0, 10.0));
        assert!(!LoadedArea::NOTHING.contains(&area));
        assert!(area.contains(&area));
    }

    #[test]
    fn containment_is_edge_inclusive() {
        let outer = LoadedArea::from(RenderingBox::new(-10.0, -10.0, 20.0, 20.0));
        let inner = LoadedArea::from(RenderingBox::new(-10.0, 0.0, 20.0, 10.0));
        let spill = LoadedArea::from(RenderingBox::new(-10.0, 0.0, 20.0, 10.5));
        assert!(outer.contains(&inner));
        assert!(!outer.contains(&spill));
    }

    #[test]
    fn box_geometry() {
        let b = RenderingBox::new(-5.0, 2.0, 10.0, 4.0);
        assert_eq!(b.to_rect(), Rect::new(-5.0, 2.0, 5.0, 6.0));
        assert!(!b.is_empty());
        assert!(RenderingBox::collapsed(3.0, 3.0).is_empty());
        assert!(RenderingBox::new(0.0, 0.0, f64::NAN, 1.0).is_empty());
    }

    #[test]
    fn margin_validation() {
        assert!(CullingMargins::uniform(0.0).is_valid());
        assert!(CullingMargins::new(10.0, 3.0).is_valid());
        assert!(!CullingMargins::new(-1.0, 3.0).is_valid());
        assert!(!CullingMargins::new(1.0, f64::INFINITY).is_valid());
    }
}
