// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pan, pivot zoom and point mapping on [`TransformState`].
//!
//! All three operate on a viewport matrix, i.e. a transform from host‑relative
//! viewport pixels into content coordinates. The formulas are applied as
//! written; no attempt is made to correct floating‑point drift at extreme
//! scales.

use kurbo::Point;

use crate::TransformState;

impl TransformState {
    /// Pans by `(dx, dy)` viewport pixels.
    ///
    /// The delta is converted into content units by the current scale, so
    /// `translated(0, 0)` is the identity and successive pans add up.
    #[must_use]
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            scale: self.scale,
            x: self.x + dx * self.scale,
            y: self.y + dy * self.scale,
        }
    }

    /// Multiplies the scale by `factor` about `pivot` (viewport pixels).
    ///
    /// The content point under `pivot` is the same before and after.
    #[must_use]
    pub fn scaled_at(&self, factor: f64, pivot: Point) -> Self {
        Self {
            scale: self.scale * factor,
            x: self.scale * (1.0 - factor) * pivot.x + self.x,
            y: self.scale * (1.0 - factor) * pivot.y + self.y,
        }
    }

    /// Maps a host‑relative viewport point into content coordinates.
    #[must_use]
    pub fn transform_point(&self, point: Point) -> Point {
        Point::new(
            self.scale * point.x + self.x,
            self.scale * point.y + self.y,
        )
    }
}
