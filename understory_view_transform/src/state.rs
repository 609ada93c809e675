// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kurbo::Affine;

use crate::error::TransformError;

/// A uniform‑scale affine transform: `p' = scale * p + (x, y)`.
///
/// There is no rotation or shear. A valid transform has a finite, strictly
/// positive `scale` and finite translation components; see
/// [`TransformState::validate`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformState {
    /// Uniform scale factor.
    pub scale: f64,
    /// Horizontal translation.
    pub x: f64,
    /// Vertical translation.
    pub y: f64,
}

impl TransformState {
    /// The identity transform `{ scale: 1, x: 0, y: 0 }`.
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0);

    /// Creates a transform from its components.
    #[must_use]
    pub const fn new(scale: f64, x: f64, y: f64) -> Self {
        Self { scale, x, y }
    }

    /// Returns `true` if the transform may be stored.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Checks the `scale > 0` and finiteness invariants.
    pub fn validate(&self) -> Result<(), TransformError> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(TransformError::NonFiniteComponent);
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(TransformError::NonPositiveScale(self.scale));
        }
        Ok(())
    }

    /// Returns the algebraic inverse `{ 1/s, -x/s, -y/s }`.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            scale: 1.0 / self.scale,
            x: -self.x / self.scale,
            y: -self.y / self.scale,
        }
    }

    /// Returns the matrix the surface itself should be rendered with.
    ///
    /// For a viewport matrix this is its inverse, which places the content
    /// point `transform_point(p)` at the host‑relative pixel `p`.
    #[must_use]
    pub fn screen_matrix(&self) -> ScreenMatrix {
        let inv = self.inverse();
        ScreenMatrix {
            scale: inv.scale,
            x: inv.x,
            y: inv.y,
        }
    }

    /// Returns this transform as a Kurbo [`Affine`].
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        Affine::new([self.scale, 0.0, 0.0, self.scale, self.x, self.y])
    }

    /// Applies a partial update, keeping components the payload leaves unset.
    #[must_use]
    pub fn merge(&self, payload: TransformPayload) -> Self {
        Self {
            scale: payload.scale.unwrap_or(self.scale),
            x: payload.x.unwrap_or(self.x),
            y: payload.y.unwrap_or(self.y),
        }
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A partial [`TransformState`] update.
///
/// `None` components keep their current value when merged.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TransformPayload {
    /// New scale, if any.
    pub scale: Option<f64>,
    /// New horizontal translation, if any.
    pub x: Option<f64>,
    /// New vertical translation, if any.
    pub y: Option<f64>,
}

impl TransformPayload {
    /// A payload that changes nothing.
    pub const EMPTY: Self = Self {
        scale: None,
        x: None,
        y: None,
    };

    /// A payload that only sets the scale.
    #[must_use]
    pub const fn scale(scale: f64) -> Self {
        Self {
            scale: Some(scale),
            x: None,
            y: None,
        }
    }

    /// A payload that only sets the translation.
    #[must_use]
    pub const fn translation(x: f64, y: f64) -> Self {
        Self {
            scale: None,
            x: Some(x),
            y: Some(y),
        }
    }

    /// Returns `true` if merging this payload is a no‑op.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scale.is_none() && self.x.is_none() && self.y.is_none()
    }
}

impl From<TransformState> for TransformPayload {
    fn from(state: TransformState) -> Self {
        Self {
            scale: Some(state.scale),
            x: Some(state.x),
            y: Some(state.y),
        }
    }
}

/// The matrix applied to a rendered surface, formatted CSS‑style.
///
/// `Display` produces `matrix(a, b, c, d, e, f)` with `b = c = 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenMatrix {
    /// Uniform scale (`a` and `d`).
    pub scale: f64,
    /// Horizontal translation (`e`).
    pub x: f64,
    /// Vertical translation (`f`).
    pub y: f64,
}

impl ScreenMatrix {
    /// Returns the six CSS matrix coefficients `[a, b, c, d, e, f]`.
    #[must_use]
    pub fn coefficients(&self) -> [f64; 6] {
        [self.scale, 0.0, 0.0, self.scale, self.x, self.y]
    }

    /// Returns this matrix as a Kurbo [`Affine`].
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        Affine::new(self.coefficients())
    }
}

impl fmt::Display for ScreenMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Adding +0 folds the -0 that inverting a zero translation yields.
        write!(
            f,
            "matrix({}, 0, 0, {}, {}, {})",
            self.scale,
            self.scale,
            self.x + 0.0,
            self.y + 0.0
        )
    }
}
