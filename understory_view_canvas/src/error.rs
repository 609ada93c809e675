// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use understory_view_transform::TransformError;

/// Errors reported by [`ViewportController`](crate::ViewportController).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CanvasError {
    /// Wheel sensitivity must be finite and greater than one.
    InvalidWheelSensitivity(f64),
    /// Culling margins must be finite and non‑negative.
    InvalidMargin {
        /// Configured horizontal margin.
        horizontal: f64,
        /// Configured vertical margin.
        vertical: f64,
    },
    /// The store refused a programmatic patch.
    Transform(TransformError),
    /// The controller was destroyed.
    Destroyed,
}

/// Result alias for controller operations.
pub type CanvasResult<T> = Result<T, CanvasError>;

impl fmt::Display for CanvasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWheelSensitivity(s) => {
                write!(f, "wheel sensitivity must be finite and > 1, got {s}")
            }
            Self::InvalidMargin {
                horizontal,
                vertical,
            } => write!(
                f,
                "culling margins must be finite and >= 0, got ({horizontal}, {vertical})"
            ),
            Self::Transform(err) => write!(f, "transform rejected: {err}"),
            Self::Destroyed => f.write_str("controller was destroyed"),
        }
    }
}

impl core::error::Error for CanvasError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Transform(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TransformError> for CanvasError {
    fn from(err: TransformError) -> Self {
        Self::Transform(err)
    }
}
