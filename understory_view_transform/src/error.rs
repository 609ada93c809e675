// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Reasons a transform was refused by the store.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransformError {
    /// The scale was zero, negative, infinite or NaN.
    NonPositiveScale(f64),
    /// A translation component was infinite or NaN.
    NonFiniteComponent,
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveScale(scale) => {
                write!(f, "transform scale must be finite and positive, got {scale}")
            }
            Self::NonFiniteComponent => f.write_str("transform translation must be finite"),
        }
    }
}

impl core::error::Error for TransformError {}
