// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_view_transform --heading-base-level=0

//! Understory View Transform: viewport and content transforms for canvases.
//!
//! This crate models the camera of a pannable, zoomable canvas as a pair of
//! uniform‑scale affine transforms and provides the pure building blocks that
//! interactive controllers are assembled from:
//! - [`TransformState`]: `{ scale, x, y }` with pan ([`TransformState::translated`]),
//!   pivot zoom ([`TransformState::scaled_at`]) and point mapping
//!   ([`TransformState::transform_point`]).
//! - [`TransformStore`]: the viewport matrix and the content matrix, patched
//!   with partial [`TransformPayload`]s and observed through an
//!   [`after_updated`](TransformStore::after_updated) [`Signal`].
//! - [`TransformPreprocessor`]: synchronous, side‑effect‑free stages that
//!   accept, clamp or veto a proposed viewport transform before it is stored.
//!
//! ## Coordinate spaces
//!
//! The **viewport matrix** maps viewport pixels (relative to the host element)
//! into content coordinates. The surface itself is rendered with the inverse
//! of that matrix ([`TransformState::screen_matrix`]), while the nested content
//! layer receives the **content matrix** directly. User navigation only ever
//! touches the viewport matrix, so programmatic repositioning of the content
//! layer composes with it without interference.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use understory_view_transform::{
//!     PreprocessParams, ScaleLimit, TransformPayload, TransformPreprocessor, TransformStore,
//! };
//!
//! let mut store = TransformStore::new();
//!
//! // Zoom out around the host-relative point (100, 50).
//! let prev = store.viewport_matrix();
//! let next = prev.scaled_at(2.0, Point::new(100.0, 50.0));
//!
//! // Never let content shrink below half size.
//! let limit = ScaleLimit::new(Some(0.5), None);
//! let accepted = limit.accept(&PreprocessParams::new(prev, next, 800.0, 600.0));
//! store.patch_viewport_matrix(TransformPayload::from(accepted)).unwrap();
//!
//! // The content point under the pivot did not move.
//! let pivot = Point::new(100.0, 50.0);
//! assert_eq!(
//!     store.viewport_matrix().transform_point(pivot),
//!     prev.transform_point(pivot),
//! );
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod math;
mod preprocess;
mod signal;
mod state;
mod store;

pub use error::TransformError;
pub use preprocess::{
    CombinedPreprocessor, IdentityPreprocessor, PreprocessParams, ScaleLimit, ShiftLimit,
    TransformPreprocessor,
};
pub use signal::{Signal, SubscriptionId};
pub use state::{ScreenMatrix, TransformPayload, TransformState};
pub use store::{MatrixKind, TransformChange, TransformStore};
