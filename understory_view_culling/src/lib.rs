// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_view_culling --heading-base-level=0

//! Understory View Culling: decide which part of a large canvas to materialize.
//!
//! Diagrams may hold far more elements than can be rendered at once. This
//! crate computes, from the current viewport matrix and host size, the
//! content‑space [`RenderingBox`] an external renderer should materialize,
//! and decides when that box has to be recomputed.
//!
//! The core concepts are:
//!
//! - [`CullingMargins`]: the largest expected element overhang per axis, so
//!   elements anchored just outside the viewport but overlapping it are
//!   loaded before they become visible.
//! - [`RenderingBox`]: the viewport grown by one full viewport on each side
//!   plus the margins (three viewports wide and tall in total).
//! - [`LoadedArea`]: the last emitted box, used as the hysteresis reference.
//! - [`VirtualScrollLoader`]: bookkeeping that turns viewport changes and
//!   gesture boundaries into [`LoadRequest`]s and produces boxes to emit.
//!
//! The loader never schedules anything itself. Hosts defer [`LoadRequest`]s
//! (coalescing bursts into one), then call [`VirtualScrollLoader::load`] when
//! the deferred task runs.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use understory_view_culling::{CullingMargins, RenderingBox, VirtualScrollLoader};
//! use understory_view_transform::TransformState;
//!
//! let mut loader = VirtualScrollLoader::new(CullingMargins::uniform(25.0));
//! let host = Some(Size::new(100.0, 100.0));
//!
//! let first = loader.load(TransformState::IDENTITY, host).unwrap();
//! assert_eq!(first, RenderingBox::new(-125.0, -125.0, 350.0, 350.0));
//!
//! // A small pan stays inside the loaded area: nothing to reload.
//! let panned = TransformState::IDENTITY.translated(40.0, -60.0);
//! assert!(!loader.needs_reload(panned, host));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod area;
mod loader;

pub use area::{CullingMargins, LoadedArea, RenderingBox};
pub use loader::{LoadRequest, VirtualScrollLoader};
