// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_view_gesture --heading-base-level=0

//! Understory View Gesture: canvas navigation gesture recognizers.
//!
//! This crate turns raw pointer, touch and wheel input into navigation steps
//! for a pannable, zoomable canvas. Each modality is an independent state
//! machine:
//!
//! - [`mouse::MouseDrag`]: `Idle → Dragging` on a press, reporting pointer
//!   deltas until release or until the pointer leaves the host or window.
//! - [`touch::TouchGesture`]: one‑finger pan and two‑finger pinch‑pan with
//!   seamless transitions when fingers are added or lifted mid‑gesture.
//! - [`wheel::WheelBurst`]: per‑event pivot zoom; tracks whether a burst of
//!   wheel events is in progress so start/finish can be reported once.
//!
//! Recognizers do not own a transform, a clock or any listeners. They accept
//! client‑space positions plus a [`HostGeometry`] snapshot and return steps
//! (`Started`, `Moved`, `Finished`, ...) that a controller maps onto transform
//! proposals and lifecycle notifications.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use understory_view_gesture::HostGeometry;
//! use understory_view_gesture::touch::{TouchGesture, TouchStep};
//!
//! let geometry = HostGeometry::new(
//!     Some(Rect::new(0.0, 0.0, 400.0, 300.0)),
//!     Size::new(400.0, 300.0),
//! );
//! let mut touch = TouchGesture::default();
//!
//! assert_eq!(
//!     touch.start(&[Point::new(0.0, 0.0), Point::new(100.0, 0.0)]),
//!     TouchStep::Started
//! );
//! let TouchStep::Moved { pan, pinch } =
//!     touch.update(&[Point::new(0.0, 0.0), Point::new(200.0, 0.0)], &geometry)
//! else {
//!     unreachable!();
//! };
//! assert_eq!(pan.x, 50.0);
//! assert_eq!(pinch.unwrap().ratio, 2.0);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod geometry;
mod input;
pub mod mouse;
pub mod touch;
pub mod wheel;

pub use geometry::HostGeometry;
pub use input::{InputEvent, MouseButton, MouseInput, TouchInput, TouchPoints, WheelInput};
