// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_view_canvas --heading-base-level=0

//! Understory View Canvas: an interactive pan/zoom controller for large canvases.
//!
//! [`ViewportController`] ties together the pieces from the sibling crates:
//! - gesture recognizers from `understory_view_gesture` (mouse drag, touch
//!   pan/pinch, wheel bursts);
//! - the transform store and preprocessors from `understory_view_transform`;
//! - the culling loader from `understory_view_culling`, which decides which
//!   [`RenderingBox`](understory_view_culling::RenderingBox) an external
//!   renderer should materialize.
//!
//! The controller owns no window or timer. The environment is injected as a
//! [`Platform`] (clock, host geometry, cursor, window‑level listener
//! registration, resize observation), raw input is fed through
//! [`ViewportController::dispatch`], and deferred work is driven by the host
//! via [`ViewportController::next_deadline`] and
//! [`ViewportController::run_due_tasks`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use understory_view_canvas::{CanvasConfig, Platform, ViewportController, WindowEvents};
//! use understory_view_culling::CullingMargins;
//! use understory_view_gesture::{InputEvent, WheelInput};
//!
//! struct Host;
//!
//! impl Platform for Host {
//!     fn now_ms(&self) -> u64 { 0 }
//!     fn host_rect(&self) -> Option<Rect> { Some(Rect::new(0.0, 0.0, 100.0, 100.0)) }
//!     fn window_size(&self) -> Size { Size::new(100.0, 100.0) }
//!     fn set_cursor(&mut self, _: Option<&str>) {}
//!     fn listen(&mut self, _: WindowEvents) {}
//!     fn unlisten(&mut self, _: WindowEvents) {}
//!     fn observe_resize(&mut self, _: bool) {}
//! }
//!
//! let config = CanvasConfig::default().with_virtual_scroll(CullingMargins::uniform(25.0));
//! let mut canvas = ViewportController::new(Host, config).unwrap();
//!
//! // Scrolling down at the origin zooms out by the wheel sensitivity.
//! let wheel = WheelInput { position: Point::ORIGIN, delta_y: 1.0 };
//! assert!(canvas.dispatch(InputEvent::Wheel(wheel)));
//! assert_eq!(canvas.viewport_matrix().scale, 1.2);
//!
//! // The initial load and the zoom coalesce into one deferred emission.
//! canvas.run_due_tasks();
//! let emitted = canvas.loader().and_then(|l| l.last_emitted()).unwrap();
//! assert!((emitted.width - 410.0).abs() < 1e-9);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod controller;
mod deferred;
mod error;
mod events;
mod platform;

pub use config::{
    CanvasConfig, DEFAULT_WHEEL_FINISH_TIMEOUT_MS, DEFAULT_WHEEL_SENSITIVITY, MouseVerifier,
    TouchVerifier, WheelVerifier,
};
pub use controller::{CanvasTask, ViewportController};
pub use deferred::{DeferredTasks, TaskHandle};
pub use error::{CanvasError, CanvasResult};
pub use events::{GestureKind, ViewportEvents};
pub use platform::{Platform, WindowEvents};
