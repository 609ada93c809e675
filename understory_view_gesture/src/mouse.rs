// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mouse drag recognizer: compute pan deltas between press and release.
//!
//! ## Usage
//!
//! 1) On a (verified) press on the host, call [`MouseDrag::start`].
//! 2) On each window‑level move, call [`MouseDrag::update`]; it reports the
//!    pointer delta since the previous position, or ends the drag if the
//!    pointer left the host or the window.
//! 3) On a (verified) release, call [`MouseDrag::end`].
//!
//! Leaving the bounds ends the drag exactly like a release, so a pointer that
//! re‑enters without a fresh press never resumes a stale drag.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Rect, Size, Vec2};
//! use understory_view_gesture::HostGeometry;
//! use understory_view_gesture::mouse::{MouseDrag, MouseStep};
//!
//! let geometry = HostGeometry::new(Some(Rect::new(0.0, 0.0, 100.0, 100.0)), Size::new(100.0, 100.0));
//! let mut drag = MouseDrag::default();
//!
//! assert_eq!(drag.start(Point::new(10.0, 20.0), &geometry), MouseStep::Started);
//! assert_eq!(
//!     drag.update(Point::new(15.0, 25.0), &geometry),
//!     MouseStep::Moved { delta: Vec2::new(5.0, 5.0) }
//! );
//! // Leaving the host ends the drag.
//! assert_eq!(drag.update(Point::new(150.0, 25.0), &geometry), MouseStep::Finished);
//! assert!(!drag.is_dragging());
//! ```

use kurbo::{Point, Vec2};

use crate::HostGeometry;

/// Outcome of feeding one event to a [`MouseDrag`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MouseStep {
    /// The event does not apply in the current state.
    Ignored,
    /// A drag began.
    Started,
    /// The pointer moved by `delta` client pixels.
    Moved {
        /// Movement since the previous position.
        delta: Vec2,
    },
    /// The drag ended, by release or by leaving the bounds.
    Finished,
}

/// Tracks one mouse drag.
#[derive(Clone, Copy, Debug, Default)]
pub struct MouseDrag {
    last_pos: Option<Point>,
}

impl MouseDrag {
    /// Starts a drag at `pos`.
    ///
    /// Ignored while already dragging or while the host is detached.
    pub fn start(&mut self, pos: Point, geometry: &HostGeometry) -> MouseStep {
        if self.is_dragging() || geometry.host.is_none() {
            return MouseStep::Ignored;
        }
        self.last_pos = Some(pos);
        MouseStep::Started
    }

    /// Feeds a pointer move.
    pub fn update(&mut self, pos: Point, geometry: &HostGeometry) -> MouseStep {
        let Some(last_pos) = self.last_pos else {
            return MouseStep::Ignored;
        };
        if !geometry.contains(pos) {
            return self.end();
        }
        self.last_pos = Some(pos);
        MouseStep::Moved {
            delta: pos - last_pos,
        }
    }

    /// Ends the drag; returns [`MouseStep::Finished`] only if one was active.
    pub fn end(&mut self) -> MouseStep {
        if self.last_pos.take().is_some() {
            MouseStep::Finished
        } else {
            MouseStep::Ignored
        }
    }

    /// Returns `true` while a drag is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.last_pos.is_some()
    }
}
