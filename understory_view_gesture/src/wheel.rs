// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wheel recognizer: per‑event pivot zoom grouped into bursts.
//!
//! Every accepted wheel event is a complete zoom step on its own; there is no
//! state between events except whether a burst is in progress. Wheel events
//! arrive in bursts, so a burst starts with its first event and finishes when
//! the caller decides the input went quiet (typically a trailing timer reset
//! by every event) and calls [`WheelBurst::finish`].
//!
//! ```
//! use kurbo::{Point, Rect, Size};
//! use understory_view_gesture::{HostGeometry, WheelInput};
//! use understory_view_gesture::wheel::WheelBurst;
//!
//! let geometry = HostGeometry::new(Some(Rect::new(10.0, 10.0, 110.0, 110.0)), Size::new(200.0, 200.0));
//! let mut wheel = WheelBurst::default();
//!
//! let input = WheelInput { position: Point::new(30.0, 40.0), delta_y: 1.0 };
//! let zoom = wheel.on_wheel(&input, &geometry, 1.2).unwrap();
//! assert!(zoom.started);
//! assert_eq!(zoom.factor, 1.2);
//! assert_eq!(zoom.pivot, Point::new(20.0, 30.0));
//!
//! let again = wheel.on_wheel(&input, &geometry, 1.2).unwrap();
//! assert!(!again.started);
//! assert!(wheel.finish());
//! ```

use kurbo::Point;

use crate::{HostGeometry, WheelInput};

/// Returns the viewport scale factor for a wheel delta.
///
/// Scrolling down (positive delta) zooms out by `sensitivity`, scrolling up
/// zooms in by its reciprocal. A zero delta carries no direction and yields
/// `None`.
#[must_use]
pub fn wheel_factor(delta_y: f64, sensitivity: f64) -> Option<f64> {
    if delta_y > 0.0 {
        Some(sensitivity)
    } else if delta_y < 0.0 {
        Some(1.0 / sensitivity)
    } else {
        None
    }
}

/// One zoom step produced by a wheel event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelZoom {
    /// Viewport scale factor.
    pub factor: f64,
    /// Host‑relative cursor position to zoom about.
    pub pivot: Point,
    /// `true` for the first event of a burst.
    pub started: bool,
}

/// Tracks whether a wheel burst is in progress.
#[derive(Clone, Copy, Debug, Default)]
pub struct WheelBurst {
    active: bool,
}

impl WheelBurst {
    /// Converts a wheel event into a zoom step.
    ///
    /// Returns `None` for a zero delta or a detached host; such events do not
    /// start a burst.
    pub fn on_wheel(
        &mut self,
        input: &WheelInput,
        geometry: &HostGeometry,
        sensitivity: f64,
    ) -> Option<WheelZoom> {
        let factor = wheel_factor(input.delta_y, sensitivity)?;
        let pivot = geometry.to_host(input.position)?;
        let started = !self.active;
        self.active = true;
        Some(WheelZoom {
            factor,
            pivot,
            started,
        })
    }

    /// Ends the current burst; returns `false` if none was active.
    pub fn finish(&mut self) -> bool {
        core::mem::replace(&mut self.active, false)
    }

    /// Returns `true` while a burst is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }
}
