// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch recognizer: one‑finger pan and two‑finger pinch‑pan.
//!
//! A gesture spans from the first touch down to the last touch up. Whenever
//! the set of touches changes mid‑gesture (a second finger lands, one of two
//! fingers lifts) the recognizer re‑baselines its [`TouchState`] instead of
//! ending, so a released pinch finger degrades to a pan without a new
//! start notification.
//!
//! On each move with one or two touches the centroid delta is reported as a
//! pan; with exactly two touches the ratio of the current to the previous
//! finger distance is reported as a [`Pinch`] pivoted at the previous
//! centroid. If any touch leaves the host or the window, the gesture ends.

use kurbo::{Point, Vec2};

use crate::{HostGeometry, TouchPoints};

/// Snapshot of the active touches: their centroid and reference spread.
///
/// The spread is the distance between the fingers for exactly two touches
/// and `1.0` otherwise.
#[derive(Clone, Debug, PartialEq)]
pub struct TouchState {
    touches: TouchPoints,
    centroid: Point,
    spread: f64,
}

impl TouchState {
    /// Computes the snapshot for `touches`.
    #[must_use]
    pub fn new(touches: &[Point]) -> Self {
        let touches = TouchPoints::from_slice(touches);
        let centroid = if touches.is_empty() {
            Point::ORIGIN
        } else {
            let sum = touches
                .iter()
                .fold(Vec2::ZERO, |acc, p| acc + p.to_vec2());
            let count = touches.len() as f64;
            (sum / count).to_point()
        };
        let spread = match touches.as_slice() {
            [a, b] => (*b - *a).hypot(),
            _ => 1.0,
        };
        Self {
            touches,
            centroid,
            spread,
        }
    }

    /// The touch positions in client coordinates.
    #[must_use]
    pub fn touches(&self) -> &[Point] {
        &self.touches
    }

    /// Number of touches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.touches.len()
    }

    /// Returns `true` if there are no touches.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.touches.is_empty()
    }

    /// Mean touch position in client coordinates.
    #[must_use]
    pub fn centroid(&self) -> Point {
        self.centroid
    }

    /// Reference distance used for pinch ratios.
    #[must_use]
    pub fn spread(&self) -> f64 {
        self.spread
    }
}

/// Zoom component of a two‑finger move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pinch {
    /// Current finger distance divided by the previous one.
    pub ratio: f64,
    /// Previous centroid in client coordinates.
    pub pivot: Point,
}

/// Outcome of feeding one event to a [`TouchGesture`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TouchStep {
    /// The event does not apply in the current state.
    Ignored,
    /// The first touch landed; the gesture began.
    Started,
    /// The touch set changed; the baseline was replaced, nothing to apply.
    Rebaselined,
    /// Touches moved.
    Moved {
        /// Centroid movement in client pixels.
        pan: Vec2,
        /// Finger distance change, for exactly two touches.
        pinch: Option<Pinch>,
    },
    /// The last touch lifted or a touch left the bounds.
    Finished,
}

/// Tracks one touch gesture.
#[derive(Clone, Debug, Default)]
pub struct TouchGesture {
    state: Option<TouchState>,
}

impl TouchGesture {
    /// Handles a touch start carrying all current touches.
    pub fn start(&mut self, touches: &[Point]) -> TouchStep {
        if touches.is_empty() {
            return TouchStep::Ignored;
        }
        let was_active = self.state.replace(TouchState::new(touches)).is_some();
        if was_active {
            TouchStep::Rebaselined
        } else {
            TouchStep::Started
        }
    }

    /// Handles a touch move carrying all current touches.
    pub fn update(&mut self, touches: &[Point], geometry: &HostGeometry) -> TouchStep {
        let Some(prev) = self.state.as_ref() else {
            return TouchStep::Ignored;
        };
        if touches.is_empty() {
            return TouchStep::Ignored;
        }
        if touches.iter().any(|p| !geometry.contains(*p)) {
            self.state = None;
            return TouchStep::Finished;
        }

        let next = TouchState::new(touches);
        let step = if next.len() != prev.len() || next.len() > 2 {
            TouchStep::Rebaselined
        } else {
            let pinch = (next.len() == 2 && prev.spread > 0.0 && next.spread > 0.0).then(|| {
                Pinch {
                    ratio: next.spread / prev.spread,
                    pivot: prev.centroid,
                }
            });
            TouchStep::Moved {
                pan: next.centroid - prev.centroid,
                pinch,
            }
        };
        self.state = Some(next);
        step
    }

    /// Handles a touch end or cancel carrying the remaining touches.
    pub fn end(&mut self, remaining: &[Point]) -> TouchStep {
        if self.state.is_none() {
            return TouchStep::Ignored;
        }
        if remaining.is_empty() {
            self.state = None;
            TouchStep::Finished
        } else {
            self.state = Some(TouchState::new(remaining));
            TouchStep::Rebaselined
        }
    }

    /// Ends the gesture regardless of remaining touches.
    pub fn cancel(&mut self) -> TouchStep {
        self.end(&[])
    }

    /// Returns `true` while a gesture is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    /// The current baseline, if active.
    #[must_use]
    pub fn state(&self) -> Option<&TouchState> {
        self.state.as_ref()
    }
}
