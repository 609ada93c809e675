// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;
use smallvec::SmallVec;

/// Active touch positions; two fit inline, which covers pan and pinch.
pub type TouchPoints = SmallVec<[Point; 2]>;

/// Mouse button reported with a press or release.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Main button, usually the left one.
    Primary,
    /// Auxiliary button, usually the wheel.
    Middle,
    /// Secondary button, usually the right one.
    Secondary,
    /// Any other button by its platform index.
    Other(u16),
}

/// A mouse press, move or release in client coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MouseInput {
    /// Pointer position.
    pub position: Point,
    /// Button that changed state; ignored for moves.
    pub button: MouseButton,
}

impl MouseInput {
    /// Creates an input for the primary button.
    #[must_use]
    pub fn primary(position: Point) -> Self {
        Self {
            position,
            button: MouseButton::Primary,
        }
    }
}

/// A touch event carrying every touch still in contact, in client coordinates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TouchInput {
    /// Touches currently on the surface.
    pub touches: TouchPoints,
}

impl TouchInput {
    /// Creates an input from the current touch positions.
    #[must_use]
    pub fn new(touches: impl IntoIterator<Item = Point>) -> Self {
        Self {
            touches: touches.into_iter().collect(),
        }
    }
}

/// A wheel event at a client position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelInput {
    /// Pointer position.
    pub position: Point,
    /// Vertical delta; positive scrolls down, which zooms out.
    pub delta_y: f64,
}

/// Raw input routed to a canvas controller.
///
/// Press, touch start and wheel events originate on the host element; moves,
/// releases and touch end/cancel are received at window level while a gesture
/// is active.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Mouse button pressed on the host.
    MouseDown(MouseInput),
    /// Mouse moved anywhere in the window.
    MouseMove(MouseInput),
    /// Mouse button released anywhere in the window.
    MouseUp(MouseInput),
    /// A finger touched the host.
    TouchStart(TouchInput),
    /// Touches moved.
    TouchMove(TouchInput),
    /// A finger was lifted; `touches` holds the remaining ones.
    TouchEnd(TouchInput),
    /// The platform cancelled touches; `touches` holds the remaining ones.
    TouchCancel(TouchInput),
    /// Wheel scrolled over the host.
    Wheel(WheelInput),
}
