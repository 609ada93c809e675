// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The environment a controller runs in.

use kurbo::{Rect, Size};

bitflags::bitflags! {
    /// Window‑level listeners a controller needs while a gesture is active.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct WindowEvents: u8 {
        /// Pointer moves anywhere in the window.
        const MOUSE_MOVE   = 0b0000_0001;
        /// Button releases anywhere in the window.
        const MOUSE_UP     = 0b0000_0010;
        /// Touch moves.
        const TOUCH_MOVE   = 0b0000_0100;
        /// Touch ends.
        const TOUCH_END    = 0b0000_1000;
        /// Touch cancellations.
        const TOUCH_CANCEL = 0b0001_0000;

        /// Everything a mouse drag listens to.
        const MOUSE = Self::MOUSE_MOVE.bits() | Self::MOUSE_UP.bits();
        /// Everything a touch gesture listens to.
        const TOUCH = Self::TOUCH_MOVE.bits() | Self::TOUCH_END.bits() | Self::TOUCH_CANCEL.bits();
    }
}

/// Host services a [`ViewportController`](crate::ViewportController) relies on.
///
/// Implementations wrap the real windowing environment; tests use a
/// recording fake. Every method is called synchronously from inside
/// controller operations.
pub trait Platform {
    /// Monotonic clock in milliseconds, used for deferred tasks.
    fn now_ms(&self) -> u64;

    /// Host element bounds in client coordinates; `None` while detached.
    fn host_rect(&self) -> Option<Rect>;

    /// Window size; the window spans `(0, 0)..(width, height)`.
    fn window_size(&self) -> Size;

    /// Shows `cursor` over the host, or restores the default for `None`.
    fn set_cursor(&mut self, cursor: Option<&str>);

    /// Starts delivering `events` at window level.
    ///
    /// The controller only passes events not already listened to.
    fn listen(&mut self, events: WindowEvents);

    /// Stops delivering `events`.
    ///
    /// The controller only passes events currently listened to.
    fn unlisten(&mut self, events: WindowEvents);

    /// Starts or stops observing host size changes.
    ///
    /// While observing, the host calls
    /// [`ViewportController::handle_resize`](crate::ViewportController::handle_resize)
    /// on every change.
    fn observe_resize(&mut self, observe: bool);
}
