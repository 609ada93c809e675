// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

use understory_view_culling::CullingMargins;
use understory_view_gesture::{MouseButton, MouseInput, TouchInput, WheelInput};
use understory_view_transform::{IdentityPreprocessor, TransformPreprocessor};

use crate::{CanvasError, CanvasResult};

/// Decides whether a mouse press or release drives the viewport.
pub type MouseVerifier = Box<dyn Fn(&MouseInput) -> bool>;
/// Decides whether a touch event drives the viewport.
pub type TouchVerifier = Box<dyn Fn(&TouchInput) -> bool>;
/// Decides whether a wheel event zooms the viewport.
pub type WheelVerifier = Box<dyn Fn(&WheelInput) -> bool>;

/// Default wheel zoom ratio per event.
pub const DEFAULT_WHEEL_SENSITIVITY: f64 = 1.2;
/// Default quiet period ending a wheel burst.
pub const DEFAULT_WHEEL_FINISH_TIMEOUT_MS: u64 = 500;

/// Controller configuration.
///
/// Build with [`CanvasConfig::default`] and the consuming `with_*` methods;
/// values are checked once by [`ViewportController::new`](crate::ViewportController::new).
pub struct CanvasConfig {
    /// Viewport scale factor per wheel event; must be finite and `> 1`.
    pub wheel_sensitivity: f64,
    /// Quiet period after the last wheel event before the burst finishes.
    pub wheel_finish_timeout_ms: u64,
    /// Cursor shown while mouse dragging; `None` leaves the cursor alone.
    pub drag_cursor: Option<String>,
    /// Accepts mouse presses; defaults to the primary button.
    pub mouse_down_verifier: MouseVerifier,
    /// Accepts mouse releases; defaults to the primary button.
    pub mouse_up_verifier: MouseVerifier,
    /// Accepts wheel events; defaults to all.
    pub wheel_verifier: WheelVerifier,
    /// Accepts touch starts; defaults to all.
    pub touch_verifier: TouchVerifier,
    /// Stage every proposed viewport transform runs through.
    pub preprocessor: Box<dyn TransformPreprocessor>,
    /// Culling margins; `None` disables rendering box emission.
    pub virtual_scroll: Option<CullingMargins>,
}

fn is_primary(input: &MouseInput) -> bool {
    input.button == MouseButton::Primary
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            wheel_sensitivity: DEFAULT_WHEEL_SENSITIVITY,
            wheel_finish_timeout_ms: DEFAULT_WHEEL_FINISH_TIMEOUT_MS,
            drag_cursor: Some(String::from("grab")),
            mouse_down_verifier: Box::new(is_primary),
            mouse_up_verifier: Box::new(is_primary),
            wheel_verifier: Box::new(|_: &WheelInput| true),
            touch_verifier: Box::new(|_: &TouchInput| true),
            preprocessor: Box::new(IdentityPreprocessor),
            virtual_scroll: None,
        }
    }
}

impl CanvasConfig {
    /// Sets the wheel zoom ratio.
    #[must_use]
    pub fn with_wheel_sensitivity(mut self, sensitivity: f64) -> Self {
        self.wheel_sensitivity = sensitivity;
        self
    }

    /// Sets the wheel burst quiet period.
    #[must_use]
    pub fn with_wheel_finish_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.wheel_finish_timeout_ms = timeout_ms;
        self
    }

    /// Sets (or clears) the drag cursor.
    #[must_use]
    pub fn with_drag_cursor(mut self, cursor: Option<&str>) -> Self {
        self.drag_cursor = cursor.map(String::from);
        self
    }

    /// Replaces the mouse press verifier.
    #[must_use]
    pub fn with_mouse_down_verifier(mut self, f: impl Fn(&MouseInput) -> bool + 'static) -> Self {
        self.mouse_down_verifier = Box::new(f);
        self
    }

    /// Replaces the mouse release verifier.
    #[must_use]
    pub fn with_mouse_up_verifier(mut self, f: impl Fn(&MouseInput) -> bool + 'static) -> Self {
        self.mouse_up_verifier = Box::new(f);
        self
    }

    /// Replaces the wheel verifier.
    #[must_use]
    pub fn with_wheel_verifier(mut self, f: impl Fn(&WheelInput) -> bool + 'static) -> Self {
        self.wheel_verifier = Box::new(f);
        self
    }

    /// Replaces the touch verifier.
    #[must_use]
    pub fn with_touch_verifier(mut self, f: impl Fn(&TouchInput) -> bool + 'static) -> Self {
        self.touch_verifier = Box::new(f);
        self
    }

    /// Replaces the transform preprocessor.
    ///
    /// Use [`CombinedPreprocessor`](understory_view_transform::CombinedPreprocessor)
    /// for an ordered list of stages.
    #[must_use]
    pub fn with_preprocessor(mut self, preprocessor: impl TransformPreprocessor + 'static) -> Self {
        self.preprocessor = Box::new(preprocessor);
        self
    }

    /// Enables rendering box emission with the given margins.
    #[must_use]
    pub fn with_virtual_scroll(mut self, margins: CullingMargins) -> Self {
        self.virtual_scroll = Some(margins);
        self
    }

    pub(crate) fn validate(&self) -> CanvasResult<()> {
        let s = self.wheel_sensitivity;
        if !s.is_finite() || s <= 1.0 {
            return Err(CanvasError::InvalidWheelSensitivity(s));
        }
        if let Some(margins) = self.virtual_scroll.filter(|m| !m.is_valid()) {
            return Err(CanvasError::InvalidMargin {
                horizontal: margins.horizontal,
                vertical: margins.vertical,
            });
        }
        Ok(())
    }
}

impl fmt::Debug for CanvasConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CanvasConfig")
            .field("wheel_sensitivity", &self.wheel_sensitivity)
            .field("wheel_finish_timeout_ms", &self.wheel_finish_timeout_ms)
            .field("drag_cursor", &self.drag_cursor)
            .field("virtual_scroll", &self.virtual_scroll)
            .finish_non_exhaustive()
    }
}
