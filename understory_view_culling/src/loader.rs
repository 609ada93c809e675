// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Load bookkeeping for viewport‑driven culling.
//!
//! There are two ways a load gets requested:
//!
//! 1. **Settled changes**: when a gesture finishes, or when the viewport is
//!    patched while no gesture is in progress, [`LoadRequest::Ensure`] asks
//!    for a deferred load that only emits if the current view is no longer
//!    covered (or the scale moved since the last load).
//! 2. **Zoom during a gesture**: zooming out can reveal area far outside the
//!    last box in a single step, so every scale change is checked right away
//!    against the loaded area; if the margin‑expanded viewport escapes it,
//!    [`LoadRequest::Force`] is returned. Pure pans mid‑gesture are left to
//!    the settled path.
//!
//! The loader counts gestures in progress (mouse drag, touch, wheel burst and
//! resize may overlap), so a change is "settled" only once all of them end.

use kurbo::Size;
use understory_view_transform::{MatrixKind, TransformChange, TransformState};

use crate::{CullingMargins, LoadedArea, RenderingBox};

/// Kind of deferred load a change asks for.
///
/// When several requests coalesce into one deferred task, the strongest
/// (`Force > Ensure`) wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LoadRequest {
    /// Load only if the view is no longer covered.
    Ensure,
    /// Load unconditionally.
    Force,
}

/// Tracks the loaded area and decides when to emit a new [`RenderingBox`].
#[derive(Clone, Debug)]
pub struct VirtualScrollLoader {
    margins: CullingMargins,
    loaded: LoadedArea,
    loaded_scale: Option<f64>,
    last_emitted: Option<RenderingBox>,
    active_gestures: usize,
}

/// Host sizes that can produce a non‑degenerate box.
fn usable(host: Option<Size>) -> Option<Size> {
    host.filter(|s| s.width.is_finite() && s.height.is_finite())
        .filter(|s| s.width > 0.0 && s.height > 0.0)
}

impl VirtualScrollLoader {
    /// Creates a loader with nothing loaded yet.
    #[must_use]
    pub fn new(margins: CullingMargins) -> Self {
        Self {
            margins,
            loaded: LoadedArea::NOTHING,
            loaded_scale: None,
            last_emitted: None,
            active_gestures: 0,
        }
    }

    /// Configured margins.
    #[must_use]
    pub fn margins(&self) -> CullingMargins {
        self.margins
    }

    /// The area covered by the last emitted box.
    #[must_use]
    pub fn loaded_area(&self) -> LoadedArea {
        self.loaded
    }

    /// The last emitted box, if any.
    #[must_use]
    pub fn last_emitted(&self) -> Option<RenderingBox> {
        self.last_emitted
    }

    /// Returns `true` while at least one gesture is in progress.
    #[must_use]
    pub fn is_gesture_in_progress(&self) -> bool {
        self.active_gestures > 0
    }

    /// Marks the start of a gesture.
    pub fn begin_gesture(&mut self) {
        self.active_gestures += 1;
    }

    /// Marks the end of a gesture and asks for a settled check.
    pub fn end_gesture(&mut self) -> LoadRequest {
        self.active_gestures = self.active_gestures.saturating_sub(1);
        LoadRequest::Ensure
    }

    /// The box to materialize for `viewport` over a `host`‑sized element.
    ///
    /// One full viewport of margin on each side plus the element margins.
    #[must_use]
    pub fn desired_box(&self, viewport: TransformState, host: Size) -> RenderingBox {
        let area = self.desired_area(viewport, host);
        RenderingBox::new(
            area.x_from,
            area.y_from,
            area.x_to - area.x_from,
            area.y_to - area.y_from,
        )
    }

    /// Edges of [`desired_box`](Self::desired_box).
    ///
    /// Computed edge by edge, in the same order as
    /// [`visible_bounds`](Self::visible_bounds), so containment holds exactly
    /// under rounding.
    fn desired_area(&self, viewport: TransformState, host: Size) -> LoadedArea {
        let view_width = host.width * viewport.scale;
        let view_height = host.height * viewport.scale;
        LoadedArea {
            x_from: viewport.x - view_width - self.margins.horizontal,
            x_to: viewport.x + 2.0 * view_width + self.margins.horizontal,
            y_from: viewport.y - view_height - self.margins.vertical,
            y_to: viewport.y + 2.0 * view_height + self.margins.vertical,
        }
    }

    /// The visible viewport grown by the margins only.
    #[must_use]
    pub fn visible_bounds(&self, viewport: TransformState, host: Size) -> LoadedArea {
        let view_width = host.width * viewport.scale;
        let view_height = host.height * viewport.scale;
        LoadedArea {
            x_from: viewport.x - self.margins.horizontal,
            x_to: viewport.x + view_width + self.margins.horizontal,
            y_from: viewport.y - self.margins.vertical,
            y_to: viewport.y + view_height + self.margins.vertical,
        }
    }

    /// Returns `true` if the margin‑expanded viewport is inside the loaded area.
    #[must_use]
    pub fn is_area_loaded(&self, viewport: TransformState, host: Size) -> bool {
        self.loaded.contains(&self.visible_bounds(viewport, host))
    }

    /// Returns `true` if a settled check should emit a new box.
    ///
    /// That is the case when the view escaped the loaded area, when the scale
    /// differs from the one the area was loaded at (a zoom‑in leaves a box far
    /// larger than needed), or when the host is detached or empty.
    #[must_use]
    pub fn needs_reload(&self, viewport: TransformState, host: Option<Size>) -> bool {
        match usable(host) {
            Some(size) => {
                self.loaded_scale != Some(viewport.scale) || !self.is_area_loaded(viewport, size)
            }
            None => true,
        }
    }

    /// Reacts to a stored transform change.
    ///
    /// Content matrix changes never affect culling.
    #[must_use]
    pub fn on_viewport_updated(
        &self,
        change: &TransformChange,
        host: Option<Size>,
    ) -> Option<LoadRequest> {
        if change.kind != MatrixKind::Viewport {
            return None;
        }
        let escaped = change.scale_changed()
            && !usable(host).is_some_and(|size| self.is_area_loaded(change.current, size));
        if escaped {
            Some(LoadRequest::Force)
        } else if self.is_gesture_in_progress() {
            None
        } else {
            Some(LoadRequest::Ensure)
        }
    }

    /// Recomputes the box and records it as loaded.
    ///
    /// A detached or empty host yields a collapsed box at the viewport origin
    /// and forgets the loaded area. Returns `None` when the box equals the
    /// last emitted one.
    pub fn load(&mut self, viewport: TransformState, host: Option<Size>) -> Option<RenderingBox> {
        let rendering_box = match usable(host) {
            Some(size) => {
                self.loaded = self.desired_area(viewport, size);
                self.loaded_scale = Some(viewport.scale);
                self.desired_box(viewport, size)
            }
            None => {
                self.loaded = LoadedArea::NOTHING;
                self.loaded_scale = None;
                RenderingBox::collapsed(viewport.x, viewport.y)
            }
        };
        if self.last_emitted == Some(rendering_box) {
            return None;
        }
        self.last_emitted = Some(rendering_box);
        Some(rendering_box)
    }

    /// Forgets everything loaded, so the next check reloads.
    pub fn reset(&mut self) {
        self.loaded = LoadedArea::NOTHING;
        self.loaded_scale = None;
        self.last_emitted = None;
    }
}
