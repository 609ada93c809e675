// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use understory_view_culling::RenderingBox;
use understory_view_transform::{Signal, TransformChange, TransformState};

/// Input modality driving a gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureKind {
    /// Mouse drag.
    Mouse,
    /// One‑finger pan or two‑finger pinch.
    Touch,
    /// Wheel burst.
    Wheel,
}

/// Lifecycle notifications of a [`ViewportController`](crate::ViewportController).
///
/// Each interactive step fires `before_transform_change` with the accepted
/// transform, then `transform_change` once it is stored. `transform_started`
/// and `transform_finished` bracket every gesture exactly once, including
/// gestures ended by leaving the bounds or by destroying the controller.
/// Programmatic patches only notify through the store.
#[derive(Debug, Default)]
pub struct ViewportEvents {
    /// A gesture began.
    pub transform_started: Signal<GestureKind>,
    /// A gesture step is about to be stored.
    pub before_transform_change: Signal<TransformState>,
    /// A gesture step was stored.
    pub transform_change: Signal<TransformChange>,
    /// A gesture ended.
    pub transform_finished: Signal<GestureKind>,
    /// The host size changed; the viewport is being re‑applied.
    pub resize_transform_started: Signal<()>,
    /// Resize handling is complete.
    pub resize_transform_finished: Signal<()>,
    /// A new region should be materialized.
    pub rendering_box: Signal<RenderingBox>,
}

impl ViewportEvents {
    /// Drops every subscriber.
    pub fn clear(&mut self) {
        self.transform_started.clear();
        self.before_transform_change.clear();
        self.transform_change.clear();
        self.transform_finished.clear();
        self.resize_transform_started.clear();
        self.resize_transform_finished.clear();
        self.rendering_box.clear();
    }
}
