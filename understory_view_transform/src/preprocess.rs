// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transform preprocessors: accept, clamp or veto a proposed viewport transform.
//!
//! Every interactive change to the viewport matrix is proposed as a
//! `(prev, next)` pair and run through one [`TransformPreprocessor`] before it
//! is stored. Preprocessors run on every pointer move, so they must be
//! synchronous and free of side effects.
//!
//! Built‑ins:
//! - [`IdentityPreprocessor`]: accepts `next` as is (the default).
//! - [`ScaleLimit`]: keeps the effective content scale (`1 / scale`) in range.
//! - [`ShiftLimit`]: keeps the visible content rectangle inside bounds.
//! - [`CombinedPreprocessor`]: runs stages in order, feeding each stage's
//!   output to the next one as its proposal.
//!
//! Closures `Fn(&PreprocessParams) -> TransformPayload` are preprocessors too.
//!
//! ```
//! use understory_view_transform::{
//!     CombinedPreprocessor, PreprocessParams, ScaleLimit, ShiftLimit, TransformPreprocessor,
//!     TransformState,
//! };
//!
//! let pipeline = CombinedPreprocessor::new()
//!     .with(ScaleLimit::new(Some(0.5), Some(4.0)))
//!     .with(ShiftLimit::new(Some(0.0), None, Some(0.0), None));
//!
//! let prev = TransformState::IDENTITY;
//! let next = TransformState::new(1.0, -40.0, 10.0);
//! let accepted = pipeline.accept(&PreprocessParams::new(prev, next, 100.0, 100.0));
//! assert_eq!(accepted, TransformState::new(1.0, 0.0, 10.0));
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::{TransformPayload, TransformState};

/// Input to a [`TransformPreprocessor`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PreprocessParams {
    /// The currently stored viewport matrix.
    pub prev: TransformState,
    /// The proposed viewport matrix.
    pub next: TransformState,
    /// Host width in viewport pixels.
    pub canvas_width: f64,
    /// Host height in viewport pixels.
    pub canvas_height: f64,
}

impl PreprocessParams {
    /// Bundles a proposal with the host dimensions.
    #[must_use]
    pub fn new(
        prev: TransformState,
        next: TransformState,
        canvas_width: f64,
        canvas_height: f64,
    ) -> Self {
        Self {
            prev,
            next,
            canvas_width,
            canvas_height,
        }
    }
}

/// A pure stage deciding what part of a proposal is accepted.
pub trait TransformPreprocessor {
    /// Returns the accepted transform as a payload merged onto `prev`.
    fn process(&self, params: &PreprocessParams) -> TransformPayload;

    /// Runs [`process`](Self::process) and merges the result onto `prev`.
    ///
    /// A result that would violate the transform invariants is replaced by
    /// `prev`, so a misbehaving stage can veto but never corrupt.
    fn accept(&self, params: &PreprocessParams) -> TransformState {
        let merged = params.prev.merge(self.process(params));
        if merged.is_valid() {
            merged
        } else {
            params.prev
        }
    }
}

impl<F> TransformPreprocessor for F
where
    F: Fn(&PreprocessParams) -> TransformPayload,
{
    fn process(&self, params: &PreprocessParams) -> TransformPayload {
        self(params)
    }
}

/// Accepts every proposal unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IdentityPreprocessor;

impl TransformPreprocessor for IdentityPreprocessor {
    fn process(&self, params: &PreprocessParams) -> TransformPayload {
        params.next.into()
    }
}

/// Keeps the effective content scale inside `[min, max]`.
///
/// The content scale is `1 / viewport.scale`. A proposal that would move the
/// scale further out of range is cut off at the bound (or kept at `prev`'s
/// scale if that is already outside), and its translation is interpolated by
/// the same fraction so a pivot zoom keeps its pivot. Proposals that do not
/// change the scale always pass, and so do proposals moving back towards the
/// range.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScaleLimit {
    min_content_scale: Option<f64>,
    max_content_scale: Option<f64>,
}

impl ScaleLimit {
    /// Creates a limit; `None` leaves that side open.
    #[must_use]
    pub fn new(min_content_scale: Option<f64>, max_content_scale: Option<f64>) -> Self {
        Self {
            min_content_scale,
            max_content_scale,
        }
    }

    /// Largest accepted viewport scale.
    fn max_viewport_scale(&self) -> f64 {
        match self.min_content_scale {
            Some(min) if min > 0.0 => 1.0 / min,
            _ => f64::INFINITY,
        }
    }

    /// Smallest accepted viewport scale.
    fn min_viewport_scale(&self) -> f64 {
        match self.max_content_scale {
            Some(max) if max > 0.0 => 1.0 / max,
            _ => 0.0,
        }
    }
}

impl TransformPreprocessor for ScaleLimit {
    fn process(&self, params: &PreprocessParams) -> TransformPayload {
        let PreprocessParams { prev, next, .. } = *params;
        if !next.is_valid() {
            return prev.into();
        }

        let max_scale = self.max_viewport_scale();
        let min_scale = self.min_viewport_scale();
        let scale = if next.scale > max_scale && next.scale > prev.scale {
            prev.scale.max(max_scale)
        } else if next.scale < min_scale && next.scale < prev.scale {
            prev.scale.min(min_scale)
        } else {
            return next.into();
        };

        // Translation of a pivot zoom is linear in the scale delta.
        let ratio = (scale - prev.scale) / (next.scale - prev.scale);
        TransformState::new(
            scale,
            prev.x + (next.x - prev.x) * ratio,
            prev.y + (next.y - prev.y) * ratio,
        )
        .into()
    }
}

/// Keeps the visible content rectangle inside `[min_x, max_x] × [min_y, max_y]`.
///
/// The visible rectangle of a viewport matrix `t` over a `w × h` host is
/// `[t.x, t.x + w·t.scale] × [t.y, t.y + h·t.scale]`. When the view is larger
/// than the allowed span, the minimum edge wins.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ShiftLimit {
    min_x: Option<f64>,
    max_x: Option<f64>,
    min_y: Option<f64>,
    max_y: Option<f64>,
}

impl ShiftLimit {
    /// Creates a limit; `None` leaves that edge open.
    #[must_use]
    pub fn new(
        min_x: Option<f64>,
        max_x: Option<f64>,
        min_y: Option<f64>,
        max_y: Option<f64>,
    ) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }
}

fn clamp_edge(pos: f64, extent: f64, min: Option<f64>, max: Option<f64>) -> f64 {
    let mut pos = pos;
    if let Some(max) = max {
        pos = pos.min(max - extent);
    }
    if let Some(min) = min {
        pos = pos.max(min);
    }
    pos
}

impl TransformPreprocessor for ShiftLimit {
    fn process(&self, params: &PreprocessParams) -> TransformPayload {
        let next = params.next;
        if !next.is_valid() {
            return params.prev.into();
        }
        let width = params.canvas_width * next.scale;
        let height = params.canvas_height * next.scale;
        TransformState::new(
            next.scale,
            clamp_edge(next.x, width, self.min_x, self.max_x),
            clamp_edge(next.y, height, self.min_y, self.max_y),
        )
        .into()
    }
}

/// Runs stages in order; each stage sees the previous stage's output as `next`.
///
/// Order is significant: `[ScaleLimit, ShiftLimit]` shifts the already
/// clamped zoom, while the reverse may let a zoom push the view past a bound.
/// An empty combination behaves like [`IdentityPreprocessor`].
#[derive(Default)]
pub struct CombinedPreprocessor {
    stages: Vec<Box<dyn TransformPreprocessor>>,
}

impl CombinedPreprocessor {
    /// Creates an empty combination.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a stage.
    #[must_use]
    pub fn with(mut self, stage: impl TransformPreprocessor + 'static) -> Self {
        self.push(stage);
        self
    }

    /// Appends a stage in place.
    pub fn push(&mut self, stage: impl TransformPreprocessor + 'static) {
        self.stages.push(Box::new(stage));
    }

    /// Number of stages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns `true` if there are no stages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl From<Vec<Box<dyn TransformPreprocessor>>> for CombinedPreprocessor {
    fn from(stages: Vec<Box<dyn TransformPreprocessor>>) -> Self {
        Self { stages }
    }
}

impl TransformPreprocessor for CombinedPreprocessor {
    fn process(&self, params: &PreprocessParams) -> TransformPayload {
        let mut next = params.next;
        for stage in &self.stages {
            next = stage.accept(&PreprocessParams { next, ..*params });
        }
        next.into()
    }
}

impl fmt::Debug for CombinedPreprocessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombinedPreprocessor")
            .field("stages", &self.stages.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::{
        CombinedPreprocessor, IdentityPreprocessor, PreprocessParams, ScaleLimit, ShiftLimit,
        TransformPreprocessor,
    };
    use crate::{TransformPayload, TransformState};

    fn params(prev: TransformState, next: TransformState) -> PreprocessParams {
        PreprocessParams::new(prev, next, 100.0, 100.0)
    }

    #[test]
    fn identity_accepts_everything_valid() {
        let prev = TransformState::IDENTITY;
        let next = TransformState::new(3.0, -1.0, 8.0);
        assert_eq!(IdentityPreprocessor.accept(&params(prev, next)), next);
    }

    #[test]
    fn invalid_proposals_fall_back_to_prev() {
        let prev = TransformState::new(2.0, 1.0, 1.0);
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let next = TransformState::new(bad, 0.0, 0.0);
            assert_eq!(IdentityPreprocessor.accept(&params(prev, next)), prev);
            assert_eq!(
                ScaleLimit::new(Some(0.1), Some(10.0)).accept(&params(prev, next)),
                prev
            );
            assert_eq!(
                ShiftLimit::new(None, None, None, None).accept(&params(prev, next)),
                prev
            );
        }
    }

    #[test]
    fn scale_limit_cuts_zoom_out_at_bound_and_keeps_pivot() {
        // Content may not shrink below 0.5, i.e. viewport scale <= 2.
        let limit = ScaleLimit::new(Some(0.5), None);
        let prev = TransformState::new(1.5, 0.0, 0.0);
        let pivot = Point::new(40.0, 60.0);
        let next = prev.scaled_at(4.0, pivot);

        let accepted = limit.accept(&params(prev, next));
        assert!((accepted.scale - 2.0).abs() < 1e-12);
        let before = prev.transform_point(pivot);
        let after = accepted.transform_point(pivot);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
    }

    #[test]
    fn scale_limit_rejects_further_zoom_past_bound() {
        // Content may not grow above 4, i.e. viewport scale >= 0.25.
        let limit = ScaleLimit::new(None, Some(4.0));
        let prev = TransformState::new(0.2, 5.0, 5.0);
        let next = prev.scaled_at(0.5, Point::new(10.0, 10.0));
        assert_eq!(limit.accept(&params(prev, next)), prev);
    }

    #[test]
    fn scale_limit_passes_translation_and_recovery() {
        let limit = ScaleLimit::new(Some(1.0), Some(1.0));
        // Out of range already, but translation-only.
        let prev = TransformState::new(3.0, 0.0, 0.0);
        let pan = prev.translated(10.0, -4.0);
        assert_eq!(limit.accept(&params(prev, pan)), pan);
        // Zooming back towards the range is allowed.
        let back = TransformState::new(2.0, 0.0, 0.0);
        assert_eq!(limit.accept(&params(prev, back)), back);
    }

    #[test]
    fn shift_limit_clamps_visible_rect() {
        let limit = ShiftLimit::new(Some(0.0), Some(500.0), Some(-50.0), Some(150.0));
        let prev = TransformState::IDENTITY;

        let left = limit.accept(&params(prev, TransformState::new(1.0, -30.0, 0.0)));
        assert_eq!(left, TransformState::new(1.0, 0.0, 0.0));

        // 100px host at scale 2 sees 200 content units; max edges are 500 and 150.
        let right = limit.accept(&params(prev, TransformState::new(2.0, 450.0, 0.0)));
        assert_eq!(right, TransformState::new(2.0, 300.0, -50.0));

        // View taller than the allowed span: min edge wins.
        let tall = limit.accept(&params(prev, TransformState::new(4.0, 0.0, 10.0)));
        assert_eq!(tall.y, -50.0);
    }

    #[test]
    fn combined_feeds_outputs_forward() {
        let pipeline = CombinedPreprocessor::new()
            .with(|p: &PreprocessParams| TransformPayload::from(p.next.translated(10.0, 0.0)))
            .with(ShiftLimit::new(None, Some(50.0), None, None));
        let next = TransformState::new(0.5, 0.0, 0.0);
        // First stage moves to x = 5; view spans 50 units so max_x forces x <= 0.
        let accepted = pipeline.accept(&params(TransformState::IDENTITY, next));
        assert_eq!(accepted, TransformState::new(0.5, 0.0, 0.0));
        assert_eq!(pipeline.len(), 2);
    }

    #[test]
    fn empty_combination_is_identity() {
        let pipeline = CombinedPreprocessor::new();
        assert!(pipeline.is_empty());
        let next = TransformState::new(2.0, 3.0, 4.0);
        assert_eq!(
            pipeline.accept(&params(TransformState::IDENTITY, next)),
            next
        );
    }
}
