// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The viewport controller: gestures in, stored transforms and rendering boxes out.
//!
//! Every viewport change follows one path:
//!
//! 1. a recognizer turns raw input into a proposed [`TransformState`];
//! 2. the configured [`TransformPreprocessor`] accepts, clamps or vetoes it;
//! 3. the [`TransformStore`] stores it and notifies `after_updated`;
//! 4. the [`VirtualScrollLoader`] decides whether a load must be deferred.
//!
//! Loads and wheel quiet periods are [`DeferredTasks`]; the host arms a timer
//! for [`ViewportController::next_deadline`] and calls
//! [`ViewportController::run_due_tasks`] when it fires.

use core::fmt;

use kurbo::{Point, Size};
use tracing::{debug, trace, warn};
use understory_view_culling::{LoadRequest, VirtualScrollLoader};
use understory_view_gesture::mouse::{MouseDrag, MouseStep};
use understory_view_gesture::touch::{TouchGesture, TouchStep};
use understory_view_gesture::wheel::WheelBurst;
use understory_view_gesture::{HostGeometry, InputEvent, MouseInput, TouchInput, WheelInput};
use understory_view_transform::{
    PreprocessParams, ScreenMatrix, SubscriptionId, TransformChange, TransformPayload,
    TransformPreprocessor, TransformState, TransformStore,
};

use crate::{
    CanvasConfig, CanvasError, CanvasResult, DeferredTasks, GestureKind, Platform, TaskHandle,
    ViewportEvents, WindowEvents,
};

/// Work the controller defers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CanvasTask {
    /// Recompute the rendering box.
    LoadAroundViewport(LoadRequest),
    /// The wheel burst went quiet.
    WheelFinished,
}

/// Drives a pannable, zoomable viewport over a host element.
pub struct ViewportController<P: Platform> {
    platform: P,
    config: CanvasConfig,
    store: TransformStore,
    events: ViewportEvents,
    loader: Option<VirtualScrollLoader>,
    tasks: DeferredTasks<CanvasTask>,
    load_task: Option<(TaskHandle, LoadRequest)>,
    wheel_task: Option<TaskHandle>,
    mouse: MouseDrag,
    touch: TouchGesture,
    wheel: WheelBurst,
    wheel_finish_pending: bool,
    listening: WindowEvents,
    destroyed: bool,
}

impl<P: Platform> ViewportController<P> {
    /// Creates a controller, starts observing host resizes and defers the
    /// initial load.
    pub fn new(mut platform: P, config: CanvasConfig) -> CanvasResult<Self> {
        config.validate()?;
        let loader = config.virtual_scroll.map(VirtualScrollLoader::new);
        platform.observe_resize(true);
        let mut controller = Self {
            platform,
            config,
            store: TransformStore::new(),
            events: ViewportEvents::default(),
            loader,
            tasks: DeferredTasks::new(),
            load_task: None,
            wheel_task: None,
            mouse: MouseDrag::default(),
            touch: TouchGesture::default(),
            wheel: WheelBurst::default(),
            wheel_finish_pending: false,
            listening: WindowEvents::empty(),
            destroyed: false,
        };
        controller.schedule_load(LoadRequest::Force);
        Ok(controller)
    }

    /// The platform this controller runs on.
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Mutable access to the platform.
    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    /// Lifecycle notifications.
    pub fn events(&self) -> &ViewportEvents {
        &self.events
    }

    /// Mutable lifecycle notifications, for subscribing.
    pub fn events_mut(&mut self) -> &mut ViewportEvents {
        &mut self.events
    }

    /// Subscribes to every stored change of either matrix.
    pub fn on_after_updated(
        &mut self,
        subscriber: impl FnMut(&TransformChange) + 'static,
    ) -> SubscriptionId {
        self.store.on_after_updated(subscriber)
    }

    /// The culling loader, if virtual scrolling is enabled.
    pub fn loader(&self) -> Option<&VirtualScrollLoader> {
        self.loader.as_ref()
    }

    /// Current viewport matrix.
    pub fn viewport_matrix(&self) -> TransformState {
        self.store.viewport_matrix()
    }

    /// Current content matrix.
    pub fn content_matrix(&self) -> TransformState {
        self.store.content_matrix()
    }

    /// Matrix the surface should be rendered with.
    pub fn screen_matrix(&self) -> ScreenMatrix {
        self.store.viewport_matrix().screen_matrix()
    }

    /// Returns `true` once [`destroy`](Self::destroy) ran.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Returns `true` while any gesture (or the wheel burst) is active.
    pub fn is_gesture_in_progress(&self) -> bool {
        self.mouse.is_dragging() || self.touch.is_active() || self.wheel.is_active()
    }

    /// Window events currently listened to.
    pub fn listening(&self) -> WindowEvents {
        self.listening
    }

    /// Converts a client position into content coordinates.
    ///
    /// Returns `None` while the host is detached.
    pub fn client_to_content(&self, point: Point) -> Option<Point> {
        let host = self.geometry().to_host(point)?;
        Some(self.store.viewport_matrix().transform_point(host))
    }

    /// Merges `payload` into the viewport matrix through the preprocessor.
    ///
    /// Returns the stored matrix, which may differ from the request if the
    /// preprocessor clamped it.
    pub fn patch_viewport_matrix(
        &mut self,
        payload: TransformPayload,
    ) -> CanvasResult<TransformState> {
        if self.destroyed {
            return Err(CanvasError::Destroyed);
        }
        let next = self.store.viewport_matrix().merge(payload);
        next.validate()?;
        let accepted = self.preprocess(next);
        self.commit(accepted, false);
        Ok(self.store.viewport_matrix())
    }

    /// Merges `payload` into the content matrix.
    ///
    /// The content matrix is not preprocessed and does not affect culling.
    pub fn patch_content_matrix(
        &mut self,
        payload: TransformPayload,
    ) -> CanvasResult<TransformState> {
        if self.destroyed {
            return Err(CanvasError::Destroyed);
        }
        Ok(self.store.patch_content_matrix(payload)?.current)
    }

    /// Pans the viewport by `(dx, dy)` viewport pixels.
    pub fn pan_by(&mut self, dx: f64, dy: f64) -> CanvasResult<TransformState> {
        let next = self.store.viewport_matrix().translated(dx, dy);
        self.patch_viewport_matrix(next.into())
    }

    /// Scales the viewport by `factor` about the host‑relative `pivot`.
    pub fn zoom_at(&mut self, factor: f64, pivot: Point) -> CanvasResult<TransformState> {
        let next = self.store.viewport_matrix().scaled_at(factor, pivot);
        self.patch_viewport_matrix(next.into())
    }

    /// Feeds one raw input event; returns `true` if it was consumed.
    pub fn dispatch(&mut self, event: InputEvent) -> bool {
        if self.destroyed {
            return false;
        }
        match event {
            InputEvent::MouseDown(input) => self.on_mouse_down(&input),
            InputEvent::MouseMove(input) => self.on_mouse_move(&input),
            InputEvent::MouseUp(input) => self.on_mouse_up(&input),
            InputEvent::TouchStart(input) => self.on_touch_start(&input),
            InputEvent::TouchMove(input) => self.on_touch_move(&input),
            InputEvent::TouchEnd(input) | InputEvent::TouchCancel(input) => {
                self.on_touch_end(&input)
            }
            InputEvent::Wheel(input) => self.on_wheel(&input),
        }
    }

    /// Re‑applies the viewport through the preprocessor for the new host size.
    pub fn handle_resize(&mut self) {
        if self.destroyed {
            return;
        }
        debug!(host = ?self.host_size(), "resize");
        self.events.resize_transform_started.emit(&());
        if let Some(loader) = &mut self.loader {
            loader.begin_gesture();
        }
        let current = self.store.viewport_matrix();
        let accepted = self.preprocess(current);
        self.commit(accepted, false);
        self.events.resize_transform_finished.emit(&());
        if let Some(loader) = &mut self.loader {
            loader.end_gesture();
        }
        self.schedule_load(LoadRequest::Force);
    }

    /// Earliest deadline the host should wake up for.
    pub fn next_deadline(&self) -> Option<u64> {
        self.tasks.next_deadline()
    }

    /// Runs every deferred task that is due.
    pub fn run_due_tasks(&mut self) {
        while !self.destroyed {
            let now = self.platform.now_ms();
            let Some((handle, task)) = self.tasks.pop_due(now) else {
                break;
            };
            trace!(?task, "deferred task fired");
            match task {
                CanvasTask::LoadAroundViewport(request) => {
                    if self.load_task.is_some_and(|(h, _)| h == handle) {
                        self.load_task = None;
                    }
                    self.load_around_viewport(request);
                }
                CanvasTask::WheelFinished => {
                    if self.wheel_task == Some(handle) {
                        self.wheel_task = None;
                    }
                    self.finish_wheel_burst();
                }
            }
        }
    }

    /// Ends active gestures, stops listening, drops deferred work and
    /// subscribers. Idempotent.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        if self.mouse.end() == MouseStep::Finished {
            self.finish_mouse();
        }
        if self.touch.cancel() == TouchStep::Finished {
            self.finish_touch();
        }
        if self.wheel.finish() {
            self.end_gesture(GestureKind::Wheel);
        }
        self.wheel_finish_pending = false;
        self.unlisten(WindowEvents::all());
        self.platform.observe_resize(false);
        self.tasks.clear();
        self.load_task = None;
        self.wheel_task = None;
        self.events.clear();
        self.store.after_updated().clear();
        self.destroyed = true;
        debug!("viewport controller destroyed");
    }

    fn on_mouse_down(&mut self, input: &MouseInput) -> bool {
        if !(self.config.mouse_down_verifier)(input) {
            return false;
        }
        let geometry = self.geometry();
        if self.mouse.start(input.position, &geometry) != MouseStep::Started {
            return false;
        }
        if let Some(cursor) = &self.config.drag_cursor {
            self.platform.set_cursor(Some(cursor.as_str()));
        }
        self.listen(WindowEvents::MOUSE);
        self.begin_gesture(GestureKind::Mouse);
        true
    }

    fn on_mouse_move(&mut self, input: &MouseInput) -> bool {
        let geometry = self.geometry();
        match self.mouse.update(input.position, &geometry) {
            MouseStep::Moved { delta } => {
                let next = self.store.viewport_matrix().translated(-delta.x, -delta.y);
                self.propose(next);
                true
            }
            MouseStep::Finished => {
                self.finish_mouse();
                true
            }
            MouseStep::Ignored | MouseStep::Started => false,
        }
    }

    fn on_mouse_up(&mut self, input: &MouseInput) -> bool {
        if !self.mouse.is_dragging() || !(self.config.mouse_up_verifier)(input) {
            return false;
        }
        self.mouse.end();
        self.finish_mouse();
        true
    }

    fn finish_mouse(&mut self) {
        if self.config.drag_cursor.is_some() {
            self.platform.set_cursor(None);
        }
        self.unlisten(WindowEvents::MOUSE);
        self.end_gesture(GestureKind::Mouse);
        self.flush_wheel_finish();
    }

    fn on_touch_start(&mut self, input: &TouchInput) -> bool {
        if !(self.config.touch_verifier)(input) {
            return false;
        }
        match self.touch.start(&input.touches) {
            TouchStep::Started => {
                self.listen(WindowEvents::TOUCH);
                self.begin_gesture(GestureKind::Touch);
                true
            }
            TouchStep::Rebaselined => {
                trace!(touches = input.touches.len(), "touch rebaselined");
                true
            }
            _ => false,
        }
    }

    fn on_touch_move(&mut self, input: &TouchInput) -> bool {
        let geometry = self.geometry();
        match self.touch.update(&input.touches, &geometry) {
            TouchStep::Moved { pan, pinch } => {
                // Move then scale, as separate proposals so a vetoed zoom keeps the pan.
                let panned = self.store.viewport_matrix().translated(-pan.x, -pan.y);
                self.propose(panned);
                // The pivot is the previous centroid, relative to the host.
                let zoom = pinch.and_then(|p| Some((p.ratio, geometry.to_host(p.pivot)?)));
                if let Some((ratio, pivot)) = zoom {
                    let scaled = self.store.viewport_matrix().scaled_at(1.0 / ratio, pivot);
                    self.propose(scaled);
                }
                true
            }
            TouchStep::Finished => {
                self.finish_touch();
                true
            }
            TouchStep::Rebaselined => true,
            TouchStep::Ignored | TouchStep::Started => false,
        }
    }

    fn on_touch_end(&mut self, input: &TouchInput) -> bool {
        match self.touch.end(&input.touches) {
            TouchStep::Finished => {
                self.finish_touch();
                true
            }
            TouchStep::Rebaselined => true,
            _ => false,
        }
    }

    fn finish_touch(&mut self) {
        self.unlisten(WindowEvents::TOUCH);
        self.end_gesture(GestureKind::Touch);
        self.flush_wheel_finish();
    }

    fn on_wheel(&mut self, input: &WheelInput) -> bool {
        if !(self.config.wheel_verifier)(input) {
            return false;
        }
        let geometry = self.geometry();
        let Some(zoom) = self
            .wheel
            .on_wheel(input, &geometry, self.config.wheel_sensitivity)
        else {
            return false;
        };
        if zoom.started {
            self.begin_gesture(GestureKind::Wheel);
        }
        self.wheel_finish_pending = false;
        let next = self.store.viewport_matrix().scaled_at(zoom.factor, zoom.pivot);
        self.propose(next);

        let deadline = self
            .platform
            .now_ms()
            .saturating_add(self.config.wheel_finish_timeout_ms);
        let handle = match self.wheel_task {
            Some(handle) => self
                .tasks
                .reschedule(handle, deadline, CanvasTask::WheelFinished),
            None => self.tasks.schedule(deadline, CanvasTask::WheelFinished),
        };
        self.wheel_task = Some(handle);
        true
    }

    fn finish_wheel_burst(&mut self) {
        if !self.wheel.is_active() {
            return;
        }
        if self.mouse.is_dragging() || self.touch.is_active() {
            trace!("wheel finish deferred until drag ends");
            self.wheel_finish_pending = true;
            return;
        }
        self.wheel.finish();
        self.end_gesture(GestureKind::Wheel);
    }

    /// Completes a wheel burst whose quiet period elapsed during a drag.
    fn flush_wheel_finish(&mut self) {
        if self.wheel_finish_pending && !self.mouse.is_dragging() && !self.touch.is_active() {
            self.wheel_finish_pending = false;
            self.finish_wheel_burst();
        }
    }

    fn begin_gesture(&mut self, kind: GestureKind) {
        debug!(?kind, "gesture started");
        if let Some(loader) = &mut self.loader {
            loader.begin_gesture();
        }
        self.events.transform_started.emit(&kind);
    }

    fn end_gesture(&mut self, kind: GestureKind) {
        debug!(?kind, "gesture finished");
        self.events.transform_finished.emit(&kind);
        if let Some(request) = self.loader.as_mut().map(VirtualScrollLoader::end_gesture) {
            self.schedule_load(request);
        }
    }

    fn preprocess(&self, next: TransformState) -> TransformState {
        let size = self.host_size().unwrap_or(Size::ZERO);
        let params = PreprocessParams::new(
            self.store.viewport_matrix(),
            next,
            size.width,
            size.height,
        );
        self.config.preprocessor.accept(&params)
    }

    /// Runs an interactive proposal through the preprocessor and stores it.
    fn propose(&mut self, next: TransformState) {
        let accepted = self.preprocess(next);
        self.commit(accepted, true);
    }

    fn commit(&mut self, accepted: TransformState, interactive: bool) {
        if accepted == self.store.viewport_matrix() {
            return;
        }
        if interactive {
            self.events.before_transform_change.emit(&accepted);
        }
        let change = match self.store.patch_viewport_matrix(accepted.into()) {
            Ok(change) => change,
            Err(err) => {
                warn!(%err, "preprocessed viewport rejected by store");
                return;
            }
        };
        if interactive {
            self.events.transform_change.emit(&change);
        }
        let host = self.host_size();
        if let Some(request) = self
            .loader
            .as_ref()
            .and_then(|loader| loader.on_viewport_updated(&change, host))
        {
            self.schedule_load(request);
        }
    }

    fn schedule_load(&mut self, request: LoadRequest) {
        if self.loader.is_none() {
            return;
        }
        let now = self.platform.now_ms();
        let (handle, request) = match self.load_task {
            Some((handle, pending)) => {
                let merged = pending.max(request);
                let handle = self
                    .tasks
                    .reschedule(handle, now, CanvasTask::LoadAroundViewport(merged));
                (handle, merged)
            }
            None => (
                self.tasks
                    .schedule(now, CanvasTask::LoadAroundViewport(request)),
                request,
            ),
        };
        trace!(?request, "load scheduled");
        self.load_task = Some((handle, request));
    }

    fn load_around_viewport(&mut self, request: LoadRequest) {
        let viewport = self.store.viewport_matrix();
        let host = self.host_size();
        let Some(loader) = &mut self.loader else {
            return;
        };
        if request == LoadRequest::Ensure && !loader.needs_reload(viewport, host) {
            trace!("loaded area still covers the viewport");
            return;
        }
        if let Some(rendering_box) = loader.load(viewport, host) {
            debug!(?rendering_box, "rendering box emitted");
            self.events.rendering_box.emit(&rendering_box);
        }
    }

    fn listen(&mut self, events: WindowEvents) {
        let added = events - self.listening;
        if !added.is_empty() {
            self.platform.listen(added);
            self.listening |= added;
        }
    }

    fn unlisten(&mut self, events: WindowEvents) {
        let removed = events & self.listening;
        if !removed.is_empty() {
            self.platform.unlisten(removed);
            self.listening -= removed;
        }
    }

    fn geometry(&self) -> HostGeometry {
        HostGeometry::new(self.platform.host_rect(), self.platform.window_size())
    }

    fn host_size(&self) -> Option<Size> {
        self.platform.host_rect().map(|rect| rect.size())
    }
}

impl<P: Platform> Drop for ViewportController<P> {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl<P: Platform> fmt::Debug for ViewportController<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewportController")
            .field("config", &self.config)
            .field("viewport", &self.store.viewport_matrix())
            .field("content", &self.store.content_matrix())
            .field("loader", &self.loader)
            .field("pending_tasks", &self.tasks.len())
            .field("mouse", &self.mouse)
            .field("touch", &self.touch)
            .field("wheel", &self.wheel)
            .field("listening", &self.listening)
            .field("destroyed", &self.destroyed)
            .finish_non_exhaustive()
    }
}
