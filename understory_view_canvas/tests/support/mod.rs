// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A recording platform and event log shared by the integration tests.

#![allow(dead_code, reason = "not every test file uses every helper")]

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Rect, Size};
use understory_view_canvas::{GestureKind, Platform, ViewportController, WindowEvents};
use understory_view_culling::RenderingBox;
use understory_view_gesture::{InputEvent, MouseInput, TouchInput, WheelInput};

/// Records every call the controller makes.
#[derive(Debug, Default)]
pub struct FakePlatform {
    pub now: u64,
    pub host: Option<Rect>,
    pub window: Size,
    pub cursor: Option<String>,
    pub listening: WindowEvents,
    pub listen_calls: Vec<WindowEvents>,
    pub unlisten_calls: Vec<WindowEvents>,
    pub observing: bool,
}

impl FakePlatform {
    /// A host at the window origin filling a same‑sized window.
    pub fn with_host(width: f64, height: f64) -> Self {
        Self {
            host: Some(Rect::new(0.0, 0.0, width, height)),
            window: Size::new(width, height),
            ..Self::default()
        }
    }
}

impl Platform for FakePlatform {
    fn now_ms(&self) -> u64 {
        self.now
    }

    fn host_rect(&self) -> Option<Rect> {
        self.host
    }

    fn window_size(&self) -> Size {
        self.window
    }

    fn set_cursor(&mut self, cursor: Option<&str>) {
        self.cursor = cursor.map(String::from);
    }

    fn listen(&mut self, events: WindowEvents) {
        assert!(
            (self.listening & events).is_empty(),
            "listener registered twice: {events:?}"
        );
        self.listening |= events;
        self.listen_calls.push(events);
    }

    fn unlisten(&mut self, events: WindowEvents) {
        assert!(
            self.listening.contains(events),
            "removing listener never registered: {events:?}"
        );
        self.listening -= events;
        self.unlisten_calls.push(events);
    }

    fn observe_resize(&mut self, observe: bool) {
        self.observing = observe;
    }
}

/// One observed notification.
#[derive(Clone, Debug, PartialEq)]
pub enum Note {
    Started(GestureKind),
    Finished(GestureKind),
    Change,
    ResizeStarted,
    ResizeFinished,
    Box(RenderingBox),
}

pub type Log = Rc<RefCell<Vec<Note>>>;

/// Subscribes a log to every lifecycle signal of `canvas`.
pub fn record(canvas: &mut ViewportController<FakePlatform>) -> Log {
    let log: Log = Rc::default();
    let events = canvas.events_mut();
    {
        let log = log.clone();
        events
            .transform_started
            .subscribe(move |k| log.borrow_mut().push(Note::Started(*k)));
    }
    {
        let log = log.clone();
        events
            .transform_finished
            .subscribe(move |k| log.borrow_mut().push(Note::Finished(*k)));
    }
    {
        let log = log.clone();
        events
            .transform_change
            .subscribe(move |_| log.borrow_mut().push(Note::Change));
    }
    {
        let log = log.clone();
        events
            .resize_transform_started
            .subscribe(move |()| log.borrow_mut().push(Note::ResizeStarted));
    }
    {
        let log = log.clone();
        events
            .resize_transform_finished
            .subscribe(move |()| log.borrow_mut().push(Note::ResizeFinished));
    }
    {
        let log = log.clone();
        events
            .rendering_box
            .subscribe(move |b| log.borrow_mut().push(Note::Box(*b)));
    }
    log
}

pub fn count(log: &Log, note: &Note) -> usize {
    log.borrow().iter().filter(|n| *n == note).count()
}

pub fn boxes(log: &Log) -> Vec<RenderingBox> {
    log.borrow()
        .iter()
        .filter_map(|n| match n {
            Note::Box(b) => Some(*b),
            _ => None,
        })
        .collect()
}

pub fn mouse_down(x: f64, y: f64) -> InputEvent {
    InputEvent::MouseDown(MouseInput::primary(Point::new(x, y)))
}

pub fn mouse_move(x: f64, y: f64) -> InputEvent {
    InputEvent::MouseMove(MouseInput::primary(Point::new(x, y)))
}

pub fn mouse_up(x: f64, y: f64) -> InputEvent {
    InputEvent::MouseUp(MouseInput::primary(Point::new(x, y)))
}

pub fn touches(points: &[(f64, f64)]) -> TouchInput {
    TouchInput::new(points.iter().map(|&(x, y)| Point::new(x, y)))
}

pub fn wheel(x: f64, y: f64, delta_y: f64) -> InputEvent {
    InputEvent::Wheel(WheelInput {
        position: Point::new(x, y),
        delta_y,
    })
}

pub fn assert_close(actual: [f64; 6], expected: [f64; 6]) {
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 1e-9, "{actual:?} != {expected:?}");
    }
}
