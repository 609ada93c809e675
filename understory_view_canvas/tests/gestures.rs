// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture lifecycle and transform results, end to end.

mod support;

use kurbo::Point;
use understory_view_canvas::{
    CanvasConfig, CanvasError, GestureKind, ViewportController, WindowEvents,
};
use understory_view_gesture::{InputEvent, MouseButton, MouseInput};
use understory_view_transform::{ScaleLimit, ShiftLimit, TransformPayload, TransformState};

use support::{
    FakePlatform, Note, assert_close, count, mouse_down, mouse_move, mouse_up, record, touches,
    wheel,
};

fn canvas(width: f64, height: f64) -> ViewportController<FakePlatform> {
    ViewportController::new(FakePlatform::with_host(width, height), CanvasConfig::default())
        .unwrap()
}

#[test]
fn wheel_zoom_out_and_back() {
    let mut canvas = canvas(100.0, 100.0);
    assert!(canvas.dispatch(wheel(0.0, 0.0, 1.0)));
    assert_eq!(
        canvas.screen_matrix().to_string(),
        format!("matrix({0}, 0, 0, {0}, 0, 0)", 1.0 / 1.2)
    );
    let s = 1.0 / 1.2;
    assert_close(canvas.screen_matrix().coefficients(), [s, 0.0, 0.0, s, 0.0, 0.0]);
    assert!((s - 0.8333).abs() < 1e-4);

    assert!(canvas.dispatch(wheel(0.0, 0.0, -1.0)));
    assert!((canvas.viewport_matrix().scale - 1.0).abs() < 1e-12);
}

#[test]
fn wheel_zooms_about_host_relative_cursor() {
    let mut platform = FakePlatform::with_host(100.0, 100.0);
    platform.host = Some(kurbo::Rect::new(20.0, 10.0, 120.0, 110.0));
    platform.window = kurbo::Size::new(200.0, 200.0);
    let mut canvas = ViewportController::new(platform, CanvasConfig::default()).unwrap();

    let before = canvas.client_to_content(Point::new(70.0, 60.0)).unwrap();
    canvas.dispatch(wheel(70.0, 60.0, -3.0));
    let after = canvas.client_to_content(Point::new(70.0, 60.0)).unwrap();
    assert!((before - after).hypot() < 1e-9);
    assert!((canvas.viewport_matrix().scale - 1.0 / 1.2).abs() < 1e-12);
}

#[test]
fn zero_wheel_delta_is_ignored() {
    let mut canvas = canvas(100.0, 100.0);
    let log = record(&mut canvas);
    assert!(!canvas.dispatch(wheel(10.0, 10.0, 0.0)));
    assert!(log.borrow().is_empty());
    assert_eq!(canvas.next_deadline(), None);
}

#[test]
fn wheel_burst_finishes_once_after_quiet_period() {
    let mut canvas = canvas(100.0, 100.0);
    let log = record(&mut canvas);

    for t in [0, 100, 200] {
        canvas.platform_mut().now = t;
        canvas.dispatch(wheel(50.0, 50.0, 1.0));
    }
    assert_eq!(canvas.next_deadline(), Some(700));

    canvas.platform_mut().now = 650;
    canvas.run_due_tasks();
    assert_eq!(count(&log, &Note::Finished(GestureKind::Wheel)), 0);

    canvas.platform_mut().now = 700;
    canvas.run_due_tasks();
    assert_eq!(count(&log, &Note::Started(GestureKind::Wheel)), 1);
    assert_eq!(count(&log, &Note::Finished(GestureKind::Wheel)), 1);
    assert_eq!(count(&log, &Note::Change), 3);
    assert_eq!(canvas.next_deadline(), None);
}

#[test]
fn huge_wheel_timeout_saturates_deadline() {
    let config = CanvasConfig::default().with_wheel_finish_timeout_ms(u64::MAX);
    let mut platform = FakePlatform::with_host(100.0, 100.0);
    platform.now = 1;
    let mut canvas = ViewportController::new(platform, config).unwrap();
    assert!(canvas.dispatch(wheel(50.0, 50.0, 1.0)));
    assert_eq!(canvas.next_deadline(), Some(u64::MAX));
    assert!(canvas.is_gesture_in_progress());
}

#[test]
fn two_finger_pinch() {
    let mut canvas = canvas(300.0, 300.0);
    assert!(canvas.dispatch(InputEvent::TouchStart(touches(&[(0.0, 0.0), (100.0, 0.0)]))));
    assert!(canvas.dispatch(InputEvent::TouchMove(touches(&[(0.0, 0.0), (200.0, 0.0)]))));
    assert_close(
        canvas.screen_matrix().coefficients(),
        [2.0, 0.0, 0.0, 2.0, 50.0, 0.0],
    );
    assert_eq!(canvas.screen_matrix().to_string(), "matrix(2, 0, 0, 2, 50, 0)");
}

#[test]
fn pinch_pivots_at_host_relative_centroid() {
    let mut platform = FakePlatform::with_host(300.0, 300.0);
    platform.host = Some(kurbo::Rect::new(20.0, 10.0, 320.0, 310.0));
    platform.window = kurbo::Size::new(400.0, 400.0);
    let mut canvas = ViewportController::new(platform, CanvasConfig::default()).unwrap();

    assert!(canvas.dispatch(InputEvent::TouchStart(touches(&[(20.0, 10.0), (120.0, 10.0)]))));
    assert!(canvas.dispatch(InputEvent::TouchMove(touches(&[(20.0, 10.0), (220.0, 10.0)]))));
    assert_close(
        canvas.screen_matrix().coefficients(),
        [2.0, 0.0, 0.0, 2.0, 50.0, 0.0],
    );
}

#[test]
fn pinch_pan_at_scale_limit_keeps_the_pan() {
    let config = CanvasConfig::default().with_preprocessor(ScaleLimit::new(Some(1.0), None));
    let mut canvas =
        ViewportController::new(FakePlatform::with_host(300.0, 300.0), config).unwrap();
    let log = record(&mut canvas);

    // The centroid moves 15px right while the spread shrinks from 100 to 90.
    assert!(canvas.dispatch(InputEvent::TouchStart(touches(&[(0.0, 0.0), (100.0, 0.0)]))));
    assert!(canvas.dispatch(InputEvent::TouchMove(touches(&[(20.0, 0.0), (110.0, 0.0)]))));
    assert_eq!(
        canvas.viewport_matrix(),
        TransformState::new(1.0, -15.0, 0.0)
    );
    assert_eq!(count(&log, &Note::Change), 1);
}

#[test]
fn finger_count_changes_are_seamless() {
    let mut canvas = canvas(300.0, 300.0);
    let log = record(&mut canvas);

    assert!(canvas.dispatch(InputEvent::TouchStart(touches(&[(10.0, 10.0)]))));
    assert!(canvas.dispatch(InputEvent::TouchStart(touches(&[(10.0, 10.0), (50.0, 10.0)]))));
    assert_eq!(canvas.platform().listen_calls, vec![WindowEvents::TOUCH]);

    // Lifting one finger degrades the pinch to a pan.
    assert!(canvas.dispatch(InputEvent::TouchEnd(touches(&[(50.0, 10.0)]))));
    assert!(canvas.is_gesture_in_progress());
    assert!(canvas.dispatch(InputEvent::TouchMove(touches(&[(40.0, 30.0)]))));
    assert_eq!(
        canvas.viewport_matrix(),
        TransformState::new(1.0, 10.0, -20.0)
    );

    assert!(canvas.dispatch(InputEvent::TouchEnd(touches(&[]))));
    assert!(!canvas.dispatch(InputEvent::TouchCancel(touches(&[]))));
    assert_eq!(count(&log, &Note::Started(GestureKind::Touch)), 1);
    assert_eq!(count(&log, &Note::Finished(GestureKind::Touch)), 1);
    assert_eq!(canvas.platform().unlisten_calls, vec![WindowEvents::TOUCH]);
    assert!(canvas.platform().listening.is_empty());
}

#[test]
fn touch_leaving_bounds_finishes() {
    let mut canvas = canvas(100.0, 100.0);
    let log = record(&mut canvas);
    canvas.dispatch(InputEvent::TouchStart(touches(&[(10.0, 10.0)])));
    assert!(canvas.dispatch(InputEvent::TouchMove(touches(&[(150.0, 10.0)]))));
    assert_eq!(count(&log, &Note::Finished(GestureKind::Touch)), 1);
    assert!(!canvas.dispatch(InputEvent::TouchMove(touches(&[(20.0, 10.0)]))));
    assert_eq!(canvas.viewport_matrix(), TransformState::IDENTITY);
}

#[test]
fn mouse_drag_pans_against_pointer() {
    let mut canvas = canvas(200.0, 200.0);
    let log = record(&mut canvas);

    assert!(canvas.dispatch(mouse_down(10.0, 10.0)));
    assert_eq!(canvas.platform().cursor.as_deref(), Some("grab"));
    assert_eq!(canvas.platform().listening, WindowEvents::MOUSE);

    assert!(canvas.dispatch(mouse_move(20.0, 30.0)));
    assert_eq!(
        canvas.viewport_matrix(),
        TransformState::new(1.0, -10.0, -20.0)
    );

    assert!(canvas.dispatch(mouse_up(20.0, 30.0)));
    assert_eq!(canvas.platform().cursor, None);
    assert!(canvas.platform().listening.is_empty());
    assert_eq!(
        *log.borrow(),
        vec![
            Note::Started(GestureKind::Mouse),
            Note::Change,
            Note::Finished(GestureKind::Mouse)
        ]
    );
}

#[test]
fn mouse_delta_is_scaled_by_viewport() {
    let mut canvas = canvas(200.0, 200.0);
    canvas
        .patch_viewport_matrix(TransformPayload::scale(2.0))
        .unwrap();
    canvas.dispatch(mouse_down(10.0, 10.0));
    canvas.dispatch(mouse_move(15.0, 10.0));
    assert_eq!(
        canvas.viewport_matrix(),
        TransformState::new(2.0, -10.0, 0.0)
    );
}

#[test]
fn mouse_leaving_bounds_finishes_exactly_once() {
    let mut canvas = canvas(100.0, 100.0);
    let log = record(&mut canvas);
    canvas.dispatch(mouse_down(50.0, 50.0));
    assert!(canvas.dispatch(mouse_move(150.0, 50.0)));
    // Re-entering without a press neither resumes nor finishes again.
    assert!(!canvas.dispatch(mouse_move(60.0, 50.0)));
    assert!(!canvas.dispatch(mouse_up(60.0, 50.0)));
    assert_eq!(count(&log, &Note::Finished(GestureKind::Mouse)), 1);
    assert_eq!(canvas.viewport_matrix(), TransformState::IDENTITY);
    assert_eq!(canvas.platform().unlisten_calls, vec![WindowEvents::MOUSE]);
}

#[test]
fn verifiers_gate_presses() {
    let mut canvas = canvas(100.0, 100.0);
    let right = InputEvent::MouseDown(MouseInput {
        position: Point::new(5.0, 5.0),
        button: MouseButton::Secondary,
    });
    assert!(!canvas.dispatch(right));
    assert!(!canvas.is_gesture_in_progress());

    let config = CanvasConfig::default()
        .with_wheel_verifier(|_| false)
        .with_drag_cursor(None);
    let mut canvas =
        ViewportController::new(FakePlatform::with_host(100.0, 100.0), config).unwrap();
    assert!(!canvas.dispatch(wheel(5.0, 5.0, 1.0)));
    assert!(canvas.dispatch(mouse_down(5.0, 5.0)));
    assert_eq!(canvas.platform().cursor, None);
}

#[test]
fn detached_host_ignores_input() {
    let mut platform = FakePlatform::with_host(100.0, 100.0);
    platform.host = None;
    let mut canvas = ViewportController::new(platform, CanvasConfig::default()).unwrap();
    assert!(!canvas.dispatch(mouse_down(5.0, 5.0)));
    assert!(!canvas.dispatch(wheel(5.0, 5.0, 1.0)));
    assert_eq!(canvas.client_to_content(Point::new(5.0, 5.0)), None);
}

#[test]
fn wheel_finish_waits_for_drag() {
    let mut canvas = canvas(100.0, 100.0);
    let log = record(&mut canvas);

    canvas.dispatch(mouse_down(50.0, 50.0));
    canvas.dispatch(wheel(50.0, 50.0, 1.0));
    canvas.platform_mut().now = 600;
    canvas.run_due_tasks();
    assert_eq!(count(&log, &Note::Finished(GestureKind::Wheel)), 0);

    canvas.dispatch(mouse_up(50.0, 50.0));
    let finishes: Vec<Note> = log
        .borrow()
        .iter()
        .filter(|n| matches!(n, Note::Finished(_)))
        .cloned()
        .collect();
    assert_eq!(
        finishes,
        vec![
            Note::Finished(GestureKind::Mouse),
            Note::Finished(GestureKind::Wheel)
        ]
    );
}

#[test]
fn scale_limit_vetoes_wheel_zoom() {
    // Content may not shrink below 1, so the viewport scale stays <= 1.
    let config = CanvasConfig::default().with_preprocessor(ScaleLimit::new(Some(1.0), None));
    let mut canvas =
        ViewportController::new(FakePlatform::with_host(100.0, 100.0), config).unwrap();
    let log = record(&mut canvas);
    canvas.dispatch(wheel(50.0, 50.0, 1.0));
    assert_eq!(canvas.viewport_matrix(), TransformState::IDENTITY);
    assert_eq!(count(&log, &Note::Change), 0);

    // Zooming in is still allowed.
    canvas.dispatch(wheel(50.0, 50.0, -1.0));
    assert!(canvas.viewport_matrix().scale < 1.0);
}

#[test]
fn resize_reapplies_shift_limit_for_new_host_size() {
    let config = CanvasConfig::default()
        .with_preprocessor(ShiftLimit::new(None, Some(200.0), None, Some(200.0)));
    let mut canvas =
        ViewportController::new(FakePlatform::with_host(100.0, 100.0), config).unwrap();
    assert_eq!(
        canvas.pan_by(100.0, 100.0).unwrap(),
        TransformState::new(1.0, 100.0, 100.0)
    );

    canvas.platform_mut().host = Some(kurbo::Rect::new(0.0, 0.0, 150.0, 150.0));
    canvas.handle_resize();
    assert_eq!(canvas.viewport_matrix(), TransformState::new(1.0, 50.0, 50.0));
}

#[test]
fn before_change_sees_accepted_value_first() {
    let mut canvas = canvas(100.0, 100.0);
    let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    {
        let seen = seen.clone();
        canvas
            .events_mut()
            .before_transform_change
            .subscribe(move |t| seen.borrow_mut().push(("before", *t)));
    }
    {
        let seen = seen.clone();
        canvas
            .events_mut()
            .transform_change
            .subscribe(move |c| seen.borrow_mut().push(("after", c.current)));
    }
    canvas.dispatch(mouse_down(0.0, 0.0));
    canvas.dispatch(mouse_move(1.0, 0.0));
    let expected = TransformState::new(1.0, -1.0, 0.0);
    assert_eq!(
        *seen.borrow(),
        vec![("before", expected), ("after", expected)]
    );
}

#[test]
fn programmatic_api() {
    let mut canvas = canvas(100.0, 100.0);
    let log = record(&mut canvas);

    assert_eq!(
        canvas.pan_by(10.0, 5.0).unwrap(),
        TransformState::new(1.0, 10.0, 5.0)
    );
    let zoomed = canvas.zoom_at(2.0, Point::new(50.0, 50.0)).unwrap();
    assert_eq!(zoomed, TransformState::new(2.0, -40.0, -45.0));
    assert_eq!(
        canvas.client_to_content(Point::new(50.0, 50.0)),
        Some(Point::new(60.0, 55.0))
    );

    assert_eq!(
        canvas.patch_content_matrix(TransformPayload::translation(3.0, 4.0)),
        Ok(TransformState::new(1.0, 3.0, 4.0))
    );
    assert!(matches!(
        canvas.patch_content_matrix(TransformPayload::scale(-1.0)),
        Err(CanvasError::Transform(_))
    ));
    assert!(matches!(
        canvas.zoom_at(0.0, Point::ORIGIN),
        Err(CanvasError::Transform(_))
    ));

    // Programmatic changes only notify through the store.
    assert!(log.borrow().is_empty());
}

#[test]
fn store_subscribers_see_every_change() {
    let mut canvas = canvas(100.0, 100.0);
    let changes = std::rc::Rc::new(std::cell::Cell::new(0));
    {
        let changes = changes.clone();
        canvas.on_after_updated(move |_| changes.set(changes.get() + 1));
    }
    canvas.pan_by(1.0, 1.0).unwrap();
    canvas.dispatch(wheel(10.0, 10.0, 1.0));
    canvas
        .patch_content_matrix(TransformPayload::scale(2.0))
        .unwrap();
    assert_eq!(changes.get(), 3);
}

#[test]
fn destroy_tears_everything_down_once() {
    let mut canvas = canvas(100.0, 100.0);
    let log = record(&mut canvas);
    assert!(canvas.platform().observing);

    canvas.dispatch(mouse_down(10.0, 10.0));
    canvas.dispatch(InputEvent::TouchStart(touches(&[(10.0, 10.0)])));
    canvas.dispatch(wheel(10.0, 10.0, 1.0));
    assert_eq!(
        canvas.platform().listening,
        WindowEvents::MOUSE | WindowEvents::TOUCH
    );

    canvas.destroy();
    canvas.destroy();
    assert!(canvas.is_destroyed());
    for kind in [GestureKind::Mouse, GestureKind::Touch, GestureKind::Wheel] {
        assert_eq!(count(&log, &Note::Finished(kind)), 1, "{kind:?}");
    }
    assert!(canvas.platform().listening.is_empty());
    assert!(!canvas.platform().observing);
    assert_eq!(canvas.next_deadline(), None);

    let notes = log.borrow().len();
    assert!(!canvas.dispatch(mouse_down(10.0, 10.0)));
    assert_eq!(canvas.pan_by(1.0, 0.0), Err(CanvasError::Destroyed));
    canvas.platform_mut().now = 10_000;
    canvas.run_due_tasks();
    canvas.handle_resize();
    assert_eq!(log.borrow().len(), notes);
}

#[test]
fn invalid_config_is_rejected() {
    let config = CanvasConfig::default().with_wheel_sensitivity(0.8);
    assert_eq!(
        ViewportController::new(FakePlatform::with_host(1.0, 1.0), config).err(),
        Some(CanvasError::InvalidWheelSensitivity(0.8))
    );
}
