// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size};

/// Snapshot of the host element and window bounds in client coordinates.
///
/// `host` is `None` while the host element is detached; every query then
/// treats positions as outside and conversions fail, so recognizers end or
/// ignore gestures instead of erroring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HostGeometry {
    /// Host bounding rectangle, if attached.
    pub host: Option<Rect>,
    /// Window size; the window spans `(0, 0)..(width, height)`.
    pub window: Size,
}

impl HostGeometry {
    /// Creates a snapshot.
    #[must_use]
    pub fn new(host: Option<Rect>, window: Size) -> Self {
        Self { host, window }
    }

    /// Returns `true` if `point` lies inside both the host and the window.
    ///
    /// Edges count as inside.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        let Some(host) = self.host else {
            return false;
        };
        let in_host =
            point.x >= host.x0 && point.x <= host.x1 && point.y >= host.y0 && point.y <= host.y1;
        let in_window = point.x >= 0.0
            && point.x <= self.window.width
            && point.y >= 0.0
            && point.y <= self.window.height;
        in_host && in_window
    }

    /// Converts a client point into host‑relative coordinates.
    #[must_use]
    pub fn to_host(&self, point: Point) -> Option<Point> {
        self.host.map(|host| (point - host.origin()).to_point())
    }

    /// Host size, or zero when detached.
    #[must_use]
    pub fn host_size(&self) -> Size {
        self.host.map_or(Size::ZERO, |host| host.size())
    }
}
