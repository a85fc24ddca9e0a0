// Layout constants and connector geometry

/// Horizontal position of the first slot
pub const ORIGIN_X: f64 = 100.0;

/// Vertical position of every slot
pub const ORIGIN_Y: f64 = 300.0;

/// Distance between neighbouring slots
pub const SLOT_GAP: f64 = 150.0;

/// Vertical offset of a freshly created node before re-layout moves it into place
pub const STAGING_OFFSET: f64 = 100.0;

/// Connector endpoints sit this far above/below the node centre
const ANCHOR_OFFSET: f64 = 25.0;

/// Control point offset for forward and backward curves
const CURVE_DEPTH: f64 = 60.0;

/// Control point offset for the wrap-around arc
const WRAP_DEPTH: f64 = 180.0;

/// A point in layout space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Point::new(self.x + dx, self.y + dy)
    }
}

/// Resting position of the node at logical `index`
pub fn slot(index: usize) -> Point {
    Point::new(ORIGIN_X + index as f64 * SLOT_GAP, ORIGIN_Y)
}

/// Kind of connector, each drawn with its own curvature and colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConnectorKind {
    /// `next` pointer, curves upward
    Next,
    /// `prev` pointer, curves downward
    Prev,
    /// tail -> head edge of a circular list, wide downward arc
    Wrap,
}

/// Quadratic curve from `start` through control point `control` to `end`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectorPath {
    pub start: Point,
    pub control: Point,
    pub end: Point,
}

impl ConnectorPath {
    /// Compute the path purely from the endpoint positions and the kind
    pub fn between(from: Point, to: Point, kind: ConnectorKind) -> Self {
        let mid_x = (from.x + to.x) / 2.0;
        match kind {
            ConnectorKind::Next => ConnectorPath {
                start: from.offset(0.0, -ANCHOR_OFFSET),
                control: Point::new(mid_x, from.y.min(to.y) - CURVE_DEPTH),
                end: to.offset(0.0, -ANCHOR_OFFSET),
            },
            ConnectorKind::Prev => ConnectorPath {
                start: from.offset(0.0, ANCHOR_OFFSET),
                control: Point::new(mid_x, from.y.max(to.y) + CURVE_DEPTH),
                end: to.offset(0.0, ANCHOR_OFFSET),
            },
            ConnectorKind::Wrap => ConnectorPath {
                start: from.offset(0.0, ANCHOR_OFFSET),
                control: Point::new(mid_x, from.y + WRAP_DEPTH),
                end: to.offset(0.0, ANCHOR_OFFSET),
            },
        }
    }

    /// Point on the curve at parameter `t` in `[0, 1]`
    pub fn at(&self, t: f64) -> Point {
        let u = 1.0 - t;
        Point::new(
            u * u * self.start.x + 2.0 * u * t * self.control.x + t * t * self.end.x,
            u * u * self.start.y + 2.0 * u * t * self.control.y + t * t * self.end.y,
        )
    }

    /// Polyline approximation with `segments` pieces
    pub fn sample(&self, segments: usize) -> Vec<Point> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|i| self.at(i as f64 / segments as f64))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_are_evenly_spaced() {
        assert_eq!(slot(0), Point::new(100.0, 300.0));
        assert_eq!(slot(3), Point::new(550.0, 300.0));
    }

    #[test]
    fn test_curve_directions() {
        let a = slot(0);
        let b = slot(1);
        let next = ConnectorPath::between(a, b, ConnectorKind::Next);
        let prev = ConnectorPath::between(b, a, ConnectorKind::Prev);
        let wrap = ConnectorPath::between(b, a, ConnectorKind::Wrap);
        assert!(next.control.y < a.y);
        assert!(prev.control.y > a.y);
        assert!(wrap.control.y > prev.control.y);
    }

    #[test]
    fn test_sample_hits_endpoints() {
        let path = ConnectorPath::between(slot(0), slot(2), ConnectorKind::Next);
        let points = path.sample(8);
        assert_eq!(points.len(), 9);
        assert_eq!(points[0], path.start);
        assert_eq!(points[8], path.end);
    }
}
