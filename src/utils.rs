use robust::Coord;

use crate::{shape::Point, DotId, Float};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Orientation {
    /// Clock Wise
    ///
    ///  a     b
    ///             c
    ///
    CW,
    /// Counter Clock Wise
    ///             c
    ///  a     b
    CCW,
    /// Collinear
    ///  a     b    c
    Collinear,
}

impl Orientation {
    pub fn is_cw(&self) -> bool {
        matches!(self, Self::CW)
    }

    pub fn is_ccw(&self) -> bool {
        matches!(self, Self::CCW)
    }

    pub fn is_collinear(&self) -> bool {
        matches!(self, Self::Collinear)
    }
}

fn coord(p: Point) -> Coord<Float> {
    Coord { x: p.x, y: p.y }
}

/// Orientation of the ordered triplet (a, b, c), the sign is computed exactly.
pub fn orient_2d(a: Point, b: Point, c: Point) -> Orientation {
    let val = robust::orient2d(coord(a), coord(b), coord(c));

    if val > 0. {
        Orientation::CCW
    } else if val < 0. {
        Orientation::CW
    } else {
        Orientation::Collinear
    }
}

/// Euclidean distance, 0 for coincident points
pub fn distance(from: Point, to: Point) -> Float {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    (dx * dx + dy * dy).sqrt()
}

/// Angle of the vector from -> to, in (-PI, PI].
/// Meaningless when `from == to`, callers must exclude that case.
pub fn angle(from: Point, to: Point) -> Float {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Unit vector pointing from `from` to `to`, `None` when they coincide
pub fn direction(from: Point, to: Point) -> Option<(Float, Float)> {
    let distance = distance(from, to);
    if distance == 0. {
        return None;
    }
    Some(((to.x - from.x) / distance, (to.y - from.y) / distance))
}

/// Whether segment p1-q1 crosses segment p2-q2.
///
/// Segments sharing an endpoint dot never cross, the check is on identity not on
/// coordinates: two distinct dots at the same spot are still distinct endpoints.
/// Collinear overlapping segments are reported as not crossing.
pub fn segments_intersect(
    (p1_id, p1): (DotId, Point),
    (q1_id, q1): (DotId, Point),
    (p2_id, p2): (DotId, Point),
    (q2_id, q2): (DotId, Point),
) -> bool {
    if p1_id == p2_id || p1_id == q2_id || q1_id == p2_id || q1_id == q2_id {
        return false;
    }

    let o1 = orient_2d(p1, q1, p2);
    let o2 = orient_2d(p1, q1, q2);
    let o3 = orient_2d(p2, q2, p1);
    let o4 = orient_2d(p2, q2, q1);

    o1 != o2 && o3 != o4
}
