//! Geometry helpers: axis classification, projections and corner trimming.
//!
//! Axis tests compare coordinates for exact equality. Control points come
//! from user drags and from arithmetic on those drags, and a segment that is
//! "almost" vertical is a diagonal as far as the editor is concerned.

use crate::types::{Direction, Point};

/// Both points share an x coordinate.
#[inline]
pub fn is_vertical(p0: Point, p1: Point) -> bool {
    p1.x == p0.x
}

/// Both points share a y coordinate.
#[inline]
pub fn is_horizontal(p0: Point, p1: Point) -> bool {
    p1.y == p0.y
}

#[inline]
pub fn is_orthogonal(p0: Point, p1: Point) -> bool {
    is_vertical(p0, p1) || is_horizontal(p0, p1)
}

/// Direction of travel from `p0` to `p1` for an orthogonal pair.
///
/// Coincident points read as horizontal and report `West`; diagonal pairs
/// report [`Direction::None`].
pub fn orthogonal_direction(p0: Point, p1: Point) -> Direction {
    if is_horizontal(p0, p1) {
        return if p0.x < p1.x {
            Direction::East
        } else {
            Direction::West
        };
    }
    if is_vertical(p0, p1) {
        return if p0.y < p1.y {
            Direction::South
        } else {
            Direction::North
        };
    }
    Direction::None
}

/// Point at `distance` from `start`, walking toward `end`.
///
/// A zero-length segment has no direction, so `start` is returned as is.
pub fn projection(start: Point, end: Point, distance: f64) -> Point {
    let delta = end - start;
    let len = delta.length();
    if len == 0.0 {
        return start;
    }
    start + delta * (distance / len)
}

/// Point `r` units before `to` on the way from `from`, or the midpoint when
/// the segment is shorter than `2r`.
///
/// Returns `(point, is_mid)` where `is_mid` reports the clamp.
pub fn radius_midpoint(from: Point, to: Point, r: f64) -> (Point, bool) {
    let delta = to - from;
    let dist = delta.length();

    if dist <= 0.0 {
        return (to, false);
    }

    if r > 0.5 * dist {
        ((from + to) * 0.5, true)
    } else {
        (to - delta / dist * r, false)
    }
}

/// Copy of `points` with runs of identical consecutive points collapsed.
pub fn without_adjacent_duplicates(points: &[Point]) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points {
        if out.last() != Some(&p) {
            out.push(p);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::pt;

    #[test]
    fn classifies_axes_by_equality() {
        assert!(is_horizontal(pt(0.0, 5.0), pt(10.0, 5.0)));
        assert!(is_vertical(pt(3.0, 0.0), pt(3.0, -7.0)));
        assert!(!is_orthogonal(pt(0.0, 0.0), pt(1.0, 1e-9)));
        assert!(is_orthogonal(pt(2.0, 2.0), pt(2.0, 2.0)));
    }

    #[test]
    fn orthogonal_direction_is_screen_oriented() {
        let o = pt(0.0, 0.0);
        assert_eq!(orthogonal_direction(o, pt(5.0, 0.0)), Direction::East);
        assert_eq!(orthogonal_direction(o, pt(-5.0, 0.0)), Direction::West);
        assert_eq!(orthogonal_direction(o, pt(0.0, 5.0)), Direction::South);
        assert_eq!(orthogonal_direction(o, pt(0.0, -5.0)), Direction::North);
        assert_eq!(orthogonal_direction(o, pt(5.0, 5.0)), Direction::None);
    }

    #[test]
    fn projection_walks_toward_end() {
        assert_eq!(projection(pt(0.0, 0.0), pt(100.0, 0.0), 10.0), pt(10.0, 0.0));
        assert_eq!(projection(pt(0.0, 0.0), pt(3.0, 4.0), 10.0), pt(6.0, 8.0));
    }

    #[test]
    fn projection_of_zero_length_segment_stays_put() {
        let p = pt(7.0, 7.0);
        assert_eq!(projection(p, p, 10.0), p);
    }

    #[test]
    fn radius_midpoint_clamps_short_segments() {
        let (m, is_mid) = radius_midpoint(pt(0.0, 0.0), pt(100.0, 0.0), 10.0);
        assert_eq!(m, pt(90.0, 0.0));
        assert!(!is_mid);

        let (m, is_mid) = radius_midpoint(pt(0.0, 0.0), pt(10.0, 0.0), 10.0);
        assert_eq!(m, pt(5.0, 0.0));
        assert!(is_mid);
    }

    #[test]
    fn collapses_adjacent_duplicates_only() {
        let out = without_adjacent_duplicates(&[
            pt(0.0, 0.0),
            pt(0.0, 0.0),
            pt(5.0, 0.0),
            pt(0.0, 0.0),
        ]);
        assert_eq!(out, vec![pt(0.0, 0.0), pt(5.0, 0.0), pt(0.0, 0.0)]);
    }
}
