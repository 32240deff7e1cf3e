//! Orthogonal segment primitive.
//!
//! The engine only depends on [`OrthogonalSegments`]; editors that already
//! own an elbow router plug theirs in. [`ElbowRouter`] is the stock
//! implementation: optional stubs at both ends, joined by the candidate route
//! with the fewest turns that never doubles back on itself.

use crate::defaults;
use crate::geometry::{orthogonal_direction, without_adjacent_duplicates};
use crate::route::correct::correct_points;
use crate::types::{Direction, Length, Point, pt};

/// Direction and standoff constraints for one primitive call.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SegmentEnds {
    /// Required exit direction at `p0`.
    pub head_direction: Direction,
    /// Side of `p1` the route must arrive from.
    pub tail_direction: Direction,
    pub head_offset: Length,
    pub tail_offset: Length,
}

impl SegmentEnds {
    /// No direction constraints, no stubs.
    pub fn free() -> Self {
        Self::default()
    }
}

/// Turns a pair of points into a run of horizontal/vertical hops.
pub trait OrthogonalSegments {
    /// Route from `p0` to `p1`.
    ///
    /// The result starts at `p0`, ends at `p1`, and every consecutive pair in
    /// it is horizontal or vertical.
    fn expand_to_orthogonal(&self, p0: Point, p1: Point, ends: &SegmentEnds) -> Vec<Point>;
}

/// Default elbow router.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElbowRouter;

impl OrthogonalSegments for ElbowRouter {
    fn expand_to_orthogonal(&self, p0: Point, p1: Point, ends: &SegmentEnds) -> Vec<Point> {
        let mut route = vec![p0];
        let mut cursor = p0;

        let travel = ends.head_direction.concrete();
        if let Some(dir) = travel {
            cursor = p0 + dir * ends.head_offset;
            route.push(cursor);
        }

        let (entry, arrive) = match ends.tail_direction.concrete() {
            Some(dir) => (p1 + dir * ends.tail_offset, Some(dir.opposite())),
            None => (p1, None),
        };

        let clearance = {
            let k = ends.head_offset.raw().max(ends.tail_offset.raw());
            if k > 0.0 { k } else { defaults::OFFSET.raw() }
        };

        route.extend(join(cursor, travel, entry, arrive, clearance));
        route.push(entry);
        route.push(p1);

        correct_points(&without_adjacent_duplicates(&route))
    }
}

/// Corners between `from` and `to` (both exclusive).
fn join(
    from: Point,
    travel: Option<Direction>,
    to: Point,
    arrive: Option<Direction>,
    clearance: f64,
) -> Vec<Point> {
    let candidates = candidates(from, to, clearance);

    let best = candidates
        .iter()
        .enumerate()
        .filter_map(|(rank, corners)| {
            score(from, corners, to, travel, arrive).map(|(turns, len)| (turns, len, rank))
        })
        .min_by(|a, b| {
            a.0.cmp(&b.0)
                .then(a.1.total_cmp(&b.1))
                .then(a.2.cmp(&b.2))
        });

    match best {
        Some((_, _, rank)) => candidates[rank].clone(),
        None => candidates[0].clone(),
    }
}

/// Candidate corner lists, in tie-break order.
fn candidates(c: Point, t: Point, clearance: f64) -> Vec<Vec<Point>> {
    let dx = t.x - c.x;
    let dy = t.y - c.y;

    let h_first = vec![pt(t.x, c.y)];
    let v_first = vec![pt(c.x, t.y)];
    let mut out = if dx.abs() >= dy.abs() {
        vec![h_first, v_first]
    } else {
        vec![v_first, h_first]
    };

    let mut ys = vec![c.y.min(t.y) - clearance, c.y.max(t.y) + clearance];
    if dy != 0.0 {
        ys.insert(0, c.y + dy / 2.0);
    }
    let mut xs = vec![c.x.min(t.x) - clearance, c.x.max(t.x) + clearance];
    if dx != 0.0 {
        xs.insert(0, c.x + dx / 2.0);
    }

    // Z shapes: jog across at a single coordinate.
    for &y in &ys {
        out.push(vec![pt(c.x, y), pt(t.x, y)]);
    }
    for &x in &xs {
        out.push(vec![pt(x, c.y), pt(x, t.y)]);
    }

    // Wraps: leave sideways, go around, come back in from the far side.
    for &y in &ys {
        for &x in &xs {
            out.push(vec![pt(c.x, y), pt(x, y), pt(x, t.y)]);
            out.push(vec![pt(x, c.y), pt(x, y), pt(t.x, y)]);
        }
    }

    out
}

/// `(turns, length)` for a candidate, or `None` when it doubles back.
fn score(
    from: Point,
    corners: &[Point],
    to: Point,
    travel: Option<Direction>,
    arrive: Option<Direction>,
) -> Option<(usize, f64)> {
    let mut path = Vec::with_capacity(corners.len() + 2);
    path.push(from);
    path.extend_from_slice(corners);
    path.push(to);
    let path = without_adjacent_duplicates(&path);

    let mut headings: Vec<Direction> = Vec::with_capacity(path.len() + 1);
    headings.extend(travel);
    let mut length = 0.0;
    for hop in path.windows(2) {
        let d = hop[1] - hop[0];
        length += d.x.abs() + d.y.abs();
        headings.push(orthogonal_direction(hop[0], hop[1]));
    }
    headings.extend(arrive);

    let mut turns = 0;
    for pair in headings.windows(2) {
        if pair[1] == pair[0].opposite() {
            return None;
        }
        if pair[1] != pair[0] {
            turns += 1;
        }
    }
    Some((turns, length))
}
