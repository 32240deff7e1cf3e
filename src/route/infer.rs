//! Direction inference: rebuilds diagonal segments as orthogonal detours and
//! enforces the head/tail exit directions.
//!
//! Detour points are spliced in as fresh, untagged slots. The first and last
//! slots of the input always come out unchanged.

use crate::geometry::{is_orthogonal, orthogonal_direction};
use crate::route::chain::{PointChain, Slot};
use crate::route::correct::correct;
use crate::route::segment::{OrthogonalSegments, SegmentEnds};
use crate::route::tracker::is_segment_pinned;
use crate::types::{Direction, Length, Point};

/// Which diagonal segments get rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Every diagonal segment that is not pinned.
    All,
    /// Only segments whose start point was marked dirty.
    Dirty,
}

/// Rebuild every unpinned diagonal segment of `chain`.
pub fn infer(
    chain: &PointChain,
    ends: &SegmentEnds,
    router: &dyn OrthogonalSegments,
) -> PointChain {
    infer_with(chain, ends, router, Scope::All, &mut |_, _| {})
}

/// Rebuild the segments selected by `scope`, reporting each rebuilt segment
/// (start index in `chain`, detour route) to `on_rebuilt`.
pub fn infer_with(
    chain: &PointChain,
    ends: &SegmentEnds,
    router: &dyn OrthogonalSegments,
    scope: Scope,
    on_rebuilt: &mut dyn FnMut(usize, &[Point]),
) -> PointChain {
    let n = chain.len();
    if n < 2 {
        return chain.clone();
    }

    let mut out = PointChain::new();
    out.push(chain.slot(0));
    for i in 0..n - 1 {
        let p0 = chain.point(i);
        let p1 = chain.point(i + 1);
        let selected = match scope {
            Scope::All => true,
            Scope::Dirty => chain.is_dirty(i),
        };
        if selected && !is_orthogonal(p0, p1) && !is_segment_pinned(chain, i) {
            let route = router.expand_to_orthogonal(p0, p1, &segment_ends(ends, i, n));
            crate::log::debug!(index = i, points = route.len(), "rebuilt orthogonal segment");
            on_rebuilt(i, &route);
            for &p in interior(&route) {
                out.push(Slot::fresh(p));
            }
        }
        out.push(chain.slot(i + 1));
    }
    out
}

/// Render endpoints for a single-point connector: the point pushed down and
/// right by the head and tail offsets independently.
pub fn stub(point: Point, head_offset: Length, tail_offset: Length) -> (Point, Point) {
    let h = head_offset.raw();
    let t = tail_offset.raw();
    (point + Point::new(h, h), point + Point::new(t, t))
}

/// Whether the first segment runs against the configured head direction.
pub fn head_direction_changed(chain: &PointChain, head: Direction) -> bool {
    if chain.len() < 2 || head == Direction::None || chain.is_pinned(1) {
        return false;
    }
    realized(chain.point(0), chain.point(1)).is_some_and(|d| d != head)
}

/// Whether the last segment runs against the configured tail direction.
pub fn tail_direction_changed(chain: &PointChain, tail: Direction) -> bool {
    let n = chain.len();
    if n < 2 || tail == Direction::None || chain.is_pinned(n - 2) {
        return false;
    }
    realized(chain.point(n - 1), chain.point(n - 2)).is_some_and(|d| d != tail)
}

/// Reroute from the head up to the first pinned point with the head
/// direction enforced. Everything from the pinned point on is kept.
pub fn rebuild_head(
    chain: &PointChain,
    ends: &SegmentEnds,
    router: &dyn OrthogonalSegments,
) -> PointChain {
    let n = chain.len();
    let stop = (1..n).find(|&i| chain.is_pinned(i)).unwrap_or(n);
    let anchor = stop - 1;

    let seg_ends = SegmentEnds {
        head_direction: ends.head_direction,
        head_offset: ends.head_offset,
        tail_direction: if anchor == n - 1 {
            ends.tail_direction
        } else {
            Direction::None
        },
        tail_offset: if anchor == n - 1 {
            ends.tail_offset
        } else {
            Length::ZERO
        },
    };
    let route = router.expand_to_orthogonal(chain.point(0), chain.point(anchor), &seg_ends);
    crate::log::debug!(anchor, points = route.len(), "head direction rebuild");

    let mut out = PointChain::new();
    out.push(chain.slot(0));
    for &p in interior(&route) {
        out.push(Slot::fresh(p));
    }
    for i in anchor..n {
        out.push(chain.slot(i));
    }
    correct(&out)
}

/// Reroute from the last pinned point down to the tail with the tail
/// direction enforced. Everything up to the pinned point is kept.
pub fn rebuild_tail(
    chain: &PointChain,
    ends: &SegmentEnds,
    router: &dyn OrthogonalSegments,
) -> PointChain {
    let n = chain.len();
    let anchor = (0..n - 1)
        .rev()
        .find(|&i| chain.is_pinned(i))
        .map_or(0, |i| i + 1);

    let seg_ends = SegmentEnds {
        head_direction: if anchor == 0 {
            ends.head_direction
        } else {
            Direction::None
        },
        head_offset: if anchor == 0 {
            ends.head_offset
        } else {
            Length::ZERO
        },
        tail_direction: ends.tail_direction,
        tail_offset: ends.tail_offset,
    };
    let route = router.expand_to_orthogonal(chain.point(anchor), chain.point(n - 1), &seg_ends);
    crate::log::debug!(anchor, points = route.len(), "tail direction rebuild");

    let mut out = PointChain::new();
    for i in 0..=anchor {
        out.push(chain.slot(i));
    }
    for &p in interior(&route) {
        out.push(Slot::fresh(p));
    }
    out.push(chain.slot(n - 1));
    correct(&out)
}

/// Direction and offsets that apply to the segment starting at `index`.
fn segment_ends(ends: &SegmentEnds, index: usize, n: usize) -> SegmentEnds {
    let at_head = index == 0;
    let at_tail = index + 2 == n;
    SegmentEnds {
        head_direction: if at_head {
            ends.head_direction
        } else {
            Direction::None
        },
        head_offset: if at_head { ends.head_offset } else { Length::ZERO },
        tail_direction: if at_tail {
            ends.tail_direction
        } else {
            Direction::None
        },
        tail_offset: if at_tail { ends.tail_offset } else { Length::ZERO },
    }
}

fn interior(route: &[Point]) -> &[Point] {
    if route.len() > 2 {
        &route[1..route.len() - 1]
    } else {
        &[]
    }
}

/// Direction of an orthogonal, non-degenerate segment.
fn realized(from: Point, to: Point) -> Option<Direction> {
    if from == to || !is_orthogonal(from, to) {
        return None;
    }
    Some(orthogonal_direction(from, to))
}
