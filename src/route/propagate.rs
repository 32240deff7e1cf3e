//! Point propagation: moving an end point drags its neighbors along so the
//! orthogonal segments stay orthogonal and no end segment collapses below
//! its standoff.
//!
//! The walk runs in two phases over an explicit step list. The forward pass
//! decides, segment by segment, how much of the motion the moved point keeps
//! and how much it hands to its neighbor; it only reads positions. The
//! settle pass then applies the moves from the far end back toward the
//! dragged point and marks segments that lost their axis as dirty.

use crate::geometry::{is_horizontal, is_vertical};
use crate::route::chain::PointChain;

/// Length limits for one propagation walk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limits {
    /// Shortest allowed segment at either end of the chain.
    pub end_min: f64,
    /// Shortest allowed interior segment (the break distance).
    pub interior_min: f64,
    /// Head plus tail routing offsets, kept clear of the opposite end.
    pub reserve: f64,
}

/// Walk direction. The opposite-end clamp compares differently per
/// direction, so the two are kept distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Walk {
    /// Toward the tail.
    Up,
    /// Toward the head.
    Down,
}

#[derive(Debug, Clone, Copy)]
struct Step {
    index: usize,
    neighbor: usize,
    dx: f64,
    dy: f64,
    horizontal: bool,
    vertical: bool,
}

/// Move point `index` by `(dx, dy)`, pushing points toward the tail.
pub fn propagate_up(chain: &mut PointChain, index: usize, dx: f64, dy: f64, limits: &Limits) {
    let n = chain.len();
    let mut steps = Vec::new();
    let (mut index, mut dx, mut dy) = (index, dx, dy);

    while (dx != 0.0 || dy != 0.0) && index + 1 < n {
        let next_index = index + 1;
        let candidate = chain.point(index);
        let next = chain.point(next_index);
        let mut step = Step {
            index,
            neighbor: next_index,
            dx,
            dy,
            horizontal: false,
            vertical: false,
        };
        let (mut px, mut py) = (0.0, 0.0);

        if !chain.is_pinned(next_index) {
            step.horizontal = is_horizontal(candidate, next);
            step.vertical = is_vertical(candidate, next);

            let next_is_last = n > 2 && next_index >= n - 1;
            let min = if index < 1 || next_is_last {
                limits.end_min
            } else {
                limits.interior_min
            };
            let last = if index == 0 || next_is_last {
                chain.last()
            } else {
                None
            };

            if step.horizontal {
                let reference = last.map(|l| l.x - limits.reserve);
                px = segment_advance(Walk::Up, candidate.x, next.x, dx, min, reference);
                py = dy;
                if next_is_last && px != 0.0 {
                    dx = 0.0;
                }
                if next_is_last {
                    dy = 0.0;
                }
            } else if step.vertical {
                if next_is_last {
                    dx = 0.0;
                }
                px = dx;
                let reference = last.map(|l| l.y - limits.reserve);
                py = segment_advance(Walk::Up, candidate.y, next.y, dy, min, reference);
                if next_is_last && py != 0.0 {
                    dy = 0.0;
                }
            }
        }

        step.dx = dx;
        step.dy = dy;
        steps.push(step);
        crate::log::trace!(index, px, py, "propagating up");

        if px == 0.0 && py == 0.0 {
            break;
        }
        index = next_index;
        dx = px;
        dy = py;
    }

    settle(chain, &steps);
}

/// Move point `index` by `(dx, dy)`, pushing points toward the head.
pub fn propagate_down(chain: &mut PointChain, index: usize, dx: f64, dy: f64, limits: &Limits) {
    let n = chain.len();
    let mut steps = Vec::new();
    let (mut index, mut dx, mut dy) = (index, dx, dy);

    while (dx != 0.0 || dy != 0.0) && index >= 1 {
        let next_index = index - 1;
        let candidate = chain.point(index);
        let next = chain.point(next_index);
        let mut step = Step {
            index,
            neighbor: next_index,
            dx,
            dy,
            horizontal: false,
            vertical: false,
        };
        let (mut px, mut py) = (0.0, 0.0);

        if !chain.is_pinned(next_index) {
            step.horizontal = is_horizontal(candidate, next);
            step.vertical = is_vertical(candidate, next);

            let next_is_first = n > 2 && next_index < 1;
            let min = if index >= n - 1 || next_is_first {
                limits.end_min
            } else {
                limits.interior_min
            };
            let first = if n > 2 && (index == n - 1 || next_is_first) {
                chain.first()
            } else {
                None
            };

            if step.horizontal {
                let reference = first.map(|f| f.x + limits.reserve);
                px = segment_advance(Walk::Down, candidate.x, next.x, dx, min, reference);
                py = dy;
                if next_is_first && px != 0.0 {
                    dx = 0.0;
                }
                if next_is_first {
                    dy = 0.0;
                }
            } else if step.vertical {
                if next_is_first {
                    dx = 0.0;
                }
                px = dx;
                let reference = first.map(|f| f.y + limits.reserve);
                py = segment_advance(Walk::Down, candidate.y, next.y, dy, min, reference);
                if next_is_first && py != 0.0 {
                    dy = 0.0;
                }
            }
        }

        step.dx = dx;
        step.dy = dy;
        steps.push(step);
        crate::log::trace!(index, px, py, "propagating down");

        if px == 0.0 && py == 0.0 {
            break;
        }
        index = next_index;
        dx = px;
        dy = py;
    }

    settle(chain, &steps);
}

/// Apply the recorded moves far end first, then flag segments whose axis
/// broke under the perpendicular part of the motion.
fn settle(chain: &mut PointChain, steps: &[Step]) {
    for step in steps.iter().rev() {
        if step.dx != 0.0 || step.dy != 0.0 {
            chain.translate(step.index, step.dx, step.dy);
        }

        let candidate = chain.point(step.index);
        let next = chain.point(step.neighbor);
        let lost_horizontal = step.horizontal && step.dy != 0.0 && candidate.y != next.y;
        let lost_vertical = step.vertical && step.dx != 0.0 && candidate.x != next.x;
        if lost_horizontal || lost_vertical {
            chain.mark_dirty(step.index.min(step.neighbor));
        }
    }
}

/// Share of a move along a segment's axis that the neighbor must take.
///
/// `candidate` moves by `dist` toward or away from `next`. A shrinking
/// segment absorbs the move until it would drop below `min`, then hands the
/// rest on. A growing segment hands nothing on unless a `reference`
/// coordinate near the opposite end exists, in which case the move is
/// clamped against it.
fn segment_advance(
    walk: Walk,
    candidate: f64,
    next: f64,
    dist: f64,
    min: f64,
    reference: Option<f64>,
) -> f64 {
    let toward = if next > candidate { 1.0 } else { -1.0 };
    let span = (next - candidate).abs();
    let moved = candidate + dist;
    let d = if next > candidate {
        next - moved
    } else {
        moved - next
    };
    let grows = d > span;

    if !grows {
        return if d >= min {
            0.0
        } else {
            moved + min * toward - next
        };
    }
    if d < min {
        return 0.0;
    }
    let Some(r) = reference else {
        return 0.0;
    };
    let past = match walk {
        Walk::Up => moved < r,
        Walk::Down => moved > r,
    };
    if past {
        let beyond = match walk {
            Walk::Up => candidate < r,
            Walk::Down => candidate > r,
        };
        if beyond { 0.0 } else { r - candidate }
    } else {
        dist
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Point, pt};

    const LIMITS: Limits = Limits {
        end_min: 10.0,
        interior_min: 0.0,
        reserve: 20.0,
    };

    fn chain(points: &[Point]) -> PointChain {
        PointChain::from_points(points)
    }

    #[test]
    fn zero_move_is_a_no_op() {
        let mut c = chain(&[pt(0.0, 0.0), pt(100.0, 0.0)]);
        let before = c.clone();
        propagate_up(&mut c, 0, 0.0, 0.0, &LIMITS);
        assert_eq!(c, before);
    }

    #[test]
    fn shrinking_segment_absorbs_the_move() {
        let mut c = chain(&[pt(0.0, 0.0), pt(100.0, 0.0), pt(100.0, 100.0)]);
        propagate_up(&mut c, 0, 20.0, 0.0, &LIMITS);
        assert_eq!(
            c.points(),
            vec![pt(20.0, 0.0), pt(100.0, 0.0), pt(100.0, 100.0)]
        );
        assert!(!c.has_dirty());
    }

    #[test]
    fn perpendicular_motion_carries_the_neighbor() {
        let mut c = chain(&[pt(0.0, 0.0), pt(100.0, 0.0), pt(100.0, 100.0)]);
        propagate_up(&mut c, 0, 0.0, 20.0, &LIMITS);
        assert_eq!(
            c.points(),
            vec![pt(0.0, 20.0), pt(100.0, 20.0), pt(100.0, 100.0)]
        );
        assert!(!c.has_dirty());
    }

    #[test]
    fn segment_below_minimum_pushes_on() {
        let mut c = chain(&[
            pt(0.0, 0.0),
            pt(100.0, 0.0),
            pt(100.0, 100.0),
            pt(200.0, 100.0),
        ]);
        propagate_up(&mut c, 0, 95.0, 0.0, &LIMITS);
        assert_eq!(
            c.points(),
            vec![
                pt(95.0, 0.0),
                pt(105.0, 0.0),
                pt(105.0, 100.0),
                pt(200.0, 100.0),
            ]
        );
        assert!(!c.has_dirty());
    }

    #[test]
    fn tail_walk_pushes_toward_head() {
        let mut c = chain(&[
            pt(0.0, 0.0),
            pt(100.0, 0.0),
            pt(100.0, 100.0),
            pt(200.0, 100.0),
        ]);
        propagate_down(&mut c, 3, -95.0, 0.0, &LIMITS);
        assert_eq!(
            c.points(),
            vec![
                pt(0.0, 0.0),
                pt(95.0, 0.0),
                pt(95.0, 100.0),
                pt(105.0, 100.0),
            ]
        );
    }

    #[test]
    fn broken_axis_is_marked_dirty() {
        let mut c = chain(&[pt(0.0, 0.0), pt(100.0, 0.0)]);
        propagate_up(&mut c, 0, 0.0, 20.0, &LIMITS);
        assert_eq!(c.points(), vec![pt(0.0, 20.0), pt(100.0, 0.0)]);
        assert!(c.is_dirty(0));
    }

    #[test]
    fn tail_walk_marks_the_segment_start() {
        let mut c = chain(&[pt(0.0, 0.0), pt(0.0, 100.0)]);
        propagate_down(&mut c, 1, 30.0, 0.0, &LIMITS);
        assert_eq!(c.points(), vec![pt(0.0, 0.0), pt(30.0, 100.0)]);
        assert!(c.is_dirty(0));
        assert!(!c.is_dirty(1));
    }

    #[test]
    fn pinned_neighbor_absorbs_motion() {
        let mut c = chain(&[pt(0.0, 0.0), pt(100.0, 0.0), pt(150.0, 50.0)]);
        c.pin(1);
        propagate_up(&mut c, 0, 0.0, 20.0, &LIMITS);
        assert_eq!(
            c.points(),
            vec![pt(0.0, 20.0), pt(100.0, 0.0), pt(150.0, 50.0)]
        );
        assert!(!c.has_dirty());
    }

    #[test]
    fn moving_back_restores_the_chain() {
        let original = [
            pt(0.0, 0.0),
            pt(100.0, 0.0),
            pt(100.0, 100.0),
            pt(200.0, 100.0),
        ];
        let mut c = chain(&original);
        propagate_up(&mut c, 0, 30.0, 15.0, &LIMITS);
        propagate_up(&mut c, 0, -30.0, -15.0, &LIMITS);
        assert_eq!(c.points(), original.to_vec());
    }

    #[test]
    fn advance_regimes() {
        // Shrinks but stays long enough.
        assert_eq!(segment_advance(Walk::Up, 0.0, 100.0, 20.0, 10.0, None), 0.0);
        // Shrinks below the minimum: hand on the shortfall.
        assert_eq!(segment_advance(Walk::Up, 0.0, 100.0, 95.0, 10.0, None), 5.0);
        // Grows with no reference: nothing to hand on.
        assert_eq!(segment_advance(Walk::Up, 0.0, 100.0, -20.0, 10.0, None), 0.0);
    }

    #[test]
    fn growth_clamps_differ_by_walk() {
        // Walking up, a move that stays short of the reference is absorbed...
        assert_eq!(
            segment_advance(Walk::Up, 50.0, 0.0, 20.0, 10.0, Some(100.0)),
            0.0
        );
        // ...while walking down the same geometry hands the whole move on.
        assert_eq!(
            segment_advance(Walk::Down, 50.0, 0.0, 20.0, 10.0, Some(100.0)),
            20.0
        );
    }
}
