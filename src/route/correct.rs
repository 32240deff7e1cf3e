//! Path corrector: drops points that only continue a straight run.
//!
//! Points are kept on a stack. A point is redundant when it lines up on one
//! axis with its kept neighbors on both sides; dropping it can expose another
//! redundant point below it, so the check repeats until the top three turn.
//! Pinned points are bends the user drew and are never dropped. The first and
//! last points always survive.

use crate::route::chain::PointChain;
use crate::types::Point;

/// Simplify a chain, keeping tags on the surviving slots.
pub fn correct(chain: &PointChain) -> PointChain {
    let points = chain.points();
    let kept = kept_indices(&points, |i| chain.is_pinned(i));
    PointChain::from_slots(kept.into_iter().map(|i| chain.slot(i)).collect())
}

/// Simplify a bare point sequence (nothing pinned).
pub fn correct_points(points: &[Point]) -> Vec<Point> {
    kept_indices(points, |_| false)
        .into_iter()
        .map(|i| points[i])
        .collect()
}

fn kept_indices(points: &[Point], pinned: impl Fn(usize) -> bool) -> Vec<usize> {
    let n = points.len();
    if n <= 2 {
        return (0..n).collect();
    }

    let mut kept: Vec<usize> = Vec::with_capacity(n);
    for i in 0..n {
        kept.push(i);
        while let [.., a, b, c] = kept[..] {
            let (p0, p1, p2) = (points[a], points[b], points[c]);
            let vertical_run = p0.x == p1.x && p1.x == p2.x;
            let horizontal_run = p0.y == p1.y && p1.y == p2.y;
            if pinned(b) || !(vertical_run || horizontal_run) {
                break;
            }
            kept.remove(kept.len() - 2);
        }
    }
    kept
}
