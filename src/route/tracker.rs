//! Non-orthogonal point tracking.
//!
//! Pinned points mark diagonal bends the user drew on purpose. They are
//! exempt from auto-orthogonalization, never dropped by the corrector, and
//! absorb propagation instead of passing it on.

use crate::geometry::is_orthogonal;
use crate::route::chain::PointChain;

/// Pin every interior point that touches a diagonal segment.
///
/// Classification is lazy: it only scans when nothing is pinned yet, so
/// manual pins and earlier results stand until they are cleared. Returns
/// whether a scan happened.
pub fn classify(chain: &mut PointChain) -> bool {
    if chain.any_pinned() {
        return false;
    }
    let n = chain.len();
    for i in 1..n.saturating_sub(1) {
        let before = chain.point(i - 1);
        let p = chain.point(i);
        let after = chain.point(i + 1);
        if !is_orthogonal(before, p) || !is_orthogonal(p, after) {
            chain.pin(i);
        }
    }
    true
}

/// A segment touching a pinned point keeps its diagonal.
pub fn is_segment_pinned(chain: &PointChain, index: usize) -> bool {
    chain.is_pinned(index) || chain.is_pinned(index + 1)
}

/// Index of the pinned point closest to the tail.
pub fn head_reference_index(chain: &PointChain) -> Option<usize> {
    chain.pinned_indices().last().copied()
}

/// Index of the pinned point closest to the head.
pub fn tail_reference_index(chain: &PointChain) -> Option<usize> {
    chain.pinned_indices().first().copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::pt;

    #[test]
    fn pins_both_ends_of_interior_diagonals() {
        let mut chain = PointChain::from_points(&[
            pt(0.0, 0.0),
            pt(50.0, 50.0),
            pt(100.0, 0.0),
            pt(100.0, 100.0),
        ]);
        assert!(classify(&mut chain));
        assert_eq!(chain.pinned_indices(), vec![1, 2]);
        assert_eq!(head_reference_index(&chain), Some(2));
        assert_eq!(tail_reference_index(&chain), Some(1));
    }

    #[test]
    fn one_diagonal_neighbor_is_enough() {
        let mut chain =
            PointChain::from_points(&[pt(0.0, 0.0), pt(50.0, 50.0), pt(100.0, 50.0)]);
        classify(&mut chain);
        assert_eq!(chain.pinned_indices(), vec![1]);
        assert_eq!(head_reference_index(&chain), Some(1));
    }

    #[test]
    fn orthogonal_chains_stay_unpinned() {
        let mut chain = PointChain::from_points(&[
            pt(0.0, 0.0),
            pt(50.0, 0.0),
            pt(50.0, 50.0),
            pt(100.0, 50.0),
        ]);
        assert!(classify(&mut chain));
        assert!(!chain.any_pinned());
        assert_eq!(head_reference_index(&chain), None);
    }

    #[test]
    fn existing_pins_suppress_the_scan() {
        let mut chain = PointChain::from_points(&[
            pt(0.0, 0.0),
            pt(50.0, 50.0),
            pt(100.0, 0.0),
            pt(150.0, 50.0),
        ]);
        chain.pin(2);
        assert!(!classify(&mut chain));
        assert_eq!(chain.pinned_indices(), vec![2]);
    }

    #[test]
    fn endpoints_are_never_classified() {
        let mut chain = PointChain::from_points(&[pt(0.0, 0.0), pt(30.0, 40.0)]);
        classify(&mut chain);
        assert!(!chain.any_pinned());
    }

    #[test]
    fn segment_pin_covers_both_ends() {
        let mut chain =
            PointChain::from_points(&[pt(0.0, 0.0), pt(50.0, 50.0), pt(100.0, 0.0)]);
        chain.pin(1);
        assert!(is_segment_pinned(&chain, 0));
        assert!(is_segment_pinned(&chain, 1));
    }
}
