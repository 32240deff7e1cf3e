//! Owned point arena for a connector.
//!
//! Each slot carries its point plus tag bits. Tags travel with the point when
//! the sequence is spliced or simplified, which gives the pinned and dirty
//! sets stable membership without relying on point identity.

use crate::types::Point;

/// Tag bits attached to a control point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Tags {
    value: u8,
}

impl Tags {
    /// Point sits on an intentional diagonal bend.
    const PINNED: u8 = 1;
    /// Segment leaving this point must be re-inferred.
    const DIRTY: u8 = 2;

    fn has(self, bit: u8) -> bool {
        self.value & bit != 0
    }

    fn set(&mut self, bit: u8) {
        self.value |= bit;
    }

    fn clear(&mut self, bit: u8) {
        self.value &= !bit;
    }
}

/// One control point and its tags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    point: Point,
    tags: Tags,
}

impl Slot {
    /// An untagged slot, as produced for detour points.
    pub fn fresh(point: Point) -> Self {
        Self {
            point,
            tags: Tags::default(),
        }
    }

    pub fn point(&self) -> Point {
        self.point
    }

    pub fn is_pinned(&self) -> bool {
        self.tags.has(Tags::PINNED)
    }

    pub fn is_dirty(&self) -> bool {
        self.tags.has(Tags::DIRTY)
    }
}

/// Ordered control points, head first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointChain {
    slots: Vec<Slot>,
}

impl PointChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: &[Point]) -> Self {
        points.iter().copied().collect()
    }

    pub fn from_slots(slots: Vec<Slot>) -> Self {
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Slot {
        self.slots[index]
    }

    pub fn push(&mut self, slot: Slot) {
        self.slots.push(slot);
    }

    pub fn point(&self, index: usize) -> Point {
        self.slots[index].point
    }

    pub fn first(&self) -> Option<Point> {
        self.slots.first().map(Slot::point)
    }

    pub fn last(&self) -> Option<Point> {
        self.slots.last().map(Slot::point)
    }

    pub fn points(&self) -> Vec<Point> {
        self.slots.iter().map(Slot::point).collect()
    }

    pub fn set_point(&mut self, index: usize, point: Point) {
        self.slots[index].point = point;
    }

    pub fn translate(&mut self, index: usize, dx: f64, dy: f64) {
        let slot = &mut self.slots[index];
        slot.point.x += dx;
        slot.point.y += dy;
    }

    pub fn is_pinned(&self, index: usize) -> bool {
        self.slots[index].is_pinned()
    }

    pub fn pin(&mut self, index: usize) {
        self.slots[index].tags.set(Tags::PINNED);
    }

    pub fn unpin(&mut self, index: usize) {
        self.slots[index].tags.clear(Tags::PINNED);
    }

    pub fn clear_pins(&mut self) {
        for slot in &mut self.slots {
            slot.tags.clear(Tags::PINNED);
        }
    }

    pub fn any_pinned(&self) -> bool {
        self.slots.iter().any(Slot::is_pinned)
    }

    pub fn pinned_indices(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_pinned())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn is_dirty(&self, index: usize) -> bool {
        self.slots[index].is_dirty()
    }

    pub fn mark_dirty(&mut self, index: usize) {
        self.slots[index].tags.set(Tags::DIRTY);
    }

    pub fn has_dirty(&self) -> bool {
        self.slots.iter().any(Slot::is_dirty)
    }

    pub fn clear_dirty(&mut self) {
        for slot in &mut self.slots {
            slot.tags.clear(Tags::DIRTY);
        }
    }
}

impl FromIterator<Point> for PointChain {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self {
            slots: iter.into_iter().map(Slot::fresh).collect(),
        }
    }
}
