//! Connector path model.
//!
//! A [`Connector`] owns its control points and style, applies interactive
//! edits, and turns the result into a [`RenderPath`]. Edits leave the model
//! dirty; [`Connector::parse`] drains the dirty segments, enforces the end
//! directions and rebuilds the path.

use std::fmt;
use std::rc::Rc;

use crate::config::ConnectorStyle;
use crate::errors::ConnectorError;
use crate::geometry::{projection, without_adjacent_duplicates};
use crate::path::RenderPath;
use crate::route::infer::{self, Scope};
use crate::route::propagate::{Limits, propagate_down, propagate_up};
use crate::route::{
    ElbowRouter, OrthogonalSegments, PointChain, SegmentEnds, correct, tracker,
};
use crate::types::{BBox, Direction, Point, pt};

/// Hooks fired while a connector re-routes. Every method defaults to a
/// no-op.
pub trait ConnectorObserver {
    /// The first segment no longer leaves in `direction` and is being rebuilt.
    fn head_direction_changed(&mut self, _direction: Direction) {}

    /// The last segment no longer arrives from `direction` and is being
    /// rebuilt.
    fn tail_direction_changed(&mut self, _direction: Direction) {}

    /// The dirty segment starting at `index` was replaced by `route`.
    fn segment_rebuilt(&mut self, _index: usize, _route: &[Point]) {}
}

/// An orthogonal connector between two shapes.
pub struct Connector {
    chain: PointChain,
    style: ConnectorStyle,
    router: Rc<dyn OrthogonalSegments>,
    path: RenderPath,
    head_offset_point: Option<Point>,
    tail_offset_point: Option<Point>,
    observer: Option<Box<dyn ConnectorObserver>>,
}

impl Connector {
    /// Connector through `points` with the default style and router.
    pub fn new(points: &[Point]) -> Self {
        Self {
            chain: PointChain::from_points(points),
            style: ConnectorStyle::default(),
            router: Rc::new(ElbowRouter),
            path: RenderPath::new(),
            head_offset_point: None,
            tail_offset_point: None,
            observer: None,
        }
    }

    pub fn with_style(mut self, style: ConnectorStyle) -> Self {
        self.set_style(style);
        self
    }

    /// Replace the orthogonal segment primitive.
    pub fn with_router(mut self, router: impl OrthogonalSegments + 'static) -> Self {
        self.router = Rc::new(router);
        self.invalidate();
        self
    }

    pub fn set_observer(&mut self, observer: Box<dyn ConnectorObserver>) {
        self.observer = Some(observer);
    }

    pub fn style(&self) -> &ConnectorStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: ConnectorStyle) {
        self.style = style;
        self.invalidate();
    }

    pub fn set_head_direction(&mut self, direction: Direction) {
        self.style.set_head_direction(direction);
        self.invalidate();
    }

    pub fn set_tail_direction(&mut self, direction: Direction) {
        self.style.set_tail_direction(direction);
        self.invalidate();
    }

    pub fn set_head_offset(&mut self, offset: f64) -> Result<(), ConnectorError> {
        self.style.set_head_offset(offset)?;
        self.invalidate();
        Ok(())
    }

    pub fn set_tail_offset(&mut self, offset: f64) -> Result<(), ConnectorError> {
        self.style.set_tail_offset(offset)?;
        self.invalidate();
        Ok(())
    }

    pub fn set_corner_radius(&mut self, radius: f64) -> Result<(), ConnectorError> {
        self.style.set_corner_radius(radius)?;
        self.invalidate();
        Ok(())
    }

    pub fn set_break_distance(&mut self, distance: f64) -> Result<(), ConnectorError> {
        self.style.set_break_distance(distance)?;
        self.invalidate();
        Ok(())
    }

    pub fn chain(&self) -> &PointChain {
        &self.chain
    }

    pub fn points(&self) -> Vec<Point> {
        self.chain.points()
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Replace every control point. Pins, dirty marks and the cached path
    /// are dropped with the old points.
    pub fn set_control_points(&mut self, points: &[Point]) {
        self.chain = PointChain::from_points(points);
        self.invalidate();
    }

    /// Move control point `index` to `(x, y)`.
    ///
    /// The head and tail drag their neighbors along to keep segments
    /// orthogonal and long enough; interior points move alone.
    pub fn update_point_at_index(
        &mut self,
        index: usize,
        x: f64,
        y: f64,
    ) -> Result<(), ConnectorError> {
        let n = self.check_index(index)?;

        if n == 1 {
            self.chain.set_point(0, pt(x, y));
            self.invalidate();
            return Ok(());
        }

        if index != 0 && index != n - 1 {
            self.chain.set_point(index, pt(x, y));
            self.invalidate();
            return Ok(());
        }

        let current = self.chain.point(index);
        let (dx, dy) = (x - current.x, y - current.y);
        if dx == 0.0 && dy == 0.0 {
            return Ok(());
        }
        crate::log::debug!(index, dx, dy, "dragging connector end");
        if index == 0 {
            let limits = self.limits(self.style.effective_head_offset().raw());
            propagate_up(&mut self.chain, 0, dx, dy, &limits);
        } else {
            let limits = self.limits(self.style.effective_tail_offset().raw());
            propagate_down(&mut self.chain, n - 1, dx, dy, &limits);
        }

        self.chain = correct(&self.chain);
        self.invalidate();
        Ok(())
    }

    /// Finish a drag of point `index`. The settled shape is re-classified on
    /// the next parse.
    pub fn update_point_completed(&mut self, index: usize) -> Result<(), ConnectorError> {
        self.check_index(index)?;
        self.chain.clear_pins();
        self.invalidate();
        Ok(())
    }

    /// Rebuild every diagonal segment that is not pinned.
    pub fn infer(&mut self) {
        let ends = self.segment_ends();
        let observer = &mut self.observer;
        let inferred = infer::infer_with(
            &self.chain,
            &ends,
            &*self.router,
            Scope::All,
            &mut |index, route| {
                if let Some(o) = observer.as_deref_mut() {
                    o.segment_rebuilt(index, route);
                }
            },
        );
        self.chain = correct(&inferred);
        self.chain.clear_dirty();
        self.invalidate();
    }

    /// Bring the points up to date and rebuild the render path.
    ///
    /// Returns `false` when there are no control points to draw.
    pub fn parse(&mut self) -> bool {
        if self.chain.is_empty() {
            self.invalidate();
            return false;
        }

        let ends = self.segment_ends();

        if self.chain.has_dirty() {
            let observer = &mut self.observer;
            let inferred = infer::infer_with(
                &self.chain,
                &ends,
                &*self.router,
                Scope::Dirty,
                &mut |index, route| {
                    if let Some(o) = observer.as_deref_mut() {
                        o.segment_rebuilt(index, route);
                    }
                },
            );
            self.chain = correct(&inferred);
            self.chain.clear_dirty();
        }

        let head = self.style.head_direction();
        if infer::head_direction_changed(&self.chain, head) {
            crate::log::debug!(%head, "head direction changed");
            if let Some(o) = self.observer.as_deref_mut() {
                o.head_direction_changed(head);
            }
            self.chain = infer::rebuild_head(&self.chain, &ends, &*self.router);
        }

        let tail = self.style.tail_direction();
        if infer::tail_direction_changed(&self.chain, tail) {
            crate::log::debug!(%tail, "tail direction changed");
            if let Some(o) = self.observer.as_deref_mut() {
                o.tail_direction_changed(tail);
            }
            self.chain = infer::rebuild_tail(&self.chain, &ends, &*self.router);
        }

        self.build_path();
        tracker::classify(&mut self.chain);
        true
    }

    /// The path built by the last parse. Empty until parsed.
    pub fn path(&self) -> &RenderPath {
        &self.path
    }

    /// Bounds of the render path, parsing first if it is stale.
    pub fn bounding_box(&mut self) -> BBox {
        if self.path.is_empty() {
            self.parse();
        }
        self.path.bounding_box()
    }

    /// Where the drawn path starts, after a parse.
    pub fn head_offset_point(&self) -> Option<Point> {
        self.head_offset_point
    }

    /// Where the drawn path ends, after a parse.
    pub fn tail_offset_point(&self) -> Option<Point> {
        self.tail_offset_point
    }

    /// Pin (or release) point 1 so the first segment keeps its diagonal.
    pub fn set_first_segment_orthogonal(&mut self, orthogonal: bool) {
        if self.chain.len() < 3 {
            return;
        }
        if orthogonal {
            self.chain.unpin(1);
        } else {
            self.chain.pin(1);
        }
        self.invalidate();
    }

    /// Pin (or release) the second-to-last point so the last segment keeps
    /// its diagonal.
    pub fn set_last_segment_orthogonal(&mut self, orthogonal: bool) {
        let n = self.chain.len();
        if n < 3 {
            return;
        }
        if orthogonal {
            self.chain.unpin(n - 2);
        } else {
            self.chain.pin(n - 2);
        }
        self.invalidate();
    }

    pub fn head_reference_point_index(&self) -> Option<usize> {
        tracker::head_reference_index(&self.chain)
    }

    pub fn tail_reference_point_index(&self) -> Option<usize> {
        tracker::tail_reference_index(&self.chain)
    }

    /// Copy of the geometry and style. The observer is not carried over.
    pub fn clone_line(&self) -> Connector {
        Connector {
            chain: self.chain.clone(),
            style: self.style,
            router: Rc::clone(&self.router),
            path: RenderPath::new(),
            head_offset_point: None,
            tail_offset_point: None,
            observer: None,
        }
    }

    fn check_index(&self, index: usize) -> Result<usize, ConnectorError> {
        let len = self.chain.len();
        if index >= len {
            return Err(ConnectorError::IndexOutOfRange { index, len });
        }
        Ok(len)
    }

    fn segment_ends(&self) -> SegmentEnds {
        SegmentEnds {
            head_direction: self.style.head_direction(),
            tail_direction: self.style.tail_direction(),
            head_offset: self.style.effective_head_offset(),
            tail_offset: self.style.effective_tail_offset(),
        }
    }

    fn limits(&self, end_min: f64) -> Limits {
        Limits {
            end_min,
            interior_min: self.style.break_distance().raw(),
            reserve: (self.style.effective_head_offset() + self.style.effective_tail_offset())
                .raw(),
        }
    }

    fn build_path(&mut self) {
        let mut points = without_adjacent_duplicates(&self.chain.points());
        let n = points.len();

        let (head, tail) = if n == 1 {
            infer::stub(points[0], self.style.head_offset(), self.style.tail_offset())
        } else {
            (
                projection(points[0], points[1], self.style.head_offset().raw()),
                projection(points[n - 1], points[n - 2], self.style.tail_offset().raw()),
            )
        };

        if n == 1 {
            points = vec![head, tail];
        } else {
            points[0] = head;
            points[n - 1] = tail;
        }

        self.path = RenderPath::polyline(&points, self.style.corner_radius().raw());
        self.head_offset_point = Some(head);
        self.tail_offset_point = Some(tail);
        crate::log::debug!(points = points.len(), path = %self.path, "built render path");
    }

    fn invalidate(&mut self) {
        self.path.clear();
        self.head_offset_point = None;
        self.tail_offset_point = None;
    }
}

impl fmt::Debug for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connector")
            .field("points", &self.chain.points())
            .field("style", &self.style)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Default, Clone)]
    struct Recorder {
        events: Rc<RefCell<Vec<String>>>,
    }

    impl ConnectorObserver for Recorder {
        fn head_direction_changed(&mut self, direction: Direction) {
            self.events.borrow_mut().push(format!("head {direction}"));
        }

        fn tail_direction_changed(&mut self, direction: Direction) {
            self.events.borrow_mut().push(format!("tail {direction}"));
        }

        fn segment_rebuilt(&mut self, index: usize, route: &[Point]) {
            self.events
                .borrow_mut()
                .push(format!("segment {index} ({} points)", route.len()));
        }
    }

    #[test]
    fn empty_connector_has_no_path() {
        let mut c = Connector::new(&[]);
        assert!(!c.parse());
        assert_eq!(c.bounding_box(), BBox::zero());
    }

    #[test]
    fn out_of_range_index_is_reported() {
        let mut c = Connector::new(&[pt(0.0, 0.0), pt(10.0, 0.0)]);
        assert_eq!(
            c.update_point_at_index(2, 0.0, 0.0),
            Err(ConnectorError::IndexOutOfRange { index: 2, len: 2 })
        );
        assert!(c.update_point_completed(5).is_err());
    }

    #[test]
    fn single_point_moves_directly() {
        let mut c = Connector::new(&[pt(5.0, 5.0)]);
        c.update_point_at_index(0, 20.0, 30.0).unwrap();
        assert_eq!(c.points(), vec![pt(20.0, 30.0)]);
    }

    #[test]
    fn single_point_renders_a_stub() {
        let mut c = Connector::new(&[pt(10.0, 10.0)]);
        c.set_head_offset(2.0).unwrap();
        c.set_tail_offset(5.0).unwrap();
        assert!(c.parse());
        assert_eq!(c.path().to_string(), "M12,12 L15,15");
    }

    #[test]
    fn interior_points_move_alone() {
        let mut c = Connector::new(&[pt(0.0, 0.0), pt(50.0, 0.0), pt(50.0, 50.0)]);
        c.update_point_at_index(1, 60.0, 10.0).unwrap();
        assert_eq!(
            c.points(),
            vec![pt(0.0, 0.0), pt(60.0, 10.0), pt(50.0, 50.0)]
        );
        assert!(!c.chain().has_dirty());
    }

    #[test]
    fn collinear_interior_drag_keeps_the_point() {
        let mut c = Connector::new(&[pt(0.0, 0.0), pt(50.0, 30.0), pt(100.0, 0.0)]);
        c.update_point_at_index(1, 50.0, 0.0).unwrap();
        assert_eq!(c.len(), 3);

        c.update_point_at_index(1, 50.0, 10.0).unwrap();
        assert_eq!(
            c.points(),
            vec![pt(0.0, 0.0), pt(50.0, 10.0), pt(100.0, 0.0)]
        );
    }

    #[test]
    fn interior_drag_leaves_no_loose_diagonal() {
        use crate::geometry::is_orthogonal;

        let mut c = Connector::new(&[pt(0.0, 0.0), pt(50.0, 0.0), pt(50.0, 50.0)]);
        c.update_point_at_index(1, 60.0, 0.0).unwrap();
        assert!(c.parse());
        assert!(c.parse());

        assert_eq!(
            c.points(),
            vec![pt(0.0, 0.0), pt(60.0, 0.0), pt(50.0, 50.0)]
        );
        assert!(c.chain().is_pinned(1));
        for i in 0..c.len() - 1 {
            let chain = c.chain();
            assert!(
                is_orthogonal(chain.point(i), chain.point(i + 1))
                    || tracker::is_segment_pinned(chain, i),
                "segment {i} is diagonal and free"
            );
        }
    }

    #[test]
    fn head_drag_within_segment_stops_at_neighbor() {
        let mut c = Connector::new(&[pt(0.0, 0.0), pt(100.0, 0.0), pt(100.0, 100.0)]);
        c.update_point_at_index(0, 20.0, 0.0).unwrap();
        assert_eq!(
            c.points(),
            vec![pt(20.0, 0.0), pt(100.0, 0.0), pt(100.0, 100.0)]
        );
    }

    #[test]
    fn broken_segment_is_rebuilt_on_parse() {
        let mut c = Connector::new(&[pt(0.0, 0.0), pt(100.0, 0.0)]);
        let recorder = Recorder::default();
        c.set_observer(Box::new(recorder.clone()));

        c.update_point_at_index(0, 0.0, 20.0).unwrap();
        assert!(c.chain().is_dirty(0));

        assert!(c.parse());
        assert_eq!(
            c.points(),
            vec![pt(0.0, 20.0), pt(100.0, 20.0), pt(100.0, 0.0)]
        );
        assert!(!c.chain().has_dirty());
        assert_eq!(*recorder.events.borrow(), vec!["segment 0 (3 points)"]);
    }

    #[test]
    fn head_direction_mismatch_triggers_rebuild() {
        let mut c = Connector::new(&[pt(0.0, 0.0), pt(100.0, 0.0)]);
        let recorder = Recorder::default();
        c.set_observer(Box::new(recorder.clone()));
        c.set_head_direction(Direction::West);

        assert!(c.parse());
        assert_eq!(
            c.points(),
            vec![
                pt(0.0, 0.0),
                pt(-10.0, 0.0),
                pt(-10.0, -10.0),
                pt(100.0, -10.0),
                pt(100.0, 0.0),
            ]
        );
        assert_eq!(*recorder.events.borrow(), vec!["head west"]);

        // Already satisfied: a second parse leaves everything alone.
        assert!(c.parse());
        assert_eq!(recorder.events.borrow().len(), 1);
    }

    #[test]
    fn offsets_pull_the_path_off_the_ends() {
        let mut c = Connector::new(&[pt(0.0, 0.0), pt(100.0, 0.0), pt(100.0, 50.0)]);
        c.set_head_offset(5.0).unwrap();
        c.set_tail_offset(10.0).unwrap();
        assert!(c.parse());
        assert_eq!(c.head_offset_point(), Some(pt(5.0, 0.0)));
        assert_eq!(c.tail_offset_point(), Some(pt(100.0, 40.0)));
        assert_eq!(c.path().to_string(), "M5,0 L100,0 L100,40");
    }

    #[test]
    fn edits_invalidate_the_path() {
        let mut c = Connector::new(&[pt(0.0, 0.0), pt(100.0, 0.0)]);
        c.parse();
        assert!(!c.path().is_empty());
        c.set_corner_radius(4.0).unwrap();
        assert!(c.path().is_empty());
        assert_eq!(c.head_offset_point(), None);
    }

    #[test]
    fn invalid_style_values_are_rejected() {
        let mut c = Connector::new(&[pt(0.0, 0.0), pt(100.0, 0.0)]);
        assert!(c.set_head_offset(-1.0).is_err());
        assert!(c.set_break_distance(f64::NAN).is_err());
        assert_eq!(c.style().head_offset().raw(), 0.0);
    }

    #[test]
    fn classification_runs_after_parse_and_resets_on_completion() {
        let mut c = Connector::new(&[
            pt(0.0, 0.0),
            pt(50.0, 50.0),
            pt(100.0, 0.0),
            pt(150.0, 50.0),
        ]);
        assert_eq!(c.head_reference_point_index(), None);
        c.parse();
        assert_eq!(c.chain().pinned_indices(), vec![1, 2]);
        assert_eq!(c.head_reference_point_index(), Some(2));
        assert_eq!(c.tail_reference_point_index(), Some(1));

        c.update_point_completed(1).unwrap();
        assert!(!c.chain().any_pinned());
    }

    #[test]
    fn manual_pins_keep_end_segments_diagonal() {
        let mut c = Connector::new(&[pt(0.0, 0.0), pt(50.0, 50.0), pt(50.0, 100.0)]);
        c.set_first_segment_orthogonal(false);
        assert!(c.chain().is_pinned(1));
        c.infer();
        assert_eq!(
            c.points(),
            vec![pt(0.0, 0.0), pt(50.0, 50.0), pt(50.0, 100.0)]
        );

        c.set_first_segment_orthogonal(true);
        c.infer();
        assert_eq!(
            c.points(),
            vec![pt(0.0, 0.0), pt(50.0, 0.0), pt(50.0, 100.0)]
        );
    }

    #[test]
    fn clone_line_copies_geometry_not_observer() {
        let mut c = Connector::new(&[pt(0.0, 0.0), pt(30.0, 0.0)]);
        c.set_head_direction(Direction::East);
        let recorder = Recorder::default();
        c.set_observer(Box::new(recorder.clone()));

        let mut copy = c.clone_line();
        assert_eq!(copy.points(), c.points());
        assert_eq!(copy.style(), c.style());
        copy.set_head_direction(Direction::West);
        copy.parse();
        assert!(recorder.events.borrow().is_empty());
    }
}
