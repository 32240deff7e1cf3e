//! Render path: the drawable outline of a connector.
//!
//! Control points become straight runs, optionally with the interior corners
//! rounded off by quadratic curves. The path is rebuilt wholesale on every
//! parse; it never feeds back into routing.

use std::fmt;

use crate::geometry::radius_midpoint;
use crate::types::{BBox, Point};

/// One drawing command, in absolute coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    /// Quadratic curve through `control` ending at `to`.
    QuadTo { control: Point, to: Point },
}

impl PathCommand {
    /// End point of the command.
    pub fn end(&self) -> Point {
        match *self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => p,
            PathCommand::QuadTo { to, .. } => to,
        }
    }
}

/// Built-up sequence of path commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderPath {
    commands: Vec<PathCommand>,
}

impl RenderPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn m(mut self, p: Point) -> Self {
        self.commands.push(PathCommand::MoveTo(p));
        self
    }

    pub fn l(mut self, p: Point) -> Self {
        self.commands.push(PathCommand::LineTo(p));
        self
    }

    pub fn q(mut self, control: Point, to: Point) -> Self {
        self.commands.push(PathCommand::QuadTo { control, to });
        self
    }

    /// Polyline through `points`, with interior corners rounded by `radius`.
    ///
    /// A corner whose adjacent segments are shorter than `2 * radius` is
    /// rounded from segment midpoints instead. Fewer than two points produce
    /// an empty path.
    pub fn polyline(points: &[Point], radius: f64) -> Self {
        let n = points.len();
        if n < 2 {
            return Self::new();
        }

        let mut path = Self::new().m(points[0]);
        if radius <= 0.0 || n < 3 {
            for &p in &points[1..] {
                path = path.l(p);
            }
            return path;
        }

        let (m, _) = radius_midpoint(points[0], points[1], radius);
        path = path.l(m);
        for i in 1..n - 1 {
            let corner = points[i];
            let next = points[i + 1];
            let (m, is_mid) = radius_midpoint(next, corner, radius);
            path = path.q(corner, m);
            if !is_mid {
                let (m2, _) = radius_midpoint(corner, next, radius);
                path = path.l(m2);
            }
        }
        path.l(points[n - 1])
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Box around every command point, curve control points included.
    ///
    /// An empty path reports [`BBox::zero`].
    pub fn bounding_box(&self) -> BBox {
        if self.commands.is_empty() {
            return BBox::zero();
        }
        let mut bbox = BBox::new();
        for cmd in &self.commands {
            if let PathCommand::QuadTo { control, .. } = cmd {
                bbox.expand_point(*control);
            }
            bbox.expand_point(cmd.end());
        }
        bbox
    }
}

/// SVG path data, e.g. `M0,0 L100,0 L100,50`.
impl fmt::Display for RenderPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cmd) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match cmd {
                PathCommand::MoveTo(p) => write!(f, "M{},{}", p.x, p.y)?,
                PathCommand::LineTo(p) => write!(f, "L{},{}", p.x, p.y)?,
                PathCommand::QuadTo { control, to } => {
                    write!(f, "Q{},{} {},{}", control.x, control.y, to.x, to.y)?
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::pt;

    #[test]
    fn sharp_corners_are_plain_lines() {
        let path = RenderPath::polyline(&[pt(0.0, 0.0), pt(100.0, 0.0), pt(100.0, 50.0)], 0.0);
        assert_eq!(path.to_string(), "M0,0 L100,0 L100,50");
    }

    #[test]
    fn rounded_corner_uses_a_quad() {
        let path = RenderPath::polyline(&[pt(0.0, 0.0), pt(100.0, 0.0), pt(100.0, 50.0)], 10.0);
        assert_eq!(path.to_string(), "M0,0 L90,0 Q100,0 100,10 L100,40 L100,50");
    }

    #[test]
    fn short_segments_round_from_the_midpoint() {
        let path = RenderPath::polyline(
            &[pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 10.0), pt(40.0, 10.0)],
            8.0,
        );
        assert_eq!(
            path.to_string(),
            "M0,0 L5,0 Q10,0 10,5 Q10,10 18,10 L32,10 L40,10"
        );
    }

    #[test]
    fn too_few_points_make_no_path() {
        assert!(RenderPath::polyline(&[pt(1.0, 1.0)], 0.0).is_empty());
        assert!(RenderPath::polyline(&[], 5.0).is_empty());
    }

    #[test]
    fn bounding_box_covers_controls() {
        let path = RenderPath::new()
            .m(pt(0.0, 0.0))
            .q(pt(50.0, -20.0), pt(100.0, 0.0));
        let bbox = path.bounding_box();
        assert_eq!(bbox.min, pt(0.0, -20.0));
        assert_eq!(bbox.max, pt(100.0, 0.0));
        assert_eq!(RenderPath::new().bounding_box(), BBox::zero());
    }
}
