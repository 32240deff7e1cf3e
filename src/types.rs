//! Numeric and geometric primitives shared by the routing engine.
//!
//! Points are plain `glam::DVec2` values; everything that must stay
//! non-negative (offsets, radii, break distances) goes through [`Length`].

use std::fmt;
use std::ops::{Add, Mul};

use glam::{DVec2, dvec2};

/// A control point. Coordinates are in canvas units, y grows downward.
pub type Point = DVec2;

/// Shorthand for building a [`Point`].
#[inline]
pub fn pt(x: f64, y: f64) -> Point {
    dvec2(x, y)
}

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is negative when non-negative required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// A non-negative distance in canvas units.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Length(f64);

impl Length {
    pub const ZERO: Length = Length(0.0);

    /// Unchecked constructor for crate constants.
    #[inline]
    pub(crate) const fn units(val: f64) -> Length {
        Length(val)
    }

    /// Create a non-negative Length with validation
    #[inline]
    pub fn try_non_negative(val: f64) -> Result<Length, NumericError> {
        if val.is_nan() {
            Err(NumericError::NaN)
        } else if val.is_infinite() {
            Err(NumericError::Infinite)
        } else if val < 0.0 {
            Err(NumericError::Negative)
        } else {
            Ok(Length(val))
        }
    }

    /// Get the raw value
    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }
}

impl Add for Length {
    type Output = Length;
    fn add(self, rhs: Length) -> Length {
        Length(self.0 + rhs.0)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Exit/entry side of a connector end.
///
/// Directions are screen oriented: `South` points toward growing y.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
    #[default]
    None,
}

impl Direction {
    /// Unit step for this direction, zero for `None`.
    pub fn unit(self) -> DVec2 {
        match self {
            Direction::North => dvec2(0.0, -1.0),
            Direction::South => dvec2(0.0, 1.0),
            Direction::East => dvec2(1.0, 0.0),
            Direction::West => dvec2(-1.0, 0.0),
            Direction::None => DVec2::ZERO,
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::None => Direction::None,
        }
    }

    /// `Some(self)` for a concrete direction, `None` for [`Direction::None`].
    pub fn concrete(self) -> Option<Direction> {
        match self {
            Direction::None => None,
            d => Some(d),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::None => "none",
        };
        f.write_str(name)
    }
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    pub min: Point,
    pub max: Point,
}

impl BBox {
    /// Create an empty bounding box (will expand on first point)
    pub fn new() -> Self {
        BBox {
            min: pt(f64::MAX, f64::MAX),
            max: pt(f64::MIN, f64::MIN),
        }
    }

    /// The all-zero box reported for a connector without a path.
    pub fn zero() -> Self {
        BBox {
            min: Point::ZERO,
            max: Point::ZERO,
        }
    }

    /// Check if the bbox is empty (never expanded)
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Expand to include a point
    pub fn expand_point(&mut self, p: Point) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

impl Default for BBox {
    fn default() -> Self {
        Self::new()
    }
}

/// Multiply a direction's unit step by a length to get an offset.
impl Mul<Length> for Direction {
    type Output = DVec2;
    fn mul(self, len: Length) -> DVec2 {
        self.unit() * len.0
    }
}
