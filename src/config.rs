//! Per-connector style: end directions, standoff offsets, corner radius and
//! break distance.

use crate::defaults;
use crate::errors::ConnectorError;
use crate::types::{Direction, Length};

/// Configuration knobs owned by each [`Connector`](crate::Connector).
///
/// Offsets have two readings. The configured value is what rendering uses to
/// pull the drawn path away from the first/last control point. Routing (stubs
/// and minimum end-segment length) uses the *effective* offset, which falls
/// back to [`defaults::OFFSET`] when nothing is configured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectorStyle {
    head_direction: Direction,
    tail_direction: Direction,
    head_offset: Length,
    tail_offset: Length,
    corner_radius: Length,
    break_distance: Length,
}

impl Default for ConnectorStyle {
    fn default() -> Self {
        Self {
            head_direction: Direction::None,
            tail_direction: Direction::None,
            head_offset: Length::ZERO,
            tail_offset: Length::ZERO,
            corner_radius: defaults::CORNER_RADIUS,
            break_distance: defaults::BREAK_DISTANCE,
        }
    }
}

impl ConnectorStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn head_direction(&self) -> Direction {
        self.head_direction
    }

    pub fn tail_direction(&self) -> Direction {
        self.tail_direction
    }

    pub fn head_offset(&self) -> Length {
        self.head_offset
    }

    pub fn tail_offset(&self) -> Length {
        self.tail_offset
    }

    pub fn corner_radius(&self) -> Length {
        self.corner_radius
    }

    pub fn break_distance(&self) -> Length {
        self.break_distance
    }

    /// Head offset used for routing.
    pub fn effective_head_offset(&self) -> Length {
        effective(self.head_offset)
    }

    /// Tail offset used for routing.
    pub fn effective_tail_offset(&self) -> Length {
        effective(self.tail_offset)
    }

    pub fn with_head_direction(mut self, direction: Direction) -> Self {
        self.head_direction = direction;
        self
    }

    pub fn with_tail_direction(mut self, direction: Direction) -> Self {
        self.tail_direction = direction;
        self
    }

    pub fn with_head_offset(mut self, offset: f64) -> Result<Self, ConnectorError> {
        self.set_head_offset(offset)?;
        Ok(self)
    }

    pub fn with_tail_offset(mut self, offset: f64) -> Result<Self, ConnectorError> {
        self.set_tail_offset(offset)?;
        Ok(self)
    }

    pub fn with_corner_radius(mut self, radius: f64) -> Result<Self, ConnectorError> {
        self.set_corner_radius(radius)?;
        Ok(self)
    }

    pub fn with_break_distance(mut self, distance: f64) -> Result<Self, ConnectorError> {
        self.set_break_distance(distance)?;
        Ok(self)
    }

    pub fn set_head_direction(&mut self, direction: Direction) {
        self.head_direction = direction;
    }

    pub fn set_tail_direction(&mut self, direction: Direction) {
        self.tail_direction = direction;
    }

    pub fn set_head_offset(&mut self, offset: f64) -> Result<(), ConnectorError> {
        self.head_offset =
            Length::try_non_negative(offset).map_err(ConnectorError::invalid("head offset"))?;
        Ok(())
    }

    pub fn set_tail_offset(&mut self, offset: f64) -> Result<(), ConnectorError> {
        self.tail_offset =
            Length::try_non_negative(offset).map_err(ConnectorError::invalid("tail offset"))?;
        Ok(())
    }

    pub fn set_corner_radius(&mut self, radius: f64) -> Result<(), ConnectorError> {
        self.corner_radius =
            Length::try_non_negative(radius).map_err(ConnectorError::invalid("corner radius"))?;
        Ok(())
    }

    pub fn set_break_distance(&mut self, distance: f64) -> Result<(), ConnectorError> {
        self.break_distance = Length::try_non_negative(distance)
            .map_err(ConnectorError::invalid("break distance"))?;
        Ok(())
    }
}

fn effective(offset: Length) -> Length {
    if offset.raw() > 0.0 {
        offset
    } else {
        defaults::OFFSET
    }
}
