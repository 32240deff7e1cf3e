//! Default settings for connectors (canvas units)

use crate::types::Length;

/// Standoff used for routing when a connector end has no offset configured.
pub const OFFSET: Length = Length::units(10.0);
pub const CORNER_RADIUS: Length = Length::ZERO;
pub const BREAK_DISTANCE: Length = Length::ZERO;
