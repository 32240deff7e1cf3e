//! Orthogonal connector routing for interactive diagram editors.
//!
//! A [`Connector`] keeps a chain of control points whose consecutive pairs
//! are horizontal or vertical, except where the user pinned a diagonal bend.
//! Dragging an end point drags its neighbors along; segments that lose their
//! axis are rebuilt on the next [`Connector::parse`], which also produces the
//! [`RenderPath`] to draw.
//!
//! ```
//! use ortholine::{Connector, pt};
//!
//! let mut line = Connector::new(&[pt(0.0, 0.0), pt(100.0, 0.0)]);
//! line.update_point_at_index(0, 0.0, 20.0)?;
//! assert!(line.parse());
//! assert_eq!(line.points(), vec![pt(0.0, 20.0), pt(100.0, 20.0), pt(100.0, 0.0)]);
//! # Ok::<(), ortholine::ConnectorError>(())
//! ```

pub mod config;
pub mod connector;
pub mod defaults;
pub mod errors;
pub mod geometry;
pub mod log;
pub mod path;
pub mod route;
pub mod types;

pub use config::ConnectorStyle;
pub use connector::{Connector, ConnectorObserver};
pub use errors::ConnectorError;
pub use path::{PathCommand, RenderPath};
pub use route::{ElbowRouter, OrthogonalSegments, PointChain, SegmentEnds};
pub use types::{BBox, Direction, Length, NumericError, Point, pt};
