//! Routing engine: the point chain and the passes that keep it orthogonal.
//!
//! Edits flow through the passes in a fixed order. Propagation moves points
//! and marks broken segments, inference rebuilds marked or diagonal segments
//! through an [`OrthogonalSegments`] primitive, and the corrector drops the
//! redundant points the other two leave behind.

pub mod chain;
pub mod correct;
pub mod infer;
pub mod propagate;
pub mod segment;
pub mod tracker;

pub use chain::{PointChain, Slot};
pub use correct::{correct, correct_points};
pub use infer::Scope;
pub use propagate::Limits;
pub use segment::{ElbowRouter, OrthogonalSegments, SegmentEnds};
