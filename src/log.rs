//! Conditional logging macros.
//!
//! With the `tracing` feature these re-export the `tracing` macros so routing
//! decisions show up under `RUST_LOG=ortholine=debug`. Without it they expand
//! to nothing and the geometry code carries no logging cost.

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace};

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub use crate::{debug, trace};
