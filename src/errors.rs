//! Error types for connector editing.
//!
//! Geometry itself never fails: degenerate input always produces some
//! consistent point sequence. These errors cover API misuse only.

use miette::Diagnostic;
use thiserror::Error;

use crate::types::NumericError;

/// Errors raised by [`Connector`](crate::Connector) and
/// [`ConnectorStyle`](crate::ConnectorStyle) operations.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ConnectorError {
    #[error("point index {index} out of range for {len} control points")]
    #[diagnostic(
        code(ortholine::index_out_of_range),
        help("valid indices are 0..{len}")
    )]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid {field}: {source}")]
    #[diagnostic(
        code(ortholine::invalid_value),
        help("offsets, radii and distances must be finite and non-negative")
    )]
    InvalidValue {
        field: &'static str,
        #[source]
        source: NumericError,
    },
}

impl ConnectorError {
    pub(crate) fn invalid(field: &'static str) -> impl FnOnce(NumericError) -> Self {
        move |source| ConnectorError::InvalidValue { field, source }
    }
}
