//! Errors produced by the value layer.

use thiserror::Error;

/// An error validating, decoding or encoding an RPC value.
///
/// These are always raised before any request reaches the network.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ValueError {
    /// A caller supplied value was rejected for the named field.
    #[error("invalid {field} argument {value:?}")]
    InvalidArgument { field: &'static str, value: String },
    /// The type name is not in the alias table.
    #[error("unknown type {0:?}")]
    UnknownType(String),
    /// The input is not a valid QUANTITY.
    #[error("malformed quantity {0:?}")]
    MalformedQuantity(String),
    /// The input is not a valid DATA string.
    #[error("malformed data {0:?}")]
    MalformedData(String),
    /// A fixed length DATA string has the wrong number of hex digits.
    #[error("expected {expected} hex digits but got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    /// The value needs more bytes than are available.
    #[error("{value} does not fit in {limit} bytes")]
    ValueTooLarge { value: String, limit: usize },
}

impl ValueError {
    pub(crate) fn invalid_argument(field: &'static str, value: impl ToString) -> Self {
        Self::InvalidArgument {
            field,
            value: value.to_string(),
        }
    }
}
