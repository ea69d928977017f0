//! # Typed reply decoding
//!
//! Every Redis command declares its result through a [ReplyDecoder]: a named,
//! stateless strategy converting one wire-level [ReplyFrame] into one typed
//! value. Decoders are plain unit values, cheap to copy and reusable across
//! any number of replies, so a command site binds its decoder once and the
//! same value serves the synchronous path and pipelined resolution alike.
//!
//! ```
//! use redis_results::decode::scalar::LongDecoder;
//! use redis_results::decode::ReplyDecoder;
//! use redis_results::ReplyFrame;
//!
//! let count = LongDecoder.decode(ReplyFrame::Integer(42)).unwrap();
//! assert_eq!(42, count);
//! ```
//!
//! A decoder is total over its documented reply shape. Shapes outside that
//! contract (e.g. an integer where an array is required) indicate a violated
//! command contract and fail with [DecodeError::Contract]; they are never
//! smoothed over into nulls or empty collections. Legitimate "no value"
//! replies decode to `None` instead.
pub mod acl;
pub mod collection;
pub mod fields;
pub mod geo;
pub mod helpers;
pub mod json;
pub mod lcs;
pub mod ordered;
pub mod scalar;
pub mod scan;
pub mod stream;
pub mod tuple;
#[cfg(test)]
pub(crate) mod tests;

pub use ordered::{OrderedMap, OrderedSet};

use bytes::Bytes;

/// Wire-decoded but untyped reply value, as delivered by the transport layer.
pub use redis_protocol::resp2::types::Frame as ReplyFrame;

/// Error of the decoding layer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The reply shape is outside the decoder's documented input domain.
    /// This indicates a violated command contract (wrong decoder bound, or a
    /// server/protocol fault), not a legitimate domain condition.
    #[error("{decoder} decoder expected {expected}, found {found}")]
    Contract {
        /// Display name of the failing decoder
        decoder: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    /// A keyed record contained a field name without any registered decoder,
    /// and none of the fallback candidates accepted its value either.
    #[error("no decoder accepted the value of unrecognized field '{field}'")]
    UnknownField { field: String },
}

impl DecodeError {
    pub(crate) fn contract(decoder: &'static str, expected: &'static str, found: &ReplyFrame) -> Self {
        DecodeError::Contract {
            decoder,
            expected,
            found: frame_kind(found),
        }
    }
}

/// Named strategy converting one reply frame into one typed value
///
/// Implementations are stateless (or carry only immutable configuration),
/// side-effect free and idempotent. [name](ReplyDecoder::name) is a stable
/// display name used in diagnostics and error reports.
pub trait ReplyDecoder {
    type Output;

    /// Stable display name for diagnostics
    fn name(&self) -> &'static str;

    /// Converts the frame, failing with [DecodeError::Contract] on shapes
    /// outside the decoder's documented input domain
    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError>;
}

/// Short classification of a frame for error reports
pub(crate) fn frame_kind(frame: &ReplyFrame) -> &'static str {
    match frame {
        ReplyFrame::SimpleString(_) => "simple string",
        ReplyFrame::Error(_) => "error reply",
        ReplyFrame::Integer(_) => "integer",
        ReplyFrame::BulkString(_) => "bulk string",
        ReplyFrame::Array(_) => "array",
        ReplyFrame::Null => "null",
    }
}

/// Unwraps an array frame, null not allowed
pub(crate) fn expect_array(decoder: &'static str, frame: ReplyFrame) -> Result<Vec<ReplyFrame>, DecodeError> {
    match frame {
        ReplyFrame::Array(elements) => Ok(elements),
        other => Err(DecodeError::contract(decoder, "array", &other)),
    }
}

/// Unwraps an array frame, mapping a null reply to `None`
pub(crate) fn optional_array(
    decoder: &'static str,
    frame: ReplyFrame,
) -> Result<Option<Vec<ReplyFrame>>, DecodeError> {
    match frame {
        ReplyFrame::Null => Ok(None),
        ReplyFrame::Array(elements) => Ok(Some(elements)),
        other => Err(DecodeError::contract(decoder, "array or null", &other)),
    }
}

/// Extracts the byte content of a string frame, null not allowed
pub(crate) fn expect_bytes(decoder: &'static str, frame: ReplyFrame) -> Result<Bytes, DecodeError> {
    match frame {
        ReplyFrame::SimpleString(data) | ReplyFrame::BulkString(data) => Ok(data),
        other => Err(DecodeError::contract(decoder, "string", &other)),
    }
}

/// Extracts a UTF-8 string from a string frame, null not allowed
pub(crate) fn expect_text(decoder: &'static str, frame: ReplyFrame) -> Result<String, DecodeError> {
    let data = expect_bytes(decoder, frame)?;
    String::from_utf8(data.to_vec()).map_err(|_| DecodeError::Contract {
        decoder,
        expected: "utf-8 text",
        found: "non-utf8 bytes",
    })
}

/// Unwraps an array frame of known length, null not allowed
pub(crate) fn expect_fixed<const N: usize>(
    decoder: &'static str,
    expected: &'static str,
    frame: ReplyFrame,
) -> Result<[ReplyFrame; N], DecodeError> {
    let elements = expect_array(decoder, frame)?;
    elements.try_into().map_err(|_| DecodeError::Contract {
        decoder,
        expected,
        found: "array of different length",
    })
}
