//! Scalar decoders.
//!
//! The smallest building blocks of the registry. Compound decoders delegate
//! to these for their element values instead of re-implementing the rules.
use crate::decode::{expect_bytes, expect_text, DecodeError, ReplyDecoder, ReplyFrame};
use bytes::Bytes;

/// Passes the reply frame through untyped
pub struct RawDecoder;

impl ReplyDecoder for RawDecoder {
    type Output = ReplyFrame;

    fn name(&self) -> &'static str {
        "Raw"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        Ok(frame)
    }
}

/// Decodes an integer reply
pub struct LongDecoder;

impl ReplyDecoder for LongDecoder {
    type Output = i64;

    fn name(&self) -> &'static str {
        "Long"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        match frame {
            ReplyFrame::Integer(value) => Ok(value),
            other => Err(DecodeError::contract(self.name(), "integer", &other)),
        }
    }
}

/// Decodes a textual floating point reply.
///
/// The literals `inf`, `+inf` and `-inf` map to the signed infinities before
/// the general numeric parse is attempted; any other non-numeric text is a
/// contract violation. A null reply is a domain null.
pub struct DoubleDecoder;

impl ReplyDecoder for DoubleDecoder {
    type Output = Option<f64>;

    fn name(&self) -> &'static str {
        "Double"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        if frame.is_null() {
            return Ok(None);
        }

        let text = expect_text(self.name(), frame)?;
        match text.as_str() {
            "inf" | "+inf" => return Ok(Some(f64::INFINITY)),
            "-inf" => return Ok(Some(f64::NEG_INFINITY)),
            _ => {}
        }

        match text.parse::<f64>() {
            Ok(value) => Ok(Some(value)),
            Err(_) => Err(DecodeError::Contract {
                decoder: self.name(),
                expected: "numeric text",
                found: "non-numeric text",
            }),
        }
    }
}

/// Decodes an integer reply as a three-valued boolean: 1 is true, any other
/// integer (including 0) is false, a null reply stays null
pub struct BooleanDecoder;

impl ReplyDecoder for BooleanDecoder {
    type Output = Option<bool>;

    fn name(&self) -> &'static str {
        "Boolean"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        match frame {
            ReplyFrame::Null => Ok(None),
            ReplyFrame::Integer(value) => Ok(Some(value == 1)),
            other => Err(DecodeError::contract(self.name(), "integer or null", &other)),
        }
    }
}

/// Decodes a string reply as UTF-8 text, mapping a null reply to `None`
pub struct TextDecoder;

impl ReplyDecoder for TextDecoder {
    type Output = Option<String>;

    fn name(&self) -> &'static str {
        "String"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        if frame.is_null() {
            return Ok(None);
        }

        Ok(Some(expect_text(self.name(), frame)?))
    }
}

/// Decodes a string reply as raw bytes, mapping a null reply to `None`
pub struct BinaryDecoder;

impl ReplyDecoder for BinaryDecoder {
    type Output = Option<Bytes>;

    fn name(&self) -> &'static str {
        "Bytes"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        if frame.is_null() {
            return Ok(None);
        }

        Ok(Some(expect_bytes(self.name(), frame)?))
    }
}
