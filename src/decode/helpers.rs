//! Helpers for constructing reply frames.
//!
//! Mainly used by tests and documentation examples to keep frame literals
//! readable.
use crate::decode::ReplyFrame;
use bytes::Bytes;

/// Helper for casting strings to frame types
pub struct ReplyStr<'a> {
    inner: &'a str,
}

impl<'a> ReplyStr<'a> {
    pub fn new(inner: &'a str) -> Self {
        ReplyStr { inner }
    }

    pub fn to_bulk(self) -> ReplyFrame {
        ReplyFrame::BulkString(Bytes::from(self.inner.to_owned()))
    }

    pub fn to_simple(self) -> ReplyFrame {
        ReplyFrame::SimpleString(Bytes::from(self.inner.to_owned()))
    }
}

/// Builds an array frame of bulk strings
pub fn bulk_array(items: &[&str]) -> ReplyFrame {
    ReplyFrame::Array(items.iter().map(|item| ReplyStr::new(item).to_bulk()).collect())
}

/// Builds a flattened field/value array, two bulk strings per pair in the
/// given order
pub fn flat_pairs(pairs: &[(&str, &str)]) -> ReplyFrame {
    let mut elements = Vec::with_capacity(pairs.len() * 2);
    for (field, value) in pairs {
        elements.push(ReplyStr::new(field).to_bulk());
        elements.push(ReplyStr::new(value).to_bulk());
    }
    ReplyFrame::Array(elements)
}
