//! Scan cursor decoders.
//!
//! Every SCAN-family reply is a two-element array `[cursor, elements]`. The
//! cursor is an opaque token owned by the server; it is carried as text and
//! never interpreted as a number by this layer.
use crate::decode::collection::expect_pairs;
use crate::decode::tuple::{ScoredMember, TupleListDecoder};
use crate::decode::{expect_array, expect_bytes, expect_fixed, expect_text, DecodeError, ReplyDecoder, ReplyFrame};
use bytes::Bytes;

/// One page of a cursor iteration
#[derive(Debug, Clone, PartialEq)]
pub struct ScanPage<T> {
    /// Opaque continuation token, `"0"` once the iteration is complete
    pub cursor: String,
    pub items: Vec<T>,
}

impl<T> ScanPage<T> {
    /// True once the server signalled the end of the iteration
    pub fn is_complete(&self) -> bool {
        self.cursor == "0"
    }
}

fn scan_parts(decoder: &'static str, frame: ReplyFrame) -> Result<(String, Vec<ReplyFrame>), DecodeError> {
    let [cursor, elements] = expect_fixed(decoder, "cursor/elements pair", frame)?;
    Ok((expect_text(decoder, cursor)?, expect_array(decoder, elements)?))
}

/// Decodes a SCAN page of text keys
pub struct TextScanDecoder;

impl ReplyDecoder for TextScanDecoder {
    type Output = ScanPage<String>;

    fn name(&self) -> &'static str {
        "Scan<String>"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        let (cursor, elements) = scan_parts(self.name(), frame)?;
        let items = elements
            .into_iter()
            .map(|element| expect_text(self.name(), element))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ScanPage { cursor, items })
    }
}

/// Decodes a SCAN page of binary keys
pub struct BinaryScanDecoder;

impl ReplyDecoder for BinaryScanDecoder {
    type Output = ScanPage<Bytes>;

    fn name(&self) -> &'static str {
        "Scan<Bytes>"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        let (cursor, elements) = scan_parts(self.name(), frame)?;
        let items = elements
            .into_iter()
            .map(|element| expect_bytes(self.name(), element))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ScanPage { cursor, items })
    }
}

/// Decodes an HSCAN page: flattened field/value elements paired in wire order
pub struct PairScanDecoder;

impl ReplyDecoder for PairScanDecoder {
    type Output = ScanPage<(String, String)>;

    fn name(&self) -> &'static str {
        "Scan<Pair>"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        let (cursor, elements) = scan_parts(self.name(), frame)?;
        expect_pairs(self.name(), &elements)?;

        let mut items = Vec::with_capacity(elements.len() / 2);
        let mut iter = elements.into_iter();
        while let (Some(field), Some(value)) = (iter.next(), iter.next()) {
            items.push((expect_text(self.name(), field)?, expect_text(self.name(), value)?));
        }
        Ok(ScanPage { cursor, items })
    }
}

/// Decodes a ZSCAN page: flattened member/score elements as scored members
pub struct TupleScanDecoder;

impl ReplyDecoder for TupleScanDecoder {
    type Output = ScanPage<ScoredMember>;

    fn name(&self) -> &'static str {
        "Scan<Tuple>"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        let (cursor, elements) = scan_parts(self.name(), frame)?;
        let items = TupleListDecoder
            .decode(ReplyFrame::Array(elements))?
            .unwrap_or_default();
        Ok(ScanPage { cursor, items })
    }
}
