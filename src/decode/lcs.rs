//! LCS match decoding.
//!
//! The same command returns three different shapes depending on which
//! options were requested. The decoder discriminates on the concrete frame
//! variant received, never on caller-supplied flags.
use crate::decode::scalar::LongDecoder;
use crate::decode::{expect_array, expect_text, DecodeError, ReplyDecoder, ReplyFrame};

/// Inclusive index range within one of the compared strings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LcsRange {
    pub start: i64,
    pub end: i64,
}

/// One matched region: the range in each input plus the match length
/// (0 when the server omitted it)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LcsMatchedPosition {
    pub a: LcsRange,
    pub b: LcsRange,
    pub len: i64,
}

/// LCS result in one of its three wire shapes
#[derive(Debug, Clone, PartialEq)]
pub enum LcsMatch {
    /// The longest common subsequence itself
    Subsequence(String),
    /// Its length (LEN option)
    Length(i64),
    /// Matched index pairs plus total length (IDX option)
    Matches {
        matches: Vec<LcsMatchedPosition>,
        len: i64,
    },
}

/// Decodes an LCS reply
pub struct LcsMatchDecoder;

impl LcsMatchDecoder {
    fn range(&self, frame: ReplyFrame) -> Result<LcsRange, DecodeError> {
        let [start, end] = crate::decode::expect_fixed(self.name(), "start/end pair", frame)?;
        Ok(LcsRange {
            start: LongDecoder.decode(start)?,
            end: LongDecoder.decode(end)?,
        })
    }

    fn matched_position(&self, frame: ReplyFrame) -> Result<LcsMatchedPosition, DecodeError> {
        let positions = expect_array(self.name(), frame)?;
        let mut iter = positions.into_iter();

        match (iter.next(), iter.next()) {
            (Some(a), Some(b)) => {
                let a = self.range(a)?;
                let b = self.range(b)?;
                let len = match iter.next() {
                    Some(len) => LongDecoder.decode(len)?,
                    None => 0,
                };
                Ok(LcsMatchedPosition { a, b, len })
            }
            _ => Err(DecodeError::Contract {
                decoder: self.name(),
                expected: "two ranges with optional length",
                found: "shorter array",
            }),
        }
    }

    fn labelled(&self, label: &str, name_frame: ReplyFrame) -> Result<(), DecodeError> {
        let name = expect_text(self.name(), name_frame)?;
        if !name.eq_ignore_ascii_case(label) {
            return Err(DecodeError::Contract {
                decoder: self.name(),
                expected: "matches/len labelled sections",
                found: "unexpected section label",
            });
        }
        Ok(())
    }
}

impl ReplyDecoder for LcsMatchDecoder {
    type Output = Option<LcsMatch>;

    fn name(&self) -> &'static str {
        "LcsMatch"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        match frame {
            ReplyFrame::Null => Ok(None),
            ReplyFrame::SimpleString(_) | ReplyFrame::BulkString(_) => {
                Ok(Some(LcsMatch::Subsequence(expect_text(self.name(), frame)?)))
            }
            ReplyFrame::Integer(length) => Ok(Some(LcsMatch::Length(length))),
            ReplyFrame::Array(elements) => {
                let [matches_label, matches, len_label, len] = elements.try_into().map_err(|_| {
                    DecodeError::Contract {
                        decoder: self.name(),
                        expected: "matches/len labelled sections",
                        found: "array of different length",
                    }
                })?;

                self.labelled("matches", matches_label)?;
                self.labelled("len", len_label)?;

                let matches = expect_array(self.name(), matches)?
                    .into_iter()
                    .map(|element| self.matched_position(element))
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(Some(LcsMatch::Matches {
                    matches,
                    len: LongDecoder.decode(len)?,
                }))
            }
            other => Err(DecodeError::contract(
                self.name(),
                "string, integer or matches array",
                &other,
            )),
        }
    }
}
