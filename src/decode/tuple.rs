//! Sorted-set tuples and keyed pop results.
use crate::decode::collection::expect_pairs;
use crate::decode::ordered::OrderedSet;
use crate::decode::scalar::DoubleDecoder;
use crate::decode::{expect_bytes, expect_fixed, expect_text, optional_array, DecodeError, ReplyDecoder, ReplyFrame};
use bytes::Bytes;

/// Sorted-set member together with its score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMember {
    pub member: Bytes,
    pub score: f64,
}

impl ScoredMember {
    /// Member as text, None for non-UTF-8 members
    pub fn member_str(&self) -> Option<&str> {
        core::str::from_utf8(self.member.as_ref()).ok()
    }
}

/// Decodes a member/score pair from sorted-set pop and random-member replies.
///
/// An empty array is the server's "no such element" answer and decodes to
/// `None`, the same domain null as a missing reply.
pub struct TupleDecoder;

fn score(decoder: &'static str, frame: ReplyFrame) -> Result<f64, DecodeError> {
    DoubleDecoder.decode(frame)?.ok_or(DecodeError::Contract {
        decoder,
        expected: "score",
        found: "null",
    })
}

impl ReplyDecoder for TupleDecoder {
    type Output = Option<ScoredMember>;

    fn name(&self) -> &'static str {
        "Tuple"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        let elements = match optional_array(self.name(), frame)? {
            None => return Ok(None),
            Some(elements) => elements,
        };
        if elements.is_empty() {
            return Ok(None);
        }

        let [member, score_frame] =
            expect_fixed(self.name(), "member/score pair", ReplyFrame::Array(elements))?;
        Ok(Some(ScoredMember {
            member: expect_bytes(self.name(), member)?,
            score: score(self.name(), score_frame)?,
        }))
    }
}

/// List element together with the key it was popped from (BLPOP/BRPOP)
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedElement {
    pub key: String,
    pub value: Bytes,
}

/// Decodes a `[key, element]` reply, null when the wait timed out
pub struct KeyedElementDecoder;

impl ReplyDecoder for KeyedElementDecoder {
    type Output = Option<KeyedElement>;

    fn name(&self) -> &'static str {
        "KeyedElement"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        if frame.is_null() {
            return Ok(None);
        }

        let [key, value] = expect_fixed(self.name(), "key/element pair", frame)?;
        Ok(Some(KeyedElement {
            key: expect_text(self.name(), key)?,
            value: expect_bytes(self.name(), value)?,
        }))
    }
}

/// Scored member together with the sorted-set key it was popped from
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedScoredMember {
    pub key: String,
    pub member: Bytes,
    pub score: f64,
}

/// Decodes a `[key, member, score]` reply (BZPOPMIN/BZPOPMAX); both a null
/// reply and an empty array decode to `None`
pub struct KeyedTupleDecoder;

impl ReplyDecoder for KeyedTupleDecoder {
    type Output = Option<KeyedScoredMember>;

    fn name(&self) -> &'static str {
        "KeyedTuple"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        let elements = match optional_array(self.name(), frame)? {
            None => return Ok(None),
            Some(elements) => elements,
        };
        if elements.is_empty() {
            return Ok(None);
        }

        let [key, member, score_frame] =
            expect_fixed(self.name(), "key/member/score triple", ReplyFrame::Array(elements))?;
        Ok(Some(KeyedScoredMember {
            key: expect_text(self.name(), key)?,
            member: expect_bytes(self.name(), member)?,
            score: score(self.name(), score_frame)?,
        }))
    }
}

/// Decodes a flattened member/score sequence, two elements per tuple in wire
/// order; odd cardinality is a contract violation
pub struct TupleListDecoder;

fn tuples(decoder: &'static str, elements: Vec<ReplyFrame>) -> Result<Vec<ScoredMember>, DecodeError> {
    expect_pairs(decoder, &elements)?;

    let mut result = Vec::with_capacity(elements.len() / 2);
    let mut iter = elements.into_iter();
    while let (Some(member), Some(score_frame)) = (iter.next(), iter.next()) {
        result.push(ScoredMember {
            member: expect_bytes(decoder, member)?,
            score: score(decoder, score_frame)?,
        });
    }
    Ok(result)
}

impl ReplyDecoder for TupleListDecoder {
    type Output = Option<Vec<ScoredMember>>;

    fn name(&self) -> &'static str {
        "List<Tuple>"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        match optional_array(self.name(), frame)? {
            None => Ok(None),
            Some(elements) => Ok(Some(tuples(self.name(), elements)?)),
        }
    }
}

/// Decodes a flattened member/score sequence as an insertion-ordered set
pub struct TupleSetDecoder;

impl ReplyDecoder for TupleSetDecoder {
    type Output = Option<OrderedSet<ScoredMember>>;

    fn name(&self) -> &'static str {
        "ZSet<Tuple>"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        match optional_array(self.name(), frame)? {
            None => Ok(None),
            Some(elements) => Ok(Some(tuples(self.name(), elements)?.into_iter().collect())),
        }
    }
}
