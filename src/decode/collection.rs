//! Collection decoders.
//!
//! All of them preserve the distinction between a null reply (`None`) and an
//! empty array (`Some` of an empty collection), and never reorder elements:
//! wire encounter order is the order of the produced collection.
use crate::decode::ordered::{OrderedMap, OrderedSet};
use crate::decode::scalar::{BinaryDecoder, BooleanDecoder, DoubleDecoder, LongDecoder, TextDecoder};
use crate::decode::{expect_bytes, expect_text, optional_array, DecodeError, ReplyDecoder, ReplyFrame};
use bytes::Bytes;

/// Decodes an array reply as untyped frames
pub struct RawListDecoder;

impl ReplyDecoder for RawListDecoder {
    type Output = Option<Vec<ReplyFrame>>;

    fn name(&self) -> &'static str {
        "List<Raw>"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        optional_array(self.name(), frame)
    }
}

/// Decodes an array of integer replies
pub struct LongListDecoder;

impl ReplyDecoder for LongListDecoder {
    type Output = Option<Vec<i64>>;

    fn name(&self) -> &'static str {
        "List<Long>"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        let elements = match optional_array(self.name(), frame)? {
            None => return Ok(None),
            Some(elements) => elements,
        };

        elements
            .into_iter()
            .map(|element| LongDecoder.decode(element))
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

/// Decodes an array of textual doubles, null elements kept
pub struct DoubleListDecoder;

impl ReplyDecoder for DoubleListDecoder {
    type Output = Option<Vec<Option<f64>>>;

    fn name(&self) -> &'static str {
        "List<Double>"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        let elements = match optional_array(self.name(), frame)? {
            None => return Ok(None),
            Some(elements) => elements,
        };

        elements
            .into_iter()
            .map(|element| DoubleDecoder.decode(element))
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

/// Decodes an array of integer booleans, null elements kept
pub struct BooleanListDecoder;

impl ReplyDecoder for BooleanListDecoder {
    type Output = Option<Vec<Option<bool>>>;

    fn name(&self) -> &'static str {
        "List<Boolean>"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        let elements = match optional_array(self.name(), frame)? {
            None => return Ok(None),
            Some(elements) => elements,
        };

        elements
            .into_iter()
            .map(|element| BooleanDecoder.decode(element))
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

/// Decodes an array of string replies as text, null elements kept (MGET)
pub struct TextListDecoder;

impl ReplyDecoder for TextListDecoder {
    type Output = Option<Vec<Option<String>>>;

    fn name(&self) -> &'static str {
        "List<String>"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        let elements = match optional_array(self.name(), frame)? {
            None => return Ok(None),
            Some(elements) => elements,
        };

        elements
            .into_iter()
            .map(|element| TextDecoder.decode(element))
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

/// Decodes an array of string replies as bytes, null elements kept
pub struct BinaryListDecoder;

impl ReplyDecoder for BinaryListDecoder {
    type Output = Option<Vec<Option<Bytes>>>;

    fn name(&self) -> &'static str {
        "List<Bytes>"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        let elements = match optional_array(self.name(), frame)? {
            None => return Ok(None),
            Some(elements) => elements,
        };

        elements
            .into_iter()
            .map(|element| BinaryDecoder.decode(element))
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

/// Decodes an array of text elements as an insertion-ordered set
pub struct TextSetDecoder;

impl ReplyDecoder for TextSetDecoder {
    type Output = Option<OrderedSet<String>>;

    fn name(&self) -> &'static str {
        "Set<String>"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        let elements = match optional_array(self.name(), frame)? {
            None => return Ok(None),
            Some(elements) => elements,
        };

        let mut set = OrderedSet::with_capacity(elements.len());
        for element in elements {
            set.insert(expect_text(self.name(), element)?);
        }
        Ok(Some(set))
    }
}

/// Decodes an array of byte elements as an insertion-ordered set
pub struct BinarySetDecoder;

impl ReplyDecoder for BinarySetDecoder {
    type Output = Option<OrderedSet<Bytes>>;

    fn name(&self) -> &'static str {
        "Set<Bytes>"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        let elements = match optional_array(self.name(), frame)? {
            None => return Ok(None),
            Some(elements) => elements,
        };

        let mut set = OrderedSet::with_capacity(elements.len());
        for element in elements {
            set.insert(expect_bytes(self.name(), element)?);
        }
        Ok(Some(set))
    }
}

/// Checks the even cardinality of a flattened key/value sequence
pub(crate) fn expect_pairs(
    decoder: &'static str,
    elements: &[ReplyFrame],
) -> Result<(), DecodeError> {
    if elements.len() % 2 != 0 {
        return Err(DecodeError::Contract {
            decoder,
            expected: "even-length field/value array",
            found: "odd-length array",
        });
    }
    Ok(())
}

/// Decodes a flattened field/value array as a text map, wire order preserved
pub struct TextMapDecoder;

impl ReplyDecoder for TextMapDecoder {
    type Output = Option<OrderedMap<String, String>>;

    fn name(&self) -> &'static str {
        "Map<String, String>"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        let elements = match optional_array(self.name(), frame)? {
            None => return Ok(None),
            Some(elements) => elements,
        };
        expect_pairs(self.name(), &elements)?;

        let mut map = OrderedMap::with_capacity(elements.len() / 2);
        let mut iter = elements.into_iter();
        while let (Some(field), Some(value)) = (iter.next(), iter.next()) {
            map.insert(expect_text(self.name(), field)?, expect_text(self.name(), value)?);
        }
        Ok(Some(map))
    }
}

/// Decodes a flattened field/value array as a byte map, wire order preserved
pub struct BinaryMapDecoder;

impl ReplyDecoder for BinaryMapDecoder {
    type Output = Option<OrderedMap<Bytes, Bytes>>;

    fn name(&self) -> &'static str {
        "Map<Bytes, Bytes>"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        let elements = match optional_array(self.name(), frame)? {
            None => return Ok(None),
            Some(elements) => elements,
        };
        expect_pairs(self.name(), &elements)?;

        let mut map = OrderedMap::with_capacity(elements.len() / 2);
        let mut iter = elements.into_iter();
        while let (Some(field), Some(value)) = (iter.next(), iter.next()) {
            map.insert(expect_bytes(self.name(), field)?, expect_bytes(self.name(), value)?);
        }
        Ok(Some(map))
    }
}

/// Decodes a flattened name/count array, e.g. PUBSUB NUMSUB: text keys with
/// integer values
pub struct TextLongMapDecoder;

impl ReplyDecoder for TextLongMapDecoder {
    type Output = Option<OrderedMap<String, i64>>;

    fn name(&self) -> &'static str {
        "Map<String, Long>"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        let elements = match optional_array(self.name(), frame)? {
            None => return Ok(None),
            Some(elements) => elements,
        };
        expect_pairs(self.name(), &elements)?;

        let mut map = OrderedMap::with_capacity(elements.len() / 2);
        let mut iter = elements.into_iter();
        while let (Some(field), Some(value)) = (iter.next(), iter.next()) {
            map.insert(expect_text(self.name(), field)?, LongDecoder.decode(value)?);
        }
        Ok(Some(map))
    }
}

/// Decodes a list of two-element `[key, value]` arrays as a map (newer
/// CONFIG GET shape), values may be null
pub struct PairListMapDecoder;

impl ReplyDecoder for PairListMapDecoder {
    type Output = Option<OrderedMap<String, Option<String>>>;

    fn name(&self) -> &'static str {
        "Map<String, String>"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        let elements = match optional_array(self.name(), frame)? {
            None => return Ok(None),
            Some(elements) => elements,
        };

        let mut map = OrderedMap::with_capacity(elements.len());
        for element in elements {
            let [key, value] = crate::decode::expect_fixed(self.name(), "two-element pair", element)?;
            map.insert(expect_text(self.name(), key)?, TextDecoder.decode(value)?);
        }
        Ok(Some(map))
    }
}
