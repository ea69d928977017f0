//! Keyed-field record decoding.
//!
//! Several introspection replies (XINFO, ACL LOG) are flat name/value
//! sequences whose field set grows with the server. Each record type brings a
//! static table mapping known field names to a field decoder; names the table
//! does not know are decoded best-effort by trying every candidate of the
//! table in order, so a client built against an older server keeps working
//! when new fields appear.
use crate::decode::ordered::OrderedMap;
use crate::decode::scalar::{LongDecoder, TextDecoder};
use crate::decode::stream::{StreamId, StreamIdDecoder, StreamRecord, StreamRecordDecoder};
use crate::decode::{collection::expect_pairs, expect_text, DecodeError, ReplyDecoder, ReplyFrame};

/// Value of one record field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Long(i64),
    Text(String),
    Id(StreamId),
    Record(StreamRecord),
    /// A field present on the wire with a null (or absent-entry) value
    Nil,
}

impl FieldValue {
    pub fn as_long(&self) -> Option<i64> {
        match self {
            FieldValue::Long(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_id(&self) -> Option<&StreamId> {
        match self {
            FieldValue::Id(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&StreamRecord> {
        match self {
            FieldValue::Record(value) => Some(value),
            _ => None,
        }
    }
}

/// Field decoders wrap a primitive decoder and lift its output into
/// [FieldValue]; domain nulls become [FieldValue::Nil]
pub type FieldDecodeFn = fn(ReplyFrame) -> Result<FieldValue, DecodeError>;

/// One known field of a record type
pub struct FieldSpec {
    pub name: &'static str,
    pub decode: FieldDecodeFn,
}

pub fn long_field(frame: ReplyFrame) -> Result<FieldValue, DecodeError> {
    LongDecoder.decode(frame).map(FieldValue::Long)
}

pub fn text_field(frame: ReplyFrame) -> Result<FieldValue, DecodeError> {
    Ok(TextDecoder
        .decode(frame)?
        .map_or(FieldValue::Nil, FieldValue::Text))
}

pub fn id_field(frame: ReplyFrame) -> Result<FieldValue, DecodeError> {
    Ok(StreamIdDecoder
        .decode(frame)?
        .map_or(FieldValue::Nil, FieldValue::Id))
}

pub fn record_field(frame: ReplyFrame) -> Result<FieldValue, DecodeError> {
    Ok(StreamRecordDecoder
        .decode(frame)?
        .map_or(FieldValue::Nil, FieldValue::Record))
}

/// Decodes a flat name/value sequence against the record's field table.
///
/// Known names use their mapped decoder and any failure there is a real
/// failure. Unknown names are retried against every candidate in table order,
/// catching only the shape-mismatch error; the first accepting candidate wins
/// (logged as a recovery), exhausting all of them fails the whole record.
pub(crate) fn decode_field_table(
    record: &'static str,
    elements: Vec<ReplyFrame>,
    specs: &'static [FieldSpec],
) -> Result<OrderedMap<String, FieldValue>, DecodeError> {
    expect_pairs(record, &elements)?;

    let mut fields = OrderedMap::with_capacity(elements.len() / 2);
    let mut iter = elements.into_iter();
    while let (Some(name_frame), Some(value)) = (iter.next(), iter.next()) {
        let name = expect_text(record, name_frame)?;

        match specs.iter().find(|spec| spec.name == name) {
            Some(spec) => {
                fields.insert(name, (spec.decode)(value)?);
            }
            None => {
                let value = decode_unknown_field(record, &name, value, specs)?;
                fields.insert(name, value);
            }
        }
    }
    Ok(fields)
}

fn decode_unknown_field(
    record: &'static str,
    name: &str,
    value: ReplyFrame,
    specs: &'static [FieldSpec],
) -> Result<FieldValue, DecodeError> {
    for candidate in specs {
        match (candidate.decode)(value.clone()) {
            Ok(decoded) => {
                log::debug!(
                    "{}: unrecognized field '{}' decoded via fallback candidate '{}'",
                    record,
                    name,
                    candidate.name
                );
                return Ok(decoded);
            }
            // Only a shape mismatch moves on to the next candidate
            Err(DecodeError::Contract { .. }) => continue,
            Err(other) => return Err(other),
        }
    }

    Err(DecodeError::UnknownField {
        field: name.to_owned(),
    })
}
