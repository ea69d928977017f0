//! Stream command decoders.
use crate::decode::fields::{
    decode_field_table, id_field, long_field, record_field, text_field, FieldSpec, FieldValue,
};
use crate::decode::ordered::OrderedMap;
use crate::decode::scalar::LongDecoder;
use crate::decode::{
    collection::expect_pairs, expect_array, expect_fixed, expect_text, optional_array, DecodeError,
    ReplyDecoder, ReplyFrame,
};
use core::fmt::{Display, Formatter};

/// Stream entry id, the `millis-sequence` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StreamId {
    pub ms: u64,
    pub seq: u64,
}

impl StreamId {
    fn parse(decoder: &'static str, text: &str) -> Result<StreamId, DecodeError> {
        let invalid = DecodeError::Contract {
            decoder,
            expected: "stream id of the form ms-seq",
            found: "malformed id text",
        };

        match text.split_once('-') {
            Some((ms, seq)) => Ok(StreamId {
                ms: ms.parse().map_err(|_| invalid.clone())?,
                seq: seq.parse().map_err(|_| invalid)?,
            }),
            // XGROUP SETID and friends accept/report plain millis
            None => Ok(StreamId {
                ms: text.parse().map_err(|_| invalid)?,
                seq: 0,
            }),
        }
    }
}

impl Display for StreamId {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}-{}", self.ms, self.seq)
    }
}

/// Decodes a textual stream id, null stays null
pub struct StreamIdDecoder;

impl ReplyDecoder for StreamIdDecoder {
    type Output = Option<StreamId>;

    fn name(&self) -> &'static str {
        "StreamId"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        if frame.is_null() {
            return Ok(None);
        }

        let text = expect_text(self.name(), frame)?;
        Ok(Some(StreamId::parse(self.name(), &text)?))
    }
}

/// Decodes an array of stream ids, null elements kept
pub struct StreamIdListDecoder;

impl ReplyDecoder for StreamIdListDecoder {
    type Output = Option<Vec<Option<StreamId>>>;

    fn name(&self) -> &'static str {
        "List<StreamId>"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        let elements = match optional_array(self.name(), frame)? {
            None => return Ok(None),
            Some(elements) => elements,
        };

        elements
            .into_iter()
            .map(|element| StreamIdDecoder.decode(element))
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

/// One stream entry: id plus its field/value payload in wire order
#[derive(Debug, Clone, PartialEq)]
pub struct StreamRecord {
    pub id: StreamId,
    pub fields: OrderedMap<String, String>,
}

/// Decodes an `[id, [field, value, ...]]` entry. Both a null reply and an
/// empty array mean an absent entry and decode to `None`.
pub struct StreamRecordDecoder;

impl ReplyDecoder for StreamRecordDecoder {
    type Output = Option<StreamRecord>;

    fn name(&self) -> &'static str {
        "StreamRecord"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        let elements = match optional_array(self.name(), frame)? {
            None => return Ok(None),
            Some(elements) => elements,
        };
        if elements.is_empty() {
            return Ok(None);
        }

        let [id, payload] =
            expect_fixed(self.name(), "id/payload pair", ReplyFrame::Array(elements))?;
        let id_text = expect_text(self.name(), id)?;

        let payload = expect_array(self.name(), payload)?;
        expect_pairs(self.name(), &payload)?;
        let mut fields = OrderedMap::with_capacity(payload.len() / 2);
        let mut iter = payload.into_iter();
        while let (Some(field), Some(value)) = (iter.next(), iter.next()) {
            fields.insert(expect_text(self.name(), field)?, expect_text(self.name(), value)?);
        }

        Ok(Some(StreamRecord {
            id: StreamId::parse(self.name(), &id_text)?,
            fields,
        }))
    }
}

/// Decodes an array of stream entries; dropped entries stay `None` (XCLAIM
/// on trimmed messages, XRANGE against deleted ids)
pub struct StreamRecordListDecoder;

impl ReplyDecoder for StreamRecordListDecoder {
    type Output = Option<Vec<Option<StreamRecord>>>;

    fn name(&self) -> &'static str {
        "List<StreamRecord>"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        let elements = match optional_array(self.name(), frame)? {
            None => return Ok(None),
            Some(elements) => elements,
        };

        elements
            .into_iter()
            .map(|element| StreamRecordDecoder.decode(element))
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

/// XAUTOCLAIM result: continuation cursor plus the claimed entries
#[derive(Debug, Clone, PartialEq)]
pub struct StreamAutoClaim {
    pub cursor: StreamId,
    pub records: Vec<Option<StreamRecord>>,
}

/// Decodes an XAUTOCLAIM reply
pub struct StreamAutoClaimDecoder;

fn auto_claim_parts(
    decoder: &'static str,
    frame: ReplyFrame,
) -> Result<Option<(StreamId, ReplyFrame)>, DecodeError> {
    if frame.is_null() {
        return Ok(None);
    }

    let [cursor, entries] = expect_fixed(decoder, "cursor/entries pair", frame)?;
    let cursor_text = expect_text(decoder, cursor)?;
    Ok(Some((StreamId::parse(decoder, &cursor_text)?, entries)))
}

impl ReplyDecoder for StreamAutoClaimDecoder {
    type Output = Option<StreamAutoClaim>;

    fn name(&self) -> &'static str {
        "StreamAutoClaim"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        let (cursor, entries) = match auto_claim_parts(self.name(), frame)? {
            None => return Ok(None),
            Some(parts) => parts,
        };
        let records = StreamRecordListDecoder.decode(entries)?.unwrap_or_default();
        Ok(Some(StreamAutoClaim { cursor, records }))
    }
}

/// XAUTOCLAIM JUSTID result: continuation cursor plus claimed entry ids
#[derive(Debug, Clone, PartialEq)]
pub struct StreamAutoClaimIds {
    pub cursor: StreamId,
    pub ids: Vec<Option<StreamId>>,
}

/// Decodes an XAUTOCLAIM JUSTID reply
pub struct StreamAutoClaimIdDecoder;

impl ReplyDecoder for StreamAutoClaimIdDecoder {
    type Output = Option<StreamAutoClaimIds>;

    fn name(&self) -> &'static str {
        "StreamAutoClaimIds"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        let (cursor, entries) = match auto_claim_parts(self.name(), frame)? {
            None => return Ok(None),
            Some(parts) => parts,
        };
        let ids = StreamIdListDecoder.decode(entries)?.unwrap_or_default();
        Ok(Some(StreamAutoClaimIds { cursor, ids }))
    }
}

/// Entries of one stream within an XREAD/XREADGROUP reply
#[derive(Debug, Clone, PartialEq)]
pub struct StreamKeyRecords {
    pub key: String,
    pub records: Vec<Option<StreamRecord>>,
}

/// Decodes an XREAD/XREADGROUP reply: one `[key, entries]` element per
/// stream; a null reply (nothing arrived before the block timeout) is `None`
pub struct StreamReadDecoder;

impl ReplyDecoder for StreamReadDecoder {
    type Output = Option<Vec<StreamKeyRecords>>;

    fn name(&self) -> &'static str {
        "List<StreamKeyRecords>"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        let elements = match optional_array(self.name(), frame)? {
            None => return Ok(None),
            Some(elements) => elements,
        };

        let mut streams = Vec::with_capacity(elements.len());
        for element in elements {
            let [key, entries] = expect_fixed(self.name(), "key/entries pair", element)?;
            streams.push(StreamKeyRecords {
                key: expect_text(self.name(), key)?,
                records: StreamRecordListDecoder.decode(entries)?.unwrap_or_default(),
            });
        }
        Ok(Some(streams))
    }
}

/// One entry of an extended XPENDING reply
#[derive(Debug, Clone, PartialEq)]
pub struct PendingMessage {
    pub id: StreamId,
    pub consumer: String,
    pub idle_ms: i64,
    pub deliveries: i64,
}

/// Decodes the extended XPENDING reply: positional
/// `[id, consumer, idle, deliveries]` entries
pub struct PendingMessageListDecoder;

impl ReplyDecoder for PendingMessageListDecoder {
    type Output = Option<Vec<PendingMessage>>;

    fn name(&self) -> &'static str {
        "List<PendingMessage>"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        let elements = match optional_array(self.name(), frame)? {
            None => return Ok(None),
            Some(elements) => elements,
        };

        let mut messages = Vec::with_capacity(elements.len());
        for element in elements {
            let [id, consumer, idle, deliveries] =
                expect_fixed(self.name(), "id/consumer/idle/deliveries entry", element)?;
            let id_text = expect_text(self.name(), id)?;
            messages.push(PendingMessage {
                id: StreamId::parse(self.name(), &id_text)?,
                consumer: expect_text(self.name(), consumer)?,
                idle_ms: LongDecoder.decode(idle)?,
                deliveries: LongDecoder.decode(deliveries)?,
            });
        }
        Ok(Some(messages))
    }
}

/// Summary form of XPENDING
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSummary {
    pub total: i64,
    pub min_id: Option<StreamId>,
    pub max_id: Option<StreamId>,
    /// Pending count per consumer, wire order preserved
    pub per_consumer: OrderedMap<String, i64>,
}

/// Decodes the XPENDING summary reply. With nothing pending the id bounds
/// and the consumer list are null; the counts arrive as text and are parsed.
pub struct PendingSummaryDecoder;

impl ReplyDecoder for PendingSummaryDecoder {
    type Output = Option<PendingSummary>;

    fn name(&self) -> &'static str {
        "PendingSummary"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        if frame.is_null() {
            return Ok(None);
        }

        let [total, min_id, max_id, consumers] =
            expect_fixed(self.name(), "total/min/max/consumers entry", frame)?;

        let mut per_consumer = OrderedMap::new();
        if let Some(consumers) = optional_array(self.name(), consumers)? {
            for consumer in consumers {
                let [name, count] = expect_fixed(self.name(), "consumer/count pair", consumer)?;
                let count_text = expect_text(self.name(), count)?;
                let count = count_text.parse::<i64>().map_err(|_| DecodeError::Contract {
                    decoder: self.name(),
                    expected: "integer text",
                    found: "non-numeric text",
                })?;
                per_consumer.insert(expect_text(self.name(), name)?, count);
            }
        }

        Ok(Some(PendingSummary {
            total: LongDecoder.decode(total)?,
            min_id: StreamIdDecoder.decode(min_id)?,
            max_id: StreamIdDecoder.decode(max_id)?,
            per_consumer,
        }))
    }
}

static STREAM_SUMMARY_FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "length", decode: long_field },
    FieldSpec { name: "radix-tree-keys", decode: long_field },
    FieldSpec { name: "radix-tree-nodes", decode: long_field },
    FieldSpec { name: "groups", decode: long_field },
    FieldSpec { name: "last-generated-id", decode: id_field },
    FieldSpec { name: "first-entry", decode: record_field },
    FieldSpec { name: "last-entry", decode: record_field },
];

/// XINFO STREAM result, a keyed-field record tolerant of fields added by
/// newer servers
#[derive(Debug, Clone, PartialEq)]
pub struct StreamSummary {
    fields: OrderedMap<String, FieldValue>,
}

impl StreamSummary {
    /// Raw access to any decoded field, including unrecognized ones
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn length(&self) -> Option<i64> {
        self.field("length")?.as_long()
    }

    pub fn radix_tree_keys(&self) -> Option<i64> {
        self.field("radix-tree-keys")?.as_long()
    }

    pub fn radix_tree_nodes(&self) -> Option<i64> {
        self.field("radix-tree-nodes")?.as_long()
    }

    pub fn groups(&self) -> Option<i64> {
        self.field("groups")?.as_long()
    }

    pub fn last_generated_id(&self) -> Option<&StreamId> {
        self.field("last-generated-id")?.as_id()
    }

    pub fn first_entry(&self) -> Option<&StreamRecord> {
        self.field("first-entry")?.as_record()
    }

    pub fn last_entry(&self) -> Option<&StreamRecord> {
        self.field("last-entry")?.as_record()
    }
}

/// Decodes an XINFO STREAM reply
pub struct StreamSummaryDecoder;

impl ReplyDecoder for StreamSummaryDecoder {
    type Output = Option<StreamSummary>;

    fn name(&self) -> &'static str {
        "StreamSummary"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        let elements = match optional_array(self.name(), frame)? {
            None => return Ok(None),
            Some(elements) => elements,
        };

        Ok(Some(StreamSummary {
            fields: decode_field_table(self.name(), elements, STREAM_SUMMARY_FIELDS)?,
        }))
    }
}

static STREAM_GROUP_FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "consumers", decode: long_field },
    FieldSpec { name: "pending", decode: long_field },
    FieldSpec { name: "last-delivered-id", decode: id_field },
    FieldSpec { name: "name", decode: text_field },
];

/// One consumer group of an XINFO GROUPS reply
#[derive(Debug, Clone, PartialEq)]
pub struct StreamGroup {
    fields: OrderedMap<String, FieldValue>,
}

impl StreamGroup {
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn group_name(&self) -> Option<&str> {
        self.field("name")?.as_text()
    }

    pub fn consumers(&self) -> Option<i64> {
        self.field("consumers")?.as_long()
    }

    pub fn pending(&self) -> Option<i64> {
        self.field("pending")?.as_long()
    }

    pub fn last_delivered_id(&self) -> Option<&StreamId> {
        self.field("last-delivered-id")?.as_id()
    }
}

/// Decodes an XINFO GROUPS reply
pub struct StreamGroupListDecoder;

impl ReplyDecoder for StreamGroupListDecoder {
    type Output = Option<Vec<StreamGroup>>;

    fn name(&self) -> &'static str {
        "List<StreamGroup>"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        let elements = match optional_array(self.name(), frame)? {
            None => return Ok(None),
            Some(elements) => elements,
        };

        let mut groups = Vec::with_capacity(elements.len());
        for element in elements {
            let fields = expect_array(self.name(), element)?;
            groups.push(StreamGroup {
                fields: decode_field_table(self.name(), fields, STREAM_GROUP_FIELDS)?,
            });
        }
        Ok(Some(groups))
    }
}

static STREAM_CONSUMER_FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "idle", decode: long_field },
    FieldSpec { name: "pending", decode: long_field },
    FieldSpec { name: "name", decode: text_field },
];

/// One consumer of an XINFO CONSUMERS reply
#[derive(Debug, Clone, PartialEq)]
pub struct StreamConsumer {
    fields: OrderedMap<String, FieldValue>,
}

impl StreamConsumer {
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn consumer_name(&self) -> Option<&str> {
        self.field("name")?.as_text()
    }

    pub fn idle(&self) -> Option<i64> {
        self.field("idle")?.as_long()
    }

    pub fn pending(&self) -> Option<i64> {
        self.field("pending")?.as_long()
    }
}

/// Decodes an XINFO CONSUMERS reply
pub struct StreamConsumerListDecoder;

impl ReplyDecoder for StreamConsumerListDecoder {
    type Output = Option<Vec<StreamConsumer>>;

    fn name(&self) -> &'static str {
        "List<StreamConsumer>"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        let elements = match optional_array(self.name(), frame)? {
            None => return Ok(None),
            Some(elements) => elements,
        };

        let mut consumers = Vec::with_capacity(elements.len());
        for element in elements {
            let fields = expect_array(self.name(), element)?;
            consumers.push(StreamConsumer {
                fields: decode_field_table(self.name(), fields, STREAM_CONSUMER_FIELDS)?,
            });
        }
        Ok(Some(consumers))
    }
}
