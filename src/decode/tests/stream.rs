use crate::decode::helpers::{flat_pairs, ReplyStr};
use crate::decode::stream::{
    PendingMessageListDecoder, PendingSummaryDecoder, StreamAutoClaimDecoder, StreamAutoClaimIdDecoder,
    StreamConsumerListDecoder, StreamGroupListDecoder, StreamId, StreamIdDecoder, StreamReadDecoder,
    StreamRecordDecoder, StreamRecordListDecoder, StreamSummaryDecoder,
};
use crate::decode::{DecodeError, ReplyDecoder, ReplyFrame};

fn record_frame(id: &'static str, pairs: &[(&str, &str)]) -> ReplyFrame {
    ReplyFrame::Array(vec![ReplyStr::new(id).to_bulk(), flat_pairs(pairs)])
}

#[test]
fn test_stream_id_parses_ms_and_sequence() {
    let id = StreamIdDecoder.decode(ReplyStr::new("1526919030474-55").to_bulk()).unwrap().unwrap();

    assert_eq!(1526919030474, id.ms);
    assert_eq!(55, id.seq);
    assert_eq!("1526919030474-55", id.to_string());
}

#[test]
fn test_stream_id_plain_millis_defaults_sequence() {
    let id = StreamIdDecoder.decode(ReplyStr::new("1526919030474").to_bulk()).unwrap().unwrap();

    assert_eq!(StreamId { ms: 1526919030474, seq: 0 }, id);
}

#[test]
fn test_stream_id_rejects_malformed_text() {
    let result = StreamIdDecoder.decode(ReplyStr::new("yesterday").to_bulk());

    assert!(matches!(result, Err(DecodeError::Contract { .. })));
}

#[test]
fn test_record_positional_shape() {
    let record = StreamRecordDecoder
        .decode(record_frame("1-1", &[("sensor", "1886"), ("flag", "on")]))
        .unwrap()
        .unwrap();

    assert_eq!(StreamId { ms: 1, seq: 1 }, record.id);
    assert_eq!(Some(&"1886".to_string()), record.fields.get("sensor"));

    let fields: Vec<&String> = record.fields.iter().map(|(name, _)| name).collect();
    assert_eq!(vec!["sensor", "flag"], fields);
}

#[test]
fn test_record_absent_entry_is_domain_null() {
    assert_eq!(None, StreamRecordDecoder.decode(ReplyFrame::Array(vec![])).unwrap());
    assert_eq!(None, StreamRecordDecoder.decode(ReplyFrame::Null).unwrap());
}

#[test]
fn test_record_list_keeps_dropped_entries() {
    let frame = ReplyFrame::Array(vec![
        record_frame("1-1", &[("k", "v")]),
        ReplyFrame::Null,
        record_frame("1-3", &[("k", "w")]),
    ]);

    let records = StreamRecordListDecoder.decode(frame).unwrap().unwrap();

    assert_eq!(3, records.len());
    assert!(records[0].is_some());
    assert!(records[1].is_none());
    assert_eq!(StreamId { ms: 1, seq: 3 }, records[2].as_ref().unwrap().id);
}

#[test]
fn test_auto_claim_cursor_and_records() {
    let frame = ReplyFrame::Array(vec![
        ReplyStr::new("0-0").to_bulk(),
        ReplyFrame::Array(vec![record_frame("1-1", &[("k", "v")])]),
    ]);

    let claim = StreamAutoClaimDecoder.decode(frame).unwrap().unwrap();

    assert_eq!(StreamId { ms: 0, seq: 0 }, claim.cursor);
    assert_eq!(1, claim.records.len());
}

#[test]
fn test_auto_claim_justid() {
    let frame = ReplyFrame::Array(vec![
        ReplyStr::new("5-0").to_bulk(),
        ReplyFrame::Array(vec![ReplyStr::new("1-1").to_bulk(), ReplyStr::new("2-2").to_bulk()]),
    ]);

    let claim = StreamAutoClaimIdDecoder.decode(frame).unwrap().unwrap();

    assert_eq!(StreamId { ms: 5, seq: 0 }, claim.cursor);
    assert_eq!(
        vec![Some(StreamId { ms: 1, seq: 1 }), Some(StreamId { ms: 2, seq: 2 })],
        claim.ids
    );
}

#[test]
fn test_read_groups_records_per_stream() {
    let frame = ReplyFrame::Array(vec![ReplyFrame::Array(vec![
        ReplyStr::new("events").to_bulk(),
        ReplyFrame::Array(vec![record_frame("1-1", &[("k", "v")])]),
    ])]);

    let streams = StreamReadDecoder.decode(frame).unwrap().unwrap();

    assert_eq!(1, streams.len());
    assert_eq!("events", streams[0].key);
    assert_eq!(1, streams[0].records.len());
}

#[test]
fn test_read_null_on_block_timeout() {
    assert_eq!(None, StreamReadDecoder.decode(ReplyFrame::Null).unwrap());
}

#[test]
fn test_pending_messages_positional_fields() {
    let frame = ReplyFrame::Array(vec![ReplyFrame::Array(vec![
        ReplyStr::new("1-1").to_bulk(),
        ReplyStr::new("worker-1").to_bulk(),
        ReplyFrame::Integer(9104),
        ReplyFrame::Integer(4),
    ])]);

    let messages = PendingMessageListDecoder.decode(frame).unwrap().unwrap();

    assert_eq!(1, messages.len());
    assert_eq!("worker-1", messages[0].consumer);
    assert_eq!(9104, messages[0].idle_ms);
    assert_eq!(4, messages[0].deliveries);
}

#[test]
fn test_pending_summary_counts_arrive_as_text() {
    let frame = ReplyFrame::Array(vec![
        ReplyFrame::Integer(10),
        ReplyStr::new("1-1").to_bulk(),
        ReplyStr::new("9-9").to_bulk(),
        ReplyFrame::Array(vec![ReplyFrame::Array(vec![
            ReplyStr::new("worker-1").to_bulk(),
            ReplyStr::new("10").to_bulk(),
        ])]),
    ]);

    let summary = PendingSummaryDecoder.decode(frame).unwrap().unwrap();

    assert_eq!(10, summary.total);
    assert_eq!(Some(StreamId { ms: 1, seq: 1 }), summary.min_id);
    assert_eq!(Some(StreamId { ms: 9, seq: 9 }), summary.max_id);
    assert_eq!(Some(&10), summary.per_consumer.get("worker-1"));
}

#[test]
fn test_pending_summary_empty_group() {
    let frame = ReplyFrame::Array(vec![
        ReplyFrame::Integer(0),
        ReplyFrame::Null,
        ReplyFrame::Null,
        ReplyFrame::Null,
    ]);

    let summary = PendingSummaryDecoder.decode(frame).unwrap().unwrap();

    assert_eq!(0, summary.total);
    assert_eq!(None, summary.min_id);
    assert!(summary.per_consumer.is_empty());
}

#[test]
fn test_stream_summary_keyed_fields() {
    let frame = ReplyFrame::Array(vec![
        ReplyStr::new("length").to_bulk(),
        ReplyFrame::Integer(2),
        ReplyStr::new("last-generated-id").to_bulk(),
        ReplyStr::new("3-3").to_bulk(),
        ReplyStr::new("first-entry").to_bulk(),
        record_frame("1-1", &[("k", "v")]),
    ]);

    let summary = StreamSummaryDecoder.decode(frame).unwrap().unwrap();

    assert_eq!(Some(2), summary.length());
    assert_eq!(Some(&StreamId { ms: 3, seq: 3 }), summary.last_generated_id());
    assert_eq!(StreamId { ms: 1, seq: 1 }, summary.first_entry().unwrap().id);
}

#[test]
fn test_stream_summary_tolerates_newer_server_fields() {
    // "max-deleted-entry-id" postdates the field table; the id candidate
    // recovers it
    let frame = ReplyFrame::Array(vec![
        ReplyStr::new("length").to_bulk(),
        ReplyFrame::Integer(2),
        ReplyStr::new("max-deleted-entry-id").to_bulk(),
        ReplyStr::new("5-1").to_bulk(),
    ]);

    let summary = StreamSummaryDecoder.decode(frame).unwrap().unwrap();

    assert_eq!(Some(2), summary.length());
    assert_eq!(
        Some(&StreamId { ms: 5, seq: 1 }),
        summary.field("max-deleted-entry-id").unwrap().as_id()
    );
}

#[test]
fn test_group_list() {
    let frame = ReplyFrame::Array(vec![ReplyFrame::Array(vec![
        ReplyStr::new("name").to_bulk(),
        ReplyStr::new("processors").to_bulk(),
        ReplyStr::new("consumers").to_bulk(),
        ReplyFrame::Integer(2),
        ReplyStr::new("pending").to_bulk(),
        ReplyFrame::Integer(5),
        ReplyStr::new("last-delivered-id").to_bulk(),
        ReplyStr::new("7-0").to_bulk(),
    ])]);

    let groups = StreamGroupListDecoder.decode(frame).unwrap().unwrap();

    assert_eq!(1, groups.len());
    assert_eq!(Some("processors"), groups[0].group_name());
    assert_eq!(Some(2), groups[0].consumers());
    assert_eq!(Some(5), groups[0].pending());
    assert_eq!(Some(&StreamId { ms: 7, seq: 0 }), groups[0].last_delivered_id());
}

#[test]
fn test_consumer_list() {
    let frame = ReplyFrame::Array(vec![ReplyFrame::Array(vec![
        ReplyStr::new("name").to_bulk(),
        ReplyStr::new("worker-1").to_bulk(),
        ReplyStr::new("idle").to_bulk(),
        ReplyFrame::Integer(83841),
        ReplyStr::new("pending").to_bulk(),
        ReplyFrame::Integer(1),
    ])]);

    let consumers = StreamConsumerListDecoder.decode(frame).unwrap().unwrap();

    assert_eq!(1, consumers.len());
    assert_eq!(Some("worker-1"), consumers[0].consumer_name());
    assert_eq!(Some(83841), consumers[0].idle());
    assert_eq!(Some(1), consumers[0].pending());
}
