use crate::decode::helpers::ReplyStr;
use crate::decode::scalar::{BinaryDecoder, BooleanDecoder, DoubleDecoder, LongDecoder, RawDecoder, TextDecoder};
use crate::decode::{DecodeError, ReplyDecoder, ReplyFrame};
use bytes::Bytes;

#[test]
fn test_raw_passes_frame_through() {
    let frame = ReplyFrame::Array(vec![ReplyFrame::Integer(1), ReplyFrame::Null]);

    let result = RawDecoder.decode(frame.clone()).unwrap();
    assert_eq!(frame, result);
}

#[test]
fn test_long_round_trip() {
    assert_eq!(42, LongDecoder.decode(ReplyFrame::Integer(42)).unwrap());
    assert_eq!(-7, LongDecoder.decode(ReplyFrame::Integer(-7)).unwrap());
}

#[test]
fn test_long_rejects_string() {
    let result = LongDecoder.decode(ReplyStr::new("42").to_bulk());

    assert!(matches!(result, Err(DecodeError::Contract { decoder: "Long", .. })));
}

#[test]
fn test_double_parses_numeric_text() {
    assert_eq!(Some(3.14), DoubleDecoder.decode(ReplyStr::new("3.14").to_bulk()).unwrap());
    assert_eq!(Some(-0.5), DoubleDecoder.decode(ReplyStr::new("-0.5").to_bulk()).unwrap());
}

#[test]
fn test_double_infinity_literals() {
    assert_eq!(
        Some(f64::INFINITY),
        DoubleDecoder.decode(ReplyStr::new("inf").to_bulk()).unwrap()
    );
    assert_eq!(
        Some(f64::INFINITY),
        DoubleDecoder.decode(ReplyStr::new("+inf").to_bulk()).unwrap()
    );
    assert_eq!(
        Some(f64::NEG_INFINITY),
        DoubleDecoder.decode(ReplyStr::new("-inf").to_bulk()).unwrap()
    );
}

#[test]
fn test_double_rejects_non_numeric_text() {
    let result = DoubleDecoder.decode(ReplyStr::new("notanumber").to_bulk());

    assert!(matches!(result, Err(DecodeError::Contract { decoder: "Double", .. })));
}

#[test]
fn test_double_null_is_domain_null() {
    assert_eq!(None, DoubleDecoder.decode(ReplyFrame::Null).unwrap());
}

#[test]
fn test_boolean_three_valued() {
    assert_eq!(Some(true), BooleanDecoder.decode(ReplyFrame::Integer(1)).unwrap());
    assert_eq!(Some(false), BooleanDecoder.decode(ReplyFrame::Integer(0)).unwrap());
    assert_eq!(Some(false), BooleanDecoder.decode(ReplyFrame::Integer(7)).unwrap());
    assert_eq!(None, BooleanDecoder.decode(ReplyFrame::Null).unwrap());
}

#[test]
fn test_boolean_rejects_string() {
    let result = BooleanDecoder.decode(ReplyStr::new("1").to_bulk());

    assert!(matches!(result, Err(DecodeError::Contract { .. })));
}

#[test]
fn test_text_round_trip() {
    assert_eq!(
        Some("value".to_string()),
        TextDecoder.decode(ReplyStr::new("value").to_bulk()).unwrap()
    );
    assert_eq!(
        Some("OK".to_string()),
        TextDecoder.decode(ReplyStr::new("OK").to_simple()).unwrap()
    );
    assert_eq!(None, TextDecoder.decode(ReplyFrame::Null).unwrap());
}

#[test]
fn test_text_rejects_invalid_utf8() {
    let result = TextDecoder.decode(ReplyFrame::BulkString(Bytes::from_static(&[0xff, 0xfe])));

    assert!(matches!(result, Err(DecodeError::Contract { .. })));
}

#[test]
fn test_binary_round_trip() {
    let data = Bytes::from_static(&[0xff, 0x00, 0x7f]);

    assert_eq!(
        Some(data.clone()),
        BinaryDecoder.decode(ReplyFrame::BulkString(data)).unwrap()
    );
    assert_eq!(None, BinaryDecoder.decode(ReplyFrame::Null).unwrap());
}

#[test]
fn test_decoder_names_are_stable() {
    assert_eq!("Long", LongDecoder.name());
    assert_eq!("Double", DoubleDecoder.name());
    assert_eq!("Boolean", BooleanDecoder.name());
    assert_eq!("String", TextDecoder.name());
    assert_eq!("Bytes", BinaryDecoder.name());
}
