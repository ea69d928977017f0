use crate::decode::collection::{
    BinaryListDecoder, BinaryMapDecoder, BinarySetDecoder, BooleanListDecoder, DoubleListDecoder,
    LongListDecoder, PairListMapDecoder, RawListDecoder, TextListDecoder, TextLongMapDecoder,
    TextMapDecoder, TextSetDecoder,
};
use crate::decode::helpers::{bulk_array, flat_pairs, ReplyStr};
use crate::decode::{DecodeError, ReplyDecoder, ReplyFrame};
use bytes::Bytes;

#[test]
fn test_null_decodes_to_none_not_empty() {
    assert_eq!(None, RawListDecoder.decode(ReplyFrame::Null).unwrap());
    assert_eq!(None, LongListDecoder.decode(ReplyFrame::Null).unwrap());
    assert_eq!(None, DoubleListDecoder.decode(ReplyFrame::Null).unwrap());
    assert_eq!(None, BooleanListDecoder.decode(ReplyFrame::Null).unwrap());
    assert_eq!(None, TextListDecoder.decode(ReplyFrame::Null).unwrap());
    assert_eq!(None, BinaryListDecoder.decode(ReplyFrame::Null).unwrap());
    assert_eq!(None, TextSetDecoder.decode(ReplyFrame::Null).unwrap());
    assert_eq!(None, BinarySetDecoder.decode(ReplyFrame::Null).unwrap());
    assert_eq!(None, TextMapDecoder.decode(ReplyFrame::Null).unwrap());
    assert_eq!(None, BinaryMapDecoder.decode(ReplyFrame::Null).unwrap());
    assert_eq!(None, TextLongMapDecoder.decode(ReplyFrame::Null).unwrap());
    assert_eq!(None, PairListMapDecoder.decode(ReplyFrame::Null).unwrap());
}

#[test]
fn test_empty_array_decodes_to_empty_collection() {
    let empty = || ReplyFrame::Array(vec![]);

    assert!(TextListDecoder.decode(empty()).unwrap().unwrap().is_empty());
    assert!(LongListDecoder.decode(empty()).unwrap().unwrap().is_empty());
    assert!(TextSetDecoder.decode(empty()).unwrap().unwrap().is_empty());
    assert!(TextMapDecoder.decode(empty()).unwrap().unwrap().is_empty());
    assert!(TextLongMapDecoder.decode(empty()).unwrap().unwrap().is_empty());
}

#[test]
fn test_long_list() {
    let frame = ReplyFrame::Array(vec![
        ReplyFrame::Integer(3),
        ReplyFrame::Integer(1),
        ReplyFrame::Integer(2),
    ]);

    assert_eq!(Some(vec![3, 1, 2]), LongListDecoder.decode(frame).unwrap());
}

#[test]
fn test_text_list_keeps_null_elements() {
    let frame = ReplyFrame::Array(vec![
        ReplyStr::new("first").to_bulk(),
        ReplyFrame::Null,
        ReplyStr::new("third").to_bulk(),
    ]);

    assert_eq!(
        Some(vec![Some("first".to_string()), None, Some("third".to_string())]),
        TextListDecoder.decode(frame).unwrap()
    );
}

#[test]
fn test_boolean_list_keeps_null_elements() {
    let frame = ReplyFrame::Array(vec![
        ReplyFrame::Integer(1),
        ReplyFrame::Null,
        ReplyFrame::Integer(0),
    ]);

    assert_eq!(
        Some(vec![Some(true), None, Some(false)]),
        BooleanListDecoder.decode(frame).unwrap()
    );
}

#[test]
fn test_list_fails_as_whole_on_bad_element() {
    let frame = ReplyFrame::Array(vec![ReplyFrame::Integer(1), ReplyStr::new("x").to_bulk()]);

    assert!(matches!(
        LongListDecoder.decode(frame),
        Err(DecodeError::Contract { .. })
    ));
}

#[test]
fn test_set_preserves_wire_order() {
    let set = TextSetDecoder
        .decode(bulk_array(&["c", "a", "b"]))
        .unwrap()
        .unwrap();

    let items: Vec<&String> = set.iter().collect();
    assert_eq!(vec!["c", "a", "b"], items);
}

#[test]
fn test_binary_set() {
    let set = BinarySetDecoder
        .decode(bulk_array(&["one", "two"]))
        .unwrap()
        .unwrap();

    assert!(set.contains(&Bytes::from_static(b"one")));
    assert_eq!(2, set.len());
}

#[test]
fn test_map_pairs_in_encounter_order() {
    let map = TextMapDecoder
        .decode(flat_pairs(&[("color", "green"), ("material", "wood")]))
        .unwrap()
        .unwrap();

    assert_eq!(Some(&"green".to_string()), map.get("color"));
    assert_eq!(Some(&"wood".to_string()), map.get("material"));

    let keys: Vec<&String> = map.iter().map(|(key, _)| key).collect();
    assert_eq!(vec!["color", "material"], keys);
}

#[test]
fn test_map_rejects_odd_length() {
    let frame = ReplyFrame::Array(vec![
        ReplyStr::new("color").to_bulk(),
        ReplyStr::new("green").to_bulk(),
        ReplyStr::new("material").to_bulk(),
    ]);

    assert!(matches!(
        TextMapDecoder.decode(frame),
        Err(DecodeError::Contract { .. })
    ));
}

#[test]
fn test_text_long_map() {
    let frame = ReplyFrame::Array(vec![
        ReplyStr::new("news").to_bulk(),
        ReplyFrame::Integer(3),
        ReplyStr::new("chat").to_bulk(),
        ReplyFrame::Integer(0),
    ]);

    let map = TextLongMapDecoder.decode(frame).unwrap().unwrap();
    assert_eq!(Some(&3), map.get("news"));
    assert_eq!(Some(&0), map.get("chat"));
}

#[test]
fn test_pair_list_map_with_null_value() {
    let frame = ReplyFrame::Array(vec![
        ReplyFrame::Array(vec![ReplyStr::new("maxmemory").to_bulk(), ReplyStr::new("0").to_bulk()]),
        ReplyFrame::Array(vec![ReplyStr::new("save").to_bulk(), ReplyFrame::Null]),
    ]);

    let map = PairListMapDecoder.decode(frame).unwrap().unwrap();
    assert_eq!(Some(&Some("0".to_string())), map.get("maxmemory"));
    assert_eq!(Some(&None), map.get("save"));
}
