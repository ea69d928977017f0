//! Geo command decoders.
use crate::decode::scalar::{DoubleDecoder, LongDecoder};
use crate::decode::{
    expect_array, expect_bytes, expect_fixed, frame_kind, optional_array, DecodeError, ReplyDecoder, ReplyFrame,
};
use bytes::Bytes;

/// Longitude/latitude pair
#[derive(Debug, Clone, PartialEq)]
pub struct GeoCoordinate {
    pub longitude: f64,
    pub latitude: f64,
}

fn coordinate(decoder: &'static str, frame: ReplyFrame) -> Result<GeoCoordinate, DecodeError> {
    let [longitude, latitude] = expect_fixed(decoder, "longitude/latitude pair", frame)?;
    let required = |value: Option<f64>| {
        value.ok_or(DecodeError::Contract {
            decoder,
            expected: "coordinate value",
            found: "null",
        })
    };
    Ok(GeoCoordinate {
        longitude: required(DoubleDecoder.decode(longitude)?)?,
        latitude: required(DoubleDecoder.decode(latitude)?)?,
    })
}

/// Decodes a GEOPOS reply: one optional coordinate per requested member,
/// null elements for members that do not exist
pub struct GeoPositionsDecoder;

impl ReplyDecoder for GeoPositionsDecoder {
    type Output = Option<Vec<Option<GeoCoordinate>>>;

    fn name(&self) -> &'static str {
        "List<GeoCoordinate>"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        let elements = match optional_array(self.name(), frame)? {
            None => return Ok(None),
            Some(elements) => elements,
        };

        let mut positions = Vec::with_capacity(elements.len());
        for element in elements {
            if element.is_null() {
                positions.push(None);
            } else {
                positions.push(Some(coordinate(self.name(), element)?));
            }
        }
        Ok(Some(positions))
    }
}

/// One member of a GEOSEARCH/GEORADIUS reply; the optional sub-fields are
/// populated according to the options the command was issued with
#[derive(Debug, Clone, PartialEq)]
pub struct GeoRadiusMember {
    pub member: Bytes,
    pub distance: Option<f64>,
    pub raw_score: Option<i64>,
    pub coordinate: Option<GeoCoordinate>,
}

impl GeoRadiusMember {
    fn plain(member: Bytes) -> Self {
        GeoRadiusMember {
            member,
            distance: None,
            raw_score: None,
            coordinate: None,
        }
    }

    /// Member as text, None for non-UTF-8 members
    pub fn member_str(&self) -> Option<&str> {
        core::str::from_utf8(self.member.as_ref()).ok()
    }
}

/// Decodes a GEOSEARCH/GEORADIUS reply.
///
/// The wire format carries no tags: without options every element is a plain
/// member string, with any of WITHCOORD/WITHDIST/WITHHASH every element is an
/// inner array whose sub-fields are distinguished by type (inner array =
/// coordinate, integer = raw hash score, text = distance). The reply alone
/// cannot prove which options were requested, so the decoder is constructed
/// with that context at the call site and rejects replies that disagree
/// with it.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoRadiusDecoder {
    pub with_coord: bool,
    pub with_dist: bool,
    pub with_hash: bool,
}

impl GeoRadiusDecoder {
    /// Decoder for a command issued without reply-extending options
    pub fn plain() -> Self {
        GeoRadiusDecoder::default()
    }

    pub fn new(with_coord: bool, with_dist: bool, with_hash: bool) -> Self {
        GeoRadiusDecoder {
            with_coord,
            with_dist,
            with_hash,
        }
    }

    fn expects_extras(&self) -> bool {
        self.with_coord || self.with_dist || self.with_hash
    }

    fn compound_member(&self, frame: ReplyFrame) -> Result<GeoRadiusMember, DecodeError> {
        let fields = expect_array(self.name(), frame)?;
        let mut iter = fields.into_iter();
        let member = match iter.next() {
            Some(member) => expect_bytes(self.name(), member)?,
            None => {
                return Err(DecodeError::Contract {
                    decoder: self.name(),
                    expected: "member with sub-fields",
                    found: "empty array",
                })
            }
        };

        let mut result = GeoRadiusMember::plain(member);
        for field in iter {
            match &field {
                ReplyFrame::Array(_) if self.with_coord => {
                    result.coordinate = Some(coordinate(self.name(), field)?);
                }
                ReplyFrame::Integer(_) if self.with_hash => {
                    result.raw_score = Some(LongDecoder.decode(field)?);
                }
                ReplyFrame::SimpleString(_) | ReplyFrame::BulkString(_) if self.with_dist => {
                    result.distance = DoubleDecoder.decode(field)?;
                }
                other => {
                    return Err(DecodeError::Contract {
                        decoder: self.name(),
                        expected: "sub-field matching the requested options",
                        found: frame_kind(other),
                    })
                }
            }
        }
        Ok(result)
    }
}

impl ReplyDecoder for GeoRadiusDecoder {
    type Output = Option<Vec<GeoRadiusMember>>;

    fn name(&self) -> &'static str {
        "GeoRadiusResult"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        let elements = match optional_array(self.name(), frame)? {
            None => return Ok(None),
            Some(elements) => elements,
        };
        if elements.is_empty() {
            return Ok(Some(Vec::new()));
        }

        // The shape of element 0 decides for the whole reply
        let compound = matches!(elements[0], ReplyFrame::Array(_));
        if compound != self.expects_extras() {
            return Err(DecodeError::Contract {
                decoder: self.name(),
                expected: if self.expects_extras() {
                    "members with sub-fields"
                } else {
                    "plain members"
                },
                found: frame_kind(&elements[0]),
            });
        }

        let mut members = Vec::with_capacity(elements.len());
        for element in elements {
            if compound {
                members.push(self.compound_member(element)?);
            } else {
                members.push(GeoRadiusMember::plain(expect_bytes(self.name(), element)?));
            }
        }
        Ok(Some(members))
    }
}
