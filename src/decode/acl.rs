//! ACL introspection decoders.
use crate::decode::fields::{decode_field_table, long_field, text_field, FieldSpec, FieldValue};
use crate::decode::ordered::OrderedMap;
use crate::decode::{expect_array, expect_text, optional_array, DecodeError, ReplyDecoder, ReplyFrame};

/// ACL GETUSER result
#[derive(Debug, Clone, PartialEq)]
pub struct AclUser {
    pub flags: Vec<String>,
    pub passwords: Vec<String>,
    pub commands: String,
    pub keys: Vec<String>,
}

fn text_list(decoder: &'static str, frame: ReplyFrame) -> Result<Vec<String>, DecodeError> {
    expect_array(decoder, frame)?
        .into_iter()
        .map(|element| expect_text(decoder, element))
        .collect()
}

/// Decodes the fixed positional ACL GETUSER shape: label/value pairs with
/// flags, passwords, commands and keys at their documented positions
pub struct AclUserDecoder;

impl ReplyDecoder for AclUserDecoder {
    type Output = Option<AclUser>;

    fn name(&self) -> &'static str {
        "AclUser"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        let elements = match optional_array(self.name(), frame)? {
            None => return Ok(None),
            Some(elements) => elements,
        };
        if elements.is_empty() {
            return Ok(None);
        }

        // Labels sit at the even positions, values at the odd ones
        let mut iter = elements.into_iter();
        let mut next_value = || iter.nth(1);

        match (next_value(), next_value(), next_value(), next_value()) {
            (Some(flags), Some(passwords), Some(commands), Some(keys)) => Ok(Some(AclUser {
                flags: text_list(self.name(), flags)?,
                passwords: text_list(self.name(), passwords)?,
                commands: expect_text(self.name(), commands)?,
                keys: text_list(self.name(), keys)?,
            })),
            _ => Err(DecodeError::Contract {
                decoder: self.name(),
                expected: "label/value array of at least eight elements",
                found: "shorter array",
            }),
        }
    }
}

static ACL_LOG_FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "count", decode: long_field },
    FieldSpec { name: "reason", decode: text_field },
    FieldSpec { name: "context", decode: text_field },
    FieldSpec { name: "object", decode: text_field },
    FieldSpec { name: "username", decode: text_field },
    FieldSpec { name: "age-seconds", decode: text_field },
    FieldSpec { name: "client-info", decode: text_field },
];

/// One ACL LOG entry: a keyed-field record that keeps fields added by newer
/// servers reachable through [field](AclLogEntry::field)
#[derive(Debug, Clone, PartialEq)]
pub struct AclLogEntry {
    fields: OrderedMap<String, FieldValue>,
}

impl AclLogEntry {
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn count(&self) -> Option<i64> {
        self.field("count")?.as_long()
    }

    pub fn reason(&self) -> Option<&str> {
        self.field("reason")?.as_text()
    }

    pub fn context(&self) -> Option<&str> {
        self.field("context")?.as_text()
    }

    pub fn object(&self) -> Option<&str> {
        self.field("object")?.as_text()
    }

    pub fn username(&self) -> Option<&str> {
        self.field("username")?.as_text()
    }

    /// Age is reported by the server as decimal text, e.g. `"4.096"`
    pub fn age_seconds(&self) -> Option<&str> {
        self.field("age-seconds")?.as_text()
    }

    pub fn client_info(&self) -> Option<&str> {
        self.field("client-info")?.as_text()
    }
}

/// Decodes an ACL LOG reply
pub struct AclLogDecoder;

impl ReplyDecoder for AclLogDecoder {
    type Output = Option<Vec<AclLogEntry>>;

    fn name(&self) -> &'static str {
        "List<AclLogEntry>"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        let elements = match optional_array(self.name(), frame)? {
            None => return Ok(None),
            Some(elements) => elements,
        };

        let mut entries = Vec::with_capacity(elements.len());
        for element in elements {
            let fields = expect_array(self.name(), element)?;
            entries.push(AclLogEntry {
                fields: decode_field_table(self.name(), fields, ACL_LOG_FIELDS)?,
            });
        }
        Ok(Some(entries))
    }
}
