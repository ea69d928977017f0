//! JSON module decoders.
//!
//! JSON parsing is an injected service: the value decoders are constructed
//! with a [JsonBridge] instead of reaching for a process-wide parser, so the
//! bridge can be replaced or instrumented without touching the registry.
use crate::decode::{expect_text, optional_array, DecodeError, ReplyDecoder, ReplyFrame};

/// Value kind reported by JSON.TYPE
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    Null,
    Boolean,
    Integer,
    Number,
    String,
    Object,
    Array,
}

impl JsonKind {
    fn from_token(token: &str) -> Option<JsonKind> {
        match token {
            "null" => Some(JsonKind::Null),
            "boolean" => Some(JsonKind::Boolean),
            "integer" => Some(JsonKind::Integer),
            "number" => Some(JsonKind::Number),
            "string" => Some(JsonKind::String),
            "object" => Some(JsonKind::Object),
            "array" => Some(JsonKind::Array),
            _ => None,
        }
    }

    /// The wire token of this kind
    pub fn token(&self) -> &'static str {
        match self {
            JsonKind::Null => "null",
            JsonKind::Boolean => "boolean",
            JsonKind::Integer => "integer",
            JsonKind::Number => "number",
            JsonKind::String => "string",
            JsonKind::Object => "object",
            JsonKind::Array => "array",
        }
    }
}

/// Decodes a JSON.TYPE reply; a token outside the fixed vocabulary is a
/// contract violation, a null reply (missing key or path) stays null
pub struct JsonKindDecoder;

impl ReplyDecoder for JsonKindDecoder {
    type Output = Option<JsonKind>;

    fn name(&self) -> &'static str {
        "JsonType"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        if frame.is_null() {
            return Ok(None);
        }

        let token = expect_text(self.name(), frame)?;
        match JsonKind::from_token(&token) {
            Some(kind) => Ok(Some(kind)),
            None => Err(DecodeError::Contract {
                decoder: self.name(),
                expected: "json type token",
                found: "unrecognized token",
            }),
        }
    }
}

/// Decodes the list variant of JSON.TYPE. A null element or an unrecognized
/// per-element token decodes to an absent marker instead of failing the
/// whole batch.
pub struct JsonKindListDecoder;

impl ReplyDecoder for JsonKindListDecoder {
    type Output = Option<Vec<Option<JsonKind>>>;

    fn name(&self) -> &'static str {
        "List<JsonType>"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        let elements = match optional_array(self.name(), frame)? {
            None => return Ok(None),
            Some(elements) => elements,
        };

        let mut kinds = Vec::with_capacity(elements.len());
        for element in elements {
            if element.is_null() {
                kinds.push(None);
                continue;
            }
            let token = expect_text(self.name(), element)?;
            kinds.push(JsonKind::from_token(&token));
        }
        Ok(Some(kinds))
    }
}

/// Service parsing JSON text into values, injected into the value decoders
pub trait JsonBridge {
    fn parse(&self, text: &str) -> Result<serde_json::Value, serde_json::Error>;
}

/// Default bridge backed by serde_json
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeBridge;

impl JsonBridge for SerdeBridge {
    fn parse(&self, text: &str) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Decodes a JSON.GET style reply.
///
/// Text starting with `{` or `[` is parsed through the bridge; text the
/// bridge rejects is kept as the raw string rather than failing, matching the
/// permissive behavior servers rely on for legacy string payloads. Any other
/// text stays a string, integer replies become numbers, a null reply is a
/// domain null.
pub struct JsonValueDecoder<B: JsonBridge> {
    bridge: B,
}

impl<B: JsonBridge> JsonValueDecoder<B> {
    pub fn new(bridge: B) -> Self {
        JsonValueDecoder { bridge }
    }

    fn value(&self, frame: ReplyFrame) -> Result<Option<serde_json::Value>, DecodeError> {
        match frame {
            ReplyFrame::Null => Ok(None),
            ReplyFrame::Integer(number) => Ok(Some(serde_json::Value::from(number))),
            frame => {
                let text = expect_text(self.name(), frame)?;
                if text.starts_with('{') || text.starts_with('[') {
                    match self.bridge.parse(&text) {
                        Ok(value) => return Ok(Some(value)),
                        Err(_) => return Ok(Some(serde_json::Value::String(text))),
                    }
                }
                Ok(Some(serde_json::Value::String(text)))
            }
        }
    }
}

impl<B: JsonBridge> ReplyDecoder for JsonValueDecoder<B> {
    type Output = Option<serde_json::Value>;

    fn name(&self) -> &'static str {
        "Json"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        self.value(frame)
    }
}

/// Decodes a JSON.MGET style reply: one optional value per requested key,
/// each element delegated to the value decoder
pub struct JsonListDecoder<B: JsonBridge> {
    inner: JsonValueDecoder<B>,
}

impl<B: JsonBridge> JsonListDecoder<B> {
    pub fn new(bridge: B) -> Self {
        JsonListDecoder {
            inner: JsonValueDecoder::new(bridge),
        }
    }
}

impl<B: JsonBridge> ReplyDecoder for JsonListDecoder<B> {
    type Output = Option<Vec<Option<serde_json::Value>>>;

    fn name(&self) -> &'static str {
        "List<Json>"
    }

    fn decode(&self, frame: ReplyFrame) -> Result<Self::Output, DecodeError> {
        let elements = match optional_array(self.name(), frame)? {
            None => return Ok(None),
            Some(elements) => elements,
        };

        elements
            .into_iter()
            .map(|element| self.inner.value(element))
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}
