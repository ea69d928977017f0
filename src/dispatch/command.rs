//! Builder for constructing outgoing command frames
//!
//! Generic wrapper accumulating the command keyword plus its arguments as
//! byte strings. Argument typing beyond bytes belongs to the command layer
//! sitting on top of this crate.
//!
//! # Creating command frames
//! The following example builds the frame for [HGET](https://redis.io/commands/hget/).
//! ```
//! use redis_results::dispatch::CommandBuilder;
//! use redis_results::ReplyFrame;
//!
//! let _frame: ReplyFrame = CommandBuilder::new("HGET")
//!     .arg_static("myhash")
//!     .arg_static("field1")
//!     .into();
//! ```
//! # Improved performance
//! For best performance, especially with large amounts of data, it is recommended to use [Bytes](<https://docs.rs/bytes/latest/bytes/>).
//! ```
//!# use bytes::Bytes;
//! use redis_results::dispatch::CommandBuilder;
//!# use redis_results::ReplyFrame;
//!#
//! // Using Bytes avoids data copy, as clone() is shallow
//! let value = Bytes::from_static("Large value".as_bytes());
//!
//! let _frame: ReplyFrame = CommandBuilder::new("HSET")
//!     .arg_static("myhash")
//!     .arg_static("field1")
//!     .arg(&value)
//!     .into();
//! ```
use crate::decode::ReplyFrame;
use bytes::Bytes;

/// Builder for constructing command frames
#[derive(Clone, Default)]
pub struct CommandBuilder {
    pub(crate) elements: Vec<Bytes>,
}

impl CommandBuilder {
    pub fn new(keyword: &'static str) -> Self {
        CommandBuilder {
            elements: vec![Bytes::from_static(keyword.as_bytes())],
        }
    }

    /// Adds a static argument
    pub fn arg_static(mut self, arg: &'static str) -> Self {
        self.elements.push(Bytes::from_static(arg.as_bytes()));
        self
    }

    /// Adds a static argument
    pub fn arg_static_option(mut self, arg: Option<&'static str>) -> Self {
        if let Some(arg_str) = arg {
            self.elements.push(Bytes::from_static(arg_str.as_bytes()));
        }
        self
    }

    /// Adds cased string of uint
    pub fn arg_uint(mut self, arg: usize) -> Self {
        self.elements.push(Bytes::from(arg.to_string()));
        self
    }

    /// Adds a byte argument
    /// Note: Besides static, the most efficient way caused by the nature how Bytes cloning is working
    pub fn arg(mut self, arg: &Bytes) -> Self {
        self.elements.push(arg.clone());
        self
    }

    /// Just adding byte if option is Some
    pub fn arg_option(mut self, arg: Option<&Bytes>) -> Self {
        if let Some(inner) = arg {
            self.elements.push(inner.clone());
        }
        self
    }

    /// The command keyword, for diagnostics
    pub fn keyword(&self) -> Option<&Bytes> {
        self.elements.first()
    }
}

impl From<CommandBuilder> for ReplyFrame {
    fn from(builder: CommandBuilder) -> Self {
        let mut frames = Vec::with_capacity(builder.elements.len());
        for byte in builder.elements {
            frames.push(ReplyFrame::BulkString(byte));
        }

        ReplyFrame::Array(frames)
    }
}
