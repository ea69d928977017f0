//! Typed reply decoding and pipelined response correlation for Redis clients.
//!
//! This crate turns the untyped reply frames a Redis transport delivers into
//! strongly-typed results, and correlates pipelined requests with their
//! replies. It sits between a transport (sockets, reconnects, timeouts — not
//! provided here) and the per-command surface of a client:
//! * [decode module](crate::decode) — the registry of named decoder
//!   strategies mapping one [ReplyFrame] to one typed value
//! * [dispatch module](crate::dispatch) — the transport boundary, the
//!   synchronous [Client](crate::dispatch::Client), and the
//!   [Pipeline](crate::dispatch::Pipeline) with its deferred
//!   [PendingResult](crate::dispatch::PendingResult) handles
//!
//! ```
//!# use bytes::Bytes;
//!# use redis_results::dispatch::{Client, CommandBuilder, CommandDispatch, TransportError};
//!# use redis_results::decode::scalar::TextDecoder;
//!# use redis_results::ReplyFrame;
//!#
//!# struct Loopback;
//!#
//!# impl CommandDispatch for Loopback {
//!#     fn execute(&mut self, _command: CommandBuilder) -> Result<ReplyFrame, TransportError> {
//!#         Ok(ReplyFrame::BulkString(Bytes::from_static(b"value")))
//!#     }
//!#
//!#     fn execute_pipelined(
//!#         &mut self,
//!#         commands: Vec<CommandBuilder>,
//!#     ) -> Result<Vec<ReplyFrame>, TransportError> {
//!#         Ok(commands.iter().map(|_| ReplyFrame::BulkString(Bytes::from_static(b"value"))).collect())
//!#     }
//!# }
//!#
//! // The transport implements CommandDispatch; `Loopback` is a stand-in
//! let mut client = Client::new(Loopback);
//!
//! let value = client
//!     .execute(CommandBuilder::new("GET").arg_static("key"), TextDecoder)
//!     .unwrap();
//! assert_eq!(Some("value".to_string()), value);
//! ```
//!
//! # Pipelining
//!
//! Queueing binds each command to its decoder and returns a handle
//! immediately; one flush performs the round trip and the handles decode
//! lazily, each exactly once:
//! ```
//!# use bytes::Bytes;
//!# use redis_results::dispatch::{Client, CommandBuilder, CommandDispatch, TransportError};
//!# use redis_results::decode::scalar::LongDecoder;
//!# use redis_results::ReplyFrame;
//!#
//!# struct Loopback;
//!#
//!# impl CommandDispatch for Loopback {
//!#     fn execute(&mut self, _command: CommandBuilder) -> Result<ReplyFrame, TransportError> {
//!#         Ok(ReplyFrame::Integer(1))
//!#     }
//!#
//!#     fn execute_pipelined(
//!#         &mut self,
//!#         commands: Vec<CommandBuilder>,
//!#     ) -> Result<Vec<ReplyFrame>, TransportError> {
//!#         Ok((1..=commands.len() as i64).map(ReplyFrame::Integer).collect())
//!#     }
//!# }
//!#
//! let mut client = Client::new(Loopback);
//! let mut pipeline = client.pipeline();
//!
//! let first = pipeline.queue(CommandBuilder::new("INCR").arg_static("a"), LongDecoder);
//! let second = pipeline.queue(CommandBuilder::new("INCR").arg_static("b"), LongDecoder);
//!
//! pipeline.flush().unwrap();
//!
//! // Replies correlate to handles strictly by submission order
//! assert_eq!(1, first.value().unwrap());
//! assert_eq!(2, second.value().unwrap());
//! ```
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod decode;
pub mod dispatch;

pub use decode::{DecodeError, ReplyDecoder, ReplyFrame};
