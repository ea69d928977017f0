//! # Command dispatch and pipelined resolution
//!
//! The decoding layer sits on a narrow transport boundary: a
//! [CommandDispatch] takes one command (or a batch) and delivers one
//! wire-decoded [ReplyFrame] per command. Everything below that line
//! (sockets, reconnects, timeouts) is the transport's concern.
//!
//! [Client] is the synchronous mode: execute, intercept server error
//! replies, decode. [Pipeline] is the batched mode: [queue](Pipeline::queue)
//! returns a [PendingResult] handle immediately, [flush](Pipeline::flush)
//! performs one round trip and fills the reply slots in strict submission
//! order, and each handle decodes its reply lazily on first read.
pub use client::{Client, CommandError};
pub use command::CommandBuilder;
pub use pending::PendingResult;
pub use pipeline::Pipeline;

pub(crate) mod client;
pub(crate) mod command;
pub(crate) mod pending;
pub(crate) mod pipeline;

#[cfg(test)]
pub(crate) mod tests;

use crate::decode::ReplyFrame;

/// Failure delivered by the transport in place of a reply frame.
///
/// Generated below the dispatch boundary and propagated through this layer
/// verbatim; nothing here retries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// No response within the transport's configured time frame
    #[error("timed out waiting for a response")]
    Timeout,
    /// Low level network error
    #[error("i/o failure: {0}")]
    Io(String),
    /// The connection was closed while requests were outstanding
    #[error("connection closed")]
    Closed,
}

/// Boundary to the transport layer.
///
/// `execute` performs one synchronous round trip. `execute_pipelined` sends
/// the whole batch in one round trip and returns the replies strictly in
/// submission order; correlation is positional, so the transport must never
/// reorder. A batch-level failure fails the whole batch.
pub trait CommandDispatch {
    fn execute(&mut self, command: CommandBuilder) -> Result<ReplyFrame, TransportError>;

    fn execute_pipelined(&mut self, commands: Vec<CommandBuilder>) -> Result<Vec<ReplyFrame>, TransportError>;
}
