//! Synchronous command execution.
use crate::decode::{DecodeError, ReplyDecoder, ReplyFrame};
use crate::dispatch::pipeline::Pipeline;
use crate::dispatch::{CommandBuilder, CommandDispatch, TransportError};

/// Error handling for command execution
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// Redis error response. Inner value is the error message received,
    /// preserved verbatim.
    #[error("error reply from server: {0}")]
    ErrorReply(String),
    /// Failure reported by the transport in place of a reply
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The reply shape violated the bound decoder's contract
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// A pending result was read before its pipeline was flushed.
    /// This is a caller error; the handle resolves normally once a flush
    /// has filled its slot.
    #[error("pending result read before the pipeline was flushed")]
    ReadBeforeFlush,
    /// The transport returned a different number of replies than commands
    /// were queued. Filling slots from a misaligned batch would silently
    /// cross-wire results, so the whole batch is failed instead.
    #[error("reply correlation lost: {expected} commands queued, {received} replies received")]
    CorrelationLost { expected: usize, received: usize },
}

/// Intercepts server error frames before a decoder runs, so decoders only
/// ever see payload shapes
pub(crate) fn assert_error(frame: &ReplyFrame) -> Result<(), CommandError> {
    match frame {
        ReplyFrame::Error(message) => Err(CommandError::ErrorReply(message.to_string())),
        _ => Ok(()),
    }
}

/// Client executing commands over a [CommandDispatch].
///
/// Each call site binds the decoder matching its declared result type; the
/// decoder choice is part of the operation, never inferred from the reply.
pub struct Client<D: CommandDispatch> {
    dispatch: D,
}

impl<D: CommandDispatch> Client<D> {
    pub fn new(dispatch: D) -> Self {
        Client { dispatch }
    }

    /// Executes the command synchronously and decodes the reply with the
    /// bound decoder
    pub fn execute<R: ReplyDecoder>(
        &mut self,
        command: CommandBuilder,
        decoder: R,
    ) -> Result<R::Output, CommandError> {
        let frame = self.dispatch.execute(command)?;
        assert_error(&frame)?;
        Ok(decoder.decode(frame)?)
    }

    /// Starts a pipelined batch over this client's dispatcher
    pub fn pipeline(&mut self) -> Pipeline<'_, D> {
        Pipeline::new(&mut self.dispatch)
    }

    /// Releases the underlying dispatcher
    pub fn into_inner(self) -> D {
        self.dispatch
    }
}
