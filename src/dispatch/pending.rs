//! Deferred result resolution.
use crate::decode::ReplyDecoder;
use crate::dispatch::client::{assert_error, CommandError};
use crate::dispatch::pipeline::SlotArena;
use parking_lot::Mutex;
use std::sync::Arc;

/// Deferred handle for a pipelined command's eventual typed result.
///
/// Created by [queue](crate::dispatch::Pipeline::queue) before the reply
/// exists; the covering flush fills the underlying slot, and the first
/// [value](PendingResult::value) call performs the single decode. The
/// outcome, value or error, is memoized for all later reads.
pub struct PendingResult<R: ReplyDecoder> {
    slots: Arc<Mutex<SlotArena>>,
    index: usize,
    decoder: R,

    /// Memoized outcome of the single decode. Concurrent readers serialize
    /// here, so exactly one decode runs no matter how many threads race.
    outcome: Mutex<Option<Result<R::Output, CommandError>>>,
}

impl<R: ReplyDecoder> PendingResult<R> {
    pub(crate) fn new(slots: Arc<Mutex<SlotArena>>, index: usize, decoder: R) -> Self {
        PendingResult {
            slots,
            index,
            decoder,
            outcome: Mutex::new(None),
        }
    }

    /// Display name of the bound decoder, for diagnostics
    pub fn decoder_name(&self) -> &'static str {
        self.decoder.name()
    }

    /// True once a flush has delivered this command's reply, so
    /// [value](PendingResult::value) will resolve without error
    pub fn ready(&self) -> bool {
        !self.slots.lock().is_queued(self.index)
    }

    fn resolve(&self) -> Result<R::Output, CommandError> {
        let frame = self.slots.lock().take(self.index)?;
        assert_error(&frame)?;
        Ok(self.decoder.decode(frame)?)
    }
}

impl<R: ReplyDecoder> PendingResult<R>
where
    R::Output: Clone,
{
    /// Resolves the typed value.
    ///
    /// The first call takes the reply frame from its slot and decodes it;
    /// every later call returns the memoized outcome, including memoized
    /// decode, server and transport errors. Calling before the covering
    /// flush is a caller error surfaced as
    /// [CommandError::ReadBeforeFlush] without blocking; it is not
    /// memoized, so the handle resolves normally after a later flush.
    pub fn value(&self) -> Result<R::Output, CommandError> {
        let mut outcome = self.outcome.lock();
        if let Some(resolved) = outcome.as_ref() {
            return resolved.clone();
        }

        let result = self.resolve();
        if matches!(result, Err(CommandError::ReadBeforeFlush)) {
            return result;
        }

        *outcome = Some(result.clone());
        result
    }
}
