//! Pipelined execution.
//!
//! Queued commands are correlated to their replies purely by submission
//! order: the reply slots form an arena indexed by queue position, handles
//! refer to their slot by index, and a flush fills slots strictly FIFO.
//! There are no references from the arena back to the handles.
use crate::decode::{ReplyDecoder, ReplyFrame};
use crate::dispatch::client::CommandError;
use crate::dispatch::pending::PendingResult;
use crate::dispatch::{CommandBuilder, CommandDispatch};
use parking_lot::Mutex;
use std::sync::Arc;

/// State of one reply slot
pub(crate) enum SlotState {
    /// Command queued, reply not yet delivered
    Queued,
    /// Reply delivered by a flush, not yet taken by the handle
    Filled(ReplyFrame),
    /// The flush covering this slot failed; the error is handed to the
    /// handle at resolution time
    Failed(CommandError),
    /// Frame consumed by the handle's single decode
    Taken,
}

/// Reply slots indexed by submission order.
///
/// Each slot is written once by a flush and its frame taken once by the
/// owning handle; the handle memoizes the outcome afterwards.
pub(crate) struct SlotArena {
    slots: Vec<SlotState>,
    /// First slot the next flush will fill
    fill_cursor: usize,
}

impl SlotArena {
    fn new() -> Self {
        SlotArena {
            slots: Vec::new(),
            fill_cursor: 0,
        }
    }

    /// Appends an empty slot, returning its index
    fn push(&mut self) -> usize {
        self.slots.push(SlotState::Queued);
        self.slots.len() - 1
    }

    pub(crate) fn is_queued(&self, index: usize) -> bool {
        matches!(self.slots[index], SlotState::Queued)
    }

    /// Takes the slot's outcome for the handle's single decode
    pub(crate) fn take(&mut self, index: usize) -> Result<ReplyFrame, CommandError> {
        match core::mem::replace(&mut self.slots[index], SlotState::Taken) {
            SlotState::Filled(frame) => Ok(frame),
            SlotState::Failed(error) => Err(error),
            SlotState::Queued => {
                self.slots[index] = SlotState::Queued;
                Err(CommandError::ReadBeforeFlush)
            }
            // Unreachable through the handle, which memoizes its first take
            SlotState::Taken => Err(CommandError::ReadBeforeFlush),
        }
    }

    fn fill(&mut self, replies: Vec<ReplyFrame>) {
        for frame in replies {
            self.slots[self.fill_cursor] = SlotState::Filled(frame);
            self.fill_cursor += 1;
        }
    }

    fn fail_unfilled(&mut self, error: CommandError) {
        while self.fill_cursor < self.slots.len() {
            self.slots[self.fill_cursor] = SlotState::Failed(error.clone());
            self.fill_cursor += 1;
        }
    }
}

/// Batched command execution with deferred typed results.
///
/// [queue](Pipeline::queue) never blocks and returns the handle for the
/// command's eventual result; [flush](Pipeline::flush) performs one round
/// trip for everything queued since the previous flush.
pub struct Pipeline<'a, D: CommandDispatch> {
    dispatch: &'a mut D,
    slots: Arc<Mutex<SlotArena>>,
    queued: Vec<CommandBuilder>,
}

impl<'a, D: CommandDispatch> Pipeline<'a, D> {
    pub(crate) fn new(dispatch: &'a mut D) -> Self {
        Pipeline {
            dispatch,
            slots: Arc::new(Mutex::new(SlotArena::new())),
            queued: Vec::new(),
        }
    }

    /// Queues the command and binds the decoder for its eventual reply.
    ///
    /// The returned handle stays unresolvable until the next
    /// [flush](Pipeline::flush) covers it.
    pub fn queue<R: ReplyDecoder>(&mut self, command: CommandBuilder, decoder: R) -> PendingResult<R> {
        let index = self.slots.lock().push();
        self.queued.push(command);
        PendingResult::new(Arc::clone(&self.slots), index, decoder)
    }

    /// Number of commands queued since the last flush
    pub fn queued_count(&self) -> usize {
        self.queued.len()
    }

    /// Sends all queued commands in one round trip and fills their reply
    /// slots in submission order.
    ///
    /// The reply count is checked before any slot is filled; on a mismatch
    /// the whole batch fails with [CommandError::CorrelationLost]. A
    /// transport failure likewise fails every slot of the batch with the
    /// preserved error. Queueing after a flush starts a new batch over the
    /// same arena.
    pub fn flush(&mut self) -> Result<(), CommandError> {
        let commands = core::mem::take(&mut self.queued);
        if commands.is_empty() {
            return Ok(());
        }
        let expected = commands.len();

        match self.dispatch.execute_pipelined(commands) {
            Ok(replies) => {
                if replies.len() != expected {
                    let error = CommandError::CorrelationLost {
                        expected,
                        received: replies.len(),
                    };
                    self.slots.lock().fail_unfilled(error.clone());
                    return Err(error);
                }

                log::trace!("pipeline flush filled {} reply slots", expected);
                self.slots.lock().fill(replies);
                Ok(())
            }
            Err(transport) => {
                let error = CommandError::Transport(transport);
                self.slots.lock().fail_unfilled(error.clone());
                Err(error)
            }
        }
    }
}
