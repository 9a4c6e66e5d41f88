//! Computer moves with a think delay.
//!
//! The opponent runs as a tokio task. Its answer comes back tagged with the
//! [`TurnTicket`] it was computed for, so the engine refuses it if the game
//! moved on (a reset, most likely) in the meantime.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::engine::TurnTicket;
use crate::opponent::Opponent;
use crate::{GameState, Move};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledMove {
    pub ticket: TurnTicket,
    pub mv: Move,
}

/// A computer move that is being thought about. Dropping it cancels the move.
#[derive(Debug)]
pub struct PendingMove {
    ticket: TurnTicket,
    cancellation_token: CancellationToken,
    task: JoinHandle<()>,
    receiver: oneshot::Receiver<Move>,
}

impl PendingMove {
    /// Waits `think_delay`, then asks `opponent` for a move in `snapshot`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<T>(
        opponent: Arc<Mutex<T>>,
        snapshot: GameState,
        ticket: TurnTicket,
        think_delay: Duration,
    ) -> Self
    where
        T: Opponent + Send + 'static,
    {
        let cancellation_token = CancellationToken::new();
        let (sender, receiver) = oneshot::channel();
        let cancelled = cancellation_token.clone();
        let task = tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(think_delay) => {}
                _ = cancelled.cancelled() => {
                    log::debug!("think delay cancelled");
                    return;
                }
            }
            let mv = opponent.lock().await.select_move(&snapshot);
            if cancelled.is_cancelled() {
                return;
            }
            match mv {
                // The receiver is gone if the pending move was dropped.
                Some(mv) => {
                    let _ = sender.send(mv);
                }
                None => log::warn!("opponent had no move for {:?}", snapshot),
            }
        });
        PendingMove {
            ticket,
            cancellation_token,
            task,
            receiver,
        }
    }

    pub fn ticket(&self) -> TurnTicket {
        self.ticket
    }

    /// Stops the task. A move it already produced is discarded.
    pub fn cancel(&self) {
        self.cancellation_token.cancel();
        self.task.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation_token.is_cancelled()
    }

    /// Non-blocking. `None` while still thinking, after cancellation, or if
    /// the opponent had no move.
    pub fn try_take(&mut self) -> Option<ScheduledMove> {
        if self.is_cancelled() {
            return None;
        }
        let ticket = self.ticket;
        self.receiver
            .try_recv()
            .ok()
            .map(|mv| ScheduledMove { ticket, mv })
    }

    /// Resolves once the move is ready. `None` if it was cancelled first.
    pub async fn wait(&mut self) -> Option<ScheduledMove> {
        let ticket = self.ticket;
        tokio::select! {
            biased;

            _ = self.cancellation_token.cancelled() => None,
            mv = &mut self.receiver => mv.ok().map(|mv| ScheduledMove { ticket, mv }),
        }
    }
}

impl Drop for PendingMove {
    fn drop(&mut self) {
        self.cancel();
    }
}
