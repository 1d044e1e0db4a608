//! Pending-call registry.
//!
//! Maps correlation tokens to the one-shot completion of the command that
//! is waiting for them.
//!
//! Flow:
//! 1. The facade draws a token and calls `register()` to get a [`PendingCommand`]
//! 2. The command is published with the token as `COMMAND_IDENTIFIER`
//! 3. The inbound path decodes a result and calls `resolve()`
//! 4. The caller's [`PendingCommand`] completes, exactly once
//!
//! Some DataWedge commands never answer. Their entries are reclaimed by
//! `remove_expired()`; without a sweep they live until `clear()`.

use super::command::CommandOutcome;
use super::correlation::CorrelationToken;
use crate::error::{CommandError, RegistryError};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::task::{Context, Poll};
use std::time::{Duration, Instant};
use tokio::sync::oneshot;
use tracing::{debug, warn};

type Completion = Result<CommandOutcome, CommandError>;

/// Handle to the eventual result of a sent command.
///
/// Resolves at most once. A command whose entry is discarded without a
/// result (dispatcher shutdown, expiry sweep) resolves to
/// [`CommandError::Abandoned`]; it never resolves to a result that belongs
/// to another command. DataWedge may never answer at all, so callers that
/// need liveness should wrap the handle in `tokio::time::timeout`.
#[derive(Debug)]
pub struct PendingCommand {
    token: Option<CorrelationToken>,
    state: PendingState,
}

#[derive(Debug)]
enum PendingState {
    Waiting(oneshot::Receiver<Completion>),
    Ready(Option<Completion>),
}

impl PendingCommand {
    /// A handle that has already failed (the command never reached the bus).
    pub fn failed(token: Option<CorrelationToken>, error: CommandError) -> Self {
        Self {
            token,
            state: PendingState::Ready(Some(Err(error))),
        }
    }

    /// Token the command was sent with, if it got that far.
    #[must_use]
    pub fn token(&self) -> Option<&CorrelationToken> {
        self.token.as_ref()
    }

    /// Poll without waiting.
    ///
    /// Returns the outcome once. `None` means no result yet, or that the
    /// outcome was already taken; awaiting a consumed handle yields
    /// [`CommandError::Abandoned`].
    pub fn try_outcome(&mut self) -> Option<Completion> {
        let completion = match &mut self.state {
            PendingState::Waiting(rx) => match rx.try_recv() {
                Ok(completion) => completion,
                Err(oneshot::error::TryRecvError::Empty) => return None,
                Err(oneshot::error::TryRecvError::Closed) => Err(CommandError::Abandoned),
            },
            PendingState::Ready(slot) => slot.take()?,
        };
        self.state = PendingState::Ready(None);
        Some(completion)
    }
}

impl Future for PendingCommand {
    type Output = Completion;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        let completion = match &mut this.state {
            PendingState::Waiting(rx) => match Pin::new(rx).poll(cx) {
                Poll::Ready(Ok(completion)) => completion,
                // Sender dropped without completing
                Poll::Ready(Err(_)) => Err(CommandError::Abandoned),
                Poll::Pending => return Poll::Pending,
            },
            PendingState::Ready(slot) => slot.take().unwrap_or(Err(CommandError::Abandoned)),
        };
        this.state = PendingState::Ready(None);
        Poll::Ready(completion)
    }
}

/// A command waiting for its result.
struct PendingCall {
    completion: oneshot::Sender<Completion>,
    created_at: Instant,
    command: &'static str,
}

/// Counters for the registry.
#[derive(Debug, Default)]
pub struct RegistryStats {
    pub registered: AtomicU64,
    pub resolved: AtomicU64,
    pub failed: AtomicU64,
    pub unmatched: AtomicU64,
    pub expired: AtomicU64,
    pub abandoned: AtomicU64,
}

/// Point-in-time copy of [`RegistryStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryStatsSnapshot {
    pub registered: u64,
    pub resolved: u64,
    pub failed: u64,
    pub unmatched: u64,
    pub expired: u64,
    pub abandoned: u64,
}

impl RegistryStats {
    #[must_use]
    pub fn snapshot(&self) -> RegistryStatsSnapshot {
        RegistryStatsSnapshot {
            registered: self.registered.load(Ordering::Relaxed),
            resolved: self.resolved.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            unmatched: self.unmatched.load(Ordering::Relaxed),
            expired: self.expired.load(Ordering::Relaxed),
            abandoned: self.abandoned.load(Ordering::Relaxed),
        }
    }
}

/// Token → completion table.
///
/// Backed by a sharded `DashMap`: operations on distinct tokens do not block
/// each other, and insert/remove of one token is atomic.
#[derive(Default)]
pub struct PendingCallRegistry {
    pending: DashMap<CorrelationToken, PendingCall>,
    stats: RegistryStats,
}

impl PendingCallRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `token` and return the handle its result will arrive on.
    pub fn register(
        &self,
        token: CorrelationToken,
        command: &'static str,
        now: Instant,
    ) -> Result<PendingCommand, RegistryError> {
        match self.pending.entry(token.clone()) {
            Entry::Occupied(_) => Err(RegistryError::DuplicateToken(token.to_string())),
            Entry::Vacant(slot) => {
                let (tx, rx) = oneshot::channel();
                slot.insert(PendingCall {
                    completion: tx,
                    created_at: now,
                    command,
                });
                self.stats.registered.fetch_add(1, Ordering::Relaxed);

                debug!(token = %token, command, "Registered pending call");

                Ok(PendingCommand {
                    token: Some(token),
                    state: PendingState::Waiting(rx),
                })
            }
        }
    }

    /// Complete the call registered under `token` with `outcome`.
    ///
    /// Returns `false` when no call is pending under `token`; nothing else
    /// is touched in that case.
    pub fn resolve(&self, token: &CorrelationToken, outcome: CommandOutcome) -> bool {
        let code = outcome.raw_result_code.clone();
        if self.complete(token, Ok(outcome)) {
            self.stats.resolved.fetch_add(1, Ordering::Relaxed);
            debug!(token = %token, result = %code, "Resolved pending call");
            true
        } else {
            self.stats.unmatched.fetch_add(1, Ordering::Relaxed);
            false
        }
    }

    /// Complete the call registered under `token` with an error.
    pub fn fail(&self, token: &CorrelationToken, error: CommandError) -> bool {
        if self.complete(token, Err(error)) {
            self.stats.failed.fetch_add(1, Ordering::Relaxed);
            true
        } else {
            false
        }
    }

    fn complete(&self, token: &CorrelationToken, completion: Completion) -> bool {
        let Some((_, call)) = self.pending.remove(token) else {
            return false;
        };

        if call.completion.send(completion).is_err() {
            // Caller dropped its handle; the token still matched.
            debug!(
                token = %token,
                command = call.command,
                "Pending call receiver dropped"
            );
        }
        true
    }

    /// Drop calls older than `ttl`, and calls whose handle the caller
    /// dropped. Dropped entries resolve to [`CommandError::Abandoned`].
    ///
    /// Returns the number of entries removed.
    pub fn remove_expired(&self, now: Instant, ttl: Duration) -> usize {
        let mut removed = 0;

        self.pending.retain(|token, call| {
            let age = now.saturating_duration_since(call.created_at);
            if age > ttl {
                warn!(
                    token = %token,
                    command = call.command,
                    age_ms = age.as_millis() as u64,
                    "Removing expired pending call"
                );
                self.stats.expired.fetch_add(1, Ordering::Relaxed);
                removed += 1;
                false
            } else if call.completion.is_closed() {
                debug!(token = %token, command = call.command, "Removing orphaned pending call");
                self.stats.abandoned.fetch_add(1, Ordering::Relaxed);
                removed += 1;
                false
            } else {
                true
            }
        });

        removed
    }

    /// Discard every pending call without completing it.
    pub fn clear(&self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        self.stats
            .abandoned
            .fetch_add(count as u64, Ordering::Relaxed);
        count
    }

    /// Number of calls waiting for a result.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_pending(&self, token: &CorrelationToken) -> bool {
        self.pending.contains_key(token)
    }

    #[must_use]
    pub fn stats(&self) -> &RegistryStats {
        &self.stats
    }
}
