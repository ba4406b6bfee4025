//! Scroll restoration for freshly opened pages.
//!
//! A page that is still loading images or rendering content may ignore a
//! scroll request or land short of it. The restorer sets the offset, reads
//! it back, and retries with a growing delay until the two match or the
//! attempt cap is reached:
//!
//! ```text
//!              offset == target
//! Attempting ------------------> Settled
//!   |    ^
//!   |    | mismatch, attempts < cap (sleep attempt × base_delay)
//!   +----+
//!   |
//!   | mismatch, attempts == cap
//!   v
//! Exhausted
//! ```
//!
//! Failure to land is best-effort: it is logged, never returned as an error.

use std::time::Duration;

use async_trait::async_trait;

/// A page surface reported a failure while setting or reading its offset.
#[derive(Debug, Clone, thiserror::Error)]
#[error("scroll surface unavailable: {0}")]
pub struct SurfaceError(pub String);

/// The viewing context the restorer scrolls.
#[async_trait]
pub trait ScrollSurface: Send + Sync {
    /// Request a vertical scroll offset.
    async fn set_scroll_top(&self, offset: u64) -> Result<(), SurfaceError>;

    /// Read back the current vertical scroll offset.
    async fn scroll_top(&self) -> Result<u64, SurfaceError>;
}

/// Retry budget and delay growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestorePolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Delay unit; the wait after attempt `n` is `n × base_delay`.
    pub base_delay: Duration,
}

impl Default for RestorePolicy {
    fn default() -> Self {
        Self { max_attempts: 6, base_delay: Duration::from_millis(250) }
    }
}

impl RestorePolicy {
    /// Wait before the attempt following attempt number `attempt` (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }
}

/// Where the restorer is in its protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreState {
    /// About to make attempt number `attempt` (1-based).
    Attempting { attempt: u32 },
    /// The observed offset matched the target.
    Settled { attempts: u32 },
    /// The cap was reached without a match.
    Exhausted { attempts: u32 },
}

impl RestoreState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, RestoreState::Attempting { .. })
    }
}

/// What to do after observing an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Wait this long, then attempt again.
    Retry(Duration),
    /// Stop; the state is terminal.
    Done(RestoreState),
}

/// Bounded retry state machine for one restoration.
#[derive(Debug, Clone)]
pub struct ScrollRestorer {
    target: u64,
    policy: RestorePolicy,
    state: RestoreState,
}

impl ScrollRestorer {
    pub fn new(target: u64, policy: RestorePolicy) -> Self {
        Self { target, policy, state: RestoreState::Attempting { attempt: 1 } }
    }

    pub fn state(&self) -> RestoreState {
        self.state
    }

    /// Record the offset read back after the current attempt.
    ///
    /// `None` means the surface could not report an offset, which counts as
    /// a mismatch. Observing in a terminal state is a no-op.
    pub fn observe(&mut self, observed: Option<u64>) -> Step {
        let attempt = match self.state {
            RestoreState::Attempting { attempt } => attempt,
            terminal => return Step::Done(terminal),
        };

        if observed == Some(self.target) {
            self.state = RestoreState::Settled { attempts: attempt };
            return Step::Done(self.state);
        }

        if attempt >= self.policy.max_attempts {
            self.state = RestoreState::Exhausted { attempts: attempt };
            return Step::Done(self.state);
        }

        self.state = RestoreState::Attempting { attempt: attempt + 1 };
        Step::Retry(self.policy.delay_after(attempt))
    }

    /// Drive the protocol against `surface` until a terminal state.
    pub async fn run<S: ScrollSurface + ?Sized>(mut self, surface: &S) -> RestoreState {
        loop {
            let observed = match surface.set_scroll_top(self.target).await {
                Ok(()) => surface.scroll_top().await,
                Err(e) => Err(e),
            };

            let observed = match observed {
                Ok(offset) => Some(offset),
                Err(e) => {
                    tracing::debug!(error = %e, state = ?self.state, "scroll attempt failed");
                    None
                }
            };

            match self.observe(observed) {
                Step::Retry(delay) => {
                    tracing::debug!(target_offset = self.target, ?observed, ?delay, "scroll did not stick, retrying");
                    tokio::time::sleep(delay).await;
                }
                Step::Done(state) => {
                    match state {
                        RestoreState::Settled { attempts } => {
                            tracing::debug!(target_offset = self.target, attempts, "scroll restored");
                        }
                        RestoreState::Exhausted { attempts } => {
                            tracing::warn!(target_offset = self.target, attempts, ?observed, "scroll restore gave up");
                        }
                        RestoreState::Attempting { .. } => {}
                    }
                    return state;
                }
            }
        }
    }
}
