//! Cooperative cancellation for long-running solves.
//!
//! None of the engines has a built-in time limit: Branch-and-Bound is
//! exponential and Lin-Kernighan runs until a local optimum. A host that needs
//! a ceiling hands the engine a [`CancelToken`]; the engine polls it at every
//! recursion or iteration boundary and stops with
//! [`SolveError::Cancelled`](crate::SolveError::Cancelled).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::{Result, SolveError};

/// A cloneable cancellation flag with an optional deadline.
///
/// Clones share the flag, so one clone can be handed to the solve while the
/// host keeps another to call [`cancel`](CancelToken::cancel) from a different
/// thread.
///
/// # Examples
///
/// ```
/// use u_tsp::CancelToken;
///
/// let token = CancelToken::new();
/// let handle = token.clone();
/// assert!(!token.is_cancelled());
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancelToken {
    /// Creates a token that only fires when [`cancel`](Self::cancel) is called.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a token sharing this flag that also fires at `deadline`.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Returns a token sharing this flag that also fires after `timeout` from now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Requests cancellation for every clone of this token.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once cancelled or past the deadline.
    pub fn is_cancelled(&self) -> bool {
        if self.flag.load(Ordering::Relaxed) {
            return true;
        }
        matches!(self.deadline, Some(deadline) if Instant::now() >= deadline)
    }

    /// Fails with [`SolveError::Cancelled`] if the token has fired.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(SolveError::Cancelled)
        } else {
            Ok(())
        }
    }
}
