//! Deadline-bearing cancellation context.

use std::fmt;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Why a [`Deadline`] is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoneCause {
    /// The context was cancelled explicitly.
    Cancelled,
    /// The deadline passed.
    DeadlineExceeded,
}

impl fmt::Display for DoneCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled => write!(f, "context canceled"),
            Self::DeadlineExceeded => write!(f, "context deadline exceeded"),
        }
    }
}

/// A cancellation token paired with an absolute deadline.
///
/// Cheap to clone; clones share the same token. Explicit cancellation
/// takes precedence over expiry when both apply.
#[derive(Debug, Clone)]
pub struct Deadline {
    token: CancellationToken,
    expires_at: Instant,
}

impl Deadline {
    /// A context that expires `timeout` from now.
    pub fn after(timeout: Duration) -> Self {
        Self {
            token: CancellationToken::new(),
            expires_at: Instant::now() + timeout,
        }
    }

    /// A context cancelled whenever `parent` is, and otherwise after `timeout`.
    pub fn child_of(parent: &CancellationToken, timeout: Duration) -> Self {
        Self {
            token: parent.child_token(),
            expires_at: Instant::now() + timeout,
        }
    }

    /// Cancel the context now.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// `Some(cause)` once the context is done.
    pub fn cause(&self) -> Option<DoneCause> {
        if self.token.is_cancelled() {
            Some(DoneCause::Cancelled)
        } else if Instant::now() >= self.expires_at {
            Some(DoneCause::DeadlineExceeded)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fresh_deadline_is_not_done() {
        let deadline = Deadline::after(Duration::from_secs(30));
        assert_eq!(deadline.cause(), None);
    }

    #[tokio::test]
    async fn test_expiry() {
        let deadline = Deadline::after(Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(deadline.cause(), Some(DoneCause::DeadlineExceeded));
    }

    #[tokio::test]
    async fn test_cancel_wins_over_expiry() {
        let deadline = Deadline::after(Duration::from_millis(1));
        deadline.cancel();
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert_eq!(deadline.cause(), Some(DoneCause::Cancelled));
    }

    #[tokio::test]
    async fn test_child_follows_parent() {
        let parent = CancellationToken::new();
        let deadline = Deadline::child_of(&parent, Duration::from_secs(30));
        let clone = deadline.clone();
        parent.cancel();
        assert_eq!(clone.cause(), Some(DoneCause::Cancelled));
    }
}
