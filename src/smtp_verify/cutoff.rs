use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;

use super::error::ProbeError;

/// Cancellation token plus absolute deadline, shared by every suspension
/// point of one check.
#[derive(Debug, Clone)]
pub struct Cutoff {
    token: CancellationToken,
    deadline: Instant,
    budget: Duration,
}

impl Cutoff {
    pub fn new(token: CancellationToken, budget: Duration) -> Self {
        Self {
            token,
            deadline: Instant::now() + budget,
            budget,
        }
    }

    /// Runs `fut` until it completes, the token fires or the deadline
    /// passes. Cancellation is checked first, so it wins over a result that
    /// is ready at the same time.
    pub async fn guard<F: Future>(&self, fut: F) -> Result<F::Output, ProbeError> {
        tokio::select! {
            biased;
            () = self.token.cancelled() => Err(ProbeError::Cancelled),
            () = sleep_until(self.deadline) => Err(ProbeError::DeadlineExceeded(self.budget)),
            out = fut => Ok(out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn completes_when_future_is_first() {
        let cutoff = Cutoff::new(CancellationToken::new(), Duration::from_secs(5));
        let out = cutoff.guard(async { 7 }).await.expect("not interrupted");
        assert_eq!(out, 7);
    }

    #[tokio::test]
    async fn cancellation_wins_over_ready_result() {
        let token = CancellationToken::new();
        token.cancel();
        let cutoff = Cutoff::new(token, Duration::from_secs(5));
        let err = cutoff.guard(async { 7 }).await.expect_err("cancelled");
        assert!(matches!(err, ProbeError::Cancelled));
    }

    #[tokio::test]
    async fn deadline_interrupts_pending_future() {
        let cutoff = Cutoff::new(CancellationToken::new(), Duration::from_millis(20));
        let started = std::time::Instant::now();
        let err = cutoff
            .guard(std::future::pending::<()>())
            .await
            .expect_err("deadline");
        assert!(matches!(err, ProbeError::DeadlineExceeded(_)));
        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
