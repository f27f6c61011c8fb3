//! The retry discipline shared by dialing, nonce lookup and receipt polling.
//!
//! Built on `backon`: a fixed delay for dial and nonce loops, a Fibonacci
//! schedule for receipts. Only [`RpcxError::is_retryable`] errors are retried;
//! anything else returns after the attempt that produced it.

use std::{
    future::Future,
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use backon::{BackoffBuilder, ConstantBuilder, FibonacciBuilder, Retryable};

use crate::error::RpcxError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    Fixed(Duration),
    Fibonacci { base: Duration, max: Duration },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: usize,
    pub backoff: Backoff,
}

/// The outcome of a policy that never saw a success.
#[derive(Debug, thiserror::Error)]
#[error("gave up after {attempts} attempt(s): {last_error}")]
pub struct RetryFailure {
    pub attempts: usize,
    /// `true` when the budget ran out, `false` when a non-retryable error stopped the loop.
    pub exhausted: bool,
    pub last_error: RpcxError,
}

impl RetryFailure {
    pub fn into_error(self) -> RpcxError {
        self.last_error
    }
}

impl RetryPolicy {
    pub fn fixed(delay: Duration, max_attempts: usize) -> Self {
        Self {
            max_attempts,
            backoff: Backoff::Fixed(delay),
        }
    }

    pub fn fibonacci(base: Duration, max: Duration, max_attempts: usize) -> Self {
        Self {
            max_attempts,
            backoff: Backoff::Fibonacci { base, max },
        }
    }

    /// A fixed-delay policy whose budget grows with the number of endpoints.
    pub fn scaled_by_endpoints(delay: Duration, per_endpoint: usize, endpoints: usize) -> Self {
        Self::fixed(delay, per_endpoint.saturating_mul(endpoints.max(1)))
    }

    /// Runs `operation` until it succeeds, fails with a non-retryable error, or
    /// the attempt budget is spent.
    pub async fn run<T, F, Fut>(&self, label: &str, mut operation: F) -> Result<T, RetryFailure>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, RpcxError>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let retries = max_attempts - 1;
        let attempts = AtomicUsize::new(0);
        let counted = || {
            attempts.fetch_add(1, Ordering::Relaxed);
            operation()
        };

        let result = match self.backoff {
            Backoff::Fixed(delay) => {
                let builder = ConstantBuilder::default()
                    .with_delay(delay)
                    .with_max_times(retries);
                drive(counted, builder, label).await
            }
            Backoff::Fibonacci { base, max } => {
                let builder = FibonacciBuilder::default()
                    .with_min_delay(base)
                    .with_max_delay(max)
                    .with_max_times(retries);
                drive(counted, builder, label).await
            }
        };

        result.map_err(|last_error| {
            let attempts = attempts.load(Ordering::Relaxed);
            let exhausted = last_error.is_retryable() && attempts >= max_attempts;
            if exhausted {
                tracing::warn!(operation = label, attempts, error = %last_error, "retry budget exhausted");
            }
            RetryFailure {
                attempts,
                exhausted,
                last_error,
            }
        })
    }
}

async fn drive<T, F, Fut, B>(operation: F, builder: B, label: &str) -> Result<T, RpcxError>
where
    B: BackoffBuilder,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, RpcxError>>,
{
    operation
        .retry(builder)
        .sleep(tokio::time::sleep)
        .when(RpcxError::is_retryable)
        .notify(|err: &RpcxError, dur: Duration| {
            tracing::debug!(
                operation = label,
                backoff_ms = dur.as_millis() as u64,
                error = %err,
                "retrying after backoff"
            );
        })
        .await
}
