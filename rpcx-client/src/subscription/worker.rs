use futures::StreamExt;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

use super::{CloseReason, Subscription, SubscriptionState};
use crate::{broker::BrokerStream, error::RpcxError, pool::PooledConnection};

/// Spawns the task that pumps `stream` into a bounded queue.
///
/// The task owns the lease and the only sender, so the queue closes exactly
/// once, when the task finishes.
pub(crate) fn spawn<T, U, F>(
    lease: PooledConnection,
    stream: BrokerStream<T>,
    decode: F,
    capacity: usize,
    scope: &CancellationToken,
    label: &'static str,
) -> Subscription<U>
where
    T: Send + 'static,
    U: Send + 'static,
    F: Fn(T) -> Result<U, RpcxError> + Send + 'static,
{
    let token = scope.child_token();
    let (tx, rx) = mpsc::channel(capacity.max(1));
    let (state_tx, state_rx) = watch::channel(SubscriptionState::Opening);

    tokio::spawn(pump(
        lease,
        stream,
        decode,
        tx,
        state_tx,
        token.clone(),
        label,
    ));

    Subscription::new(rx, token, state_rx)
}

async fn pump<T, U, F>(
    lease: PooledConnection,
    mut stream: BrokerStream<T>,
    decode: F,
    tx: mpsc::Sender<U>,
    state: watch::Sender<SubscriptionState>,
    token: CancellationToken,
    label: &'static str,
) where
    F: Fn(T) -> Result<U, RpcxError>,
{
    let endpoint = lease.endpoint().to_string();
    state.send_replace(SubscriptionState::Streaming);
    tracing::debug!(subscription = label, endpoint = %endpoint, "subscription streaming");

    let mut delivered: u64 = 0;
    let reason = loop {
        let frame = tokio::select! {
            biased;
            _ = token.cancelled() => break CloseReason::Cancelled,
            frame = stream.next() => frame,
        };

        let item = match frame {
            None => break CloseReason::Completed,
            Some(Err(status)) => {
                tracing::error!(subscription = label, endpoint = %endpoint, error = %status, "receive failed");
                break CloseReason::StreamError(status.message().to_string());
            }
            Some(Ok(item)) => item,
        };

        let value = match decode(item) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!(subscription = label, endpoint = %endpoint, error = %e, "dropping subscription on undecodable frame");
                break CloseReason::DecodeError(e.to_string());
            }
        };

        tokio::select! {
            biased;
            _ = token.cancelled() => break CloseReason::Cancelled,
            sent = tx.send(value) => {
                if sent.is_err() {
                    break CloseReason::Cancelled;
                }
                delivered += 1;
            }
        }
    };

    state.send_replace(SubscriptionState::Draining);
    drop(tx);
    drop(stream);
    drop(lease);

    tracing::info!(subscription = label, endpoint = %endpoint, delivered, reason = ?reason, "subscription closed");
    state.send_replace(SubscriptionState::Closed(reason));
}
