use std::{
    pin::Pin,
    task::{Context, Poll},
};

use futures::Stream;
use rpcx_proto::pb;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

use crate::{client::ChainClient, error::RpcxError};

mod decode;
mod worker;

/// What a live subscription listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubscriptionKind {
    Block,
    Event,
    InterchainTx,
    BlockHeader,
    InterchainTxWrapper,
    UnionInterchainTxWrapper,
    EvmLog,
}

impl SubscriptionKind {
    pub fn as_proto(self) -> pb::subscription_request::Type {
        use pb::subscription_request::Type;
        match self {
            SubscriptionKind::Block => Type::Block,
            SubscriptionKind::Event => Type::Event,
            SubscriptionKind::InterchainTx => Type::InterchainTx,
            SubscriptionKind::BlockHeader => Type::BlockHeader,
            SubscriptionKind::InterchainTxWrapper => Type::InterchainTxWrapper,
            SubscriptionKind::UnionInterchainTxWrapper => Type::UnionInterchainTxWrapper,
            SubscriptionKind::EvmLog => Type::EvmLog,
        }
    }
}

/// A decoded subscription frame.
#[derive(Debug, Clone, PartialEq)]
pub enum SubscriptionEvent {
    BlockHeader(pb::BlockHeader),
    Block(pb::Block),
    Event(pb::Event),
    InterchainTx(pb::Ibtp),
    InterchainTxWrappers(pb::InterchainTxWrappers),
    UnionInterchainTxWrappers(pb::InterchainTxWrappers),
    Audit(pb::AuditTxInfo),
    /// Frames of kinds the client has no decoder for.
    Raw(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseReason {
    Cancelled,
    /// The server ended the stream.
    Completed,
    StreamError(String),
    DecodeError(String),
}

/// `Opening → Streaming → Draining → Closed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionState {
    Opening,
    Streaming,
    /// The queue is closed but still holds undelivered values.
    Draining,
    Closed(CloseReason),
}

impl SubscriptionState {
    pub fn is_closed(&self) -> bool {
        matches!(self, SubscriptionState::Closed(_))
    }

    pub fn close_reason(&self) -> Option<CloseReason> {
        match self {
            SubscriptionState::Closed(reason) => Some(reason.clone()),
            _ => None,
        }
    }
}

/// A running subscription. Values arrive in stream order; dropping it cancels
/// the background task.
#[derive(Debug)]
pub struct Subscription<T> {
    rx: mpsc::Receiver<T>,
    token: CancellationToken,
    state: watch::Receiver<SubscriptionState>,
}

impl<T> Subscription<T> {
    fn new(
        rx: mpsc::Receiver<T>,
        token: CancellationToken,
        state: watch::Receiver<SubscriptionState>,
    ) -> Self {
        Self { rx, token, state }
    }

    /// The next value, or `None` once the queue is closed and drained.
    pub async fn next(&mut self) -> Option<T> {
        self.rx.recv().await
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn state(&self) -> SubscriptionState {
        let state = self.state.borrow().clone();
        match state {
            SubscriptionState::Closed(_) if !self.rx.is_empty() => SubscriptionState::Draining,
            state => state,
        }
    }

    /// Waits for the background task to finish and returns why it stopped.
    pub async fn closed(&self) -> CloseReason {
        let mut state = self.state.clone();
        let reason = state
            .wait_for(SubscriptionState::is_closed)
            .await
            .map(|state| state.close_reason());
        match reason {
            Ok(Some(reason)) => reason,
            _ => CloseReason::StreamError("subscription task ended unexpectedly".into()),
        }
    }
}

impl<T> Stream for Subscription<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.rx.poll_recv(cx)
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

impl ChainClient {
    /// Opens a live subscription. It runs until `scope` or the subscription is
    /// cancelled, or the stream fails.
    pub async fn subscribe(
        &self,
        scope: &CancellationToken,
        kind: SubscriptionKind,
        extra: Vec<u8>,
    ) -> Result<Subscription<SubscriptionEvent>, RpcxError> {
        let request = self.request(
            pb::SubscriptionRequest {
                r#type: kind.as_proto() as i32,
                extra,
            },
            None,
        );
        let lease = self.pool().acquire().await?;
        let deadline = self.config().timeouts.query();
        let opened = tokio::time::timeout(deadline, lease.subscribe(request)).await;
        let stream = self.settle(
            "subscribe",
            lease.index(),
            lease.endpoint(),
            deadline,
            opened,
            RpcxError::from_query_status,
        )?;

        tracing::info!(kind = ?kind, endpoint = %lease.endpoint(), "subscription opened");
        Ok(worker::spawn(
            lease,
            stream,
            move |frame: pb::Response| decode::decode_frame(kind, frame.data),
            self.config().channels.subscription_buffer,
            scope,
            "subscribe",
        ))
    }

    /// Opens the audit feed for this client's account, starting at `block_height`.
    pub async fn subscribe_audit(
        &self,
        scope: &CancellationToken,
        kind: pb::audit_subscription_request::Type,
        block_height: u64,
        extra: Vec<u8>,
    ) -> Result<Subscription<SubscriptionEvent>, RpcxError> {
        let request = self.request(
            pb::AuditSubscriptionRequest {
                r#type: kind as i32,
                audit_node_id: self.address().to_string(),
                block_height,
                extra,
            },
            None,
        );
        let lease = self.pool().acquire().await?;
        let deadline = self.config().timeouts.query();
        let opened = tokio::time::timeout(deadline, lease.subscribe_audit_info(request)).await;
        let stream = self.settle(
            "subscribe_audit",
            lease.index(),
            lease.endpoint(),
            deadline,
            opened,
            RpcxError::from_query_status,
        )?;

        tracing::info!(kind = ?kind, block_height, endpoint = %lease.endpoint(), "audit subscription opened");
        Ok(worker::spawn(
            lease,
            stream,
            move |frame: pb::Response| decode::decode_audit_frame(kind, frame.data),
            self.config().channels.subscription_buffer,
            scope,
            "subscribe_audit",
        ))
    }

    /// Streams the block headers in `[begin, end]`; the subscription completes
    /// when the node has sent the last one.
    pub async fn get_block_header(
        &self,
        scope: &CancellationToken,
        begin: u64,
        end: u64,
    ) -> Result<Subscription<pb::BlockHeader>, RpcxError> {
        let request = self.request(pb::GetBlockHeaderRequest { begin, end }, None);
        let lease = self.pool().acquire().await?;
        let deadline = self.config().timeouts.blocks();
        let opened = tokio::time::timeout(deadline, lease.get_block_header(request)).await;
        let stream = self.settle(
            "get_block_header",
            lease.index(),
            lease.endpoint(),
            deadline,
            opened,
            RpcxError::from_query_status,
        )?;

        Ok(worker::spawn(
            lease,
            stream,
            Ok,
            self.config().channels.subscription_buffer,
            scope,
            "get_block_header",
        ))
    }

    /// Streams the interchain transaction wrappers of `pid` in `[begin, end]`.
    pub async fn get_interchain_tx_wrappers(
        &self,
        scope: &CancellationToken,
        pid: &str,
        begin: u64,
        end: u64,
    ) -> Result<Subscription<pb::InterchainTxWrappers>, RpcxError> {
        let request = self.request(
            pb::GetInterchainTxWrappersRequest {
                begin,
                end,
                pid: pid.to_string(),
            },
            None,
        );
        let lease = self.pool().acquire().await?;
        let deadline = self.config().timeouts.blocks();
        let opened =
            tokio::time::timeout(deadline, lease.get_interchain_tx_wrappers(request)).await;
        let stream = self.settle(
            "get_interchain_tx_wrappers",
            lease.index(),
            lease.endpoint(),
            deadline,
            opened,
            RpcxError::from_query_status,
        )?;

        Ok(worker::spawn(
            lease,
            stream,
            Ok,
            self.config().channels.subscription_buffer,
            scope,
            "get_interchain_tx_wrappers",
        ))
    }
}
