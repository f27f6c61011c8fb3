//! The transport seam between the client and a ledger node.
//!
//! [`Broker`] mirrors the `ChainBroker` gRPC service one method per RPC, so the
//! pool and the engine never touch tonic channels directly. [`GrpcDialer`] and
//! [`GrpcBroker`] are the production implementations; tests plug in in-memory
//! ones.

use std::sync::{
    atomic::{AtomicU8, Ordering},
    Arc,
};
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt};
use rpcx_proto::{pb, ChainBrokerClient};
use tonic::{
    transport::{Certificate, Channel, ClientTlsConfig, Endpoint, Identity},
    Code, Request, Response, Status,
};

use crate::config::{NodeEndpoint, TlsMaterial};

/// A server stream as seen through the seam.
pub type BrokerStream<T> = BoxStream<'static, Result<T, Status>>;

/// The observable state of a pooled transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ConnectivityState {
    Idle = 0,
    Connecting = 1,
    Ready = 2,
    TransientFailure = 3,
    Shutdown = 4,
}

impl ConnectivityState {
    /// Only idle or ready transports may be handed out again.
    pub fn is_usable(self) -> bool {
        matches!(self, ConnectivityState::Idle | ConnectivityState::Ready)
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => ConnectivityState::Idle,
            1 => ConnectivityState::Connecting,
            2 => ConnectivityState::Ready,
            3 => ConnectivityState::TransientFailure,
            _ => ConnectivityState::Shutdown,
        }
    }
}

#[async_trait]
pub trait Broker: Send + Sync {
    fn state(&self) -> ConnectivityState;

    /// Shuts the transport down. Returns `false` if it was already closed.
    fn close(&self) -> bool;

    async fn send_transaction(
        &self,
        request: Request<pb::BxhTransaction>,
    ) -> Result<Response<pb::TransactionHashMsg>, Status>;

    async fn send_transactions(
        &self,
        request: Request<pb::MultiTransaction>,
    ) -> Result<Response<pb::MultiTransactionHash>, Status>;

    async fn send_view(
        &self,
        request: Request<pb::BxhTransaction>,
    ) -> Result<Response<pb::Receipt>, Status>;

    async fn get_receipt(
        &self,
        request: Request<pb::TransactionHashMsg>,
    ) -> Result<Response<pb::Receipt>, Status>;

    async fn get_transaction(
        &self,
        request: Request<pb::TransactionHashMsg>,
    ) -> Result<Response<pb::GetTransactionResponse>, Status>;

    async fn get_transaction_by_block_hash_and_index(
        &self,
        request: Request<pb::TransactionBlockHashAndIndexMsg>,
    ) -> Result<Response<pb::GetTransactionResponse>, Status>;

    async fn get_transaction_by_block_number_and_index(
        &self,
        request: Request<pb::TransactionBlockNumberAndIndexMsg>,
    ) -> Result<Response<pb::GetTransactionResponse>, Status>;

    async fn get_pending_nonce_by_account(
        &self,
        request: Request<pb::Address>,
    ) -> Result<Response<pb::Response>, Status>;

    async fn get_account_balance(
        &self,
        request: Request<pb::Address>,
    ) -> Result<Response<pb::Response>, Status>;

    async fn get_chain_meta(
        &self,
        request: Request<pb::Request>,
    ) -> Result<Response<pb::ChainMeta>, Status>;

    async fn get_info(&self, request: Request<pb::Request>)
        -> Result<Response<pb::Response>, Status>;

    async fn get_blocks(
        &self,
        request: Request<pb::GetBlocksRequest>,
    ) -> Result<Response<pb::GetBlocksResponse>, Status>;

    async fn get_block(
        &self,
        request: Request<pb::GetBlockRequest>,
    ) -> Result<Response<pb::Block>, Status>;

    async fn get_tps(
        &self,
        request: Request<pb::GetTpsRequest>,
    ) -> Result<Response<pb::Response>, Status>;

    async fn get_chain_id(
        &self,
        request: Request<pb::Empty>,
    ) -> Result<Response<pb::Response>, Status>;

    async fn get_multi_signs(
        &self,
        request: Request<pb::GetSignsRequest>,
    ) -> Result<Response<pb::SignResponse>, Status>;

    async fn get_tss_signs(
        &self,
        request: Request<pb::GetSignsRequest>,
    ) -> Result<Response<pb::SignResponse>, Status>;

    async fn check_master_pier(
        &self,
        request: Request<pb::Address>,
    ) -> Result<Response<pb::Response>, Status>;

    async fn set_master_pier(
        &self,
        request: Request<pb::PierInfo>,
    ) -> Result<Response<pb::Response>, Status>;

    async fn heart_beat(
        &self,
        request: Request<pb::PierInfo>,
    ) -> Result<Response<pb::Response>, Status>;

    async fn del_vp_node(
        &self,
        request: Request<pb::DelVpNodeRequest>,
    ) -> Result<Response<pb::Response>, Status>;

    async fn subscribe(
        &self,
        request: Request<pb::SubscriptionRequest>,
    ) -> Result<Response<BrokerStream<pb::Response>>, Status>;

    async fn subscribe_audit_info(
        &self,
        request: Request<pb::AuditSubscriptionRequest>,
    ) -> Result<Response<BrokerStream<pb::Response>>, Status>;

    async fn get_block_header(
        &self,
        request: Request<pb::GetBlockHeaderRequest>,
    ) -> Result<Response<BrokerStream<pb::BlockHeader>>, Status>;

    async fn get_interchain_tx_wrappers(
        &self,
        request: Request<pb::GetInterchainTxWrappersRequest>,
    ) -> Result<Response<BrokerStream<pb::InterchainTxWrappers>>, Status>;
}

#[derive(Debug, thiserror::Error)]
pub enum DialError {
    /// The endpoint's TLS material is unusable. Retrying will not help.
    #[error("TLS material for {endpoint} is unusable: {reason}")]
    Tls { endpoint: String, reason: String },

    #[error("failed to connect to {endpoint}: {reason}")]
    Connect { endpoint: String, reason: String },

    #[error("dial to {endpoint} timed out after {timeout:?}")]
    Timeout { endpoint: String, timeout: Duration },
}

impl DialError {
    pub fn is_permanent(&self) -> bool {
        matches!(self, DialError::Tls { .. })
    }
}

/// Produces brokers for endpoints. The pool owns one and calls it on every redial.
#[async_trait]
pub trait Dialer: Send + Sync {
    async fn dial(
        &self,
        endpoint: &NodeEndpoint,
        timeout: Duration,
    ) -> Result<Arc<dyn Broker>, DialError>;
}

/// Dials nodes over HTTP/2 with tonic, using TLS when the endpoint carries material.
#[derive(Debug, Clone, Default)]
pub struct GrpcDialer;

#[async_trait]
impl Dialer for GrpcDialer {
    async fn dial(
        &self,
        endpoint: &NodeEndpoint,
        timeout: Duration,
    ) -> Result<Arc<dyn Broker>, DialError> {
        let uri = if endpoint.addr.contains("://") {
            endpoint.addr.clone()
        } else if endpoint.tls.is_some() {
            format!("https://{}", endpoint.addr)
        } else {
            format!("http://{}", endpoint.addr)
        };

        let mut transport = Endpoint::from_shared(uri)
            .map_err(|e| DialError::Connect {
                endpoint: endpoint.addr.clone(),
                reason: e.to_string(),
            })?
            .connect_timeout(timeout)
            .tcp_keepalive(Some(Duration::from_secs(30)));

        if let Some(tls) = &endpoint.tls {
            let tls_config = load_tls(tls).map_err(|reason| DialError::Tls {
                endpoint: endpoint.addr.clone(),
                reason,
            })?;
            transport = transport
                .tls_config(tls_config)
                .map_err(|e| DialError::Tls {
                    endpoint: endpoint.addr.clone(),
                    reason: e.to_string(),
                })?;
        }

        let channel = transport.connect().await.map_err(|e| DialError::Connect {
            endpoint: endpoint.addr.clone(),
            reason: e.to_string(),
        })?;

        tracing::debug!(endpoint = %endpoint.addr, tls = endpoint.tls.is_some(), "dialed broker");
        Ok(Arc::new(GrpcBroker::new(endpoint.addr.clone(), channel)))
    }
}

fn load_tls(tls: &TlsMaterial) -> Result<ClientTlsConfig, String> {
    let read = |path: &str| std::fs::read(path).map_err(|e| format!("{path}: {e}"));

    let mut config = ClientTlsConfig::new().ca_certificate(Certificate::from_pem(read(&tls.ca_cert)?));
    match (&tls.client_cert, &tls.client_key) {
        (Some(cert), Some(key)) => {
            config = config.identity(Identity::from_pem(read(cert)?, read(key)?));
        }
        (None, None) => {}
        _ => return Err("client-cert and client-key must be set together".to_string()),
    }
    if let Some(name) = &tls.server_name {
        config = config.domain_name(name.clone());
    }
    Ok(config)
}

/// A tonic channel behind the [`Broker`] seam.
///
/// The channel reconnects lazily on its own; the tracked state only reflects
/// what the last call observed so the pool can decide when to redial.
pub struct GrpcBroker {
    addr: String,
    client: ChainBrokerClient<Channel>,
    state: AtomicU8,
}

impl GrpcBroker {
    pub fn new(addr: String, channel: Channel) -> Self {
        Self {
            addr,
            client: ChainBrokerClient::new(channel),
            state: AtomicU8::new(ConnectivityState::Ready as u8),
        }
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    fn client(&self) -> Result<ChainBrokerClient<Channel>, Status> {
        if self.state() == ConnectivityState::Shutdown {
            return Err(Status::unavailable(format!(
                "connection to {} is closed",
                self.addr
            )));
        }
        Ok(self.client.clone())
    }

    fn observe<T>(&self, result: Result<Response<T>, Status>) -> Result<Response<T>, Status> {
        let next = match &result {
            Ok(_) => ConnectivityState::Ready,
            Err(status) if status.code() == Code::Unavailable => {
                ConnectivityState::TransientFailure
            }
            Err(_) => return result,
        };
        let _ = self
            .state
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                (current != ConnectivityState::Shutdown as u8).then_some(next as u8)
            });
        result
    }

    fn observe_stream<T, S>(
        &self,
        result: Result<Response<S>, Status>,
    ) -> Result<Response<BrokerStream<T>>, Status>
    where
        S: futures::Stream<Item = Result<T, Status>> + Send + 'static,
    {
        self.observe(result)
            .map(|response| Response::new(response.into_inner().boxed()))
    }
}

#[async_trait]
impl Broker for GrpcBroker {
    fn state(&self) -> ConnectivityState {
        ConnectivityState::from_u8(self.state.load(Ordering::Acquire))
    }

    fn close(&self) -> bool {
        let previous = self
            .state
            .swap(ConnectivityState::Shutdown as u8, Ordering::AcqRel);
        previous != ConnectivityState::Shutdown as u8
    }

    async fn send_transaction(
        &self,
        request: Request<pb::BxhTransaction>,
    ) -> Result<Response<pb::TransactionHashMsg>, Status> {
        let mut client = self.client()?;
        self.observe(client.send_transaction(request).await)
    }

    async fn send_transactions(
        &self,
        request: Request<pb::MultiTransaction>,
    ) -> Result<Response<pb::MultiTransactionHash>, Status> {
        let mut client = self.client()?;
        self.observe(client.send_transactions(request).await)
    }

    async fn send_view(
        &self,
        request: Request<pb::BxhTransaction>,
    ) -> Result<Response<pb::Receipt>, Status> {
        let mut client = self.client()?;
        self.observe(client.send_view(request).await)
    }

    async fn get_receipt(
        &self,
        request: Request<pb::TransactionHashMsg>,
    ) -> Result<Response<pb::Receipt>, Status> {
        let mut client = self.client()?;
        self.observe(client.get_receipt(request).await)
    }

    async fn get_transaction(
        &self,
        request: Request<pb::TransactionHashMsg>,
    ) -> Result<Response<pb::GetTransactionResponse>, Status> {
        let mut client = self.client()?;
        self.observe(client.get_transaction(request).await)
    }

    async fn get_transaction_by_block_hash_and_index(
        &self,
        request: Request<pb::TransactionBlockHashAndIndexMsg>,
    ) -> Result<Response<pb::GetTransactionResponse>, Status> {
        let mut client = self.client()?;
        self.observe(client.get_transaction_by_block_hash_and_index(request).await)
    }

    async fn get_transaction_by_block_number_and_index(
        &self,
        request: Request<pb::TransactionBlockNumberAndIndexMsg>,
    ) -> Result<Response<pb::GetTransactionResponse>, Status> {
        let mut client = self.client()?;
        self.observe(client.get_transaction_by_block_number_and_index(request).await)
    }

    async fn get_pending_nonce_by_account(
        &self,
        request: Request<pb::Address>,
    ) -> Result<Response<pb::Response>, Status> {
        let mut client = self.client()?;
        self.observe(client.get_pending_nonce_by_account(request).await)
    }

    async fn get_account_balance(
        &self,
        request: Request<pb::Address>,
    ) -> Result<Response<pb::Response>, Status> {
        let mut client = self.client()?;
        self.observe(client.get_account_balance(request).await)
    }

    async fn get_chain_meta(
        &self,
        request: Request<pb::Request>,
    ) -> Result<Response<pb::ChainMeta>, Status> {
        let mut client = self.client()?;
        self.observe(client.get_chain_meta(request).await)
    }

    async fn get_info(
        &self,
        request: Request<pb::Request>,
    ) -> Result<Response<pb::Response>, Status> {
        let mut client = self.client()?;
        self.observe(client.get_info(request).await)
    }

    async fn get_blocks(
        &self,
        request: Request<pb::GetBlocksRequest>,
    ) -> Result<Response<pb::GetBlocksResponse>, Status> {
        let mut client = self.client()?;
        self.observe(client.get_blocks(request).await)
    }

    async fn get_block(
        &self,
        request: Request<pb::GetBlockRequest>,
    ) -> Result<Response<pb::Block>, Status> {
        let mut client = self.client()?;
        self.observe(client.get_block(request).await)
    }

    async fn get_tps(
        &self,
        request: Request<pb::GetTpsRequest>,
    ) -> Result<Response<pb::Response>, Status> {
        let mut client = self.client()?;
        self.observe(client.get_tps(request).await)
    }

    async fn get_chain_id(
        &self,
        request: Request<pb::Empty>,
    ) -> Result<Response<pb::Response>, Status> {
        let mut client = self.client()?;
        self.observe(client.get_chain_id(request).await)
    }

    async fn get_multi_signs(
        &self,
        request: Request<pb::GetSignsRequest>,
    ) -> Result<Response<pb::SignResponse>, Status> {
        let mut client = self.client()?;
        self.observe(client.get_multi_signs(request).await)
    }

    async fn get_tss_signs(
        &self,
        request: Request<pb::GetSignsRequest>,
    ) -> Result<Response<pb::SignResponse>, Status> {
        let mut client = self.client()?;
        self.observe(client.get_tss_signs(request).await)
    }

    async fn check_master_pier(
        &self,
        request: Request<pb::Address>,
    ) -> Result<Response<pb::Response>, Status> {
        let mut client = self.client()?;
        self.observe(client.check_master_pier(request).await)
    }

    async fn set_master_pier(
        &self,
        request: Request<pb::PierInfo>,
    ) -> Result<Response<pb::Response>, Status> {
        let mut client = self.client()?;
        self.observe(client.set_master_pier(request).await)
    }

    async fn heart_beat(
        &self,
        request: Request<pb::PierInfo>,
    ) -> Result<Response<pb::Response>, Status> {
        let mut client = self.client()?;
        self.observe(client.heart_beat(request).await)
    }

    async fn del_vp_node(
        &self,
        request: Request<pb::DelVpNodeRequest>,
    ) -> Result<Response<pb::Response>, Status> {
        let mut client = self.client()?;
        self.observe(client.del_vp_node(request).await)
    }

    async fn subscribe(
        &self,
        request: Request<pb::SubscriptionRequest>,
    ) -> Result<Response<BrokerStream<pb::Response>>, Status> {
        let mut client = self.client()?;
        self.observe_stream(client.subscribe(request).await)
    }

    async fn subscribe_audit_info(
        &self,
        request: Request<pb::AuditSubscriptionRequest>,
    ) -> Result<Response<BrokerStream<pb::Response>>, Status> {
        let mut client = self.client()?;
        self.observe_stream(client.subscribe_audit_info(request).await)
    }

    async fn get_block_header(
        &self,
        request: Request<pb::GetBlockHeaderRequest>,
    ) -> Result<Response<BrokerStream<pb::BlockHeader>>, Status> {
        let mut client = self.client()?;
        self.observe_stream(client.get_block_header(request).await)
    }

    async fn get_interchain_tx_wrappers(
        &self,
        request: Request<pb::GetInterchainTxWrappersRequest>,
    ) -> Result<Response<BrokerStream<pb::InterchainTxWrappers>>, Status> {
        let mut client = self.client()?;
        self.observe_stream(client.get_interchain_tx_wrappers(request).await)
    }
}
