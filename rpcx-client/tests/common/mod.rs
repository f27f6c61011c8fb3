#![allow(dead_code)]

use std::{
    collections::{HashMap, VecDeque},
    sync::{
        atomic::{AtomicU64, AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use rpcx_client::{
    broker::{Broker, BrokerStream, ConnectivityState, DialError, Dialer},
    config::{ClientConfig, NodeEndpoint},
    pb,
    transaction::{signing_bytes, transaction_hash},
    ChainClient, ConnectionPool, Ed25519Signer,
};
use rpcx_logger::LogConfig;
use rpcx_signer::{recover_address, Address};
use tonic::{Request, Response, Status};

/// One scripted server stream: frames in order, then either end or stay open.
#[derive(Default)]
pub struct StreamScript {
    pub frames: Vec<Result<pb::Response, Status>>,
    pub then_hang: bool,
}

impl StreamScript {
    pub fn headers(range: std::ops::Range<u64>, then_hang: bool) -> Self {
        Self {
            frames: range
                .map(|number| {
                    Ok(pb::Response {
                        data: prost::Message::encode_to_vec(&pb::BlockHeader {
                            number,
                            ..Default::default()
                        }),
                    })
                })
                .collect(),
            then_hang,
        }
    }

    pub fn hang() -> Self {
        Self {
            frames: Vec::new(),
            then_hang: true,
        }
    }
}

/// An in-memory ledger node.
pub struct MockBroker {
    pub addr: String,
    state: Mutex<ConnectivityState>,
    calls: Mutex<Vec<&'static str>>,
    closes: AtomicUsize,
    pending_nonce: AtomicU64,
    send_failures: Mutex<VecDeque<Status>>,
    send_delay: Mutex<Option<Duration>>,
    receipt_misses: AtomicUsize,
    receipts: Mutex<HashMap<String, pb::Receipt>>,
    submitted: Mutex<Vec<pb::BxhTransaction>>,
    senders: Mutex<Vec<Address>>,
    accounts: Mutex<Vec<String>>,
    streams: Mutex<VecDeque<StreamScript>>,
    subscriptions: Mutex<Vec<pb::SubscriptionRequest>>,
    audit_requests: Mutex<Vec<pb::AuditSubscriptionRequest>>,
    masters: Mutex<HashMap<String, pb::PierInfo>>,
    peers: Mutex<Vec<String>>,
    query_failures: Mutex<VecDeque<Status>>,
}

impl MockBroker {
    pub fn new(addr: &str) -> Arc<Self> {
        Arc::new(Self {
            addr: addr.to_string(),
            state: Mutex::new(ConnectivityState::Ready),
            calls: Mutex::new(Vec::new()),
            closes: AtomicUsize::new(0),
            pending_nonce: AtomicU64::new(1),
            send_failures: Mutex::new(VecDeque::new()),
            send_delay: Mutex::new(None),
            receipt_misses: AtomicUsize::new(0),
            receipts: Mutex::new(HashMap::new()),
            submitted: Mutex::new(Vec::new()),
            senders: Mutex::new(Vec::new()),
            accounts: Mutex::new(Vec::new()),
            streams: Mutex::new(VecDeque::new()),
            subscriptions: Mutex::new(Vec::new()),
            audit_requests: Mutex::new(Vec::new()),
            masters: Mutex::new(HashMap::new()),
            peers: Mutex::new(vec!["QmA".to_string(), "QmB".to_string()]),
            query_failures: Mutex::new(VecDeque::new()),
        })
    }

    pub fn set_state(&self, state: ConnectivityState) {
        *self.state.lock().unwrap() = state;
    }

    pub fn set_pending_nonce(&self, nonce: u64) {
        self.pending_nonce.store(nonce, Ordering::SeqCst);
    }

    pub fn fail_next_send(&self, status: Status) {
        self.send_failures.lock().unwrap().push_back(status);
    }

    pub fn delay_sends(&self, delay: Duration) {
        *self.send_delay.lock().unwrap() = Some(delay);
    }

    /// The next query answers with `status` instead of data.
    pub fn fail_next_query(&self, status: Status) {
        self.query_failures.lock().unwrap().push_back(status);
    }

    pub fn peers(&self) -> Vec<String> {
        self.peers.lock().unwrap().clone()
    }

    /// The next `n` receipt lookups answer "not found".
    pub fn miss_receipts(&self, n: usize) {
        self.receipt_misses.store(n, Ordering::SeqCst);
    }

    pub fn push_stream(&self, script: StreamScript) {
        self.streams.lock().unwrap().push_back(script);
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| **c == call).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn submitted(&self) -> Vec<pb::BxhTransaction> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn recovered_senders(&self) -> Vec<Address> {
        self.senders.lock().unwrap().clone()
    }

    pub fn accounts(&self) -> Vec<String> {
        self.accounts.lock().unwrap().clone()
    }

    pub fn subscriptions(&self) -> Vec<pb::SubscriptionRequest> {
        self.subscriptions.lock().unwrap().clone()
    }

    pub fn audit_requests(&self) -> Vec<pb::AuditSubscriptionRequest> {
        self.audit_requests.lock().unwrap().clone()
    }

    fn record<T>(&self, call: &'static str, request: &Request<T>) -> Result<(), Status> {
        self.calls.lock().unwrap().push(call);
        if !call.starts_with("send_") {
            if let Some(status) = self.query_failures.lock().unwrap().pop_front() {
                return Err(status);
            }
        }
        if let Some(account) = request.metadata().get("account") {
            if let Ok(account) = account.to_str() {
                self.accounts.lock().unwrap().push(account.to_string());
            }
        }
        match *self.state.lock().unwrap() {
            ConnectivityState::Shutdown => Err(Status::unavailable("closed")),
            _ => Ok(()),
        }
    }

    /// Verifies the signature the way a node would, then stores a receipt.
    fn accept(&self, tx: pb::BxhTransaction) -> Result<String, Status> {
        let sender = recover_address(&signing_bytes(&tx), &tx.signature)
            .map_err(|e| Status::invalid_argument(e.to_string()))?;
        if sender.as_str() != tx.from {
            return Err(Status::invalid_argument("signature does not match sender"));
        }
        let hash = transaction_hash(&tx);
        self.receipts.lock().unwrap().insert(
            hash.clone(),
            pb::Receipt {
                tx_hash: hash.clone(),
                ret: b"ok".to_vec(),
                status: pb::receipt::Status::Success as i32,
                ..Default::default()
            },
        );
        self.pending_nonce.fetch_max(tx.nonce + 1, Ordering::SeqCst);
        self.senders.lock().unwrap().push(sender);
        self.submitted.lock().unwrap().push(tx);
        Ok(hash)
    }

    fn next_stream(&self) -> BrokerStream<pb::Response> {
        let script = self.streams.lock().unwrap().pop_front().unwrap_or_else(StreamScript::hang);
        let frames = stream::iter(script.frames);
        if script.then_hang {
            frames.chain(stream::pending()).boxed()
        } else {
            frames.boxed()
        }
    }
}

#[async_trait]
impl Broker for MockBroker {
    fn state(&self) -> ConnectivityState {
        *self.state.lock().unwrap()
    }

    fn close(&self) -> bool {
        self.closes.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();
        let was_open = *state != ConnectivityState::Shutdown;
        *state = ConnectivityState::Shutdown;
        was_open
    }

    async fn send_transaction(
        &self,
        request: Request<pb::BxhTransaction>,
    ) -> Result<Response<pb::TransactionHashMsg>, Status> {
        self.record("send_transaction", &request)?;
        let delay = *self.send_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let failure = self.send_failures.lock().unwrap().pop_front();
        if let Some(status) = failure {
            return Err(status);
        }
        let tx_hash = self.accept(request.into_inner())?;
        Ok(Response::new(pb::TransactionHashMsg { tx_hash }))
    }

    async fn send_transactions(
        &self,
        request: Request<pb::MultiTransaction>,
    ) -> Result<Response<pb::MultiTransactionHash>, Status> {
        self.record("send_transactions", &request)?;
        let tx_hashes = request
            .into_inner()
            .txs
            .into_iter()
            .map(|tx| self.accept(tx))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Response::new(pb::MultiTransactionHash { tx_hashes }))
    }

    async fn send_view(
        &self,
        request: Request<pb::BxhTransaction>,
    ) -> Result<Response<pb::Receipt>, Status> {
        self.record("send_view", &request)?;
        let tx = request.into_inner();
        recover_address(&signing_bytes(&tx), &tx.signature)
            .map_err(|e| Status::invalid_argument(e.to_string()))?;
        Ok(Response::new(pb::Receipt {
            tx_hash: transaction_hash(&tx),
            ret: tx.payload,
            status: pb::receipt::Status::Success as i32,
            ..Default::default()
        }))
    }

    async fn get_receipt(
        &self,
        request: Request<pb::TransactionHashMsg>,
    ) -> Result<Response<pb::Receipt>, Status> {
        self.record("get_receipt", &request)?;
        let missed = self
            .receipt_misses
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if missed {
            return Err(Status::not_found("receipt not ready"));
        }
        let hash = request.into_inner().tx_hash;
        self.receipts
            .lock()
            .unwrap()
            .get(&hash)
            .cloned()
            .map(Response::new)
            .ok_or_else(|| Status::not_found(format!("no receipt for {hash}")))
    }

    async fn get_transaction(
        &self,
        request: Request<pb::TransactionHashMsg>,
    ) -> Result<Response<pb::GetTransactionResponse>, Status> {
        self.record("get_transaction", &request)?;
        let hash = request.into_inner().tx_hash;
        let submitted = self.submitted.lock().unwrap();
        let (index, tx) = submitted
            .iter()
            .enumerate()
            .find(|(_, tx)| transaction_hash(tx) == hash)
            .ok_or_else(|| Status::not_found("unknown transaction"))?;
        Ok(Response::new(pb::GetTransactionResponse {
            tx: Some(tx.clone()),
            tx_meta: Some(pb::TransactionMeta {
                block_height: 1,
                index: index as u64,
                ..Default::default()
            }),
        }))
    }

    async fn get_transaction_by_block_hash_and_index(
        &self,
        request: Request<pb::TransactionBlockHashAndIndexMsg>,
    ) -> Result<Response<pb::GetTransactionResponse>, Status> {
        self.record("get_transaction_by_block_hash_and_index", &request)?;
        let msg = request.into_inner();
        Ok(Response::new(pb::GetTransactionResponse {
            tx: self.submitted.lock().unwrap().get(msg.index as usize).cloned(),
            tx_meta: Some(pb::TransactionMeta {
                block_hash: msg.block_hash.into_bytes(),
                block_height: 1,
                index: msg.index,
            }),
        }))
    }

    async fn get_transaction_by_block_number_and_index(
        &self,
        request: Request<pb::TransactionBlockNumberAndIndexMsg>,
    ) -> Result<Response<pb::GetTransactionResponse>, Status> {
        self.record("get_transaction_by_block_number_and_index", &request)?;
        let msg = request.into_inner();
        Ok(Response::new(pb::GetTransactionResponse {
            tx: self.submitted.lock().unwrap().get(msg.index as usize).cloned(),
            tx_meta: Some(pb::TransactionMeta {
                block_height: msg.block_number,
                index: msg.index,
                ..Default::default()
            }),
        }))
    }

    async fn get_pending_nonce_by_account(
        &self,
        request: Request<pb::Address>,
    ) -> Result<Response<pb::Response>, Status> {
        self.record("get_pending_nonce", &request)?;
        let nonce = self.pending_nonce.load(Ordering::SeqCst);
        Ok(Response::new(pb::Response {
            data: nonce.to_string().into_bytes(),
        }))
    }

    async fn get_account_balance(
        &self,
        request: Request<pb::Address>,
    ) -> Result<Response<pb::Response>, Status> {
        self.record("get_account_balance", &request)?;
        let address = request.into_inner().address;
        Ok(Response::new(pb::Response {
            data: format!(r#"{{"address":"{address}","balance":100}}"#).into_bytes(),
        }))
    }

    async fn get_chain_meta(
        &self,
        request: Request<pb::Request>,
    ) -> Result<Response<pb::ChainMeta>, Status> {
        self.record("get_chain_meta", &request)?;
        Ok(Response::new(pb::ChainMeta {
            height: 42,
            block_hash: "0xabc".into(),
            interchain_tx_count: 7,
        }))
    }

    async fn get_info(
        &self,
        request: Request<pb::Request>,
    ) -> Result<Response<pb::Response>, Status> {
        self.record("get_info", &request)?;
        let data = match request.into_inner().r#type() {
            pb::request::Type::ChainStatus => b"normal".to_vec(),
            pb::request::Type::Network => br#"{"1":{"pid":"QmA"}}"#.to_vec(),
            pb::request::Type::Validators => br#"["0x01","0x02"]"#.to_vec(),
        };
        Ok(Response::new(pb::Response { data }))
    }

    async fn get_blocks(
        &self,
        request: Request<pb::GetBlocksRequest>,
    ) -> Result<Response<pb::GetBlocksResponse>, Status> {
        self.record("get_blocks", &request)?;
        let msg = request.into_inner();
        let blocks = (msg.start..=msg.end)
            .map(|number| pb::Block {
                block_header: Some(pb::BlockHeader {
                    number,
                    ..Default::default()
                }),
                ..Default::default()
            })
            .collect();
        Ok(Response::new(pb::GetBlocksResponse { blocks }))
    }

    async fn get_block(
        &self,
        request: Request<pb::GetBlockRequest>,
    ) -> Result<Response<pb::Block>, Status> {
        self.record("get_block", &request)?;
        let msg = request.into_inner();
        let block = match msg.r#type() {
            pb::get_block_request::Type::Height => pb::Block {
                block_header: Some(pb::BlockHeader {
                    number: msg
                        .value
                        .parse()
                        .map_err(|_| Status::invalid_argument("bad height"))?,
                    ..Default::default()
                }),
                ..Default::default()
            },
            pb::get_block_request::Type::Hash => pb::Block {
                block_hash: msg.value,
                ..Default::default()
            },
        };
        Ok(Response::new(block))
    }

    async fn get_tps(
        &self,
        request: Request<pb::GetTpsRequest>,
    ) -> Result<Response<pb::Response>, Status> {
        self.record("get_tps", &request)?;
        let msg = request.into_inner();
        Ok(Response::new(pb::Response {
            data: format!("the TPS from block {} to {} is 1523.7", msg.begin, msg.end).into_bytes(),
        }))
    }

    async fn get_chain_id(
        &self,
        request: Request<pb::Empty>,
    ) -> Result<Response<pb::Response>, Status> {
        self.record("get_chain_id", &request)?;
        Ok(Response::new(pb::Response {
            data: 1356u64.to_le_bytes().to_vec(),
        }))
    }

    async fn get_multi_signs(
        &self,
        request: Request<pb::GetSignsRequest>,
    ) -> Result<Response<pb::SignResponse>, Status> {
        self.record("get_multi_signs", &request)?;
        let msg = request.into_inner();
        let sign = ["0x01", "0x02"]
            .into_iter()
            .map(|validator| {
                let signature = format!("{validator}/{}/{}", msg.r#type, msg.content);
                (validator.to_string(), signature.into_bytes())
            })
            .collect();
        Ok(Response::new(pb::SignResponse { sign }))
    }

    async fn get_tss_signs(
        &self,
        request: Request<pb::GetSignsRequest>,
    ) -> Result<Response<pb::SignResponse>, Status> {
        self.record("get_tss_signs", &request)?;
        let msg = request.into_inner();
        let mut signature = msg.extra;
        signature.extend_from_slice(msg.content.as_bytes());
        Ok(Response::new(pb::SignResponse {
            sign: HashMap::from([("tss".to_string(), signature)]),
        }))
    }

    async fn check_master_pier(
        &self,
        request: Request<pb::Address>,
    ) -> Result<Response<pb::Response>, Status> {
        self.record("check_master_pier", &request)?;
        let pier = request.into_inner().address;
        let data = self
            .masters
            .lock()
            .unwrap()
            .get(&pier)
            .map(|master| master.index.clone().into_bytes())
            .unwrap_or_default();
        Ok(Response::new(pb::Response { data }))
    }

    async fn set_master_pier(
        &self,
        request: Request<pb::PierInfo>,
    ) -> Result<Response<pb::Response>, Status> {
        self.record("set_master_pier", &request)?;
        let info = request.into_inner();
        let mut masters = self.masters.lock().unwrap();
        match masters.get(&info.address) {
            Some(master) if master.index != info.index => {
                Err(Status::already_exists("another instance is master"))
            }
            _ => {
                masters.insert(info.address.clone(), info);
                Ok(Response::new(pb::Response { data: b"ok".to_vec() }))
            }
        }
    }

    async fn heart_beat(
        &self,
        request: Request<pb::PierInfo>,
    ) -> Result<Response<pb::Response>, Status> {
        self.record("heart_beat", &request)?;
        let info = request.into_inner();
        match self.masters.lock().unwrap().get(&info.address) {
            Some(master) if master.index == info.index => {
                Ok(Response::new(pb::Response { data: b"ok".to_vec() }))
            }
            _ => Err(Status::not_found("not the master instance")),
        }
    }

    async fn del_vp_node(
        &self,
        request: Request<pb::DelVpNodeRequest>,
    ) -> Result<Response<pb::Response>, Status> {
        self.record("del_vp_node", &request)?;
        let pid = request.into_inner().pid;
        let mut peers = self.peers.lock().unwrap();
        let before = peers.len();
        peers.retain(|peer| *peer != pid);
        if peers.len() == before {
            return Err(Status::not_found(format!("unknown peer {pid}")));
        }
        Ok(Response::new(pb::Response { data: b"ok".to_vec() }))
    }

    async fn subscribe(
        &self,
        request: Request<pb::SubscriptionRequest>,
    ) -> Result<Response<BrokerStream<pb::Response>>, Status> {
        self.record("subscribe", &request)?;
        self.subscriptions.lock().unwrap().push(request.into_inner());
        Ok(Response::new(self.next_stream()))
    }

    async fn subscribe_audit_info(
        &self,
        request: Request<pb::AuditSubscriptionRequest>,
    ) -> Result<Response<BrokerStream<pb::Response>>, Status> {
        self.record("subscribe_audit_info", &request)?;
        self.audit_requests.lock().unwrap().push(request.into_inner());
        Ok(Response::new(self.next_stream()))
    }

    async fn get_block_header(
        &self,
        request: Request<pb::GetBlockHeaderRequest>,
    ) -> Result<Response<BrokerStream<pb::BlockHeader>>, Status> {
        self.record("get_block_header", &request)?;
        let msg = request.into_inner();
        let headers: Vec<Result<pb::BlockHeader, Status>> = (msg.begin..=msg.end)
            .map(|number| {
                Ok(pb::BlockHeader {
                    number,
                    ..Default::default()
                })
            })
            .collect();
        Ok(Response::new(stream::iter(headers).boxed()))
    }

    async fn get_interchain_tx_wrappers(
        &self,
        request: Request<pb::GetInterchainTxWrappersRequest>,
    ) -> Result<Response<BrokerStream<pb::InterchainTxWrappers>>, Status> {
        self.record("get_interchain_tx_wrappers", &request)?;
        let msg = request.into_inner();
        let wrappers: Vec<Result<pb::InterchainTxWrappers, Status>> = (msg.begin..=msg.end)
            .map(|height| {
                Ok(pb::InterchainTxWrappers {
                    interchain_tx_wrappers: vec![pb::InterchainTxWrapper {
                        height,
                        timeout_ibtps: vec![msg.pid.clone()],
                        ..Default::default()
                    }],
                })
            })
            .collect();
        Ok(Response::new(stream::iter(wrappers).boxed()))
    }
}

/// How a [`MockDialer`] treats one endpoint.
#[derive(Clone)]
pub enum Behaviour {
    Reachable(Arc<MockBroker>),
    Unreachable,
    BrokenTls,
    Hang,
}

pub struct MockDialer {
    endpoints: HashMap<String, Behaviour>,
    dials: Mutex<HashMap<String, usize>>,
}

impl MockDialer {
    pub fn new(endpoints: impl IntoIterator<Item = (&'static str, Behaviour)>) -> Arc<Self> {
        Arc::new(Self {
            endpoints: endpoints
                .into_iter()
                .map(|(addr, behaviour)| (addr.to_string(), behaviour))
                .collect(),
            dials: Mutex::new(HashMap::new()),
        })
    }

    pub fn dials(&self, addr: &str) -> usize {
        self.dials.lock().unwrap().get(addr).copied().unwrap_or(0)
    }

    pub fn total_dials(&self) -> usize {
        self.dials.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl Dialer for MockDialer {
    async fn dial(
        &self,
        endpoint: &NodeEndpoint,
        _timeout: Duration,
    ) -> Result<Arc<dyn Broker>, DialError> {
        *self
            .dials
            .lock()
            .unwrap()
            .entry(endpoint.addr.clone())
            .or_insert(0) += 1;

        let behaviour = self
            .endpoints
            .get(&endpoint.addr)
            .cloned()
            .unwrap_or(Behaviour::Unreachable);
        match behaviour {
            Behaviour::Reachable(broker) => {
                broker.set_state(ConnectivityState::Ready);
                Ok(broker as Arc<dyn Broker>)
            }
            Behaviour::Unreachable => Err(DialError::Connect {
                endpoint: endpoint.addr.clone(),
                reason: "connection refused".into(),
            }),
            Behaviour::BrokenTls => Err(DialError::Tls {
                endpoint: endpoint.addr.clone(),
                reason: "bad certificate".into(),
            }),
            Behaviour::Hang => {
                futures::future::pending::<()>().await;
                Err(DialError::Connect {
                    endpoint: endpoint.addr.clone(),
                    reason: "unreachable".into(),
                })
            }
        }
    }
}

/// Small timeouts and delays so retry budgets run out quickly.
pub fn fast_config(nodes: &[&str]) -> ClientConfig {
    let mut config = ClientConfig::with_nodes(nodes.iter().copied());
    config.timeouts.dial_ms = 100;
    config.timeouts.send_ms = 300;
    config.timeouts.receipt_ms = 300;
    config.timeouts.query_ms = 300;
    config.timeouts.blocks_ms = 300;
    config.timeouts.pier_ms = 300;
    config.retry.dial_interval_ms = 5;
    config.retry.attempts_per_endpoint = 2;
    config.retry.nonce_attempts = 3;
    config.retry.receipt_attempts = 5;
    config.retry.receipt_backoff_ms = 5;
    config.retry.receipt_max_backoff_ms = 20;
    config.channels.subscription_buffer = 16;
    config
}

/// Installs the test subscriber once. Silent unless `RUST_LOG` is set.
pub fn init_logging() {
    let config = LogConfig {
        level: std::env::var("RUST_LOG").unwrap_or_else(|_| "off".into()),
        ..Default::default()
    };
    rpcx_logger::init(&config).unwrap();
}

pub fn pool(nodes: &[&str], dialer: Arc<MockDialer>) -> Arc<ConnectionPool> {
    init_logging();
    Arc::new(ConnectionPool::with_dialer(&fast_config(nodes), dialer).unwrap())
}

/// A client over a single reachable mock node.
pub fn single_node_client() -> (ChainClient, Arc<MockBroker>, Arc<Ed25519Signer>) {
    init_logging();
    let broker = MockBroker::new("node1:60011");
    let dialer = MockDialer::new([("node1:60011", Behaviour::Reachable(broker.clone()))]);
    let signer = Arc::new(Ed25519Signer::generate());
    let client = ChainClient::builder(fast_config(&["node1:60011"]))
        .dialer(dialer)
        .signer(signer.clone())
        .build()
        .unwrap();
    (client, broker, signer)
}

pub fn address(byte: u8) -> Address {
    format!("0x{}", hex::encode([byte; 20])).parse().unwrap()
}
