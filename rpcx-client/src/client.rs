//! The transaction lifecycle engine and read-only queries.
//!
//! Every remote call follows the same shape: lease a broker from the pool, issue
//! exactly one request bounded by a deadline (enforced locally and sent as the
//! gRPC timeout header), classify any failure, and release the lease. A call
//! that fails because the transport gave out also tells the pool to fail over.

use std::{collections::HashMap, future::Future, sync::Arc, time::Duration};

use parking_lot::RwLock;
use rpcx_proto::pb;
use rpcx_signer::{Address, Ed25519Signer, Signer};
use tokio::time::error::Elapsed;
use tonic::{metadata::MetadataValue, Code, Request, Response, Status};

use crate::{
    broker::Dialer,
    config::ClientConfig,
    error::RpcxError,
    nonce::{AccountGuard, NonceCoordinator, NonceSource},
    pool::{ConnectionPool, PooledConnection},
    retry::RetryFailure,
    transaction::{DraftTransaction, SignedTransaction, TransactOpts},
};

/// Metadata key carrying the caller's account address on every request.
pub const ACCOUNT_METADATA_KEY: &str = "account";

/// How a block is looked up by [`ChainClient::get_block`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockSelector {
    Height(u64),
    Hash(String),
}

/// A client bound to one signing identity and one (possibly shared) pool.
pub struct ChainClient {
    pool: Arc<ConnectionPool>,
    signer: RwLock<Arc<dyn Signer>>,
    config: ClientConfig,
    nonces: NonceCoordinator,
}

/// Builds a [`ChainClient`], validating its configuration once.
pub struct ClientBuilder {
    config: ClientConfig,
    pool: Option<Arc<ConnectionPool>>,
    dialer: Option<Arc<dyn Dialer>>,
    signer: Option<Arc<dyn Signer>>,
}

impl ClientBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            pool: None,
            dialer: None,
            signer: None,
        }
    }

    /// Shares an existing pool instead of creating one from the node list.
    pub fn pool(mut self, pool: Arc<ConnectionPool>) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Replaces the gRPC dialer used when the builder creates the pool.
    pub fn dialer(mut self, dialer: Arc<dyn Dialer>) -> Self {
        self.dialer = Some(dialer);
        self
    }

    pub fn signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn build(self) -> Result<ChainClient, RpcxError> {
        let signer: Arc<dyn Signer> = match (self.signer, &self.config.key_path) {
            (Some(signer), _) => signer,
            (None, Some(path)) => Arc::new(
                Ed25519Signer::from_file(path)
                    .map_err(|e| RpcxError::Config(format!("failed to load key: {e}")))?,
            ),
            (None, None) => {
                return Err(RpcxError::Config(
                    "a signer or key-path is required".into(),
                ))
            }
        };

        let pool = match self.pool {
            Some(pool) => pool,
            None => {
                let pool = match self.dialer {
                    Some(dialer) => ConnectionPool::with_dialer(&self.config, dialer)?,
                    None => ConnectionPool::from_config(&self.config)?,
                };
                Arc::new(pool)
            }
        };

        tracing::info!(
            address = %signer.address(),
            endpoints = pool.endpoints().len(),
            "chain client ready"
        );

        Ok(ChainClient {
            pool,
            signer: RwLock::new(signer),
            config: self.config,
            nonces: NonceCoordinator::new(),
        })
    }
}

impl ChainClient {
    pub fn builder(config: ClientConfig) -> ClientBuilder {
        ClientBuilder::new(config)
    }

    pub fn pool(&self) -> &Arc<ConnectionPool> {
        &self.pool
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The default signing key.
    pub fn signer(&self) -> Arc<dyn Signer> {
        Arc::clone(&self.signer.read())
    }

    pub fn address(&self) -> Address {
        self.signer.read().address()
    }

    /// Replaces the default signing key for later calls.
    pub fn set_signer(&self, signer: Arc<dyn Signer>) {
        tracing::info!(address = %signer.address(), "default signer replaced");
        *self.signer.write() = signer;
    }

    // --- Transaction lifecycle ---

    /// Resolves the nonce, signs `draft`, submits it and returns the transaction hash.
    pub async fn submit(
        &self,
        draft: DraftTransaction,
        opts: TransactOpts,
    ) -> Result<String, RpcxError> {
        let (signed, _account_guard) = self.sign_draft(draft, &opts).await?;
        self.send_signed(&signed).await
    }

    /// [`submit`](Self::submit), then polls until the receipt is available.
    pub async fn submit_and_wait(
        &self,
        draft: DraftTransaction,
        opts: TransactOpts,
    ) -> Result<pb::Receipt, RpcxError> {
        let hash = self.submit(draft, opts).await?;
        self.poll_receipt(&hash).await
    }

    /// Resolves the nonce and signs `draft` without sending it.
    pub async fn prepare(
        &self,
        draft: DraftTransaction,
        opts: TransactOpts,
    ) -> Result<SignedTransaction, RpcxError> {
        let (signed, _) = self.sign_draft(draft, &opts).await?;
        Ok(signed)
    }

    pub async fn send_signed(&self, tx: &SignedTransaction) -> Result<String, RpcxError> {
        let deadline = self.config.timeouts.send();
        let request = self.request(tx.as_proto().clone(), Some(deadline));
        let hash = self
            .call(
                "send_transaction",
                deadline,
                RpcxError::from_submission_status,
                |conn| async move { conn.send_transaction(request).await },
            )
            .await?
            .tx_hash;

        tracing::info!(tx_hash = %hash, nonce = tx.nonce(), "transaction submitted");
        Ok(hash)
    }

    pub async fn send_signed_and_wait(
        &self,
        tx: &SignedTransaction,
    ) -> Result<pb::Receipt, RpcxError> {
        let hash = self.send_signed(tx).await?;
        self.poll_receipt(&hash).await
    }

    /// Submits several pre-signed transactions in one request.
    pub async fn submit_batch(
        &self,
        txs: Vec<SignedTransaction>,
    ) -> Result<Vec<String>, RpcxError> {
        if txs.is_empty() {
            return Ok(Vec::new());
        }
        let deadline = self.config.timeouts.send();
        let batch = pb::MultiTransaction {
            txs: txs.into_iter().map(SignedTransaction::into_proto).collect(),
        };
        let request = self.request(batch, Some(deadline));
        let hashes = self
            .call(
                "send_transactions",
                deadline,
                RpcxError::from_submission_status,
                |conn| async move { conn.send_transactions(request).await },
            )
            .await?
            .tx_hashes;

        tracing::info!(count = hashes.len(), "transaction batch submitted");
        Ok(hashes)
    }

    /// Executes `draft` read-only against the node's current state.
    pub async fn send_view(&self, draft: DraftTransaction) -> Result<pb::Receipt, RpcxError> {
        let signer = self.signer();
        let signed = draft.sign(0, signer.as_ref())?;
        let deadline = self.config.timeouts.send();
        let request = self.request(signed.into_proto(), Some(deadline));
        self.call(
            "send_view",
            deadline,
            RpcxError::from_submission_status,
            |conn| async move { conn.send_view(request).await },
        )
        .await
    }

    /// Fetches the receipt of `hash` under the Fibonacci receipt policy.
    pub async fn poll_receipt(&self, hash: &str) -> Result<pb::Receipt, RpcxError> {
        self.config
            .retry
            .receipt_policy()
            .run("poll_receipt", || self.get_receipt(hash))
            .await
            .map_err(RetryFailure::into_error)
    }

    async fn sign_draft(
        &self,
        draft: DraftTransaction,
        opts: &TransactOpts,
    ) -> Result<(SignedTransaction, Option<AccountGuard>), RpcxError> {
        draft.sender()?;
        let source = NonceSource::from_opts(opts)?;
        let signer = opts.signer.clone().unwrap_or_else(|| self.signer());

        let (nonce, guard) = match source {
            NonceSource::Explicit(nonce) => (nonce, None),
            NonceSource::Remote => {
                let account = opts.from.clone().unwrap_or_else(|| signer.address());
                let guard = self.nonces.lock(&account).await;
                let nonce = self
                    .config
                    .retry
                    .nonce_policy()
                    .run("get_pending_nonce", || self.get_pending_nonce(&account))
                    .await
                    .map_err(RetryFailure::into_error)?;
                (nonce, Some(guard))
            }
        };

        let signed = draft.sign(nonce, signer.as_ref())?;
        tracing::debug!(nonce, tx_hash = %signed.hash(), "transaction signed");
        Ok((signed, guard))
    }

    // --- Queries ---

    pub async fn get_receipt(&self, hash: &str) -> Result<pb::Receipt, RpcxError> {
        let deadline = self.config.timeouts.receipt();
        let request = self.request(
            pb::TransactionHashMsg {
                tx_hash: hash.to_string(),
            },
            Some(deadline),
        );
        self.query("get_receipt", deadline, |conn| async move {
            conn.get_receipt(request).await
        })
        .await
    }

    pub async fn get_transaction(&self, hash: &str) -> Result<pb::GetTransactionResponse, RpcxError> {
        let deadline = self.config.timeouts.blocks();
        let request = self.request(
            pb::TransactionHashMsg {
                tx_hash: hash.to_string(),
            },
            Some(deadline),
        );
        self.query("get_transaction", deadline, |conn| async move {
            conn.get_transaction(request).await
        })
        .await
    }

    pub async fn get_transaction_by_block_hash_and_index(
        &self,
        block_hash: &str,
        index: u64,
    ) -> Result<pb::GetTransactionResponse, RpcxError> {
        let deadline = self.config.timeouts.blocks();
        let request = self.request(
            pb::TransactionBlockHashAndIndexMsg {
                block_hash: block_hash.to_string(),
                index,
            },
            Some(deadline),
        );
        self.query(
            "get_transaction_by_block_hash_and_index",
            deadline,
            |conn| async move { conn.get_transaction_by_block_hash_and_index(request).await },
        )
        .await
    }

    pub async fn get_transaction_by_block_number_and_index(
        &self,
        block_number: u64,
        index: u64,
    ) -> Result<pb::GetTransactionResponse, RpcxError> {
        let deadline = self.config.timeouts.blocks();
        let request = self.request(
            pb::TransactionBlockNumberAndIndexMsg {
                block_number,
                index,
            },
            Some(deadline),
        );
        self.query(
            "get_transaction_by_block_number_and_index",
            deadline,
            |conn| async move { conn.get_transaction_by_block_number_and_index(request).await },
        )
        .await
    }

    /// The next nonce the node expects from `account`.
    pub async fn get_pending_nonce(&self, account: &Address) -> Result<u64, RpcxError> {
        let deadline = self.config.timeouts.query();
        let request = self.request(
            pb::Address {
                address: account.to_string(),
            },
            Some(deadline),
        );
        let response = self
            .query("get_pending_nonce", deadline, |conn| async move {
                conn.get_pending_nonce_by_account(request).await
            })
            .await?;
        parse_decimal(&response.data)
    }

    /// The node's raw account record for `account`.
    pub async fn get_account_balance(&self, account: &Address) -> Result<Vec<u8>, RpcxError> {
        let deadline = self.config.timeouts.query();
        let request = self.request(
            pb::Address {
                address: account.to_string(),
            },
            Some(deadline),
        );
        self.query("get_account_balance", deadline, |conn| async move {
            conn.get_account_balance(request).await
        })
        .await
        .map(|response| response.data)
    }

    pub async fn get_chain_meta(&self) -> Result<pb::ChainMeta, RpcxError> {
        let deadline = self.config.timeouts.blocks();
        let request = self.request(pb::Request::default(), Some(deadline));
        self.query("get_chain_meta", deadline, |conn| async move {
            conn.get_chain_meta(request).await
        })
        .await
    }

    /// Transactions per second over the block range `[begin, end]`.
    pub async fn get_tps(&self, begin: u64, end: u64) -> Result<u64, RpcxError> {
        let deadline = self.config.timeouts.query();
        let request = self.request(pb::GetTpsRequest { begin, end }, Some(deadline));
        let response = self
            .query("get_tps", deadline, |conn| async move {
                conn.get_tps(request).await
            })
            .await?;
        parse_tps(&response.data)
    }

    pub async fn get_chain_id(&self) -> Result<u64, RpcxError> {
        let deadline = self.config.timeouts.query();
        let request = self.request(pb::Empty {}, Some(deadline));
        let response = self
            .query("get_chain_id", deadline, |conn| async move {
                conn.get_chain_id(request).await
            })
            .await?;
        let bytes: [u8; 8] = response
            .data
            .get(..8)
            .and_then(|b| b.try_into().ok())
            .ok_or_else(|| {
                RpcxError::InvalidResponse(format!(
                    "chain id needs 8 bytes, got {}",
                    response.data.len()
                ))
            })?;
        Ok(u64::from_le_bytes(bytes))
    }

    pub async fn get_chain_status(&self) -> Result<String, RpcxError> {
        let data = self.get_info(pb::request::Type::ChainStatus).await?;
        String::from_utf8(data)
            .map_err(|e| RpcxError::InvalidResponse(format!("chain status is not utf-8: {e}")))
    }

    /// The validator set, in the node's JSON encoding.
    pub async fn get_validators(&self) -> Result<Vec<u8>, RpcxError> {
        self.get_info(pb::request::Type::Validators).await
    }

    /// Peer and network information, in the node's JSON encoding.
    pub async fn get_network_meta(&self) -> Result<Vec<u8>, RpcxError> {
        self.get_info(pb::request::Type::Network).await
    }

    async fn get_info(&self, kind: pb::request::Type) -> Result<Vec<u8>, RpcxError> {
        let deadline = self.config.timeouts.query();
        let request = self.request(
            pb::Request {
                r#type: kind as i32,
            },
            Some(deadline),
        );
        self.query("get_info", deadline, |conn| async move {
            conn.get_info(request).await
        })
        .await
        .map(|response| response.data)
    }

    pub async fn get_blocks(&self, start: u64, end: u64) -> Result<Vec<pb::Block>, RpcxError> {
        let deadline = self.config.timeouts.blocks();
        let request = self.request(pb::GetBlocksRequest { start, end }, Some(deadline));
        self.query("get_blocks", deadline, |conn| async move {
            conn.get_blocks(request).await
        })
        .await
        .map(|response| response.blocks)
    }

    pub async fn get_block(&self, selector: BlockSelector) -> Result<pb::Block, RpcxError> {
        let (kind, value) = match selector {
            BlockSelector::Height(height) => (pb::get_block_request::Type::Height, height.to_string()),
            BlockSelector::Hash(hash) => (pb::get_block_request::Type::Hash, hash),
        };
        let deadline = self.config.timeouts.blocks();
        let request = self.request(
            pb::GetBlockRequest {
                r#type: kind as i32,
                value,
            },
            Some(deadline),
        );
        self.query("get_block", deadline, |conn| async move {
            conn.get_block(request).await
        })
        .await
    }

    // --- Interchain coordination ---

    /// Collects validator multi-signatures over `content`, keyed by validator address.
    pub async fn get_multi_signs(
        &self,
        content: &str,
        kind: pb::get_signs_request::Type,
    ) -> Result<HashMap<String, Vec<u8>>, RpcxError> {
        self.collect_signs(false, content, kind, Vec::new()).await
    }

    /// Collects a threshold signature over `content`.
    pub async fn get_tss_signs(
        &self,
        content: &str,
        kind: pb::get_signs_request::Type,
        extra: Vec<u8>,
    ) -> Result<HashMap<String, Vec<u8>>, RpcxError> {
        self.collect_signs(true, content, kind, extra).await
    }

    async fn collect_signs(
        &self,
        threshold: bool,
        content: &str,
        kind: pb::get_signs_request::Type,
        extra: Vec<u8>,
    ) -> Result<HashMap<String, Vec<u8>>, RpcxError> {
        let deadline = self.config.timeouts.send();
        let request = self.request(
            pb::GetSignsRequest {
                r#type: kind as i32,
                content: content.to_string(),
                extra,
            },
            Some(deadline),
        );
        let op = if threshold { "get_tss_signs" } else { "get_multi_signs" };
        let response = self
            .query(op, deadline, |conn| async move {
                if threshold {
                    conn.get_tss_signs(request).await
                } else {
                    conn.get_multi_signs(request).await
                }
            })
            .await?;
        Ok(response.sign)
    }

    /// Asks whether a master pier is currently elected for `pier`.
    pub async fn check_master_pier(&self, pier: &str) -> Result<Vec<u8>, RpcxError> {
        let deadline = self.config.timeouts.pier();
        let request = self.request(
            pb::Address {
                address: pier.to_string(),
            },
            Some(deadline),
        );
        self.query("check_master_pier", deadline, |conn| async move {
            conn.check_master_pier(request).await
        })
        .await
        .map(|response| response.data)
    }

    /// Claims the master role for the pier instance `index`, held for `lease_secs`.
    pub async fn set_master_pier(
        &self,
        pier: &str,
        index: &str,
        lease_secs: i64,
    ) -> Result<Vec<u8>, RpcxError> {
        let deadline = self.config.timeouts.pier();
        let request = self.request(pier_info(pier, index, lease_secs), Some(deadline));
        self.query("set_master_pier", deadline, |conn| async move {
            conn.set_master_pier(request).await
        })
        .await
        .map(|response| response.data)
    }

    /// Renews the master lease held by the pier instance `index`.
    pub async fn heart_beat(&self, pier: &str, index: &str) -> Result<Vec<u8>, RpcxError> {
        let deadline = self.config.timeouts.pier();
        let request = self.request(pier_info(pier, index, 0), Some(deadline));
        self.query("heart_beat", deadline, |conn| async move {
            conn.heart_beat(request).await
        })
        .await
        .map(|response| response.data)
    }

    /// Removes the validating peer `pid` from the node's peer set.
    pub async fn del_vp_node(&self, pid: &str) -> Result<Vec<u8>, RpcxError> {
        let deadline = self.config.timeouts.query();
        let request = self.request(
            pb::DelVpNodeRequest {
                pid: pid.to_string(),
            },
            Some(deadline),
        );
        self.query("del_vp_node", deadline, |conn| async move {
            conn.del_vp_node(request).await
        })
        .await
        .map(|response| response.data)
    }

    // --- Plumbing ---

    /// Wraps `message` with the account metadata and, when given, a gRPC timeout.
    pub(crate) fn request<T>(&self, message: T, deadline: Option<Duration>) -> Request<T> {
        let mut request = Request::new(message);
        if let Some(deadline) = deadline {
            request.set_timeout(deadline);
        }
        match MetadataValue::try_from(self.address().as_str()) {
            Ok(value) => {
                request.metadata_mut().insert(ACCOUNT_METADATA_KEY, value);
            }
            Err(e) => tracing::warn!(error = %e, "account address is not valid metadata"),
        }
        request
    }

    async fn query<T, F, Fut>(&self, op: &'static str, deadline: Duration, f: F) -> Result<T, RpcxError>
    where
        F: FnOnce(PooledConnection) -> Fut,
        Fut: Future<Output = Result<Response<T>, Status>>,
    {
        self.call(op, deadline, RpcxError::from_query_status, f).await
    }

    /// Leases a broker, runs one call under `deadline`, and classifies the outcome.
    ///
    /// The lease moves into the call future, so it is released on completion
    /// and when the deadline drops the future.
    async fn call<T, F, Fut>(
        &self,
        op: &'static str,
        deadline: Duration,
        classify: fn(Status) -> RpcxError,
        f: F,
    ) -> Result<T, RpcxError>
    where
        F: FnOnce(PooledConnection) -> Fut,
        Fut: Future<Output = Result<Response<T>, Status>>,
    {
        let conn = self.pool.acquire().await?;
        let index = conn.index();
        let endpoint = conn.endpoint().to_string();
        let outcome = tokio::time::timeout(deadline, f(conn)).await;
        self.settle(op, index, &endpoint, deadline, outcome, classify)
    }

    pub(crate) fn settle<T>(
        &self,
        op: &'static str,
        index: usize,
        endpoint: &str,
        deadline: Duration,
        outcome: Result<Result<Response<T>, Status>, Elapsed>,
        classify: fn(Status) -> RpcxError,
    ) -> Result<T, RpcxError> {
        // Only transport faults invalidate the endpoint, not node answers like NotFound.
        let (err, transport_fault) = match outcome {
            Ok(Ok(response)) => return Ok(response.into_inner()),
            Ok(Err(status)) => {
                let transport_fault =
                    matches!(status.code(), Code::Unavailable | Code::DeadlineExceeded);
                (classify(status), transport_fault)
            }
            Err(_) => (
                RpcxError::BrokenNetwork(format!("{op} exceeded its {deadline:?} deadline")),
                true,
            ),
        };
        if transport_fault {
            self.pool.invalidate(index);
        }
        tracing::warn!(operation = op, endpoint, error = %err, "remote call failed");
        Err(err)
    }
}

fn pier_info(pier: &str, index: &str, timeout: i64) -> pb::PierInfo {
    pb::PierInfo {
        address: pier.to_string(),
        index: index.to_string(),
        timeout,
    }
}

fn parse_decimal(data: &[u8]) -> Result<u64, RpcxError> {
    std::str::from_utf8(data)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .ok_or_else(|| {
            RpcxError::InvalidResponse(format!(
                "expected a decimal number, got {:?}",
                String::from_utf8_lossy(data)
            ))
        })
}

/// The node reports TPS as free text whose last word is the number.
fn parse_tps(data: &[u8]) -> Result<u64, RpcxError> {
    let text = String::from_utf8_lossy(data);
    text.split_whitespace()
        .last()
        .and_then(|word| word.parse::<f64>().ok())
        .filter(|tps| tps.is_finite() && *tps >= 0.0)
        .map(|tps| tps as u64)
        .ok_or_else(|| RpcxError::InvalidResponse(format!("unexpected TPS response {text:?}")))
}
