//! A resilient client for `ChainBroker` ledger nodes.
//!
//! The crate submits signed transactions to a permissioned ledger network and
//! streams data back from it. It never runs consensus or stores chain state; it
//! only keeps connections healthy and turns transport failures into a small,
//! matchable error taxonomy.
//!
//! # Key Components
//!
//! *   [`pool::ConnectionPool`]: one slot per configured node, a "last known good"
//!     fast path, randomized failover and TLS-aware dialing. Created once and
//!     shared between clients through an `Arc`.
//! *   [`client::ChainClient`]: the transaction lifecycle (nonce resolution,
//!     signing, submission, receipt polling) and every read-only query.
//! *   [`subscription`]: background-pumped streaming subscriptions with a typed
//!     decode table and scoped cancellation.
//! *   [`retry::RetryPolicy`]: the single backoff discipline used by all of the above.
pub mod broker;
pub mod client;
/// Configuration structures and validation for the client.
pub mod config;
pub mod error;
/// Per-account nonce resolution.
pub mod nonce;
pub mod pool;
pub mod retry;
/// Streaming subscriptions and bounded catch-up streams.
pub mod subscription;
/// Draft and signed transactions, and submission options.
pub mod transaction;

pub use client::{BlockSelector, ChainClient, ClientBuilder};
pub use config::{ClientConfig, NodeEndpoint, TlsMaterial};
pub use error::{ErrorClass, RpcxError};
pub use pool::{ConnectionPool, PooledConnection};
pub use retry::{Backoff, RetryFailure, RetryPolicy};
pub use subscription::{
    CloseReason, Subscription, SubscriptionEvent, SubscriptionKind, SubscriptionState,
};
pub use transaction::{DraftTransaction, ReceiptExt, SignedTransaction, TransactOpts};

pub use rpcx_proto::pb;
pub use rpcx_signer::{Address, Ed25519Signer, Signer};
