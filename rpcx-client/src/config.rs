#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::{path::Path, time::Duration};

use crate::{error::RpcxError, retry::RetryPolicy};

/// The top-level configuration for a [`ChainClient`](crate::ChainClient).
///
/// It is typically deserialized from a configuration file with [`load_config`]
/// and handed to a [`ClientBuilder`](crate::ClientBuilder), which validates it
/// once before any connection is made.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub struct ClientConfig {
    #[cfg_attr(feature = "serde", serde(default))]
    pub nodes: Vec<NodeEndpoint>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub timeouts: Timeouts,
    #[cfg_attr(feature = "serde", serde(default))]
    pub retry: RetrySettings,
    #[cfg_attr(feature = "serde", serde(default))]
    pub channels: ChannelConfig,
    /// Hex-encoded Ed25519 secret used when no signer is injected.
    #[cfg_attr(feature = "serde", serde(default))]
    pub key_path: Option<String>,
}

/// One broker node. Immutable once the pool has been created.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub struct NodeEndpoint {
    /// `host:port`, or a full `http(s)://` URI.
    pub addr: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tls: Option<TlsMaterial>,
}

/// File paths of the PEM material used to dial a node over TLS.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub struct TlsMaterial {
    pub ca_cert: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub client_cert: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub client_key: Option<String>,
    /// Name checked against the server certificate.
    #[cfg_attr(feature = "serde", serde(default))]
    pub server_name: Option<String>,
}

/// Per-operation deadlines, in milliseconds.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case", default))]
pub struct Timeouts {
    pub dial_ms: u64,
    pub send_ms: u64,
    pub receipt_ms: u64,
    pub query_ms: u64,
    /// Block ranges, chain metadata and transaction lookups.
    pub blocks_ms: u64,
    /// Master-pier checks, elections and heartbeats.
    pub pier_ms: u64,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case", default))]
pub struct RetrySettings {
    /// Fixed delay between pool acquisition rounds and nonce lookups.
    pub dial_interval_ms: u64,
    /// Acquisition attempts per configured endpoint.
    pub attempts_per_endpoint: usize,
    pub nonce_attempts: usize,
    pub receipt_attempts: usize,
    /// First step of the Fibonacci schedule used to poll receipts.
    pub receipt_backoff_ms: u64,
    pub receipt_max_backoff_ms: u64,
}

/// Defines capacities for the MPSC channels created by the client.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case", default))]
pub struct ChannelConfig {
    /// The buffer capacity of each subscription's delivery queue.
    pub subscription_buffer: usize,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            dial_ms: 1_000,
            send_ms: 10_000,
            receipt_ms: 2_000,
            query_ms: 2_000,
            blocks_ms: 10_000,
            pier_ms: 100_000,
        }
    }
}

impl Timeouts {
    pub fn dial(&self) -> Duration {
        Duration::from_millis(self.dial_ms)
    }

    pub fn send(&self) -> Duration {
        Duration::from_millis(self.send_ms)
    }

    pub fn receipt(&self) -> Duration {
        Duration::from_millis(self.receipt_ms)
    }

    pub fn query(&self) -> Duration {
        Duration::from_millis(self.query_ms)
    }

    pub fn blocks(&self) -> Duration {
        Duration::from_millis(self.blocks_ms)
    }

    pub fn pier(&self) -> Duration {
        Duration::from_millis(self.pier_ms)
    }
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            dial_interval_ms: 500,
            attempts_per_endpoint: 5,
            nonce_attempts: 5,
            receipt_attempts: 5,
            receipt_backoff_ms: 500,
            receipt_max_backoff_ms: 8_000,
        }
    }
}

impl RetrySettings {
    pub fn dial_policy(&self, endpoints: usize) -> RetryPolicy {
        RetryPolicy::scaled_by_endpoints(
            Duration::from_millis(self.dial_interval_ms),
            self.attempts_per_endpoint,
            endpoints,
        )
    }

    pub fn nonce_policy(&self) -> RetryPolicy {
        RetryPolicy::fixed(
            Duration::from_millis(self.dial_interval_ms),
            self.nonce_attempts,
        )
    }

    pub fn receipt_policy(&self) -> RetryPolicy {
        RetryPolicy::fibonacci(
            Duration::from_millis(self.receipt_backoff_ms),
            Duration::from_millis(self.receipt_max_backoff_ms),
            self.receipt_attempts,
        )
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            subscription_buffer: 128,
        }
    }
}

impl NodeEndpoint {
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            tls: None,
        }
    }

    pub fn with_tls(mut self, tls: TlsMaterial) -> Self {
        self.tls = Some(tls);
        self
    }
}

impl ClientConfig {
    pub fn with_nodes<I, S>(nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            nodes: nodes.into_iter().map(NodeEndpoint::new).collect(),
            ..Default::default()
        }
    }

    /// Checks the node list and every referenced TLS file.
    pub fn validate(&self) -> Result<(), RpcxError> {
        if self.nodes.is_empty() {
            return Err(RpcxError::Config("at least one node is required".into()));
        }
        for node in &self.nodes {
            if node.addr.trim().is_empty() {
                return Err(RpcxError::Config("node address must not be empty".into()));
            }
            if let Some(tls) = &node.tls {
                tls.validate(&node.addr)?;
            }
        }
        if self.channels.subscription_buffer == 0 {
            return Err(RpcxError::Config(
                "channels.subscription-buffer must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

impl TlsMaterial {
    fn validate(&self, addr: &str) -> Result<(), RpcxError> {
        require_file(addr, "ca-cert", &self.ca_cert)?;
        match (&self.client_cert, &self.client_key) {
            (Some(cert), Some(key)) => {
                require_file(addr, "client-cert", cert)?;
                require_file(addr, "client-key", key)
            }
            (None, None) => Ok(()),
            _ => Err(RpcxError::Config(format!(
                "node {addr}: client-cert and client-key must be set together"
            ))),
        }
    }
}

fn require_file(addr: &str, field: &str, path: &str) -> Result<(), RpcxError> {
    if Path::new(path).is_file() {
        Ok(())
    } else {
        Err(RpcxError::Config(format!(
            "node {addr}: {field} file {path:?} does not exist"
        )))
    }
}

/// Loads a [`ClientConfig`] from `path`, with `RPCX__*` environment overrides.
#[cfg(feature = "serde")]
pub fn load_config(path: &str) -> anyhow::Result<ClientConfig> {
    use anyhow::Context;

    let builder = config::Config::builder()
        .add_source(config::File::with_name(path))
        .add_source(config::Environment::with_prefix("RPCX").separator("__"));

    let settings: ClientConfig = builder
        .build()
        .context(format!("Failed to build configuration from '{}'", path))?
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    Ok(settings)
}
