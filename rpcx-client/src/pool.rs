//! The failover connection pool.
//!
//! The pool keeps at most one live broker per configured endpoint and remembers
//! the last endpoint that worked. Acquisition first tries that endpoint without
//! touching the network, then walks a shuffled rotation of the endpoints under
//! the shared [`RetryPolicy`], dialing exactly one endpoint per attempt. Leases
//! are RAII guards: dropping a [`PooledConnection`] releases it on every exit path.

use std::{
    ops::Deref,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use dashmap::{DashMap, DashSet};
use parking_lot::Mutex;
use rand::seq::SliceRandom;

use crate::{
    broker::{Broker, ConnectivityState, DialError, Dialer, GrpcDialer},
    config::{ClientConfig, NodeEndpoint},
    error::RpcxError,
    retry::RetryPolicy,
};

pub struct ConnectionPool {
    endpoints: Vec<NodeEndpoint>,
    slots: DashMap<usize, Arc<dyn Broker>>,
    /// Endpoints whose TLS material is unusable.
    disabled: DashSet<usize>,
    last_good: Mutex<Option<usize>>,
    dialer: Arc<dyn Dialer>,
    policy: RetryPolicy,
    dial_timeout: Duration,
    closed: AtomicBool,
    leased: Arc<AtomicUsize>,
}

impl ConnectionPool {
    pub fn new(
        endpoints: Vec<NodeEndpoint>,
        dialer: Arc<dyn Dialer>,
        policy: RetryPolicy,
        dial_timeout: Duration,
    ) -> Result<Self, RpcxError> {
        if endpoints.is_empty() {
            return Err(RpcxError::Config(
                "connection pool needs at least one endpoint".into(),
            ));
        }
        Ok(Self {
            endpoints,
            slots: DashMap::new(),
            disabled: DashSet::new(),
            last_good: Mutex::new(None),
            dialer,
            policy,
            dial_timeout,
            closed: AtomicBool::new(false),
            leased: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// A pool over gRPC transports built from `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self, RpcxError> {
        Self::with_dialer(config, Arc::new(GrpcDialer))
    }

    pub fn with_dialer(config: &ClientConfig, dialer: Arc<dyn Dialer>) -> Result<Self, RpcxError> {
        config.validate()?;
        Self::new(
            config.nodes.clone(),
            dialer,
            config.retry.dial_policy(config.nodes.len()),
            config.timeouts.dial(),
        )
    }

    pub fn endpoints(&self) -> &[NodeEndpoint] {
        &self.endpoints
    }

    /// Number of leases currently held by callers.
    pub fn leased(&self) -> usize {
        self.leased.load(Ordering::Acquire)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Returns a lease on a usable broker.
    pub async fn acquire(&self) -> Result<PooledConnection, RpcxError> {
        if self.is_closed() {
            return Err(RpcxError::PoolClosed);
        }

        if let Some(lease) = self.fast_path() {
            return Ok(lease);
        }

        let mut rotation: Vec<usize> = (0..self.endpoints.len()).collect();
        rotation.shuffle(&mut rand::thread_rng());
        let cursor = AtomicUsize::new(0);

        match self
            .policy
            .run("pool.acquire", || self.attempt(&rotation, &cursor))
            .await
        {
            Ok(lease) => Ok(lease),
            Err(failure) => match failure.last_error {
                RpcxError::PoolClosed => Err(RpcxError::PoolClosed),
                last_error => {
                    tracing::error!(
                        attempts = failure.attempts,
                        error = %last_error,
                        "no broker endpoint is reachable"
                    );
                    Err(RpcxError::ExhaustedPool {
                        attempts: failure.attempts,
                        last_error: last_error.to_string(),
                    })
                }
            },
        }
    }

    /// Forgets `index` as the last known good endpoint so the next acquisition fails over.
    pub fn invalidate(&self, index: usize) {
        let mut last_good = self.last_good.lock();
        if *last_good == Some(index) {
            *last_good = None;
            tracing::debug!(endpoint = %self.endpoints[index].addr, "invalidated last known good endpoint");
        }
    }

    /// Closes every owned transport. Later acquisitions fail with [`RpcxError::PoolClosed`].
    pub fn close(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            tracing::debug!("connection pool already closed");
            return;
        }
        *self.last_good.lock() = None;

        let brokers: Vec<(usize, Arc<dyn Broker>)> = self
            .slots
            .iter()
            .map(|slot| (*slot.key(), Arc::clone(slot.value())))
            .collect();
        self.slots.clear();

        for (index, broker) in brokers {
            if !broker.close() {
                tracing::debug!(endpoint = %self.endpoints[index].addr, "transport already closed");
            }
        }
        tracing::info!("connection pool closed");
    }

    fn fast_path(&self) -> Option<PooledConnection> {
        let index = (*self.last_good.lock())?;
        let broker = self.slots.get(&index).map(|slot| Arc::clone(slot.value()))?;
        broker.state().is_usable().then(|| self.lease(index, broker))
    }

    /// The most recently confirmed endpoint, if any.
    pub fn last_good(&self) -> Option<usize> {
        *self.last_good.lock()
    }

    /// Reuses any live transport, otherwise dials the next enabled endpoint in `rotation`.
    async fn attempt(
        &self,
        rotation: &[usize],
        cursor: &AtomicUsize,
    ) -> Result<PooledConnection, RpcxError> {
        if self.is_closed() {
            return Err(RpcxError::PoolClosed);
        }

        for &index in rotation {
            let existing = self.slots.get(&index).map(|slot| Arc::clone(slot.value()));
            if let Some(broker) = existing.filter(|broker| broker.state().is_usable()) {
                self.mark_good(index);
                return Ok(self.lease(index, broker));
            }
        }

        let index = (0..rotation.len())
            .map(|_| rotation[cursor.fetch_add(1, Ordering::Relaxed) % rotation.len()])
            .find(|index| !self.disabled.contains(index))
            .ok_or_else(|| RpcxError::Config("every endpoint is disabled".into()))?;

        if let Some((_, stale)) = self.slots.remove(&index) {
            stale.close();
        }

        match self.dial(index).await {
            Ok(broker) => {
                if self.is_closed() {
                    broker.close();
                    return Err(RpcxError::PoolClosed);
                }
                self.slots.insert(index, Arc::clone(&broker));
                self.mark_good(index);
                Ok(self.lease(index, broker))
            }
            Err(err) if err.is_permanent() => {
                tracing::warn!(endpoint = %self.endpoints[index].addr, error = %err, "disabling endpoint");
                self.disabled.insert(index);
                if self.disabled.len() == self.endpoints.len() {
                    return Err(RpcxError::Config(format!(
                        "every endpoint is disabled: {err}"
                    )));
                }
                Err(RpcxError::BrokenNetwork(err.to_string()))
            }
            Err(err) => {
                tracing::debug!(endpoint = %self.endpoints[index].addr, error = %err, "dial failed");
                Err(RpcxError::BrokenNetwork(err.to_string()))
            }
        }
    }

    async fn dial(&self, index: usize) -> Result<Arc<dyn Broker>, DialError> {
        let endpoint = &self.endpoints[index];
        match tokio::time::timeout(
            self.dial_timeout,
            self.dialer.dial(endpoint, self.dial_timeout),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(DialError::Timeout {
                endpoint: endpoint.addr.clone(),
                timeout: self.dial_timeout,
            }),
        }
    }

    fn mark_good(&self, index: usize) {
        *self.last_good.lock() = Some(index);
    }

    fn lease(&self, index: usize, broker: Arc<dyn Broker>) -> PooledConnection {
        self.leased.fetch_add(1, Ordering::AcqRel);
        PooledConnection {
            index,
            endpoint: self.endpoints[index].addr.clone(),
            broker,
            leased: Arc::clone(&self.leased),
        }
    }
}

impl Drop for ConnectionPool {
    fn drop(&mut self) {
        self.close();
    }
}

/// A lease on one pooled broker, released when dropped.
pub struct PooledConnection {
    index: usize,
    endpoint: String,
    broker: Arc<dyn Broker>,
    leased: Arc<AtomicUsize>,
}

impl PooledConnection {
    /// Index of the endpoint in the pool's configuration.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn state(&self) -> ConnectivityState {
        self.broker.state()
    }
}

impl Deref for PooledConnection {
    type Target = dyn Broker;

    fn deref(&self) -> &Self::Target {
        self.broker.as_ref()
    }
}

impl Drop for PooledConnection {
    fn drop(&mut self) {
        self.leased.fetch_sub(1, Ordering::AcqRel);
    }
}

impl std::fmt::Debug for ConnectionPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let endpoints: Vec<&str> = self.endpoints.iter().map(|e| e.addr.as_str()).collect();
        f.debug_struct("ConnectionPool")
            .field("endpoints", &endpoints)
            .field("disabled", &self.disabled.len())
            .field("last_good", &self.last_good())
            .field("leased", &self.leased())
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl std::fmt::Debug for PooledConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PooledConnection")
            .field("index", &self.index)
            .field("endpoint", &self.endpoint)
            .field("state", &self.state())
            .finish()
    }
}
