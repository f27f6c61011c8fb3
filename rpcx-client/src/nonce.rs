use std::sync::Arc;

use dashmap::DashMap;
use rpcx_signer::Address;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::{error::RpcxError, transaction::TransactOpts};

/// Where a submission's nonce comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonceSource {
    /// Caller-supplied, used verbatim.
    Explicit(u64),
    /// Looked up from the node's pending pool.
    Remote,
}

impl NonceSource {
    /// Resolves the override classes in `opts`. Setting both is a malformed request.
    pub fn from_opts(opts: &TransactOpts) -> Result<Self, RpcxError> {
        match (opts.normal_nonce, opts.ibtp_nonce) {
            (Some(_), Some(_)) => Err(RpcxError::Reconstruct(
                "normal and interchain nonces are mutually exclusive".into(),
            )),
            (Some(nonce), None) | (None, Some(nonce)) => Ok(NonceSource::Explicit(nonce)),
            (None, None) => Ok(NonceSource::Remote),
        }
    }
}

/// Serializes remote-nonce submissions per account.
///
/// Two submissions for the same account would otherwise both read the same
/// pending nonce. Holding the account's guard from lookup until the node has
/// accepted the transaction closes that window. An account's entry lives only
/// while someone holds or waits for its lock.
#[derive(Debug, Default)]
pub struct NonceCoordinator {
    accounts: Arc<DashMap<Address, Arc<Mutex<()>>>>,
}

impl NonceCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self, account: &Address) -> AccountGuard {
        let lock = Arc::clone(
            self.accounts
                .entry(account.clone())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .value(),
        );
        AccountGuard {
            guard: Some(lock.lock_owned().await),
            account: account.clone(),
            accounts: Arc::clone(&self.accounts),
        }
    }

    /// Number of accounts currently locked or waited on.
    pub fn tracked_accounts(&self) -> usize {
        self.accounts.len()
    }
}

/// Exclusive use of one account's nonce sequence.
#[derive(Debug)]
pub struct AccountGuard {
    guard: Option<OwnedMutexGuard<()>>,
    account: Address,
    accounts: Arc<DashMap<Address, Arc<Mutex<()>>>>,
}

impl Drop for AccountGuard {
    fn drop(&mut self) {
        drop(self.guard.take());
        // The map's own reference is the only one left once nobody waits.
        self.accounts
            .remove_if(&self.account, |_, lock| Arc::strong_count(lock) == 1);
    }
}
