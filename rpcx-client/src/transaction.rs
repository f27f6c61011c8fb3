use std::{fmt, sync::Arc};

use prost::Message;
use rpcx_proto::pb;
use rpcx_signer::{recover_address, Address, Signer, SignerError};
use sha2::{Digest, Sha256};

use crate::error::RpcxError;

/// An unsigned transaction. Only [`ChainClient`](crate::ChainClient) turns it into a
/// [`SignedTransaction`], after resolving its nonce.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftTransaction {
    /// Must be set before submission.
    pub from: Option<Address>,
    pub to: Address,
    pub payload: Vec<u8>,
    /// Unix time in nanoseconds.
    pub timestamp: i64,
    /// Attached cross-chain packet, for interchain transactions.
    pub ibtp: Option<pb::Ibtp>,
    pub amount: String,
    pub extra: Vec<u8>,
}

impl DraftTransaction {
    pub fn new(from: Address, to: Address, payload: Vec<u8>) -> Self {
        Self {
            from: Some(from),
            to,
            payload,
            timestamp: now_nanos(),
            ibtp: None,
            amount: String::new(),
            extra: Vec::new(),
        }
    }

    /// A contract invocation executed by the given virtual machine.
    pub fn invoke(
        from: Address,
        to: Address,
        vm: pb::transaction_data::VmType,
        input: Vec<u8>,
    ) -> Self {
        let data = pb::TransactionData {
            r#type: pb::transaction_data::Type::Invoke as i32,
            vm_type: vm as i32,
            payload: input,
            ..Default::default()
        };
        Self::new(from, to, data.encode_to_vec())
    }

    /// A plain value transfer.
    pub fn transfer(from: Address, to: Address, amount: u64) -> Self {
        let data = pb::TransactionData {
            r#type: pb::transaction_data::Type::Normal as i32,
            amount,
            ..Default::default()
        };
        let mut draft = Self::new(from, to, data.encode_to_vec());
        draft.amount = amount.to_string();
        draft
    }

    /// A transaction carrying an interchain packet.
    pub fn interchain(from: Address, to: Address, ibtp: pb::Ibtp) -> Self {
        let mut draft = Self::new(from, to, Vec::new());
        draft.ibtp = Some(ibtp);
        draft
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Fails with [`RpcxError::Reconstruct`] when the draft has no sender.
    pub(crate) fn sender(&self) -> Result<&Address, RpcxError> {
        self.from
            .as_ref()
            .ok_or_else(|| RpcxError::Reconstruct("transaction has no sender".into()))
    }

    /// Binds `nonce` and signs the canonical encoding with `signer`.
    pub(crate) fn sign(self, nonce: u64, signer: &dyn Signer) -> Result<SignedTransaction, RpcxError> {
        let from = self.sender()?.to_string();
        let mut tx = pb::BxhTransaction {
            from,
            to: self.to.to_string(),
            timestamp: self.timestamp,
            payload: self.payload,
            ibtp: self.ibtp,
            nonce,
            amount: self.amount,
            signature: Vec::new(),
            extra: self.extra,
        };
        tx.signature = signer.sign(&signing_bytes(&tx))?;
        Ok(SignedTransaction { inner: tx })
    }
}

/// A signed, immutable transaction. The only shape the submission path accepts.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedTransaction {
    inner: pb::BxhTransaction,
}

impl SignedTransaction {
    pub fn nonce(&self) -> u64 {
        self.inner.nonce
    }

    pub fn sender(&self) -> &str {
        &self.inner.from
    }

    pub fn signature(&self) -> &[u8] {
        &self.inner.signature
    }

    /// `0x`-prefixed SHA-256 of the canonical encoding.
    pub fn hash(&self) -> String {
        transaction_hash(&self.inner)
    }

    /// Re-derives the signer's address from the signature.
    pub fn recover_sender(&self) -> Result<Address, SignerError> {
        recover_address(&signing_bytes(&self.inner), &self.inner.signature)
    }

    pub fn as_proto(&self) -> &pb::BxhTransaction {
        &self.inner
    }

    pub fn into_proto(self) -> pb::BxhTransaction {
        self.inner
    }
}

/// The bytes a signature covers: the transaction encoded with an empty signature.
pub fn signing_bytes(tx: &pb::BxhTransaction) -> Vec<u8> {
    if tx.signature.is_empty() {
        return tx.encode_to_vec();
    }
    let mut unsigned = tx.clone();
    unsigned.signature.clear();
    unsigned.encode_to_vec()
}

pub fn transaction_hash(tx: &pb::BxhTransaction) -> String {
    format!("0x{}", hex::encode(Sha256::digest(signing_bytes(tx))))
}

fn now_nanos() -> i64 {
    chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
}

/// Per-submission overrides.
#[derive(Clone, Default)]
pub struct TransactOpts {
    /// Identity used for the pending nonce lookup.
    pub from: Option<Address>,
    pub normal_nonce: Option<u64>,
    pub ibtp_nonce: Option<u64>,
    /// Signs instead of the client's default key.
    pub signer: Option<Arc<dyn Signer>>,
}

impl TransactOpts {
    pub fn with_normal_nonce(mut self, nonce: u64) -> Self {
        self.normal_nonce = Some(nonce);
        self
    }

    pub fn with_ibtp_nonce(mut self, nonce: u64) -> Self {
        self.ibtp_nonce = Some(nonce);
        self
    }

    pub fn with_signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn with_from(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }
}

impl fmt::Debug for TransactOpts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransactOpts")
            .field("from", &self.from)
            .field("normal_nonce", &self.normal_nonce)
            .field("ibtp_nonce", &self.ibtp_nonce)
            .field("signer", &self.signer.as_ref().map(|s| s.address()))
            .finish()
    }
}

pub trait ReceiptExt {
    fn is_success(&self) -> bool;
}

impl ReceiptExt for pb::Receipt {
    fn is_success(&self) -> bool {
        self.status() == pb::receipt::Status::Success
    }
}
