use rpcx_signer::SignerError;
use thiserror::Error;
use tonic::{Code, Status};

/// Coarse error classes callers branch on instead of matching messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// Transport-level fault. Retry the same request.
    BrokenNetwork,
    /// The request itself is malformed. Fix it before retrying.
    Reconstruct,
    /// Local signing failed.
    Sign,
    /// Every endpoint failed across the whole retry budget.
    ExhaustedPool,
    /// A remote status that carries no special meaning for the client.
    Rpc,
    PoolClosed,
    Config,
    Decode,
    InvalidResponse,
    Cancelled,
}

/// Defines the error type returned by every client operation.
#[derive(Error, Debug)]
pub enum RpcxError {
    #[error("broken network: {0}")]
    BrokenNetwork(String),

    #[error("transaction must be reconstructed: {0}")]
    Reconstruct(String),

    #[error("signing failed: {0}")]
    Sign(#[from] SignerError),

    #[error("connection pool exhausted after {attempts} attempts: {last_error}")]
    ExhaustedPool { attempts: usize, last_error: String },

    #[error("rpc failed ({code:?}): {message}")]
    Rpc { code: Code, message: String },

    #[error("connection pool is closed")]
    PoolClosed,

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to decode {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: prost::DecodeError,
    },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("operation cancelled")]
    Cancelled,
}

impl RpcxError {
    pub fn class(&self) -> ErrorClass {
        match self {
            RpcxError::BrokenNetwork(_) => ErrorClass::BrokenNetwork,
            RpcxError::Reconstruct(_) => ErrorClass::Reconstruct,
            RpcxError::Sign(_) => ErrorClass::Sign,
            RpcxError::ExhaustedPool { .. } => ErrorClass::ExhaustedPool,
            RpcxError::Rpc { .. } => ErrorClass::Rpc,
            RpcxError::PoolClosed => ErrorClass::PoolClosed,
            RpcxError::Config(_) => ErrorClass::Config,
            RpcxError::Decode { .. } => ErrorClass::Decode,
            RpcxError::InvalidResponse(_) => ErrorClass::InvalidResponse,
            RpcxError::Cancelled => ErrorClass::Cancelled,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.class() == ErrorClass::BrokenNetwork
    }

    /// Classifies the status of a transaction submission.
    ///
    /// Infrastructure faults become [`RpcxError::BrokenNetwork`], a rejected
    /// argument becomes [`RpcxError::Reconstruct`], anything else passes through.
    pub fn from_submission_status(status: Status) -> Self {
        match status.code() {
            Code::Unknown | Code::Internal | Code::Unavailable | Code::DeadlineExceeded => {
                RpcxError::BrokenNetwork(status.message().to_string())
            }
            Code::InvalidArgument => RpcxError::Reconstruct(status.message().to_string()),
            code => RpcxError::Rpc {
                code,
                message: status.message().to_string(),
            },
        }
    }

    /// Classifies the status of a read-only query: every failure is a network fault.
    pub fn from_query_status(status: Status) -> Self {
        RpcxError::BrokenNetwork(format!("{:?}: {}", status.code(), status.message()))
    }
}
