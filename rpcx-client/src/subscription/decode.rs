//! Frame decoding for subscriptions, keyed by kind.

use prost::Message;
use rpcx_proto::pb;

use super::{SubscriptionEvent, SubscriptionKind};
use crate::error::RpcxError;

type DecodeFn = fn(&[u8]) -> Result<SubscriptionEvent, prost::DecodeError>;

/// Kinds missing from this table are delivered as [`SubscriptionEvent::Raw`].
const DECODE_TABLE: &[(SubscriptionKind, &str, DecodeFn)] = &[
    (SubscriptionKind::BlockHeader, "block header", block_header),
    (SubscriptionKind::Block, "block", block),
    (SubscriptionKind::Event, "event", event),
    (SubscriptionKind::InterchainTx, "interchain tx", interchain_tx),
    (
        SubscriptionKind::InterchainTxWrapper,
        "interchain tx wrappers",
        interchain_tx_wrappers,
    ),
    (
        SubscriptionKind::UnionInterchainTxWrapper,
        "union interchain tx wrappers",
        union_interchain_tx_wrappers,
    ),
];

fn block_header(data: &[u8]) -> Result<SubscriptionEvent, prost::DecodeError> {
    pb::BlockHeader::decode(data).map(SubscriptionEvent::BlockHeader)
}

fn block(data: &[u8]) -> Result<SubscriptionEvent, prost::DecodeError> {
    pb::Block::decode(data).map(SubscriptionEvent::Block)
}

fn event(data: &[u8]) -> Result<SubscriptionEvent, prost::DecodeError> {
    pb::Event::decode(data).map(SubscriptionEvent::Event)
}

fn interchain_tx(data: &[u8]) -> Result<SubscriptionEvent, prost::DecodeError> {
    pb::Ibtp::decode(data).map(SubscriptionEvent::InterchainTx)
}

fn interchain_tx_wrappers(data: &[u8]) -> Result<SubscriptionEvent, prost::DecodeError> {
    pb::InterchainTxWrappers::decode(data).map(SubscriptionEvent::InterchainTxWrappers)
}

fn union_interchain_tx_wrappers(data: &[u8]) -> Result<SubscriptionEvent, prost::DecodeError> {
    pb::InterchainTxWrappers::decode(data).map(SubscriptionEvent::UnionInterchainTxWrappers)
}

fn lookup(kind: SubscriptionKind) -> Option<(&'static str, DecodeFn)> {
    DECODE_TABLE
        .iter()
        .find(|(entry, _, _)| *entry == kind)
        .map(|(_, what, decode)| (*what, *decode))
}

pub(crate) fn decode_frame(
    kind: SubscriptionKind,
    data: Vec<u8>,
) -> Result<SubscriptionEvent, RpcxError> {
    match lookup(kind) {
        Some((what, decode)) => decode(&data).map_err(|source| RpcxError::Decode { what, source }),
        None => Ok(SubscriptionEvent::Raw(data)),
    }
}

pub(crate) fn decode_audit_frame(
    kind: pb::audit_subscription_request::Type,
    data: Vec<u8>,
) -> Result<SubscriptionEvent, RpcxError> {
    match kind {
        pb::audit_subscription_request::Type::AuditNode => pb::AuditTxInfo::decode(data.as_slice())
            .map(SubscriptionEvent::Audit)
            .map_err(|source| RpcxError::Decode {
                what: "audit tx info",
                source,
            }),
    }
}
