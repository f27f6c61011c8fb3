//! Protobuf messages and the gRPC client stub for the `pb.ChainBroker` service.

pub mod pb {
    #![allow(clippy::all)]
    #![allow(missing_docs)]
    include!("generated/pb.rs");
}

pub use pb::chain_broker_client::ChainBrokerClient;
