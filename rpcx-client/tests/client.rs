mod common;

use std::{collections::BTreeSet, io::Write, sync::Arc, time::Duration};

use common::{address, fast_config, pool, single_node_client, Behaviour, MockBroker, MockDialer};
use rpcx_client::{
    pb, BlockSelector, ChainClient, DraftTransaction, Ed25519Signer, ErrorClass, ReceiptExt,
    RpcxError, Signer, TransactOpts,
};
use tonic::Status;

fn transfer_from(signer: &Ed25519Signer) -> DraftTransaction {
    DraftTransaction::transfer(signer.address(), address(7), 10)
}

#[tokio::test]
async fn submit_and_wait_happy_path() {
    let (client, broker, signer) = single_node_client();

    let receipt = client
        .submit_and_wait(transfer_from(&signer), TransactOpts::default())
        .await
        .unwrap();

    assert_eq!(broker.count("get_pending_nonce"), 1);
    assert_eq!(broker.count("send_transaction"), 1);
    assert!(receipt.is_success());

    let hash = receipt.tx_hash.strip_prefix("0x").unwrap();
    assert_eq!(hex::decode(hash).unwrap().len(), 32);

    let submitted = broker.submitted();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].nonce, 1);
    assert_eq!(submitted[0].amount, "10");
    assert_eq!(client.pool().leased(), 0);
}

#[tokio::test]
async fn node_recovers_the_signing_address() {
    let (client, broker, signer) = single_node_client();

    let signed = client
        .prepare(transfer_from(&signer), TransactOpts::default())
        .await
        .unwrap();
    assert_eq!(signed.recover_sender().unwrap(), signer.address());
    assert_eq!(signed.sender(), signer.address().as_str());

    client.send_signed(&signed).await.unwrap();
    assert_eq!(broker.recovered_senders(), vec![signer.address()]);
}

#[tokio::test]
async fn missing_sender_is_rejected_before_any_network_call() {
    let (client, broker, signer) = single_node_client();
    let mut draft = transfer_from(&signer);
    draft.from = None;

    let err = client.submit(draft, TransactOpts::default()).await.unwrap_err();

    assert_eq!(err.class(), ErrorClass::Reconstruct);
    assert_eq!(broker.total_calls(), 0);
}

#[tokio::test]
async fn both_nonce_overrides_are_rejected() {
    let (client, broker, signer) = single_node_client();
    let opts = TransactOpts::default()
        .with_normal_nonce(3)
        .with_ibtp_nonce(4);

    let err = client.submit(transfer_from(&signer), opts).await.unwrap_err();

    assert!(matches!(err, RpcxError::Reconstruct(_)), "{err:?}");
    assert_eq!(broker.total_calls(), 0);
}

#[tokio::test]
async fn explicit_nonces_skip_the_lookup() {
    let (client, broker, signer) = single_node_client();

    client
        .submit(transfer_from(&signer), TransactOpts::default().with_normal_nonce(0))
        .await
        .unwrap();
    client
        .submit(transfer_from(&signer), TransactOpts::default().with_ibtp_nonce(9))
        .await
        .unwrap();

    assert_eq!(broker.count("get_pending_nonce"), 0);
    let nonces: Vec<u64> = broker.submitted().iter().map(|tx| tx.nonce).collect();
    assert_eq!(nonces, vec![0, 9]);
}

#[tokio::test]
async fn concurrent_submissions_get_distinct_nonces() {
    let (client, broker, signer) = single_node_client();
    let client = Arc::new(client);

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let client = Arc::clone(&client);
            let draft = transfer_from(&signer);
            tokio::spawn(async move { client.submit(draft, TransactOpts::default()).await })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let nonces: BTreeSet<u64> = broker.submitted().iter().map(|tx| tx.nonce).collect();
    assert_eq!(nonces, (1..=8).collect::<BTreeSet<u64>>());
}

#[tokio::test]
async fn submission_failures_are_classified() {
    let (client, broker, signer) = single_node_client();
    let explicit = || TransactOpts::default().with_normal_nonce(1);

    broker.fail_next_send(Status::invalid_argument("bad payload"));
    let err = client.submit(transfer_from(&signer), explicit()).await.unwrap_err();
    assert_eq!(err.class(), ErrorClass::Reconstruct);

    broker.fail_next_send(Status::unavailable("node restarting"));
    let err = client.submit(transfer_from(&signer), explicit()).await.unwrap_err();
    assert_eq!(err.class(), ErrorClass::BrokenNetwork);

    broker.fail_next_send(Status::permission_denied("not whitelisted"));
    let err = client.submit(transfer_from(&signer), explicit()).await.unwrap_err();
    match err {
        RpcxError::Rpc { code, message } => {
            assert_eq!(code, tonic::Code::PermissionDenied);
            assert_eq!(message, "not whitelisted");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn timed_out_submission_releases_its_lease() {
    let (client, broker, signer) = single_node_client();
    broker.delay_sends(Duration::from_secs(2));

    let err = client
        .submit(transfer_from(&signer), TransactOpts::default().with_normal_nonce(1))
        .await
        .unwrap_err();

    assert_eq!(err.class(), ErrorClass::BrokenNetwork);
    assert_eq!(client.pool().leased(), 0);
}

#[tokio::test]
async fn receipt_lookup_is_idempotent() {
    let (client, _broker, signer) = single_node_client();
    let hash = client
        .submit(transfer_from(&signer), TransactOpts::default())
        .await
        .unwrap();

    let first = client.get_receipt(&hash).await.unwrap();
    let second = client.get_receipt(&hash).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.tx_hash, hash);
}

#[tokio::test]
async fn receipt_polling_waits_for_the_node() {
    let (client, broker, signer) = single_node_client();
    let hash = client
        .submit(transfer_from(&signer), TransactOpts::default())
        .await
        .unwrap();
    broker.miss_receipts(3);

    let receipt = client.poll_receipt(&hash).await.unwrap();
    assert_eq!(receipt.tx_hash, hash);
    assert_eq!(broker.count("get_receipt"), 4);
}

#[tokio::test]
async fn receipt_polling_gives_up_after_its_budget() {
    let (client, broker, _signer) = single_node_client();
    broker.miss_receipts(100);

    let err = client.poll_receipt("0xmissing").await.unwrap_err();
    assert_eq!(err.class(), ErrorClass::BrokenNetwork);
    assert_eq!(broker.count("get_receipt"), 5);
}

#[tokio::test]
async fn per_call_signer_overrides_the_default() {
    let (client, broker, _signer) = single_node_client();
    let other = Arc::new(Ed25519Signer::generate());

    client
        .submit(
            transfer_from(&other),
            TransactOpts::default().with_signer(other.clone()),
        )
        .await
        .unwrap();

    assert_eq!(broker.recovered_senders(), vec![other.address()]);
    // Requests still identify the client's own account.
    assert!(broker
        .accounts()
        .iter()
        .all(|account| *account == client.address().to_string()));
}

#[tokio::test]
async fn replacing_the_signer_changes_the_account() {
    let (client, broker, signer) = single_node_client();
    let replacement = Arc::new(Ed25519Signer::generate());
    assert_eq!(client.address(), signer.address());

    client.set_signer(replacement.clone());
    assert_eq!(client.address(), replacement.address());

    client
        .submit(transfer_from(&replacement), TransactOpts::default())
        .await
        .unwrap();
    assert_eq!(broker.recovered_senders(), vec![replacement.address()]);
    assert_eq!(
        broker.accounts().last().unwrap(),
        replacement.address().as_str()
    );
}

#[tokio::test]
async fn every_request_carries_the_account_metadata() {
    let (client, broker, _signer) = single_node_client();

    client.get_chain_meta().await.unwrap();
    client.get_chain_id().await.unwrap();

    assert_eq!(
        broker.accounts(),
        vec![client.address().to_string(), client.address().to_string()]
    );
}

#[tokio::test]
async fn queries_decode_node_responses() {
    let (client, _broker, signer) = single_node_client();

    assert_eq!(client.get_chain_id().await.unwrap(), 1356);
    assert_eq!(client.get_tps(1, 100).await.unwrap(), 1523);
    assert_eq!(client.get_pending_nonce(&signer.address()).await.unwrap(), 1);
    assert_eq!(client.get_chain_status().await.unwrap(), "normal");
    assert_eq!(client.get_chain_meta().await.unwrap().height, 42);

    let balance = client.get_account_balance(&signer.address()).await.unwrap();
    let balance = String::from_utf8(balance).unwrap();
    assert!(balance.contains(signer.address().as_str()), "{balance}");

    assert_eq!(client.get_validators().await.unwrap(), br#"["0x01","0x02"]"#);
    assert_eq!(client.get_network_meta().await.unwrap(), br#"{"1":{"pid":"QmA"}}"#);
}

#[tokio::test]
async fn block_queries() {
    let (client, _broker, _signer) = single_node_client();

    let blocks = client.get_blocks(3, 5).await.unwrap();
    let numbers: Vec<u64> = blocks
        .iter()
        .map(|block| block.block_header.as_ref().unwrap().number)
        .collect();
    assert_eq!(numbers, vec![3, 4, 5]);

    let by_height = client.get_block(BlockSelector::Height(9)).await.unwrap();
    assert_eq!(by_height.block_header.unwrap().number, 9);

    let by_hash = client
        .get_block(BlockSelector::Hash("0xfeed".into()))
        .await
        .unwrap();
    assert_eq!(by_hash.block_hash, "0xfeed");
}

#[tokio::test]
async fn transaction_queries() {
    let (client, _broker, signer) = single_node_client();
    let hash = client
        .submit(transfer_from(&signer), TransactOpts::default())
        .await
        .unwrap();

    let found = client.get_transaction(&hash).await.unwrap();
    assert_eq!(found.tx.unwrap().from, signer.address().to_string());
    assert_eq!(found.tx_meta.unwrap().index, 0);

    let by_number = client
        .get_transaction_by_block_number_and_index(1, 0)
        .await
        .unwrap();
    assert_eq!(by_number.tx_meta.unwrap().block_height, 1);

    let by_hash = client
        .get_transaction_by_block_hash_and_index("0xabc", 0)
        .await
        .unwrap();
    assert_eq!(by_hash.tx_meta.unwrap().block_hash, b"0xabc".to_vec());
}

#[tokio::test]
async fn unknown_transaction_is_a_network_fault() {
    let (client, _broker, _signer) = single_node_client();
    let err = client.get_transaction("0x00").await.unwrap_err();
    assert_eq!(err.class(), ErrorClass::BrokenNetwork);
}

#[tokio::test]
async fn batch_submission() {
    let (client, broker, signer) = single_node_client();
    let first = client
        .prepare(transfer_from(&signer), TransactOpts::default().with_normal_nonce(1))
        .await
        .unwrap();
    let second = client
        .prepare(transfer_from(&signer), TransactOpts::default().with_normal_nonce(2))
        .await
        .unwrap();
    let expected = vec![first.hash(), second.hash()];

    let hashes = client.submit_batch(vec![first, second]).await.unwrap();

    assert_eq!(hashes, expected);
    assert_eq!(broker.count("send_transactions"), 1);
}

#[tokio::test]
async fn empty_batch_makes_no_call() {
    let (client, broker, _signer) = single_node_client();
    assert!(client.submit_batch(Vec::new()).await.unwrap().is_empty());
    assert_eq!(broker.total_calls(), 0);
}

#[tokio::test]
async fn view_calls_do_not_consume_a_nonce() {
    let (client, broker, signer) = single_node_client();
    let draft = DraftTransaction::invoke(
        signer.address(),
        address(9),
        pb::transaction_data::VmType::Xvm,
        b"balance_of".to_vec(),
    );
    let expected = draft.payload.clone();

    let receipt = client.send_view(draft).await.unwrap();

    assert!(receipt.is_success());
    assert_eq!(receipt.ret, expected);
    assert_eq!(broker.count("get_pending_nonce"), 0);
    assert_eq!(broker.count("send_view"), 1);
}

#[tokio::test]
async fn clients_can_share_a_pool() {
    let broker = MockBroker::new("node1:60011");
    let dialer = MockDialer::new([("node1:60011", Behaviour::Reachable(broker.clone()))]);
    let shared = pool(&["node1:60011"], dialer.clone());

    let alice = ChainClient::builder(fast_config(&["node1:60011"]))
        .pool(shared.clone())
        .signer(Arc::new(Ed25519Signer::generate()))
        .build()
        .unwrap();
    let bob = ChainClient::builder(fast_config(&["node1:60011"]))
        .pool(shared.clone())
        .signer(Arc::new(Ed25519Signer::generate()))
        .build()
        .unwrap();

    alice.get_chain_id().await.unwrap();
    bob.get_chain_id().await.unwrap();

    assert_eq!(dialer.total_dials(), 1);
    assert_eq!(
        broker.accounts(),
        vec![alice.address().to_string(), bob.address().to_string()]
    );
}

#[tokio::test]
async fn closed_pool_fails_queries() {
    let (client, _broker, _signer) = single_node_client();
    client.get_chain_id().await.unwrap();

    client.pool().close();

    assert!(matches!(client.get_chain_id().await, Err(RpcxError::PoolClosed)));
}

#[tokio::test]
async fn multi_signs_are_keyed_by_validator() {
    let (client, broker, _signer) = single_node_client();

    let signs = client
        .get_multi_signs("ibtp-1", pb::get_signs_request::Type::MultiIbtpRequest)
        .await
        .unwrap();

    assert_eq!(signs.len(), 2);
    assert_eq!(signs["0x01"], b"0x01/0/ibtp-1".to_vec());
    assert_eq!(signs["0x02"], b"0x02/0/ibtp-1".to_vec());
    assert_eq!(broker.count("get_multi_signs"), 1);
    assert_eq!(broker.count("get_tss_signs"), 0);
}

#[tokio::test]
async fn tss_signs_carry_the_extra_payload() {
    let (client, broker, _signer) = single_node_client();

    let signs = client
        .get_tss_signs(
            "ibtp-2",
            pb::get_signs_request::Type::TssIbtpResponse,
            b"parties:".to_vec(),
        )
        .await
        .unwrap();

    assert_eq!(signs["tss"], b"parties:ibtp-2".to_vec());
    assert_eq!(broker.count("get_tss_signs"), 1);
    assert_eq!(broker.count("get_multi_signs"), 0);
}

#[tokio::test]
async fn master_pier_election() {
    let (client, broker, _signer) = single_node_client();
    let pier = "0xpier";

    assert!(client.check_master_pier(pier).await.unwrap().is_empty());

    client.set_master_pier(pier, "instance-a", 10).await.unwrap();
    assert_eq!(client.check_master_pier(pier).await.unwrap(), b"instance-a".to_vec());

    let err = client.set_master_pier(pier, "instance-b", 10).await.unwrap_err();
    assert_eq!(err.class(), ErrorClass::BrokenNetwork);
    assert_eq!(client.check_master_pier(pier).await.unwrap(), b"instance-a".to_vec());

    assert_eq!(broker.count("check_master_pier"), 3);
    assert_eq!(broker.count("set_master_pier"), 2);
}

#[tokio::test]
async fn heart_beat_renews_only_the_master() {
    let (client, broker, _signer) = single_node_client();
    client.set_master_pier("0xpier", "instance-a", 10).await.unwrap();

    assert_eq!(client.heart_beat("0xpier", "instance-a").await.unwrap(), b"ok".to_vec());
    let err = client.heart_beat("0xpier", "instance-b").await.unwrap_err();
    assert_eq!(err.class(), ErrorClass::BrokenNetwork);
    assert_eq!(broker.count("heart_beat"), 2);
}

#[tokio::test]
async fn removing_a_validating_peer() {
    let (client, broker, _signer) = single_node_client();

    client.del_vp_node("QmA").await.unwrap();
    assert_eq!(broker.peers(), vec!["QmB".to_string()]);

    let err = client.del_vp_node("QmA").await.unwrap_err();
    assert_eq!(err.class(), ErrorClass::BrokenNetwork);
    assert_eq!(broker.count("del_vp_node"), 2);
}

#[tokio::test]
async fn node_errors_keep_the_endpoint() {
    let (client, broker, signer) = single_node_client();
    let hash = client
        .submit(transfer_from(&signer), TransactOpts::default())
        .await
        .unwrap();
    assert_eq!(client.pool().last_good(), Some(0));

    // A pending receipt is a healthy node answering NotFound.
    broker.miss_receipts(1);
    assert!(client.get_receipt(&hash).await.is_err());
    assert_eq!(client.pool().last_good(), Some(0));

    broker.fail_next_query(Status::internal("storage hiccup"));
    assert!(client.get_chain_meta().await.is_err());
    assert_eq!(client.pool().last_good(), Some(0));
}

#[tokio::test]
async fn transport_faults_fail_over() {
    let (client, broker, signer) = single_node_client();
    client.get_chain_id().await.unwrap();
    assert_eq!(client.pool().last_good(), Some(0));

    broker.fail_next_query(Status::unavailable("connection reset"));
    assert!(client.get_chain_id().await.is_err());
    assert_eq!(client.pool().last_good(), None);

    client.get_chain_id().await.unwrap();
    broker.fail_next_send(Status::deadline_exceeded("too slow"));
    let err = client
        .submit(transfer_from(&signer), TransactOpts::default().with_normal_nonce(1))
        .await
        .unwrap_err();
    assert_eq!(err.class(), ErrorClass::BrokenNetwork);
    assert_eq!(client.pool().last_good(), None);
}

#[tokio::test]
async fn local_deadline_fails_over() {
    let (client, broker, signer) = single_node_client();
    broker.delay_sends(Duration::from_secs(2));

    let err = client
        .submit(transfer_from(&signer), TransactOpts::default().with_normal_nonce(1))
        .await
        .unwrap_err();

    assert_eq!(err.class(), ErrorClass::BrokenNetwork);
    assert_eq!(client.pool().last_good(), None);
}

#[test]
fn builder_requires_a_signer() {
    let dialer = MockDialer::new([]);
    let err = ChainClient::builder(fast_config(&["node1:60011"]))
        .dialer(dialer)
        .build()
        .err()
        .unwrap();
    assert_eq!(err.class(), ErrorClass::Config);
}

#[test]
fn builder_loads_the_key_file() {
    let signer = Ed25519Signer::generate();
    let mut key_file = tempfile::NamedTempFile::new().unwrap();
    key_file.write_all(signer.to_hex().as_bytes()).unwrap();

    let mut config = fast_config(&["node1:60011"]);
    config.key_path = Some(key_file.path().display().to_string());
    let client = ChainClient::builder(config)
        .dialer(MockDialer::new([]))
        .build()
        .unwrap();

    assert_eq!(client.address(), signer.address());
}
