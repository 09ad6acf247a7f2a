//! End to end scenarios of the bridge operation layer.

use alloy_primitives::hex;
use bridge_batch_processor::{BatchError, BatchProcessor, BlockCommit};
use bridge_codec::{decode, DecodingError, OperationKind, OperationRecord, PubdataMatcher};
use bridge_primitives::{BridgeConfig, PriorityQueueEvent};
use bridge_priority_queue::{Enqueued, PriorityQueue};
use tests::{full_exit, layout_block, origin, scenario_deposit};

#[test]
fn test_deposit_is_enqueued_and_committed() -> eyre::Result<()> {
    let config = BridgeConfig::new(101);
    let mut queue = PriorityQueue::new(&config);
    let processor = BatchProcessor::new(&config);

    // enqueue the deposit at block 100.
    let Enqueued { request, events } = queue.request_deposit(&scenario_deposit(), 100, origin())?;
    assert_eq!(request.serial_id, 0);
    assert_eq!(request.expiration_block, 201);
    assert!(matches!(
        events.as_slice(),
        [PriorityQueueEvent::NewPriorityRequest(event)]
            if event.serial_id == 0 && event.op_type == 0x01 && event.expiration_block == 201
    ));

    // commit a block holding the exact deposit encoding at offset 0.
    let pubdata = hex!(
        "01010203040102101112131415161718191a1b1c1d1e1f823b747710c5bc9b8a47243f2c3d1805f1aa00c5"
    );
    let outcome = processor.process(&mut queue, BlockCommit::new(150, &pubdata, &[0]))?;

    assert_eq!(outcome.consumed, 1);
    assert_eq!(outcome.total_committed_requests, 1);
    assert_eq!(queue.total_committed_requests(), 1);
    assert!(queue.peek_next().is_none());
    Ok(())
}

#[test]
fn test_expired_deposit_rejects_block() -> eyre::Result<()> {
    let config = BridgeConfig::new(101);
    let mut queue = PriorityQueue::new(&config);
    queue.request_deposit(&scenario_deposit(), 100, origin())?;

    let (pubdata, offsets) = layout_block(&[scenario_deposit().into()]);
    let err = BatchProcessor::new(&config)
        .process(&mut queue, BlockCommit::new(250, &pubdata, &offsets))
        .unwrap_err();

    assert_eq!(
        err,
        BatchError::RequestExpired { serial_id: 0, expiration_block: 201, current_block: 250 }
    );
    assert!(queue.head_expired(250));
    assert_eq!(queue.total_committed_requests(), 0);
    Ok(())
}

#[test]
fn test_short_deposit_is_out_of_range() {
    let err = decode(&hex!("01020304"), 0).unwrap_err();
    assert!(matches!(err, DecodingError::OutOfRange { offset: 0, required: 43, available: 4 }));
}

#[test]
fn test_full_exit_amount_is_authoritative_onchain() -> eyre::Result<()> {
    let config = BridgeConfig::default();
    let mut queue = PriorityQueue::new(&config);
    let Enqueued { request, .. } = queue.request_full_exit(&full_exit(0), 10, origin())?;

    let onchain = OperationRecord::from(full_exit(123_456_789));
    assert!(PubdataMatcher::default().matches(
        OperationKind::FullExit,
        &onchain.encode(),
        &request.pubdata
    ));

    let (pubdata, offsets) = layout_block(&[onchain]);
    let outcome = BatchProcessor::new(&config)
        .process(&mut queue, BlockCommit::new(20, &pubdata, &offsets))?;

    assert_eq!(outcome.consumed, 1);
    assert_eq!(outcome.withdrawals.len(), 1);
    assert_eq!(outcome.withdrawals[0].amount, 123_456_789);
    Ok(())
}

#[test]
fn test_deposit_tolerates_trailing_padding() {
    let request = scenario_deposit().priority_pubdata();
    let mut onchain = request.to_vec();
    onchain.extend_from_slice(&[0, 0, 0]);

    let matcher = PubdataMatcher::default();
    assert!(matcher.matches(OperationKind::Deposit, &onchain, &request));

    onchain[45] = 0x01;
    assert!(!matcher.matches(OperationKind::Deposit, &onchain, &request));
}

#[test]
fn test_block_with_late_mismatch_is_atomic() -> eyre::Result<()> {
    let config = BridgeConfig::new(16);
    let mut queue = PriorityQueue::new(&config);
    queue.request_deposit(&scenario_deposit(), 1, origin())?;
    queue.request_full_exit(&full_exit(0), 1, origin())?;
    queue.request_deposit(&scenario_deposit(), 1, origin())?;

    let mut tampered = scenario_deposit();
    tampered.amount += 1;
    let (pubdata, offsets) =
        layout_block(&[scenario_deposit().into(), full_exit(7).into(), tampered.into()]);

    let err = BatchProcessor::new(&config)
        .process(&mut queue, BlockCommit::new(2, &pubdata, &offsets))
        .unwrap_err();

    assert!(matches!(err, BatchError::PubdataMismatch { serial_id: 2, .. }));
    assert_eq!(queue.total_committed_requests(), 0);
    assert_eq!(queue.pending_count(), 3);
    Ok(())
}
