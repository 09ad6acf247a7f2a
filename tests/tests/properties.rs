//! Randomised properties of the codec, the queue and the batch processor.

use arbitrary::{Arbitrary, Unstructured};
use bridge_batch_processor::{BatchError, BatchProcessor, BlockCommit};
use bridge_codec::{decode, DecodingError, OperationRecord};
use bridge_primitives::BridgeConfig;
use bridge_priority_queue::PriorityQueue;
use tests::{arbitrary_deposit, layout_block, origin, random_bytes};

#[test]
fn test_random_records_roundtrip() -> eyre::Result<()> {
    let bytes = random_bytes(8192);
    let mut u = Unstructured::new(&bytes);

    for _ in 0..64 {
        let record = OperationRecord::arbitrary(&mut u)?;
        let encoded = record.encode();
        assert_eq!(encoded.len(), record.kind().required_length());

        let (decoded, next) = decode(&encoded, 0)?;
        assert_eq!(decoded, record);
        assert_eq!(next, encoded.len());

        // any truncation is out of range.
        let truncated = u.int_in_range(0..=encoded.len() - 1)?;
        assert!(matches!(
            decode(&encoded[..truncated], 0),
            Err(DecodingError::OutOfRange { available, .. }) if available == truncated
        ));
    }
    Ok(())
}

#[test]
fn test_random_block_decodes_at_declared_offsets() -> eyre::Result<()> {
    let bytes = random_bytes(8192);
    let mut u = Unstructured::new(&bytes);

    let records = (0..32).map(|_| OperationRecord::arbitrary(&mut u)).collect::<Result<Vec<_>, _>>()?;
    let (pubdata, offsets) = layout_block(&records);

    for (record, offset) in records.iter().zip(offsets) {
        let (decoded, next) = decode(&pubdata, offset)?;
        assert_eq!(&decoded, record);
        assert_eq!(next - offset, record.kind().required_length());
    }
    Ok(())
}

#[test]
fn test_requests_are_consumed_in_fifo_order() -> eyre::Result<()> {
    let bytes = random_bytes(2048);
    let mut u = Unstructured::new(&bytes);

    let config = BridgeConfig::new(1_000);
    let processor = BatchProcessor::new(&config);
    let mut queue = PriorityQueue::new(&config);
    let deposits = (0..8).map(|_| arbitrary_deposit(&mut u)).collect::<Result<Vec<_>, _>>()?;
    for (serial_id, deposit) in (0u64..).zip(&deposits) {
        let enqueued = queue.request_deposit(deposit, 1, origin())?;
        assert_eq!(enqueued.request.serial_id, serial_id);
    }

    // a later request cannot be matched before the head.
    let later = u.int_in_range(1..=deposits.len() - 1)?;
    let (pubdata, offsets) = layout_block(&[deposits[later].clone().into()]);
    let err = processor.process(&mut queue, BlockCommit::new(2, &pubdata, &offsets)).unwrap_err();
    assert!(matches!(err, BatchError::PubdataMismatch { serial_id: 0, .. }));

    // consuming in order succeeds, one block at a time.
    for (serial_id, deposit) in (0u64..).zip(&deposits) {
        let (pubdata, offsets) = layout_block(&[deposit.clone().into()]);
        let outcome = processor.process(&mut queue, BlockCommit::new(3, &pubdata, &offsets))?;
        assert_eq!(outcome.operations[0].serial_id, Some(serial_id));
        assert_eq!(outcome.total_committed_requests, serial_id + 1);
    }
    assert!(queue.is_empty());
    Ok(())
}

#[test]
fn test_expired_head_blocks_later_requests() -> eyre::Result<()> {
    let bytes = random_bytes(512);
    let mut u = Unstructured::new(&bytes);

    let config = BridgeConfig::new(16);
    let mut queue = PriorityQueue::new(&config);
    let head = arbitrary_deposit(&mut u)?;
    let tail = arbitrary_deposit(&mut u)?;
    queue.request_deposit(&head, 10, origin())?;
    queue.request_deposit(&tail, 20, origin())?;

    // block 27 is past the head expiration (26) but not the tail expiration (36).
    let (pubdata, offsets) = layout_block(&[head.into(), tail.into()]);
    let err = BatchProcessor::new(&config)
        .process(&mut queue, BlockCommit::new(27, &pubdata, &offsets))
        .unwrap_err();

    assert_eq!(
        err,
        BatchError::RequestExpired { serial_id: 0, expiration_block: 26, current_block: 27 }
    );
    assert!(queue.head_expired(27));
    assert_eq!(queue.pending_count(), 2);
    Ok(())
}

#[test]
fn test_random_mismatch_position_leaves_queue_untouched() -> eyre::Result<()> {
    let bytes = random_bytes(2048);
    let mut u = Unstructured::new(&bytes);

    let config = BridgeConfig::new(100);
    let mut queue = PriorityQueue::new(&config);
    let deposits = (0..6).map(|_| arbitrary_deposit(&mut u)).collect::<Result<Vec<_>, _>>()?;
    for deposit in &deposits {
        queue.request_deposit(deposit, 0, origin())?;
    }

    let position = u.int_in_range(0..=deposits.len() - 1)?;
    let mut records: Vec<OperationRecord> =
        deposits.iter().cloned().map(OperationRecord::from).collect();
    if let OperationRecord::Deposit(deposit) = &mut records[position] {
        deposit.token_id = deposit.token_id.wrapping_add(1);
    }
    let (pubdata, offsets) = layout_block(&records);

    let err = BatchProcessor::new(&config)
        .process(&mut queue, BlockCommit::new(1, &pubdata, &offsets))
        .unwrap_err();

    assert!(
        matches!(err, BatchError::PubdataMismatch { serial_id, .. } if serial_id == position as u64)
    );
    assert_eq!(queue.total_committed_requests(), 0);
    assert_eq!(queue.pending_count(), deposits.len() as u64);
    Ok(())
}
