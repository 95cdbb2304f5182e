//! GELF UDP chunking.
//!
//! Payloads larger than the configured datagram size are split into
//! chunks, each prefixed with a 12 byte header:
//! magic `0x1e 0x0f`, an 8 byte message id, sequence number, sequence count.

use std::sync::atomic::{AtomicU64, Ordering};

use bytes::{BufMut, Bytes, BytesMut};

use crate::client::error::TransportError;

pub const CHUNK_MAGIC: [u8; 2] = [0x1e, 0x0f];
pub const CHUNK_HEADER_LEN: usize = 12;
pub const MAX_CHUNKS: usize = 128;

/// Default datagram payload size, fits a typical WAN path MTU.
pub const DEFAULT_CHUNK_SIZE: usize = 1420;
pub const MIN_CHUNK_SIZE: usize = 64;
pub const MAX_CHUNK_SIZE: usize = 8192;

/// Hands out chunk message ids: a random per-process start value, then
/// sequential, so ids never repeat within a run.
#[derive(Debug)]
pub struct MessageIds {
    seed: u64,
    counter: AtomicU64,
}

impl MessageIds {
    pub fn new() -> Self {
        Self {
            seed: rand::random::<u64>(),
            counter: AtomicU64::new(0),
        }
    }

    pub fn next_id(&self) -> [u8; 8] {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        self.seed.wrapping_add(n).to_be_bytes()
    }
}

impl Default for MessageIds {
    fn default() -> Self {
        Self::new()
    }
}

/// Split `payload` into datagrams of at most `chunk_size` bytes.
///
/// A payload that already fits is returned as the only datagram, unframed.
pub fn split(payload: Bytes, chunk_size: usize, message_id: [u8; 8]) -> Result<Vec<Bytes>, TransportError> {
    if payload.len() <= chunk_size {
        return Ok(vec![payload]);
    }

    let data_len = chunk_size.saturating_sub(CHUNK_HEADER_LEN).max(1);
    let count = payload.len().div_ceil(data_len);
    if count > MAX_CHUNKS {
        return Err(TransportError::MessageTooLarge {
            size: payload.len(),
            chunks: count,
            max: MAX_CHUNKS,
        });
    }

    let datagrams = payload
        .chunks(data_len)
        .enumerate()
        .map(|(seq, data)| {
            let mut datagram = BytesMut::with_capacity(CHUNK_HEADER_LEN + data.len());
            datagram.put_slice(&CHUNK_MAGIC);
            datagram.put_slice(&message_id);
            datagram.put_u8(seq as u8);
            datagram.put_u8(count as u8);
            datagram.put_slice(data);
            datagram.freeze()
        })
        .collect();

    Ok(datagrams)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: [u8; 8] = [1, 2, 3, 4, 5, 6, 7, 8];

    #[test]
    fn test_small_payload_is_not_chunked() {
        let payload = Bytes::from_static(b"{\"short_message\":\"x\"}");

        let datagrams = split(payload.clone(), 64, ID).unwrap();

        assert_eq!(datagrams, vec![payload]);
    }

    #[test]
    fn test_large_payload_is_chunked() {
        let payload = Bytes::from((0..250u32).map(|i| i as u8).collect::<Vec<u8>>());

        let datagrams = split(payload.clone(), 64, ID).unwrap();

        // 52 data bytes per chunk
        assert_eq!(datagrams.len(), 5);
        let mut reassembled = Vec::new();
        for (seq, datagram) in datagrams.iter().enumerate() {
            assert!(datagram.len() <= 64);
            assert_eq!(&datagram[..2], &CHUNK_MAGIC);
            assert_eq!(&datagram[2..10], &ID);
            assert_eq!(datagram[10] as usize, seq);
            assert_eq!(datagram[11], 5);
            reassembled.extend_from_slice(&datagram[CHUNK_HEADER_LEN..]);
        }
        assert_eq!(reassembled, payload.to_vec());
    }

    #[test]
    fn test_too_many_chunks() {
        let data_len = 64 - CHUNK_HEADER_LEN;
        let payload = Bytes::from(vec![b'x'; data_len * MAX_CHUNKS + 1]);

        let result = split(payload, 64, ID);

        assert!(matches!(
            result,
            Err(TransportError::MessageTooLarge { chunks: 129, max: MAX_CHUNKS, .. })
        ));
    }

    #[test]
    fn test_exactly_max_chunks_fits() {
        let data_len = 64 - CHUNK_HEADER_LEN;
        let payload = Bytes::from(vec![b'x'; data_len * MAX_CHUNKS]);

        assert_eq!(split(payload, 64, ID).unwrap().len(), MAX_CHUNKS);
    }

    #[test]
    fn test_message_ids_are_unique() {
        let ids = MessageIds::new();

        let first = ids.next_id();
        let second = ids.next_id();

        assert_ne!(first, second);
    }

    #[test]
    fn test_message_ids_start_randomly() {
        let a = MessageIds::new();
        let b = MessageIds::new();

        assert_ne!(a.next_id(), b.next_id());
    }
}
