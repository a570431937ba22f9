//! One-shot range reads for manual inspection.

use crate::aligned::AlignedBuffer;
use crate::error::Result;
use crate::traits::BlockSource;

/// Reads `length` bytes from `source` at the absolute byte `offset`, issuing
/// exactly one read.
///
/// When `prefill` is given, every byte of the destination is initialized to
/// it before the read; bytes the device does not overwrite keep the fill
/// value, which lets a caller compare pre/post state visually in the dump,
/// the same technique the gap scanner applies at block granularity.
///
/// The result is truncated to the bytes actually returned, so a final
/// partial extent near end-of-device comes back shorter than requested
/// rather than padded.
pub fn read_range<S: BlockSource>(
    source: &mut S,
    offset: u64,
    length: usize,
    prefill: Option<u8>,
) -> Result<Vec<u8>> {
    if length == 0 {
        return Ok(Vec::new());
    }

    let mut buffer = AlignedBuffer::new_default(length);
    if let Some(fill) = prefill {
        buffer.as_mut_slice().fill(fill);
    }

    let n = source.read_chunk(offset, &mut buffer)?;
    Ok(buffer[..n].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MemoryDevice {
        data: Vec<u8>,
    }

    impl BlockSource for MemoryDevice {
        fn read_chunk(&mut self, offset: u64, buffer: &mut [u8]) -> Result<usize> {
            let offset = offset as usize;
            if offset >= self.data.len() {
                return Ok(0);
            }
            let n = buffer.len().min(self.data.len() - offset);
            buffer[..n].copy_from_slice(&self.data[offset..offset + n]);
            Ok(n)
        }

        fn size(&self) -> u64 {
            self.data.len() as u64
        }
    }

    /// Reports full reads without writing anything into the buffer.
    struct HollowDevice {
        size: u64,
    }

    impl BlockSource for HollowDevice {
        fn read_chunk(&mut self, offset: u64, buffer: &mut [u8]) -> Result<usize> {
            let remaining = self.size.saturating_sub(offset) as usize;
            Ok(buffer.len().min(remaining))
        }

        fn size(&self) -> u64 {
            self.size
        }
    }

    #[test]
    fn result_is_truncated_to_bytes_returned() {
        let mut device = MemoryDevice {
            data: vec![0x11; 256],
        };
        let data = read_range(&mut device, 0, 512, Some(0x41)).unwrap();
        assert_eq!(data.len(), 256);
        assert!(data.iter().all(|&b| b == 0x11));
    }

    #[test]
    fn prefill_survives_where_the_device_writes_nothing() {
        let mut device = HollowDevice { size: 4096 };
        let data = read_range(&mut device, 0, 512, Some(0x41)).unwrap();
        assert_eq!(data.len(), 512);
        assert!(data.iter().all(|&b| b == 0x41));
    }

    #[test]
    fn without_prefill_the_buffer_starts_zeroed() {
        let mut device = HollowDevice { size: 4096 };
        let data = read_range(&mut device, 0, 512, None).unwrap();
        assert!(data.iter().all(|&b| b == 0));
    }

    #[test]
    fn reads_honor_the_offset() {
        let mut data = vec![0u8; 1024];
        for (i, byte) in data.iter_mut().enumerate() {
            *byte = (i / 512) as u8;
        }
        let mut device = MemoryDevice { data };

        let second_sector = read_range(&mut device, 512, 512, None).unwrap();
        assert!(second_sector.iter().all(|&b| b == 1));
    }

    #[test]
    fn zero_length_reads_nothing() {
        let mut device = MemoryDevice {
            data: vec![0xAA; 512],
        };
        let data = read_range(&mut device, 0, 0, Some(0x41)).unwrap();
        assert!(data.is_empty());
    }
}
