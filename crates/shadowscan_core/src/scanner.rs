//! Sequential copy-on-write gap scanner.
//!
//! Walks a device from offset 0 to end-of-device in fixed-size blocks and
//! flags blocks whose content is unchanged after a read. There is no OS API
//! consulted to ask "is this extent allocated"; the detection is purely
//! behavioral: the scanner poisons its buffer with a recognizable pattern
//! before every read, and a block that still carries the pattern afterwards
//! most likely never had real data copied into the snapshot.

use crate::aligned::AlignedBuffer;
use crate::error::Result;
use crate::traits::BlockSource;

/// Minimum addressable unit of the devices this tool targets. Block sizes,
/// offsets, and lengths are expected to be multiples of this.
pub const SECTOR_SIZE: usize = 512;

/// Overwrites the first four ramp bytes so that a device which legitimately
/// contains an incrementing byte pattern does not read back as a gap.
const SENTINEL: u32 = 0x0C0FFEE;

/// Fills `buffer` with the scanner's poison pattern: a sequentially
/// increasing byte ramp (0x00, 0x01, ... wrapping modulo 256) with the fixed
/// sentinel overwriting the first four bytes.
pub fn poison(buffer: &mut [u8]) {
    for (i, byte) in buffer.iter_mut().enumerate() {
        *byte = i as u8;
    }
    if buffer.len() >= 4 {
        buffer[..4].copy_from_slice(&SENTINEL.to_le_bytes());
    }
}

/// Totals accumulated over one completed scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Sum of the byte counts of every read issued. On a well-behaved medium
    /// this equals the device size.
    pub bytes_scanned: u64,
    /// Number of blocks read and evaluated, the final partial one included.
    pub blocks_read: u64,
    /// Number of blocks flagged as suspected unmaterialized COW extents.
    pub suspect_blocks: u64,
}

/// Sequential whole-device scanner for suspected copy-on-write gaps.
///
/// The detection is a heuristic, not an allocation-map query: a real block
/// whose content happens to equal the ramp-plus-sentinel pattern is reported
/// as a false positive. Over a whole block that coincidence is astronomically
/// unlikely, but callers should treat findings as "probably missing", never
/// as certainty.
pub struct GapScanner {
    block_size: usize,
}

impl GapScanner {
    #[must_use]
    pub fn new(block_size: usize) -> Self {
        Self { block_size }
    }

    #[inline]
    #[must_use]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Scans `source` from offset 0 to end-of-device, invoking `on_gap` with
    /// the cumulative byte offset of every block flagged as a suspected gap.
    ///
    /// Each iteration poisons the block buffer, saves a reference copy,
    /// issues exactly one read at the cumulative offset, and compares the
    /// result byte-for-byte against the reference. A read returning fewer
    /// bytes than the block size marks the final iteration; that partial
    /// block is still evaluated. A read returning 0 bytes ends the scan with
    /// nothing left to evaluate. Any read failure aborts immediately; no
    /// partial summary is returned.
    pub fn scan<S, F>(&self, source: &mut S, mut on_gap: F) -> Result<ScanSummary>
    where
        S: BlockSource,
        F: FnMut(u64),
    {
        let mut summary = ScanSummary::default();
        if self.block_size == 0 {
            return Ok(summary);
        }

        let mut buffer = AlignedBuffer::new_default(self.block_size);
        let mut reference = vec![0u8; self.block_size];
        let mut offset = 0u64;
        let mut last = false;

        while !last {
            poison(&mut buffer);
            reference.copy_from_slice(&buffer);

            let n = source.read_chunk(offset, &mut buffer)?;
            if n == 0 {
                break;
            }
            if n < self.block_size {
                last = true;
            }

            if buffer[..] == reference[..] {
                on_gap(offset);
                summary.suspect_blocks += 1;
            }

            summary.blocks_read += 1;
            summary.bytes_scanned += n as u64;
            offset += n as u64;
        }

        Ok(summary)
    }
}
