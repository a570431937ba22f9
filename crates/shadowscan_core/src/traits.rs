//! The trait behind which raw-device access adapters live.

use crate::error::Result;

/// A source of raw block data, typically a disk, a shadow-copy device, or an
/// image file.
///
/// This trait abstracts away the underlying storage medium, allowing the same
/// scanning and dumping logic to run against physical devices or in-memory
/// fakes in tests.
///
/// Implementations are expected to open the medium read-only and without
/// OS-level buffering; offsets and buffer lengths should be multiples of the
/// device's sector size.
///
/// # Example
///
/// ```ignore
/// struct ShadowDevice { /* ... */ }
///
/// impl BlockSource for ShadowDevice {
///     fn read_chunk(&mut self, offset: u64, buffer: &mut [u8]) -> Result<usize> {
///         // Seek to `offset`, then issue exactly one read into `buffer`.
///     }
///
///     fn size(&self) -> u64 {
///         // Total size in bytes, or 0 when the medium does not report one.
///     }
/// }
/// ```
pub trait BlockSource {
    /// Reads into `buffer` starting at the absolute byte `offset`.
    ///
    /// Returns the number of bytes actually read. A result smaller than
    /// `buffer.len()` means end-of-device or a short read from the underlying
    /// medium and is not an error; only open/seek/read failures are.
    fn read_chunk(&mut self, offset: u64, buffer: &mut [u8]) -> Result<usize>;

    /// Returns the total size of the source in bytes, when the medium
    /// reports one. Raw devices that cannot be sized report 0; consumers must
    /// rely on short reads, not on this value, for termination.
    fn size(&self) -> u64;
}
