//! # Shadowscan Core
//!
//! Domain logic for the shadowscan diagnostic tool: byte-level inspection of
//! raw block storage, in particular volume shadow-copy devices.
//!
//! ## Key Components
//!
//! - **GapScanner**: sequential full-device scan that flags extents which
//!   appear to not have been materialized (copy-on-write "holes").
//! - **read_range**: one-shot read of an aligned byte range, with an optional
//!   prefill byte for visual pre/post comparison.
//! - **hex_dump**: renders a buffer as a 16-bytes-per-line hex/ASCII dump.
//! - **BlockSource**: the trait behind which the raw-device adapters live.
//!
//! Everything here is single-threaded and fully synchronous; each device
//! interaction is one blocking call and each operation uses exactly one
//! device handle.

mod aligned;
mod error;
pub mod hexdump;
pub mod inspect;
pub mod scanner;
mod traits;

pub use aligned::{AlignedBuffer, DEFAULT_ALIGNMENT};
pub use error::{CoreError, Result};
pub use hexdump::hex_dump;
pub use inspect::read_range;
pub use scanner::{poison, GapScanner, ScanSummary, SECTOR_SIZE};
pub use traits::BlockSource;
