//! # Shadowscan I/O
//!
//! Raw-device access for the shadowscan diagnostic tool.
//!
//! This crate provides the concrete implementation of the `BlockSource`
//! trait defined in `shadowscan_core`: a read-only, unbuffered handle to a
//! physical disk, a volume shadow-copy device, or a disk image file.
//!
//! ## Key Components
//!
//! - **DiskReader**: read-only unbuffered block source, one handle per
//!   operation.
//!
//! ## Example
//!
//! ```ignore
//! use shadowscan_core::BlockSource;
//! use shadowscan_io::DiskReader;
//!
//! let mut reader = DiskReader::open("/dev/sda")?;
//! let mut buffer = vec![0u8; 512];
//! let bytes_read = reader.read_chunk(0, &mut buffer)?;
//! ```

mod reader;

pub use reader::DiskReader;
