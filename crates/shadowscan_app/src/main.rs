//! Shadowscan: byte-level inspection of raw block storage.
//!
//! Two operations, never combined: a sequential whole-device scan for
//! suspected unmaterialized copy-on-write blocks, and a hex dump of one
//! aligned byte range. Findings and dumps go to stdout; diagnostics,
//! warnings, and progress go to stderr.

mod args;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use humansize::{format_size, BINARY};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::{Path, PathBuf};

use args::{
    parse_byte_count, parse_fill_byte, warn_unless_sector_aligned, warn_unless_valid_block_size,
};
use shadowscan_core::{hex_dump, read_range, BlockSource, GapScanner, Result as CoreResult};
use shadowscan_io::DiskReader;

#[derive(Parser)]
#[command(name = "shadowscan")]
#[command(version, about = "Byte-level diagnostics for disks and shadow-copy devices")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan a whole device for suspected unmaterialized copy-on-write blocks
    Scan {
        /// Device path, e.g. \\?\GLOBALROOT\Device\HarddiskVolumeShadowCopy6
        #[arg(long)]
        disk: PathBuf,

        /// Scan block size in bytes, decimal or 0x-hex; multiple of 512
        #[arg(long, value_parser = parse_byte_count)]
        block_size: u64,
    },
    /// Read one aligned byte range and print it as a hex dump
    Dump {
        /// Device path, e.g. \\?\GLOBALROOT\Device\HarddiskVolumeShadowCopy16
        #[arg(long)]
        disk: PathBuf,

        /// Absolute byte offset, decimal or 0x-hex; multiple of 512
        #[arg(long, value_parser = parse_byte_count)]
        offset: u64,

        /// Byte count, decimal or 0x-hex; multiple of 512
        #[arg(long, value_parser = parse_byte_count)]
        length: u64,

        /// Byte value the destination buffer is pre-filled with
        #[arg(long, value_parser = parse_fill_byte)]
        prefill: Option<u8>,
    },
}

fn main() -> Result<()> {
    // Missing or malformed flags exit 1, matching the I/O failure paths;
    // --help and --version keep clap's normal behavior.
    let cli = Cli::try_parse().unwrap_or_else(|err| {
        if err.use_stderr() {
            let _ = err.print();
            std::process::exit(1);
        }
        err.exit();
    });

    match cli.command {
        Command::Scan { disk, block_size } => run_scan(&disk, block_size),
        Command::Dump {
            disk,
            offset,
            length,
            prefill,
        } => run_dump(&disk, offset, length, prefill),
    }
}

/// Counts bytes delivered by the inner source so the progress bar tracks the
/// scan without the scanner knowing about terminals.
struct ProgressSource<'a, S> {
    inner: S,
    bar: &'a ProgressBar,
}

impl<S: BlockSource> BlockSource for ProgressSource<'_, S> {
    fn read_chunk(&mut self, offset: u64, buffer: &mut [u8]) -> CoreResult<usize> {
        let n = self.inner.read_chunk(offset, buffer)?;
        self.bar.inc(n as u64);
        Ok(n)
    }

    fn size(&self) -> u64 {
        self.inner.size()
    }
}

fn run_scan(disk: &Path, block_size: u64) -> Result<()> {
    warn_unless_valid_block_size(block_size);

    let reader = DiskReader::open(disk)
        .with_context(|| format!("cannot open device {}", disk.display()))?;

    let device_size = reader.size();
    if device_size > 0 {
        eprintln!("Device size: {}", format_size(device_size, BINARY));
    }

    let bar = if device_size > 0 {
        let bar = ProgressBar::new(device_size);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                .expect("invalid progress bar template - this is a bug")
                .progress_chars("##-"),
        );
        bar
    } else {
        ProgressBar::new_spinner()
    };

    let mut source = ProgressSource {
        inner: reader,
        bar: &bar,
    };

    let scanner = GapScanner::new(block_size as usize);
    let summary = scanner.scan(&mut source, |offset| {
        bar.suspend(|| println!("Cow block probably missing: 0x{offset:x}"));
    })?;

    bar.finish_and_clear();
    eprintln!(
        "Scanned {} in {} block(s); {} suspected missing",
        format_size(summary.bytes_scanned, BINARY),
        summary.blocks_read,
        summary.suspect_blocks
    );

    Ok(())
}

fn run_dump(disk: &Path, offset: u64, length: u64, prefill: Option<u8>) -> Result<()> {
    warn_unless_sector_aligned("offset", offset);
    warn_unless_sector_aligned("length", length);

    let mut reader = DiskReader::open(disk)
        .with_context(|| format!("cannot open device {}", disk.display()))?;

    let data = read_range(&mut reader, offset, length as usize, prefill)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    hex_dump(&mut out, offset, &data)?;
    out.flush()?;

    Ok(())
}
