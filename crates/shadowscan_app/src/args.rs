//! Flag-value parsing and alignment validation.

use shadowscan_core::SECTOR_SIZE;

/// Parses a byte count given as decimal or `0x`-prefixed hexadecimal.
pub fn parse_byte_count(value: &str) -> Result<u64, String> {
    let value = value.trim();
    let parsed = if let Some(hex) = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16)
    } else {
        value.parse::<u64>()
    };

    parsed.map_err(|_| format!("'{value}' is not a decimal or 0x-prefixed hex byte count"))
}

/// Parses a single fill byte, decimal or `0x`-prefixed hex, 0..=255.
pub fn parse_fill_byte(value: &str) -> Result<u8, String> {
    let parsed = parse_byte_count(value)?;
    u8::try_from(parsed).map_err(|_| format!("'{value}' does not fit in a single byte"))
}

/// Reports alignment violations on stderr without blocking execution; the
/// operation proceeds with the given value and the OS gets the final say.
pub fn warn_unless_sector_aligned(flag: &str, value: u64) {
    if value % SECTOR_SIZE as u64 != 0 {
        eprintln!("warning: '{flag}' ({value}) is not aligned to a {SECTOR_SIZE} bytes boundary");
    }
}

/// Same soft validation for the scan block size, which must additionally be
/// non-zero.
pub fn warn_unless_valid_block_size(value: u64) {
    if value == 0 || value % SECTOR_SIZE as u64 != 0 {
        eprintln!(
            "warning: 'block_size' ({value}) must be a non-zero multiple of {SECTOR_SIZE} bytes"
        );
    }
}
