//! Hex/ASCII rendering of device bytes.

use std::io::{self, Write};

const BYTES_PER_LINE: usize = 16;

/// Writes `buffer` to `out` as a hex dump, 16 bytes per line.
///
/// Each line carries the absolute device offset of its first byte (`base`
/// plus the position within the buffer) in hexadecimal, the bytes as
/// two-digit hex separated by spaces, and a printable-ASCII column with
/// non-printable bytes rendered as `.`.
///
/// The final line renders exactly the remaining bytes when the buffer length
/// is not a multiple of 16. An empty buffer produces no output at all.
pub fn hex_dump<W: Write>(out: &mut W, base: u64, buffer: &[u8]) -> io::Result<()> {
    for (index, line) in buffer.chunks(BYTES_PER_LINE).enumerate() {
        let line_offset = base + (index * BYTES_PER_LINE) as u64;
        write!(out, "0x{line_offset:x}  ")?;

        for byte in line {
            write!(out, "{byte:02X} ")?;
        }

        write!(out, " ")?;
        for &byte in line {
            if (0x20..0x7F).contains(&byte) {
                write!(out, "{}", byte as char)?;
            } else {
                write!(out, ".")?;
            }
        }

        writeln!(out)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dump_to_string(base: u64, buffer: &[u8]) -> String {
        let mut out = Vec::new();
        hex_dump(&mut out, base, buffer).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn empty_buffer_produces_no_output() {
        assert_eq!(dump_to_string(0, &[]), "");
    }

    #[test]
    fn seventeen_bytes_produce_exactly_two_lines() {
        let buffer = [0xABu8; 17];
        let output = dump_to_string(0x200, &buffer);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("0x200  "));
        assert!(lines[1].starts_with("0x210  "));
        assert_eq!(lines[0].matches("AB").count(), 16);
        assert_eq!(lines[1].matches("AB").count(), 1);
    }

    #[test]
    fn full_line_renders_sixteen_bytes() {
        let buffer: Vec<u8> = (0x41..0x51).collect();
        let output = dump_to_string(0, &buffer);

        assert_eq!(
            output,
            "0x0  41 42 43 44 45 46 47 48 49 4A 4B 4C 4D 4E 4F 50  ABCDEFGHIJKLMNOP\n"
        );
    }

    #[test]
    fn printable_bytes_reproduce_in_the_ascii_column() {
        let buffer = b"Hello, World! 16";
        let output = dump_to_string(0, buffer);
        assert!(output.trim_end().ends_with("Hello, World! 16"));
    }

    #[test]
    fn non_printable_bytes_render_as_dots() {
        let buffer = [0x00u8, 0x1F, 0x7F, 0xFF];
        let output = dump_to_string(0, &buffer);
        assert!(output.trim_end().ends_with("...."));
    }

    #[test]
    fn prefill_pattern_round_trips_through_the_ascii_column() {
        let buffer = [0x41u8; 32];
        let output = dump_to_string(0, &buffer);

        for line in output.lines() {
            assert!(line.ends_with(&"A".repeat(16)));
        }
    }

    #[test]
    fn offsets_are_hexadecimal() {
        let buffer = [0u8; 32];
        let output = dump_to_string(0x1000, &buffer);
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[0].starts_with("0x1000  "));
        assert!(lines[1].starts_with("0x1010  "));
    }
}
