//! Text helpers for the field-dump output.

use std::fmt::Write;

/// Indent every line of `s` by `amount` spaces.
pub(crate) fn indent(s: &str, amount: usize) -> String {
    let pad = " ".repeat(amount);
    let mut out = String::with_capacity(s.len() + pad.len() * 4);
    for (i, line) in s.lines().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&pad);
        out.push_str(line);
    }
    out
}

/// Render a byte list as an uppercase hex grid, 8 bytes per row.
pub(crate) fn hex_byte_grid(bytes: &[u8], indent_amount: usize) -> String {
    let pad = " ".repeat(indent_amount);
    let mut out = String::new();
    for (i, chunk) in bytes.chunks(8).enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&pad);
        for (j, byte) in chunk.iter().enumerate() {
            if j > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{byte:02X}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent() {
        assert_eq!(indent("a\nb", 4), "    a\n    b");
    }

    #[test]
    fn test_hex_byte_grid() {
        let bytes = [0u8, 1, 2, 3, 4, 5, 6, 7, 255, 16];
        assert_eq!(
            hex_byte_grid(&bytes, 2),
            "  00 01 02 03 04 05 06 07\n  FF 10"
        );
    }
}
