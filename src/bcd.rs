//! Packed binary-coded-decimal conversions.
//!
//! Both functions are total: they never panic, whatever the input. Values
//! outside `0..=99` (or BCD bytes with a nibble above 9) give a defined but
//! meaningless result, the same bytes the hardware would hold.

/// Swap format from decimal to bcd. `decimal` must be in `0..=99`.
pub fn decimal_to_bcd(decimal: u8) -> u8 {
    ((decimal / 10) << 4) + (decimal % 10)
}

/// Swap format from bcd to decimal. Nibbles are not checked.
pub fn bcd_to_decimal(bcd: u8) -> u8 {
    ((bcd & 0xF0) >> 4) * 10 + (bcd & 0x0F)
}
