//! Temperature registers (0x11, 0x12)

use crate::registers::{RegFlag, TEMP_BLOCK_LEN};
use crate::ByteCountError;

/// Temperature sample as held by the device: whole degrees in two's
/// complement plus a count of quarter degrees.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Temperature {
    msb: u8,
    lsb: u8,
}

impl Temperature {
    /// Signed whole degrees (the MSB, sign-extended)
    pub fn integer_part(&self) -> i8 {
        self.msb as i8
    }

    /// Quarter-degree count from the top two bits of the LSB, `0..=3`
    pub fn quarters(&self) -> u8 {
        (self.lsb & RegFlag::TEMP_FRACTION.bits()) >> 6
    }

    /// Temperature in units of 0.25 °C
    pub fn quarter_degrees(&self) -> i16 {
        self.integer_part() as i16 * 4 + self.quarters() as i16
    }

    /// Temperature in °C with full quarter-degree resolution
    pub fn celsius(&self) -> f32 {
        self.integer_part() as f32 + 0.25 * self.quarters() as f32
    }

    /// Temperature in °C truncated toward zero to a whole degree.
    pub fn degrees(&self) -> i8 {
        (self.quarter_degrees() / 4) as i8
    }
}

impl From<[u8; TEMP_BLOCK_LEN]> for Temperature {
    fn from(regs: [u8; TEMP_BLOCK_LEN]) -> Self {
        Temperature {
            msb: regs[0],
            lsb: regs[1],
        }
    }
}

impl TryFrom<&[u8]> for Temperature {
    type Error = ByteCountError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        match *bytes {
            [msb, lsb] => Ok(Temperature { msb, lsb }),
            _ => Err(ByteCountError {
                expected: TEMP_BLOCK_LEN,
                actual: bytes.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_is_truncated() {
        let t = Temperature::from([0x23, 0x80]);
        assert_eq!(t.integer_part(), 35);
        assert_eq!(t.quarters(), 2);
        assert_eq!(t.degrees(), 35);
        assert_eq!(t.celsius(), 35.5);
        assert_eq!(t.quarter_degrees(), 142);
    }

    #[test]
    fn negative_msb_is_sign_extended() {
        let t = Temperature::from([0xE7, 0x00]);
        assert_eq!(t.integer_part(), -25);
        assert_eq!(t.degrees(), -25);
        assert_eq!(t.celsius(), -25.0);
    }

    #[test]
    fn negative_with_fraction_truncates_toward_zero() {
        // -25 + 0.5 = -24.5
        let t = Temperature::from([0xE7, 0x80]);
        assert_eq!(t.degrees(), -24);
        assert_eq!(t.quarter_degrees(), -98);
        assert_eq!(t.celsius(), -24.5);
    }

    #[test]
    fn reserved_lsb_bits_are_ignored() {
        let t = Temperature::from([0x19, 0xFF]);
        assert_eq!(t.quarters(), 3);
        assert_eq!(t.celsius(), 25.75);
        assert_eq!(t.degrees(), 25);
    }

    #[test]
    fn extremes_stay_in_range() {
        assert_eq!(Temperature::from([0x7F, 0xC0]).degrees(), 127);
        assert_eq!(Temperature::from([0x80, 0x00]).degrees(), -128);
        assert_eq!(Temperature::from([0x80, 0xC0]).degrees(), -127);
    }

    #[test]
    fn slice_of_wrong_length_is_rejected() {
        let one: &[u8] = &[0x19];
        assert_eq!(
            Temperature::try_from(one),
            Err(ByteCountError {
                expected: 2,
                actual: 1
            })
        );
        let two: &[u8] = &[0x19, 0x40];
        assert_eq!(Temperature::try_from(two).map(|t| t.quarters()), Ok(1));
    }
}
