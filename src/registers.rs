//! DS3231 register map

/// Default 7-bit I2C address of the DS3231
pub const DEFAULT_ADDRESS: u8 = 0x68;

/// Number of contiguous time/date registers starting at `SECONDS`
pub const TIME_BLOCK_LEN: usize = 7;

/// Number of contiguous temperature registers starting at `TEMP_MSB`
pub const TEMP_BLOCK_LEN: usize = 2;

/// Register addresses used by the driver
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    SECONDS,
    MINUTES,
    HOURS,
    DAY,
    DATE,
    MONTH,
    YEAR,
    TEMP_MSB,
    TEMP_LSB,
}

impl Register {
    pub fn addr(self) -> u8 {
        match self {
            Self::SECONDS => 0x00,
            Self::MINUTES => 0x01,
            Self::HOURS => 0x02,
            Self::DAY => 0x03,
            Self::DATE => 0x04,
            Self::MONTH => 0x05,
            Self::YEAR => 0x06,
            Self::TEMP_MSB => 0x11,
            Self::TEMP_LSB => 0x12,
        }
    }
}

/// Bit flags and masks inside the time/temperature registers
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RegFlag {
    /// Seconds register, bit 7
    CLOCK_HALT,
    /// Seconds register without the halt bit
    SECONDS_MASK,
    /// Hours register, bit 6: set for 12-hour mode
    HOUR_12_BIT,
    /// Hours register, bit 5: PM in 12-hour mode, 20-hour digit in 24-hour mode
    HOUR_PM_BIT,
    /// Hours register without the mode bits (24-hour reading)
    HOURS_MASK,
    /// Hours register in 12-hour mode without the mode and PM bits
    HOURS_12_MASK,
    /// Temperature LSB, the two quarter-degree bits
    TEMP_FRACTION,
}

impl RegFlag {
    pub fn bits(self) -> u8 {
        match self {
            Self::CLOCK_HALT => 0x80,
            Self::SECONDS_MASK => 0x7F,
            Self::HOUR_12_BIT => 0x40,
            Self::HOUR_PM_BIT => 0x20,
            Self::HOURS_MASK => 0x3F,
            Self::HOURS_12_MASK => 0x1F,
            Self::TEMP_FRACTION => 0xC0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_block_is_contiguous() {
        let regs = [
            Register::SECONDS,
            Register::MINUTES,
            Register::HOURS,
            Register::DAY,
            Register::DATE,
            Register::MONTH,
            Register::YEAR,
        ];
        assert_eq!(regs.len(), TIME_BLOCK_LEN);
        for (i, reg) in regs.iter().enumerate() {
            assert_eq!(reg.addr() as usize, i);
        }
    }

    #[test]
    fn temperature_block_follows_msb() {
        assert_eq!(Register::TEMP_MSB.addr(), 0x11);
        assert_eq!(Register::TEMP_LSB.addr(), Register::TEMP_MSB.addr() + 1);
    }
}
