//! Time/date block: raw registers, decoded record and hour format.

use crate::bcd::{bcd_to_decimal, decimal_to_bcd};
use crate::registers::{RegFlag, TIME_BLOCK_LEN};
use crate::ByteCountError;

///Hour format: 12-hour (AM/PM) or 24-hour
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    Hour24,
    Hour12,
}

///Hour information: 12-hour (AM/PM) or 24-hour
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Hours {
    Hour24(u8),
    Hour12am(u8),
    Hour12pm(u8),
}

impl Hours {
    /// Format the device was running in when the register was read
    pub fn mode(&self) -> Mode {
        match *self {
            Hours::Hour24(_) => Mode::Hour24,
            _ => Mode::Hour12,
        }
    }

    /// Get the hour.
    /// return.1: None => Hour24 mode; Some(true) => pm; Some(false) => am;
    pub fn hour(&self) -> (u8, Option<bool>) {
        match *self {
            Hours::Hour24(h) => (h, None),
            Hours::Hour12am(h) => (h, Some(false)),
            Hours::Hour12pm(h) => (h, Some(true)),
        }
    }

    /// Hour of the day in `0..=23`, whatever the register format.
    pub fn to_24h(&self) -> u8 {
        match *self {
            Hours::Hour24(h) => h,
            Hours::Hour12am(12) => 0,
            Hours::Hour12am(h) => h,
            Hours::Hour12pm(12) => 12,
            Hours::Hour12pm(h) => h + 12,
        }
    }
}

impl From<u8> for Hours {
    fn from(byte: u8) -> Self {
        if (byte & RegFlag::HOUR_12_BIT.bits()) != 0 {
            //In case 12-hour format
            let hour = bcd_to_decimal(byte & RegFlag::HOURS_12_MASK.bits());
            if (byte & RegFlag::HOUR_PM_BIT.bits()) != 0 {
                Hours::Hour12pm(hour)
            } else {
                Hours::Hour12am(hour)
            }
        } else {
            Hours::Hour24(bcd_to_decimal(byte & RegFlag::HOURS_MASK.bits()))
        }
    }
}

/// Decoded time/date registers.
///
/// `year` is the two-digit offset from 2000 held by the device and
/// `day_of_week` runs from 1 (Sunday) to 7 (Saturday).
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeRecord {
    pub second: u8,
    pub minute: u8,
    pub hour: u8,
    pub day_of_week: u8,
    pub day_of_month: u8,
    pub month: u8,
    pub year: u8,
}

impl TimeRecord {
    /// Calendar year, `2000 + year`
    pub fn full_year(&self) -> u16 {
        2000_u16 + self.year as u16
    }

    /// Whether every field fits its register.
    pub fn is_valid(&self) -> bool {
        self.second <= 59
            && self.minute <= 59
            && self.hour <= 23
            && (1..=7).contains(&self.day_of_week)
            && (1..=31).contains(&self.day_of_month)
            && (1..=12).contains(&self.month)
            && self.year <= 99
    }

    /// BCD register contents, seconds first. The hour is encoded in 24-hour format.
    pub fn to_registers(&self) -> [u8; TIME_BLOCK_LEN] {
        [
            decimal_to_bcd(self.second),
            decimal_to_bcd(self.minute),
            decimal_to_bcd(self.hour),
            decimal_to_bcd(self.day_of_week),
            decimal_to_bcd(self.day_of_month),
            decimal_to_bcd(self.month),
            decimal_to_bcd(self.year),
        ]
    }
}

/// The seven time/date registers exactly as read from the device.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawTime([u8; TIME_BLOCK_LEN]);

impl RawTime {
    pub fn registers(&self) -> &[u8; TIME_BLOCK_LEN] {
        &self.0
    }

    /// Bit 7 of the seconds register
    pub fn clock_halted(&self) -> bool {
        (self.0[0] & RegFlag::CLOCK_HALT.bits()) != 0
    }

    /// Hour register read with its 12/24-hour and AM/PM bits.
    pub fn hours(&self) -> Hours {
        self.0[2].into()
    }

    /// Decode into a [`TimeRecord`].
    ///
    /// The halt bit is stripped from seconds and the hour is masked with
    /// `0x3F` before decoding, so the hour is only meaningful when the
    /// device runs in 24-hour mode. Use [`RawTime::hours`] otherwise.
    pub fn decode(&self) -> TimeRecord {
        let r = &self.0;
        TimeRecord {
            second: bcd_to_decimal(r[0] & RegFlag::SECONDS_MASK.bits()),
            minute: bcd_to_decimal(r[1]),
            hour: bcd_to_decimal(r[2] & RegFlag::HOURS_MASK.bits()),
            day_of_week: bcd_to_decimal(r[3]),
            day_of_month: bcd_to_decimal(r[4]),
            month: bcd_to_decimal(r[5]),
            year: bcd_to_decimal(r[6]),
        }
    }
}

impl From<[u8; TIME_BLOCK_LEN]> for RawTime {
    fn from(regs: [u8; TIME_BLOCK_LEN]) -> Self {
        RawTime(regs)
    }
}

impl TryFrom<&[u8]> for RawTime {
    type Error = ByteCountError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let regs: [u8; TIME_BLOCK_LEN] = bytes.try_into().map_err(|_| ByteCountError {
            expected: TIME_BLOCK_LEN,
            actual: bytes.len(),
        })?;
        Ok(RawTime(regs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_time_block() {
        let raw = RawTime::from([0x30, 0x45, 0x12, 0x03, 0x15, 0x06, 0x23]);
        assert_eq!(
            raw.decode(),
            TimeRecord {
                second: 30,
                minute: 45,
                hour: 12,
                day_of_week: 3,
                day_of_month: 15,
                month: 6,
                year: 23,
            }
        );
        assert!(!raw.clock_halted());
    }

    #[test]
    fn hour_is_masked_before_decoding() {
        let raw = RawTime::from([0x00, 0x00, 0xA2, 0x01, 0x01, 0x01, 0x00]);
        assert_eq!(raw.decode().hour, 22);
    }

    #[test]
    fn halt_bit_is_stripped_but_reported() {
        let raw = RawTime::from([0x80 | 0x42, 0x00, 0x00, 0x01, 0x01, 0x01, 0x00]);
        assert_eq!(raw.decode().second, 42);
        assert!(raw.clock_halted());
    }

    #[test]
    fn hours_interprets_twelve_hour_mode() {
        assert_eq!(Hours::from(0x23), Hours::Hour24(23));
        // 12-hour mode, PM, 11
        assert_eq!(Hours::from(0x40 | 0x20 | 0x11), Hours::Hour12pm(11));
        assert_eq!(Hours::from(0x40 | 0x12), Hours::Hour12am(12));

        assert_eq!(Hours::Hour12pm(11).to_24h(), 23);
        assert_eq!(Hours::Hour12am(12).to_24h(), 0);
        assert_eq!(Hours::Hour12pm(12).to_24h(), 12);
        assert_eq!(Hours::Hour12am(9).hour(), (9, Some(false)));
        assert_eq!(Hours::Hour24(7).mode(), Mode::Hour24);
        assert_eq!(Hours::Hour12pm(7).mode(), Mode::Hour12);
    }

    #[test]
    fn raw_hours_reads_mode_bits() {
        let raw = RawTime::from([0x00, 0x30, 0x40 | 0x20 | 0x05, 0x02, 0x10, 0x03, 0x24]);
        assert_eq!(raw.hours(), Hours::Hour12pm(5));
        assert_eq!(raw.hours().to_24h(), 17);
    }

    #[test]
    fn encodes_record_in_field_order() {
        let record = TimeRecord {
            second: 5,
            minute: 59,
            hour: 23,
            day_of_week: 7,
            day_of_month: 31,
            month: 12,
            year: 99,
        };
        assert_eq!(
            record.to_registers(),
            [0x05, 0x59, 0x23, 0x07, 0x31, 0x12, 0x99]
        );
        assert_eq!(RawTime::from(record.to_registers()).decode(), record);
        assert_eq!(record.full_year(), 2099);
    }

    #[test]
    fn validity_checks_each_field() {
        let ok = TimeRecord {
            second: 0,
            minute: 0,
            hour: 0,
            day_of_week: 1,
            day_of_month: 1,
            month: 1,
            year: 0,
        };
        assert!(ok.is_valid());
        assert!(!TimeRecord { second: 60, ..ok }.is_valid());
        assert!(!TimeRecord { hour: 24, ..ok }.is_valid());
        assert!(!TimeRecord { day_of_week: 0, ..ok }.is_valid());
        assert!(!TimeRecord { day_of_month: 32, ..ok }.is_valid());
        assert!(!TimeRecord { month: 13, ..ok }.is_valid());
        assert!(!TimeRecord { year: 100, ..ok }.is_valid());
        assert!(!TimeRecord::default().is_valid());
    }

    #[test]
    fn slice_of_wrong_length_is_rejected() {
        let short: &[u8] = &[0x00, 0x01, 0x02];
        assert_eq!(
            RawTime::try_from(short),
            Err(ByteCountError {
                expected: 7,
                actual: 3
            })
        );
        let exact: &[u8] = &[0x30, 0x45, 0x12, 0x03, 0x15, 0x06, 0x23];
        assert_eq!(RawTime::try_from(exact).map(|r| r.decode().minute), Ok(45));
    }
}
