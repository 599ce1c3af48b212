//! DS3231 real time clock platform agnostic driver
//!
//! # About
//!
//!The DS3231 is a low-cost, extremely accurate I2C real-time clock (RTC) with an integrated
//!temperature-compensated crystal oscillator (TCXO). The RTC maintains seconds, minutes, hours, day,
//!date, month, and year information, and exposes the die temperature used for compensation with a
//!resolution of 0.25°C. The chip driver is based on [`embedded-hal`] traits.
//!
//! [`embedded-hal`]: https://github.com/rust-embedded/embedded-hal
//!
//!Datasheet: [DS3231](https://datasheets.maximintegrated.com/en/ds/DS3231.pdf)
//!
//! ## Driver features:
//! - Reading/setting the whole clock/calendar block in one transaction
//! - Reading the temperature registers, truncated or with quarter-degree resolution
//! - Reporting the halt flag and 12/24-hour format bits of the raw registers
//! - Pushing the device time into a host clock
//!
//! ## Usage
//!
//! ```ignore
//! use ds3231_drv::{Ds3231, TimeRecord};
//!
//! let mut rtc = Ds3231::new(i2c);
//! rtc.set_time(&TimeRecord {
//!     second: 0,
//!     minute: 24,
//!     hour: 13,
//!     day_of_week: 1,
//!     day_of_month: 10,
//!     month: 11,
//!     year: 24,
//! })?;
//! let now = rtc.read_time()?;
//! let temp = rtc.read_temperature()?.celsius();
//! ```
//!
//! Enable the `defmt` feature to get transaction logs through [`defmt`](https://docs.rs/defmt).

#![cfg_attr(not(test), no_std)]
#![allow(non_camel_case_types)]

#[macro_use]
mod fmt;

pub mod bcd;
mod datetime;
pub mod registers;
mod temperature;

pub use crate::bcd::{bcd_to_decimal, decimal_to_bcd};
pub use crate::datetime::{Hours, Mode, RawTime, TimeRecord};
pub use crate::registers::DEFAULT_ADDRESS;
pub use crate::temperature::Temperature;

use crate::registers::{Register, TEMP_BLOCK_LEN, TIME_BLOCK_LEN};

use embedded_hal::i2c::I2c;

/// DS3231 error
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ds3231Error<E> {
    /// The I2C transport reported an error (no device, NACK, arbitration loss...)
    Bus(E),
    /// A register block was built from a buffer of the wrong size
    UnexpectedByteCount { expected: usize, actual: usize },
    /// A time field does not fit its register
    Parameter,
    /// The host clock refused the time
    HostClock,
}

/// Length mismatch while building a register block from a byte slice
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ByteCountError {
    pub expected: usize,
    pub actual: usize,
}

impl<E> From<ByteCountError> for Ds3231Error<E> {
    fn from(e: ByteCountError) -> Self {
        Ds3231Error::UnexpectedByteCount {
            expected: e.expected,
            actual: e.actual,
        }
    }
}

/// The time-keeping facility that owns system time on the host side.
/// User must implement this trait for the clock by itself.
pub trait HostClock {
    /// An error that might happen while adopting the new time
    type Error;

    /// Adopt the given wall-clock time. `year` is the full calendar year.
    fn set_time(
        &mut self,
        hour: u8,
        minute: u8,
        second: u8,
        day: u8,
        month: u8,
        year: u16,
    ) -> Result<(), Self::Error>;
}

/// DS3231 driver over an I2C bus.
///
/// Every operation is a blocking exchange that runs to completion; the bus is
/// borrowed mutably for its whole duration.
pub struct Ds3231<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> Ds3231<I2C>
where
    I2C: I2c,
{
    /// Create a driver for a device at [`DEFAULT_ADDRESS`]
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS)
    }

    /// Create a driver for a device at a non-standard 7-bit address
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Ds3231 { i2c, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Destroy the driver and give the bus back
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), Ds3231Error<I2C::Error>> {
        self.i2c.write(self.address, bytes).map_err(|e| {
            warn!("write to {:#x} failed", self.address);
            Ds3231Error::Bus(e)
        })
    }

    // Pointer write and data read are two separate transactions.
    fn read_block<const N: usize>(
        &mut self,
        reg: Register,
    ) -> Result<[u8; N], Ds3231Error<I2C::Error>> {
        self.write(&[reg.addr()])?;
        let mut buf = [0_u8; N];
        self.i2c.read(self.address, &mut buf).map_err(|e| {
            warn!("read of {=usize} bytes from {:#x} failed", N, self.address);
            Ds3231Error::Bus(e)
        })?;
        trace!("read {:#x}: {:#x}", reg.addr(), buf);
        Ok(buf)
    }

    ///Set clock and calendar to defined values.
    ///The whole block is written at once, hour in 24-hour format.
    pub fn set_time(&mut self, record: &TimeRecord) -> Result<(), Ds3231Error<I2C::Error>> {
        if !record.is_valid() {
            return Err(Ds3231Error::Parameter);
        }
        let mut bytes = [0_u8; TIME_BLOCK_LEN + 1];
        bytes[0] = Register::SECONDS.addr();
        bytes[1..].copy_from_slice(&record.to_registers());
        debug!("set time {}", record);
        self.write(&bytes)
    }

    ///Return the time/date registers without decoding them
    pub fn read_time_raw(&mut self) -> Result<RawTime, Ds3231Error<I2C::Error>> {
        self.read_block::<TIME_BLOCK_LEN>(Register::SECONDS)
            .map(RawTime::from)
    }

    ///Return current information date and time
    pub fn read_time(&mut self) -> Result<TimeRecord, Ds3231Error<I2C::Error>> {
        let raw = self.read_time_raw()?;
        if raw.clock_halted() {
            warn!("oscillator halt flag set");
        }
        Ok(raw.decode())
    }

    ///Return the die temperature
    pub fn read_temperature(&mut self) -> Result<Temperature, Ds3231Error<I2C::Error>> {
        let temp = self
            .read_block::<TEMP_BLOCK_LEN>(Register::TEMP_MSB)
            .map(Temperature::from)?;
        debug!("temperature {=i16} quarter degrees", temp.quarter_degrees());
        Ok(temp)
    }

    /// Read the device time and hand it to `host`.
    /// The host clock is left untouched when the read fails.
    pub fn sync_host_clock<H>(&mut self, host: &mut H) -> Result<(), Ds3231Error<I2C::Error>>
    where
        H: HostClock,
    {
        let t = self.read_time()?;
        host.set_time(
            t.hour,
            t.minute,
            t.second,
            t.day_of_month,
            t.month,
            t.full_year(),
        )
        .map_err(|_| Ds3231Error::HostClock)
    }
}
