#![no_std]
#![no_main]

// Ensure we halt the program on panic (if we don't mention this crate it won't
// be linked)
use panic_halt as _;

// Logs go out over RTT
use defmt_rtt as _;

// Alias for our HAL crate
use rp2040_hal as hal;

use hal::fugit::RateExtU32;
use hal::gpio::{FunctionI2C, Pin};

use embedded_hal::delay::DelayNs;

/// For ds3231 RTC
use ds3231_drv::{Ds3231, HostClock, TimeRecord};

/// External high-speed crystal on the Raspberry Pi Pico board is 12 MHz.
/// Adjust if your board has a different frequency
const XTAL_FREQ_HZ: u32 = 12_000_000u32;

/// Software wall clock driven by the RP2040 timer, set from the RTC.
struct SystemClock {
    seconds_of_day: u32,
    day: u8,
    month: u8,
    year: u16,
    synced_at: hal::timer::Instant,
    timer: hal::Timer,
}

impl SystemClock {
    fn new(timer: hal::Timer) -> Self {
        Self {
            seconds_of_day: 0,
            day: 1,
            month: 1,
            year: 2000,
            synced_at: timer.get_counter(),
            timer,
        }
    }

    fn now(&self) -> (u8, u8, u8) {
        let elapsed = (self.timer.get_counter() - self.synced_at).to_secs() as u32;
        let t = (self.seconds_of_day + elapsed) % 86_400;
        ((t / 3600) as u8, ((t / 60) % 60) as u8, (t % 60) as u8)
    }
}

impl HostClock for SystemClock {
    type Error = core::convert::Infallible;

    fn set_time(
        &mut self,
        hour: u8,
        minute: u8,
        second: u8,
        day: u8,
        month: u8,
        year: u16,
    ) -> Result<(), Self::Error> {
        self.seconds_of_day = hour as u32 * 3600 + minute as u32 * 60 + second as u32;
        self.day = day;
        self.month = month;
        self.year = year;
        self.synced_at = self.timer.get_counter();
        Ok(())
    }
}

#[hal::entry]
fn main() -> ! {
    let mut pac = hal::pac::Peripherals::take().unwrap();

    // Set up the watchdog driver - needed by the clock setup code
    let mut watchdog = hal::Watchdog::new(pac.WATCHDOG);

    // Configure the clocks
    let clocks = hal::clocks::init_clocks_and_plls(
        XTAL_FREQ_HZ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .unwrap();

    // The single-cycle I/O block controls our GPIO pins
    let sio = hal::Sio::new(pac.SIO);

    // Set the pins to their default state
    let pins = hal::gpio::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    // Configure two pins as being I²C, not GPIO
    let sda: Pin<_, FunctionI2C, _> = pins.gpio2.reconfigure();
    let scl: Pin<_, FunctionI2C, _> = pins.gpio3.reconfigure();

    let i2c = hal::I2C::i2c1(
        pac.I2C1,
        sda,
        scl,
        400.kHz(),
        &mut pac.RESETS,
        &clocks.system_clock,
    );

    let mut timer = hal::Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
    let mut system_clock = SystemClock::new(timer);

    let mut rtc = Ds3231::new(i2c);

    // If first run need to init the clock && calendar
    /*
    let _ = rtc.set_time(&TimeRecord {
        second: 0,
        minute: 24,
        hour: 13,
        day_of_week: 1,
        day_of_month: 10,
        month: 11,
        year: 24,
    });
    */

    match rtc.read_time_raw() {
        Ok(raw) if raw.clock_halted() => {
            defmt::warn!("rtc oscillator was stopped, resetting time");
            let _ = rtc.set_time(&TimeRecord {
                second: 0,
                minute: 0,
                hour: 0,
                day_of_week: 7,
                day_of_month: 1,
                month: 1,
                year: 0,
            });
        }
        Ok(raw) => defmt::info!("rtc hour register: {}", raw.hours()),
        Err(e) => defmt::error!("rtc not responding: {}", e),
    }

    if let Err(e) = rtc.sync_host_clock(&mut system_clock) {
        defmt::error!("clock sync failed: {}", e);
    }

    loop {
        match rtc.read_time() {
            Ok(t) => defmt::info!(
                "rtc {}-{}-{} {}:{}:{}",
                t.full_year(),
                t.month,
                t.day_of_month,
                t.hour,
                t.minute,
                t.second
            ),
            Err(e) => defmt::error!("read time failed: {}", e),
        }

        let (h, m, s) = system_clock.now();
        defmt::info!(
            "sys {}-{}-{} {}:{}:{}",
            system_clock.year,
            system_clock.month,
            system_clock.day,
            h,
            m,
            s
        );

        match rtc.read_temperature() {
            Ok(temp) => defmt::info!("temp {} C ({} C truncated)", temp.celsius(), temp.degrees()),
            Err(e) => defmt::error!("read temperature failed: {}", e),
        }

        timer.delay_ms(1000);
    }
}
