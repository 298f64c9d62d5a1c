//! # Getting started
//!
//! A platform agnostic driver for the [AMS 6915](https://www.analog-micro.com/products/pressure-sensors/board-mount-pressure-sensors/ams6915/)
//! family of digital pressure transducers from Analog Microelectronics.
//!
//! This driver supports reading the calibrated pressure and the die
//! temperature over I2C for all 27 parts of the family.
//!
//! ## Example
//! ```rust
//! # // NOTE: Use real i2c instance for your app.
//! # use embedded_hal_mock::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
//! # let i2c = I2cMock::new(&[
//! #     I2cTransaction::read(0x28, vec![0x20, 0x00, 0x60, 0x00]),
//! #     I2cTransaction::read(0x28, vec![0x20, 0x00, 0x60, 0x00]),
//! # ]);
//! use ams6915::{mock_utils::SleepNop, Ams6915, Transducer, DEFAULT_ADDRESS};
//! // NOTE: You should use a real delay implementation for this driver to
//! // work correctly.
//! let mut pressure_sensor = Ams6915::new(i2c, SleepNop, DEFAULT_ADDRESS, Transducer::D0200);
//! pressure_sensor.begin().unwrap();
//! println!("{:?}", pressure_sensor.read().unwrap());
//! println!(
//!     "{} Pa, {} deg C",
//!     pressure_sensor.pressure_pa(),
//!     pressure_sensor.die_temperature_c()
//! );
//! ```

#![no_std]

#[cfg(test)]
#[macro_use]
extern crate std;

use core::fmt;

use embedded_hal::blocking::{delay::DelayUs, i2c::Read};
use log::{debug, warn};

mod transducer;

pub use transducer::{PressureRange, Transducer};

/// Mock utils is a set of tools to aid in testing and documenting you should not
/// use any of the mocks defined in this module in your release binaries.
pub mod mock_utils {
    /// A sleep implementation that does nothing and immediately exits. This is
    /// useful for testing and fuzzing.
    pub struct SleepNop;

    impl embedded_hal::blocking::delay::DelayUs<u32> for SleepNop {
        fn delay_us(&mut self, _us: u32) {
            // Nop
        }
    }
}

/// Factory default 7-bit bus address.
pub const DEFAULT_ADDRESS: u8 = 0x28;
/// Digital output at the minimum calibrated pressure.
pub const PMIN: u16 = 1638;
/// Digital output at the maximum calibrated pressure.
pub const PMAX: u16 = 14745;
/// Die temperatures above this are treated as a corrupted transfer.
pub const MAX_TEMPERATURE_C: f32 = 85.0;
/// Number of reads `begin` attempts before giving up.
pub const MAX_TRIES: usize = 10;
/// Delay after each failed `begin` attempt.
pub const RETRY_DELAY_US: u32 = 10_000;

const PRANGE: f32 = (PMAX - PMIN) as f32;

/// A catch all error for this driver
#[derive(Debug, PartialEq)]
pub enum SensorError<E> {
    /// The bus transfer failed or came back short.
    I2cError(E),
    /// The decoded die temperature is out of the sensor's physical range.
    ImplausibleTemperature { celsius: f32 },
}

impl<E: fmt::Debug> fmt::Display for SensorError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorError::I2cError(e) => write!(f, "i2c transfer failed: {:?}", e),
            SensorError::ImplausibleTemperature { celsius } => write!(
                f,
                "implausible die temperature {} deg C (max {})",
                celsius, MAX_TEMPERATURE_C
            ),
        }
    }
}

/// How the low 3 bits of the temperature count are taken from the last byte
/// of a transfer.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum TemperatureDecode {
    /// Bits [7:5] of the last byte, as laid out in the datasheet.
    #[default]
    Datasheet,
    /// Bits [2:0] of the last byte. Matches readings logged by the Arduino
    /// `bfs::Ams6915` library, which masks with `0xE0 >> 5`.
    Legacy,
}

/// A single decoded transfer. Pressure and temperature always come from the
/// same transfer.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Reading {
    /// Raw 14-bit pressure count.
    pub pressure_counts: u16,
    /// Raw 11-bit temperature count.
    pub temperature_counts: u16,
    pub pressure_pa: f32,
    pub die_temperature_c: f32,
}

/// Extracts the 14-bit pressure count. The two status bits in the top of the
/// first byte are dropped.
pub fn pressure_counts(buffer: &[u8; 4]) -> u16 {
    (u16::from(buffer[0] & 0x3F) << 8) | u16::from(buffer[1])
}

/// Extracts the 11-bit temperature count.
pub fn temperature_counts(buffer: &[u8; 4], decode: TemperatureDecode) -> u16 {
    let low = match decode {
        TemperatureDecode::Datasheet => (buffer[3] >> 5) & 0x07,
        TemperatureDecode::Legacy => buffer[3] & (0xE0 >> 5),
    };
    (u16::from(buffer[2]) << 3) | u16::from(low)
}

/// Maps a pressure count onto the calibrated span of a part, in millibar.
///
/// [`PMIN`] lands on `range.min_mbar` and [`PMAX`] on `range.max_mbar`
/// whatever the part; counts outside of that extrapolate linearly.
pub fn pressure_mbar_from_counts(counts: u16, range: PressureRange) -> f32 {
    (f32::from(counts) - f32::from(PMIN)) / PRANGE * range.span_mbar() + range.min_mbar
}

/// Converts a temperature count to degrees C. The 11-bit output covers
/// -50 to 150 deg C.
pub fn temperature_c_from_counts(counts: u16) -> f32 {
    f32::from(counts) * 200.0 / 2048.0 - 50.0
}

/// An AMS 6915 pressure transducer on an I2C bus.
pub struct Ams6915<I2C: Read, D: DelayUs<u32>> {
    i2c: I2C,
    delay: D,
    address: u8,
    transducer: Transducer,
    range: PressureRange,
    temperature_decode: TemperatureDecode,
    reading: Option<Reading>,
}

impl<I2C: Read, D: DelayUs<u32>> Ams6915<I2C, D> {
    /// Creates a driver for the part `transducer` at the 7-bit bus
    /// `address`. No bus traffic takes place until [`begin`](Self::begin) or
    /// [`read`](Self::read).
    ///
    /// # Example
    ///
    /// ```
    /// // NOTE: Use real i2c instance for your app.
    /// use embedded_hal_mock::i2c::Mock as I2cMock;
    /// use ams6915::{mock_utils::SleepNop, Ams6915, Transducer, DEFAULT_ADDRESS};
    /// let i2c = I2cMock::new(&[]);
    /// let pressure_sensor = Ams6915::new(i2c, SleepNop, DEFAULT_ADDRESS, Transducer::B1200);
    /// assert_eq!(pressure_sensor.pressure_range().min_mbar, 700.0);
    /// ```
    pub fn new(i2c: I2C, delay: D, address: u8, transducer: Transducer) -> Self {
        Ams6915 {
            i2c,
            delay,
            address,
            transducer,
            range: transducer.pressure_range(),
            temperature_decode: TemperatureDecode::default(),
            reading: None,
        }
    }

    /// Points the driver at another sensor on the same bus. The calibrated
    /// span is looked up again and the stored reading is cleared.
    pub fn configure(&mut self, address: u8, transducer: Transducer) {
        self.address = address;
        self.transducer = transducer;
        self.range = transducer.pressure_range();
        self.reading = None;
    }

    pub fn set_temperature_decode(&mut self, decode: TemperatureDecode) {
        self.temperature_decode = decode;
    }

    pub fn temperature_decode(&self) -> TemperatureDecode {
        self.temperature_decode
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn transducer(&self) -> Transducer {
        self.transducer
    }

    /// The calibrated span of the configured part.
    pub fn pressure_range(&self) -> PressureRange {
        self.range
    }

    /// Releases the i2c handle and delay consuming the driver object.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    /// Checks that the sensor responds.
    ///
    /// The sensor needs some time after power on before the first
    /// conversion is ready, so up to [`MAX_TRIES`] reads are attempted with
    /// [`RETRY_DELAY_US`] between them.
    ///
    /// # Errors
    /// The error of the last attempt is returned if none of them succeed.
    pub fn begin(&mut self) -> Result<(), SensorError<I2C::Error>> {
        let mut attempt = 1;
        loop {
            let error = match self.read() {
                Ok(_) => return Ok(()),
                Err(e) => e,
            };
            debug!("ams6915 at {:#04x}: attempt {} failed", self.address, attempt);
            self.delay.delay_us(RETRY_DELAY_US);
            if attempt >= MAX_TRIES {
                warn!(
                    "ams6915 at {:#04x}: no response after {} attempts",
                    self.address, MAX_TRIES
                );
                return Err(error);
            }
            attempt += 1;
        }
    }

    /// Reads a new pressure and temperature sample from the sensor.
    ///
    /// On success the reading is also stored and served by
    /// [`pressure_pa`](Self::pressure_pa) and
    /// [`die_temperature_c`](Self::die_temperature_c). On failure the
    /// previously stored reading is left untouched.
    ///
    /// # Errors
    /// - There was a problem communicating over i2c.
    /// - The die temperature decoded above [`MAX_TEMPERATURE_C`], which only
    ///   happens on a corrupted transfer.
    ///
    /// # Example
    ///
    /// ```rust
    /// # // NOTE: Use real i2c instance for your app.
    /// # use embedded_hal_mock::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
    /// # let i2c = I2cMock::new(&[I2cTransaction::read(0x28, vec![0x39, 0x99, 0x60, 0x00])]);
    /// use ams6915::{mock_utils::SleepNop, Ams6915, Transducer, DEFAULT_ADDRESS};
    /// let mut pressure_sensor = Ams6915::new(i2c, SleepNop, DEFAULT_ADDRESS, Transducer::D0200);
    /// let reading = pressure_sensor.read().unwrap();
    /// assert_eq!(reading.pressure_pa, 20_000.0);
    /// assert_eq!(reading.die_temperature_c, 25.0);
    /// ```
    pub fn read(&mut self) -> Result<Reading, SensorError<I2C::Error>> {
        let mut buffer = [0u8; 4];
        self.i2c
            .read(self.address, &mut buffer)
            .map_err(SensorError::I2cError)?;

        let pressure_counts = pressure_counts(&buffer);
        let temperature_counts = temperature_counts(&buffer, self.temperature_decode);
        let pressure_mbar = pressure_mbar_from_counts(pressure_counts, self.range);
        let celsius = temperature_c_from_counts(temperature_counts);
        if celsius > MAX_TEMPERATURE_C {
            warn!(
                "ams6915 at {:#04x}: rejecting reading with die temperature {} deg C",
                self.address, celsius
            );
            return Err(SensorError::ImplausibleTemperature { celsius });
        }

        let reading = Reading {
            pressure_counts,
            temperature_counts,
            pressure_pa: pressure_mbar * 100.0,
            die_temperature_c: celsius,
        };
        debug!(
            "ams6915 at {:#04x}: {} Pa, {} deg C",
            self.address, reading.pressure_pa, reading.die_temperature_c
        );
        self.reading = Some(reading);
        Ok(reading)
    }

    /// Pressure of the last good reading in pascal, 0.0 before the first one.
    pub fn pressure_pa(&self) -> f32 {
        self.reading.map_or(0.0, |r| r.pressure_pa)
    }

    /// Die temperature of the last good reading in degrees C, 0.0 before
    /// the first one.
    pub fn die_temperature_c(&self) -> f32 {
        self.reading.map_or(0.0, |r| r.die_temperature_c)
    }

    pub fn last_reading(&self) -> Option<Reading> {
        self.reading
    }
}
