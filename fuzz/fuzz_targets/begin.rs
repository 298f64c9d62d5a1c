#![no_main]
use ams6915::{mock_utils::SleepNop, Ams6915, Transducer, DEFAULT_ADDRESS};
use embedded_hal_fuzz::{i2c::I2cFuzz, shared_data::FuzzData};
use libfuzzer_sys::fuzz_target;

type Error = ();

fuzz_target!(|data: &[u8]| {
    let data = FuzzData::new(data);
    let i2c: I2cFuzz<'_, Error> = I2cFuzz::new(data);
    let mut pressure_sensor = Ams6915::new(i2c, SleepNop, DEFAULT_ADDRESS, Transducer::D1000);
    // We ignore the result/error as we only care about potential crashes.
    let _ = pressure_sensor.begin();
});
