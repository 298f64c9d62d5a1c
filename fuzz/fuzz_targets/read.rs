#![no_main]
use ams6915::{mock_utils::SleepNop, Ams6915, TemperatureDecode, Transducer, DEFAULT_ADDRESS};
use embedded_hal_fuzz::{i2c::I2cFuzz, shared_data::FuzzData};
use libfuzzer_sys::fuzz_target;

type Error = ();

fuzz_target!(|data: &[u8]| {
    let data = FuzzData::new(data);
    let i2c: I2cFuzz<'_, Error> = I2cFuzz::new(data);
    let mut pressure_sensor = Ams6915::new(i2c, SleepNop, DEFAULT_ADDRESS, Transducer::DB1000);
    // The readings are garbage, we only care that decoding never panics and
    // that whatever was accepted is within the ceiling.
    for decode in [TemperatureDecode::Datasheet, TemperatureDecode::Legacy] {
        pressure_sensor.set_temperature_decode(decode);
        if let Ok(reading) = pressure_sensor.read() {
            assert!(reading.die_temperature_c <= ams6915::MAX_TEMPERATURE_C);
        }
    }
});
