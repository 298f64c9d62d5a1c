use ams6915::{
    mock_utils::SleepNop, Ams6915, SensorError, TemperatureDecode, Transducer, DEFAULT_ADDRESS,
    MAX_TRIES, PMAX, PMIN,
};
use embedded_hal_mock::{
    i2c::{Mock as I2cMock, Transaction as I2cTransaction},
    MockError,
};
use std::io::ErrorKind;

/// Packs counts the way the sensor puts them on the wire, status bits clear.
fn payload(pressure_counts: u16, temperature_counts: u16) -> Vec<u8> {
    vec![
        (pressure_counts >> 8) as u8 & 0x3F,
        pressure_counts as u8,
        (temperature_counts >> 3) as u8,
        ((temperature_counts & 0x07) as u8) << 5,
    ]
}

#[test]
fn every_part_reads_its_calibrated_span() {
    let mut expectations = Vec::new();
    for _ in Transducer::ALL {
        expectations.push(I2cTransaction::read(DEFAULT_ADDRESS, payload(PMIN, 768)));
        expectations.push(I2cTransaction::read(DEFAULT_ADDRESS, payload(PMAX, 768)));
    }
    let i2c = I2cMock::new(&expectations);
    let mut sensor = Ams6915::new(i2c, SleepNop, DEFAULT_ADDRESS, Transducer::D0005);

    for transducer in Transducer::ALL {
        sensor.configure(DEFAULT_ADDRESS, transducer);
        let range = transducer.pressure_range();

        let low = sensor.read().unwrap();
        assert!(
            (low.pressure_pa - range.min_mbar * 100.0).abs() < 0.1,
            "{:?}: {}",
            transducer,
            low.pressure_pa
        );
        let high = sensor.read().unwrap();
        assert!(
            (high.pressure_pa - range.max_mbar * 100.0).abs() < 0.1,
            "{:?}: {}",
            transducer,
            high.pressure_pa
        );
        assert_eq!(high.die_temperature_c, 25.0);
    }

    let (mut i2c, _) = sensor.release();
    i2c.done();
}

#[test]
fn synthetic_payload_round_trip() {
    let (pressure_counts, temperature_counts) = (12_000u16, 1_111u16);
    let i2c = I2cMock::new(&[I2cTransaction::read(
        0x38,
        payload(pressure_counts, temperature_counts),
    )]);
    let mut sensor = Ams6915::new(i2c, SleepNop, 0x38, Transducer::B1200);

    let reading = sensor.read().unwrap();
    let expected_mbar: f32 = (12_000.0 - 1638.0) / (14745.0 - 1638.0) * 500.0 + 700.0;
    let expected_c: f32 = 1_111.0 * 200.0 / 2048.0 - 50.0;
    assert_eq!(reading.pressure_counts, pressure_counts);
    assert_eq!(reading.temperature_counts, temperature_counts);
    assert_eq!(reading.pressure_pa, expected_mbar * 100.0);
    assert_eq!(reading.die_temperature_c, expected_c);
    assert_eq!(sensor.pressure_pa(), reading.pressure_pa);
    assert_eq!(sensor.die_temperature_c(), reading.die_temperature_c);

    let (mut i2c, _) = sensor.release();
    i2c.done();
}

#[test]
fn reconfigure_for_second_sensor_on_the_bus() {
    let i2c = I2cMock::new(&[
        I2cTransaction::read(0x28, payload(PMAX, 768)),
        I2cTransaction::read(0x29, payload(PMIN, 768)),
    ]);
    let mut sensor = Ams6915::new(i2c, SleepNop, 0x28, Transducer::D0010);
    assert_eq!(sensor.read().unwrap().pressure_pa, 1_000.0);

    sensor.configure(0x29, Transducer::DB0050);
    // Reconfiguring drops the previous sensor's reading.
    assert_eq!(sensor.last_reading(), None);
    assert_eq!(sensor.pressure_pa(), 0.0);
    assert_eq!(sensor.read().unwrap().pressure_pa, -5_000.0);

    let (mut i2c, _) = sensor.release();
    i2c.done();
}

#[test]
fn legacy_decode_matches_old_readings() {
    // Temperature count 1000: 0b111_1101_000.
    let mut raw = payload(8192, 1000);
    // Low bits of the last byte are noise on the wire.
    raw[3] |= 0b0000_0101;
    let i2c = I2cMock::new(&[
        I2cTransaction::read(DEFAULT_ADDRESS, raw.clone()),
        I2cTransaction::read(DEFAULT_ADDRESS, raw),
    ]);
    let mut sensor = Ams6915::new(i2c, SleepNop, DEFAULT_ADDRESS, Transducer::D0200);

    assert_eq!(sensor.read().unwrap().temperature_counts, 1000);
    sensor.set_temperature_decode(TemperatureDecode::Legacy);
    assert_eq!(sensor.read().unwrap().temperature_counts, 1000 + 0b101);

    let (mut i2c, _) = sensor.release();
    i2c.done();
}

#[test]
fn begin_without_a_sensor() {
    let expectations: Vec<I2cTransaction> = (0..MAX_TRIES)
        .map(|_| {
            I2cTransaction::read(DEFAULT_ADDRESS, vec![0; 4])
                .with_error(MockError::Io(ErrorKind::Other))
        })
        .collect();
    let i2c = I2cMock::new(&expectations);
    let mut sensor = Ams6915::new(i2c, SleepNop, DEFAULT_ADDRESS, Transducer::A1000);

    assert_eq!(
        sensor.begin(),
        Err(SensorError::I2cError(MockError::Io(ErrorKind::Other)))
    );
    assert_eq!(sensor.last_reading(), None);

    let (mut i2c, _) = sensor.release();
    i2c.done();
}
