//! The AMS 6915 part numbers and their calibrated pressure spans.

/// A specific AMS 6915 part. The number is the full scale in mbar and the
/// suffix the reference type: `D` differential, `G` gauge, `DB`
/// bidirectional differential, `A` absolute and `B` barometric.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Transducer {
    D0005,
    D0010,
    D0025,
    D0050,
    D0100,
    D0200,
    D0350,
    D1000,
    D2000,
    D2500,
    G0200,
    G0350,
    G1000,
    G2000,
    DB0002,
    DB0005,
    DB0010,
    DB0025,
    DB0050,
    DB0100,
    DB0200,
    DB0350,
    DB1000,
    A0500,
    A1000,
    A2000,
    B1200,
}

/// The pressure span a part is calibrated over, in millibar.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct PressureRange {
    /// Pressure at the lowest output count.
    pub min_mbar: f32,
    /// Pressure at the highest output count.
    pub max_mbar: f32,
}

impl PressureRange {
    const fn new(min_mbar: f32, max_mbar: f32) -> Self {
        PressureRange { min_mbar, max_mbar }
    }

    /// The full scale span, `max - min`.
    pub fn span_mbar(&self) -> f32 {
        self.max_mbar - self.min_mbar
    }
}

// Indexed by `Transducer as usize`, keep in declaration order.
static RANGES: [PressureRange; 27] = [
    PressureRange::new(0.0, 5.0),
    PressureRange::new(0.0, 10.0),
    PressureRange::new(0.0, 25.0),
    PressureRange::new(0.0, 50.0),
    PressureRange::new(0.0, 100.0),
    PressureRange::new(0.0, 200.0),
    PressureRange::new(0.0, 350.0),
    PressureRange::new(0.0, 1000.0),
    PressureRange::new(0.0, 2000.0),
    PressureRange::new(0.0, 2500.0),
    PressureRange::new(0.0, 200.0),
    PressureRange::new(0.0, 350.0),
    PressureRange::new(0.0, 1000.0),
    PressureRange::new(0.0, 2000.0),
    PressureRange::new(-2.5, 2.5),
    PressureRange::new(-5.0, 5.0),
    PressureRange::new(-10.0, 10.0),
    PressureRange::new(-25.0, 25.0),
    PressureRange::new(-50.0, 50.0),
    PressureRange::new(-100.0, 100.0),
    PressureRange::new(-200.0, 200.0),
    PressureRange::new(-350.0, 350.0),
    PressureRange::new(-1000.0, 1000.0),
    PressureRange::new(0.0, 500.0),
    PressureRange::new(0.0, 1000.0),
    PressureRange::new(0.0, 2000.0),
    PressureRange::new(700.0, 1200.0),
];

impl Transducer {
    /// Every supported part, in declaration order.
    pub const ALL: [Transducer; 27] = {
        use Transducer::*;
        [
            D0005, D0010, D0025, D0050, D0100, D0200, D0350, D1000, D2000, D2500, G0200, G0350,
            G1000, G2000, DB0002, DB0005, DB0010, DB0025, DB0050, DB0100, DB0200, DB0350, DB1000,
            A0500, A1000, A2000, B1200,
        ]
    };

    /// The calibrated pressure span of this part.
    pub fn pressure_range(self) -> PressureRange {
        RANGES[self as usize]
    }
}
