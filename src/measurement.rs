use core::fmt::{Debug, Formatter};

/// A compensated reading.
#[derive(Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    temperature_c: f32,
    pressure_pa: f32,
}

impl Measurement {
    pub fn new(temperature_celsius: f32, pressure_pascal: f32) -> Self {
        Self {
            temperature_c: temperature_celsius,
            pressure_pa: pressure_pascal,
        }
    }

    pub fn temperature_celsius(&self) -> f32 {
        self.temperature_c
    }

    pub fn temperature_fahrenheit(&self) -> f32 {
        self.temperature_c * 1.8 + 32.0
    }

    pub fn pressure_pascal(&self) -> f32 {
        self.pressure_pa
    }
}

impl Debug for Measurement {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Measurement")
            .field("temperature_c", &self.temperature_c)
            .field("pressure_pa", &self.pressure_pa)
            .finish()
    }
}
