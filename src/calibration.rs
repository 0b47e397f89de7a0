use crate::bus::Bus;
use crate::command::Command;
use crate::error::Icp101xxResult;
use crate::measurement::Measurement;
use crate::response::{OtpWord, RawSample};

/// Number of calibration words stored in OTP.
pub const CALIBRATION_WORDS: usize = 4;

/// Pressures (Pa) the device was calibrated at. The curve fit passes through these.
const P_CAL: [f32; 3] = [45000.0, 80000.0, 105000.0];

const LUT_LOWER: f32 = 3.5 * (1u32 << 20) as f32;
const LUT_UPPER: f32 = 11.5 * (1u32 << 20) as f32;
const QUADR_FACTOR: f32 = 1.0 / 16777216.0;
const OFFSET_FACTOR: f32 = 2048.0;

/// Factory calibration constants read from OTP.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationData {
    scal: [f32; CALIBRATION_WORDS],
}

impl CalibrationData {
    /// Reads the calibration words from OTP.
    ///
    /// Selects the calibration block, then reads it one word at a time. The device advances
    /// its OTP read pointer after every word.
    pub async fn new<B: Bus>(bus: &mut B) -> Icp101xxResult<Self, B::Error> {
        bus.send(Command::SelectCalibration).await?;

        let mut scal = [0.0; CALIBRATION_WORDS];
        for value in scal.iter_mut() {
            bus.send(Command::ReadOtp).await?;
            let word = bus.fetch::<OtpWord>().await?;
            *value = word as f32;
        }

        debug!("calibration {} {} {} {}", scal[0], scal[1], scal[2], scal[3]);

        Ok(Self { scal })
    }

    pub fn from_words(words: [u16; CALIBRATION_WORDS]) -> Self {
        Self { scal: words.map(|w| w as f32) }
    }

    /// The calibration constants as floats, in OTP order.
    pub fn constants(&self) -> [f32; CALIBRATION_WORDS] {
        self.scal
    }

    pub fn compensate_temperature(&self, raw_temperature: u16) -> f32 {
        -45.0 + 175.0 / 65536.0 * raw_temperature as f32
    }

    /// Converts a raw pressure reading to Pa.
    ///
    /// The device-specific constants shift three working points quadratically with
    /// temperature. A curve `a + b / (c + p)` is then fitted exactly through those points and
    /// the matching calibration pressures, and evaluated at the raw reading.
    pub fn compensate_pressure(&self, raw_temperature: u16, raw_pressure: u32) -> f32 {
        let t = raw_temperature as f32 - 32768.0;
        let s1 = LUT_LOWER + self.scal[0] * t * t * QUADR_FACTOR;
        let s2 = OFFSET_FACTOR * self.scal[3] + self.scal[1] * t * t * QUADR_FACTOR;
        let s3 = LUT_UPPER + self.scal[2] * t * t * QUADR_FACTOR;

        let c = (s1 * s2 * (P_CAL[0] - P_CAL[1])
            + s2 * s3 * (P_CAL[1] - P_CAL[2])
            + s3 * s1 * (P_CAL[2] - P_CAL[0]))
            / (s3 * (P_CAL[0] - P_CAL[1])
                + s1 * (P_CAL[1] - P_CAL[2])
                + s2 * (P_CAL[2] - P_CAL[0]));
        let a = (P_CAL[0] * s1 - P_CAL[1] * s2 - (P_CAL[1] - P_CAL[0]) * c) / (s1 - s2);
        let b = (P_CAL[0] - a) * (s1 + c);

        a + b / (c + raw_pressure as f32)
    }

    pub fn compensate(&self, raw: RawSample) -> Measurement {
        Measurement::new(
            self.compensate_temperature(raw.temperature()),
            self.compensate_pressure(raw.temperature(), raw.pressure()),
        )
    }
}
