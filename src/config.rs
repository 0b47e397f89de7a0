use crate::command::MeasurementMode;

pub struct Configuration {
    pub(crate) mode: MeasurementMode,
    pub(crate) poll_interval_us: u32,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            mode: MeasurementMode::Normal,
            poll_interval_us: 0,
        }
    }
}

impl Configuration {
    /// Mode used by [`Icp101xx::measure_default`](crate::Icp101xx::measure_default).
    pub fn measurement_mode(mut self, mode: MeasurementMode) -> Self {
        self.mode = mode;

        self
    }

    /// Time to sleep between readiness polls once the settling time has passed.
    ///
    /// Zero polls back-to-back. The settling time is always slept in one go before the first
    /// poll, so this only matters when the host clock and the device disagree about how long a
    /// conversion takes.
    pub fn poll_interval_us(mut self, poll_interval_us: u32) -> Self {
        self.poll_interval_us = poll_interval_us;

        self
    }

    pub fn from_preset(p: Preset) -> Self {
        match p {
            Preset::LowPower => Configuration::default()
                .measurement_mode(MeasurementMode::Fast),
            Preset::Standard => Configuration::default(),
            Preset::LowNoise => Configuration::default()
                .measurement_mode(MeasurementMode::Accurate),
            Preset::UltraLowNoise => Configuration::default()
                .measurement_mode(MeasurementMode::VeryAccurate)
                .poll_interval_us(1_000),
        }
    }
}

pub enum Preset {
    LowPower,
    Standard,
    LowNoise,
    UltraLowNoise,
}
