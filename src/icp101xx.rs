use embedded_hal_async::delay::DelayNs;

use crate::bus::{Bus, I2c};
use crate::calibration::CalibrationData;
use crate::clock::{elapsed_ms, Clock};
use crate::command::{Command, MeasurementMode};
use crate::config::Configuration;
use crate::error::{Icp101xxError, Icp101xxResult};
use crate::measurement::Measurement;
use crate::response::{is_product_id, ProductId, Sample};

/// Type alias for an ICP-101xx communicating over I2C
pub type Icp101xxI2c<T, C> = Icp101xx<I2c<T>, C>;

/// Progress of the current measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MeasurementState {
    /// No measurement has been started.
    Idle,
    /// A conversion is running. Its result may be read once `duration_ms` have passed since
    /// `started_at_ms`.
    Pending {
        mode: MeasurementMode,
        started_at_ms: u64,
        duration_ms: u8,
    },
    /// The result of the last conversion has been read and compensated.
    Ready,
}

/// Main ICP-101xx driver struct
///
/// A value of this type only exists for a device that answered the identity probe and whose
/// calibration constants have been read.
pub struct Icp101xx<B, C> {
    bus: B,
    clock: C,
    calibration_data: CalibrationData,
    config: Configuration,
    state: MeasurementState,
    last_measurement: Option<Measurement>,
}

impl<T, C> Icp101xxI2c<T, C>
where
    T: embedded_hal_async::i2c::I2c,
    I2c<T>: Bus,
    C: Clock,
{
    /// Constructs a new driver instance that communicates over I2C at address `0x63`
    ///
    /// This function will:
    /// - Probe for a connected ICP-101xx device.
    /// - Load calibration constants from OTP
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use embedded_hal_async::i2c::I2c;
    /// # use icp101xx_rs::clock::Clock;
    /// # use icp101xx_rs::Icp101xxResult;
    ///  use icp101xx_rs::Icp101xx;
    /// # async fn demo<I: I2c, C: Clock>(i2c: I, clock: C) -> Icp101xxResult<(), I::Error> {
    ///
    ///  let device = Icp101xx::new_i2c(i2c, clock).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new_i2c(i2c: T, clock: C) -> Icp101xxResult<Self, <I2c<T> as Bus>::Error> {
        Self::new(I2c::new(i2c), clock).await
    }

    /// Like [`new_i2c`](Self::new_i2c), with a non-default [`Configuration`].
    pub async fn new_i2c_with_config(
        i2c: T,
        clock: C,
        config: Configuration,
    ) -> Icp101xxResult<Self, <I2c<T> as Bus>::Error> {
        Self::with_config(I2c::new(i2c), clock, config).await
    }
}

impl<B, C> Icp101xx<B, C>
where
    B: Bus,
    C: Clock,
{
    /// Creates a new driver instance over any [`Bus`] with the default configuration.
    pub async fn new(bus: B, clock: C) -> Icp101xxResult<Self, B::Error> {
        Self::with_config(bus, clock, Configuration::default()).await
    }

    /// Creates a new driver instance over any [`Bus`].
    ///
    /// Returns [`Icp101xxError::NotConnected`] if the device does not answer the identity probe
    /// or answers with an id outside the ICP-101xx family.
    pub async fn with_config(
        mut bus: B,
        clock: C,
        config: Configuration,
    ) -> Icp101xxResult<Self, B::Error> {
        Self::probe(&mut bus).await?;

        let calibration_data = CalibrationData::new(&mut bus).await?;

        Ok(Icp101xx {
            bus,
            clock,
            calibration_data,
            config,
            state: MeasurementState::Idle,
            last_measurement: None,
        })
    }

    /// Reads the product id once. A transfer that fails is treated the same as a wrong id,
    /// since an absent device simply does not acknowledge.
    async fn probe(bus: &mut B) -> Icp101xxResult<(), B::Error> {
        if bus.send(Command::ReadId).await.is_ok() {
            if let Ok(id) = bus.fetch::<ProductId>().await {
                if is_product_id(id) {
                    debug!("found ICP-101xx, product id {:#x}", id);
                    return Ok(());
                }
                warn!("unexpected product id {:#x}", id);
            }
        }

        Err(Icp101xxError::NotConnected)
    }

    /// Determines if the device is connected by reading its product id and checking the
    /// family signature.
    pub async fn is_connected(&mut self) -> Icp101xxResult<bool, B::Error> {
        self.bus.send(Command::ReadId).await?;
        let id = self.bus.fetch::<ProductId>().await?;

        Ok(is_product_id(id))
    }

    /// Starts a measurement in `mode` and returns how many milliseconds it takes.
    ///
    /// This only issues the command. Poll [`is_data_ready`](Self::is_data_ready) to collect the
    /// result. Starting a new measurement abandons any measurement still pending.
    pub async fn start_measurement(&mut self, mode: MeasurementMode) -> Icp101xxResult<u8, B::Error> {
        let duration_ms = mode.duration_ms();

        self.state = MeasurementState::Idle;
        self.bus.send(Command::Measure(mode)).await?;
        self.state = MeasurementState::Pending {
            mode,
            started_at_ms: self.clock.now_ms(),
            duration_ms,
        };
        trace!("started {:?} measurement, {} ms", mode, duration_ms);

        Ok(duration_ms)
    }

    /// Returns true once the result of the last started measurement is available.
    ///
    /// Never blocks. Returns false while the conversion is still running, or if no measurement
    /// has been started. The first call after the conversion time has passed reads the result
    /// from the device and compensates it, later calls return true without touching the bus.
    ///
    /// If reading the result fails the error is returned and the measurement stays pending, so
    /// the next call reads again.
    pub async fn is_data_ready(&mut self) -> Icp101xxResult<bool, B::Error> {
        Ok(self.poll().await?.is_some())
    }

    async fn poll(&mut self) -> Icp101xxResult<Option<Measurement>, B::Error> {
        match self.state {
            MeasurementState::Idle => Ok(None),
            MeasurementState::Ready => Ok(self.last_measurement),
            MeasurementState::Pending { started_at_ms, duration_ms, .. } => {
                if elapsed_ms(started_at_ms, self.clock.now_ms()) < duration_ms as u64 {
                    return Ok(None);
                }

                let raw = self.bus.fetch::<Sample>().await.map_err(|e| {
                    warn!("reading measurement result failed");
                    e
                })?;
                let measurement = self.calibration_data.compensate(raw);
                debug!(
                    "measured {} C, {} Pa",
                    measurement.temperature_celsius(),
                    measurement.pressure_pascal()
                );

                self.last_measurement = Some(measurement);
                self.state = MeasurementState::Ready;

                Ok(Some(measurement))
            }
        }
    }

    /// Performs a complete measurement in `mode`.
    ///
    /// Sleeps for the conversion time, then polls until the result is in. Between polls it
    /// sleeps for the configured [`poll interval`](Configuration::poll_interval_us).
    pub async fn measure<D: DelayNs>(
        &mut self,
        mode: MeasurementMode,
        delay: &mut D,
    ) -> Icp101xxResult<Measurement, B::Error> {
        let duration_ms = self.start_measurement(mode).await?;
        delay.delay_ms(duration_ms as u32).await;

        loop {
            if let Some(measurement) = self.poll().await? {
                return Ok(measurement);
            }

            if self.config.poll_interval_us > 0 {
                delay.delay_us(self.config.poll_interval_us).await;
            }
        }
    }

    /// Performs a complete measurement in the configured mode.
    pub async fn measure_default<D: DelayNs>(
        &mut self,
        delay: &mut D,
    ) -> Icp101xxResult<Measurement, B::Error> {
        self.measure(self.config.mode, delay).await
    }

    pub fn state(&self) -> MeasurementState {
        self.state
    }

    /// The most recent completed measurement, if any.
    pub fn last_measurement(&self) -> Option<Measurement> {
        self.last_measurement
    }

    pub fn temperature_celsius(&self) -> Option<f32> {
        self.last_measurement.map(|m| m.temperature_celsius())
    }

    pub fn temperature_fahrenheit(&self) -> Option<f32> {
        self.last_measurement.map(|m| m.temperature_fahrenheit())
    }

    pub fn pressure_pascal(&self) -> Option<f32> {
        self.last_measurement.map(|m| m.pressure_pascal())
    }

    pub fn calibration(&self) -> &CalibrationData {
        &self.calibration_data
    }

    /// Destroys the driver and gives back the bus.
    pub fn release(self) -> B {
        self.bus
    }
}
