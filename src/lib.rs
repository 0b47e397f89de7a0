//! Async `no_std` driver for the TDK InvenSense ICP-101xx barometric pressure and temperature
//! sensors (ICP-10100, ICP-10101, ICP-10110, ICP-10111), built on [`embedded-hal-async`].
//!
//! [`embedded-hal-async`]: https://docs.rs/embedded-hal-async
//!
//! A measurement is started with [`Icp101xx::start_measurement`], which returns the conversion
//! time of the chosen [`MeasurementMode`]. [`Icp101xx::is_data_ready`] can then be polled
//! without blocking; once the conversion time has passed it reads and compensates the result.
//! [`Icp101xx::measure`] does all of this in one call, sleeping through a
//! [`DelayNs`](embedded_hal_async::delay::DelayNs).
//!
//! ## Features
//!
//! - `embassy-time`: Provides [`clock::EmbassyClock`].
//! - `crc`: Checks received checksums against computed ones.
//! - `defmt`: Enables logging using the `defmt` framework.
//! - `log`: Enables logging using the `log` framework.
#![cfg_attr(not(test), no_std)]

// Must stay first, the logging macros are used by the modules below.
mod fmt;

pub mod bus;
pub mod clock;
pub mod command;
pub mod config;
pub mod error;
pub mod response;
mod calibration;
mod icp101xx;
mod measurement;

#[cfg(test)]
mod testing;

pub use calibration::CalibrationData;
pub use command::MeasurementMode;
pub use error::{Icp101xxError, Icp101xxResult};
pub use icp101xx::{Icp101xx, Icp101xxI2c, MeasurementState};
pub use measurement::Measurement;
