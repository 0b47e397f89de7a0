/// Monotonic millisecond time source used to time conversions.
///
/// Only differences between readings are used, so the epoch is irrelevant and the counter may
/// wrap.
pub trait Clock {
    fn now_ms(&mut self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &mut C {
    fn now_ms(&mut self) -> u64 {
        (**self).now_ms()
    }
}

/// [`Clock`] backed by [`embassy_time::Instant`].
#[cfg(feature = "embassy-time")]
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbassyClock;

#[cfg(feature = "embassy-time")]
impl Clock for EmbassyClock {
    fn now_ms(&mut self) -> u64 {
        embassy_time::Instant::now().as_millis()
    }
}

/// Milliseconds elapsed from `start` to `now`, tolerant of counter wrap-around.
pub(crate) fn elapsed_ms(start: u64, now: u64) -> u64 {
    now.wrapping_sub(start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_across_wrap() {
        assert_eq!(5, elapsed_ms(u64::MAX - 2, 2));
        assert_eq!(0, elapsed_ms(42, 42));
        assert_eq!(95, elapsed_ms(1_000, 1_095));
    }
}
