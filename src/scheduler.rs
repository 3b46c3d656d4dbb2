use crate::{airframe::Airframe, Dynamics, Error, Result};
use embedded_time::{duration::Microseconds, Clock};

/// Drives a vehicle at a fixed loop rate from a monotonic clock.
///
/// Each call to [`Scheduler::run`] samples the clock and performs one
/// [`Dynamics::update`] for every whole loop period that elapsed since the
/// previous call, carrying the remainder over to the next call.
pub struct Scheduler<C> {
    clock: C,
    loop_rate_hz: u32,
    loop_period_us: u32,
    max_steps: u32,
    last_sample_us: Option<u32>,
    accumulated_us: u32,
    tick_counter: u64,
}

impl<C> Scheduler<C>
where
    C: Clock<T = u32>,
{
    pub fn new(clock: C, loop_rate_hz: u32) -> Result<Self> {
        if loop_rate_hz == 0 || loop_rate_hz > 1_000_000 {
            return Err(Error::InvalidParameter {
                name: "loop_rate_hz",
                value: loop_rate_hz as f64,
            });
        }

        Ok(Self {
            clock,
            loop_rate_hz,
            loop_period_us: 1_000_000 / loop_rate_hz,
            max_steps: 16,
            last_sample_us: None,
            accumulated_us: 0,
            tick_counter: 0,
        })
    }

    /// Set the most steps a single call to `run` may perform before the
    /// remaining backlog is dropped.
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    /// The fixed timestep in seconds.
    pub fn dt(&self) -> f64 {
        self.loop_period_us as f64 * 1e-6
    }

    pub fn loop_rate_hz(&self) -> u32 {
        self.loop_rate_hz
    }

    /// Total number of steps performed.
    pub fn ticks(&self) -> u64 {
        self.tick_counter
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Advance `dynamics` to the current clock time, returning the number of
    /// steps performed. The first call only latches the clock.
    ///
    /// If an update fails, the steps already performed are still counted and
    /// the failed period stays in the backlog for the next call.
    pub fn run<A, const N: usize>(&mut self, dynamics: &mut Dynamics<A, N>) -> Result<u32>
    where
        A: Airframe<N>,
    {
        let now = self.micros_since_epoch()?.0;
        let last = match self.last_sample_us.replace(now) {
            Some(last) => last,
            None => return Ok(0),
        };
        self.accumulated_us = self.accumulated_us.saturating_add(now.wrapping_sub(last));

        let dt = self.dt();
        let mut steps = 0;
        while self.accumulated_us >= self.loop_period_us && steps < self.max_steps {
            if let Err(error) = dynamics.update(dt) {
                // count the steps that did run before the failure
                self.tick_counter += u64::from(steps);
                return Err(error);
            }
            self.accumulated_us -= self.loop_period_us;
            steps += 1;
        }
        self.tick_counter += u64::from(steps);

        if self.accumulated_us >= self.loop_period_us {
            // we are too far behind the clock to catch up, drop the backlog
            log::warn!(
                "dropping {} simulation steps behind the clock",
                self.accumulated_us / self.loop_period_us
            );
            self.accumulated_us %= self.loop_period_us;
        }

        Ok(steps)
    }

    fn micros_since_epoch(&mut self) -> Result<Microseconds<u32>> {
        let instant = self.clock.try_now()?;
        Microseconds::try_from(instant.duration_since_epoch()).map_err(Into::into)
    }
}
