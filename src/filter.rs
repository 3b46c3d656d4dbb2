use num_traits::{Float, FloatConst};

/// First order low-pass filter.
#[derive(Clone, Copy, Debug)]
pub struct LowPassFilter<T> {
    output: T,
    is_initialised: bool,
}

impl<T: Float> Default for LowPassFilter<T> {
    fn default() -> Self {
        Self {
            output: T::zero(),
            is_initialised: false,
        }
    }
}

impl<T> LowPassFilter<T>
where
    T: Float + FloatConst,
{
    /// Filter a new sample taken `dt` seconds after the last one.
    /// The first sample, or any sample with a zero cutoff, passes through unchanged.
    pub fn filter(&mut self, sample: T, cutoff_freq: T, dt: T) -> T {
        if !self.is_initialised {
            self.is_initialised = true;
            self.output = sample;
            return self.output;
        }

        self.output = self.output + (sample - self.output) * alpha(dt, cutoff_freq);
        self.output
    }

    pub fn output(&self) -> T {
        self.output
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Smoothing factor for a sample period `dt` and cutoff frequency (in Hz).
///
/// A non-positive cutoff or period disables filtering.
pub fn alpha<T: Float + FloatConst>(dt: T, cutoff_freq: T) -> T {
    if cutoff_freq <= T::zero() || dt <= T::zero() {
        return T::one();
    }

    let rc = T::one() / ((T::PI() + T::PI()) * cutoff_freq);
    (dt / (dt + rc)).min(T::one()).max(T::zero())
}
