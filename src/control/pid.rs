use super::Correction;
use crate::filter::LowPassFilter;

/// Single axis PID controller with a fixed timestep.
#[derive(Clone, Copy, Debug)]
pub struct Pid {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    /// Maximum magnitude of the integral term.
    pub i_max: f64,
    /// Cutoff frequency (in Hz) of the derivative filter, zero disables filtering.
    pub filter_d_hz: f64,
    /// Timestep in seconds
    pub dt: f64,
    integrator: f64,
    error: Option<f64>,
    derivative: LowPassFilter<f64>,
}

impl Pid {
    /// Gains are given as proportional, integral, derivative.
    pub fn new(kp: f64, ki: f64, kd: f64, dt: f64) -> Self {
        Self {
            kp,
            ki,
            kd,
            i_max: f64::INFINITY,
            filter_d_hz: 0.,
            dt,
            integrator: 0.,
            error: None,
            derivative: LowPassFilter::default(),
        }
    }

    pub fn with_i_max(mut self, i_max: f64) -> Self {
        self.i_max = i_max;
        self
    }

    pub fn with_filter_d_hz(mut self, filter_d_hz: f64) -> Self {
        self.filter_d_hz = filter_d_hz;
        self
    }

    pub fn integrator(&self) -> f64 {
        self.integrator
    }

    /// Update the controller with a target and measurement and calculate the output.
    pub fn update(&mut self, target: f64, measurement: f64) -> f64 {
        // don't process inf or NaN
        if !target.is_finite() || !measurement.is_finite() {
            return 0.;
        }

        let error = target - measurement;
        let derivative = match self.error {
            Some(error_last) if self.dt > 0. => {
                let derivative = (error - error_last) / self.dt;
                self.derivative.filter(derivative, self.filter_d_hz, self.dt)
            }
            _ => 0.,
        };
        self.error = Some(error);

        if self.ki != 0. && self.dt > 0. {
            self.integrator += error * self.ki * self.dt;
            self.integrator = self.integrator.max(-self.i_max).min(self.i_max);
        } else {
            self.integrator = 0.;
        }

        self.kp * error + self.integrator + self.kd * derivative
    }

    pub fn reset(&mut self) {
        self.integrator = 0.;
        self.error = None;
        self.derivative.reset();
    }
}

/// Independent PID loops over `N` dimensions.
///
/// ```
/// use multirotor_dynamics::control::{Correction, PidController};
///
/// let mut controller = PidController::<2>::new(1., 0., 0., 0.001);
/// let correction = controller.correction(&[1., 0.], &[0., 0.5]);
/// assert_eq!(correction, [1., -0.5]);
/// ```
#[derive(Clone, Debug)]
pub struct PidController<const N: usize> {
    axes: [Pid; N],
}

impl<const N: usize> PidController<N> {
    /// Create a controller with the same gains on every axis.
    ///
    /// Gains are given as proportional, derivative, integral, which is not
    /// the order [`Pid::new`] takes them in. Use [`PidController::from_axes`]
    /// to build the axes with [`Pid::new`] instead.
    pub fn new(kp: f64, kd: f64, ki: f64, dt: f64) -> Self {
        Self::from_axes([Pid::new(kp, ki, kd, dt); N])
    }

    pub fn from_axes(axes: [Pid; N]) -> Self {
        Self { axes }
    }

    pub fn axes(&self) -> &[Pid; N] {
        &self.axes
    }

    pub fn axes_mut(&mut self) -> &mut [Pid; N] {
        &mut self.axes
    }

    pub fn reset(&mut self) {
        for axis in &mut self.axes {
            axis.reset();
        }
    }
}

impl<const N: usize> Correction<N> for PidController<N> {
    fn correction(&mut self, target: &[f64; N], actual: &[f64; N]) -> [f64; N] {
        let mut correction = [0.; N];
        for (((out, pid), &target), &actual) in
            correction.iter_mut().zip(&mut self.axes).zip(target).zip(actual)
        {
            *out = pid.update(target, actual);
        }
        correction
    }
}
