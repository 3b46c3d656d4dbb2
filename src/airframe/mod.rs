use crate::Parameters;
use core::f64::consts::PI;

mod multirotor;
pub use multirotor::{Multirotor, Rotor};

/// Unscaled generalized forces produced by a motor command.
///
/// `u1` through `u3` are later scaled by the thrust coefficient and `u4` by the
/// drag coefficient.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ForceTerms {
    /// Collective thrust.
    pub u1: f64,
    /// Roll torque.
    pub u2: f64,
    /// Pitch torque.
    pub u3: f64,
    /// Yaw (drag) torque.
    pub u4: f64,
    /// Net rotor speed in rad/s, used for gyroscopic coupling.
    pub omega: f64,
}

/// A vehicle with `N` rotors that can turn motor values into forces.
pub trait Airframe<const N: usize> {
    /// Physical constants of this vehicle.
    fn parameters(&self) -> &Parameters;

    /// Map motor values in [0, 1] to unscaled force terms.
    fn forces(&self, motors: &[f64; N]) -> ForceTerms;
}

/// Convert a motor value in [0, 1] to rotor speed in radians per second.
///
/// ```
/// use multirotor_dynamics::airframe::rps;
///
/// assert!((rps(1., 60.) - 2. * core::f64::consts::PI).abs() < 1e-12);
/// assert_eq!(rps(0., 15000.), 0.);
/// ```
pub fn rps(motor: f64, max_rpm: f64) -> f64 {
    motor * max_rpm * PI / 30.
}
