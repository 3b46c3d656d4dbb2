use super::{rps, Airframe, ForceTerms};
use crate::{Error, Parameters, Result};
use core::f64::consts::FRAC_1_SQRT_2;
use nalgebra::Vector3;
use num_traits::Float;

/// A single rotor's contribution to roll, pitch and yaw.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rotor {
    /// Roll, pitch and yaw factors. The yaw factor is the sign of the rotor's
    /// drag torque and doubles as its spin direction.
    pub factor: Vector3<f64>,
}

impl Rotor {
    pub fn new(roll: f64, pitch: f64, yaw: f64) -> Self {
        Self {
            factor: Vector3::new(roll, pitch, yaw),
        }
    }

    /// Create a rotor mounted at `angle` degrees from the nose, measured
    /// towards the left side of the vehicle.
    ///
    /// ```
    /// use multirotor_dynamics::airframe::Rotor;
    /// use approx::assert_abs_diff_eq;
    ///
    /// // The left rotor only contributes to roll.
    /// let left = Rotor::from_angle(90., 1.);
    /// assert_abs_diff_eq!(left.factor.x, 1., epsilon = 1e-12);
    /// assert_abs_diff_eq!(left.factor.y, 0., epsilon = 1e-12);
    /// ```
    pub fn from_angle(angle: f64, yaw_factor: f64) -> Self {
        let angle = angle.to_radians();
        Self::new(Float::sin(angle), -Float::cos(angle), yaw_factor)
    }
}

/// An airframe made of `N` rotors with identical motors.
#[derive(Clone, Debug, PartialEq)]
pub struct Multirotor<const N: usize> {
    parameters: Parameters,
    max_rpm: f64,
    rotors: [Rotor; N],
}

impl<const N: usize> Multirotor<N> {
    pub fn new(parameters: Parameters, max_rpm: f64, rotors: [Rotor; N]) -> Result<Self> {
        parameters.validate()?;
        if !max_rpm.is_finite() || max_rpm <= 0. {
            return Err(Error::InvalidParameter {
                name: "max_rpm",
                value: max_rpm,
            });
        }
        if rotors
            .iter()
            .any(|rotor| rotor.factor.iter().any(|f| !f.is_finite()))
        {
            return Err(Error::NonFinite("rotor layout"));
        }

        Ok(Self {
            parameters,
            max_rpm,
            rotors,
        })
    }

    pub fn max_rpm(&self) -> f64 {
        self.max_rpm
    }

    pub fn rotors(&self) -> &[Rotor; N] {
        &self.rotors
    }
}

impl Multirotor<4> {
    /// Create a quad in the "+" layout with rotors ordered front, left, rear, right.
    pub fn quad_plus(parameters: Parameters, max_rpm: f64) -> Result<Self> {
        Self::new(
            parameters,
            max_rpm,
            [
                Rotor::new(0., -1., -1.),
                Rotor::new(1., 0., 1.),
                Rotor::new(0., 1., -1.),
                Rotor::new(-1., 0., 1.),
            ],
        )
    }

    /// Create a quad in the "X" layout with rotors ordered
    /// front-right, rear-left, front-left, rear-right.
    pub fn quad_x(parameters: Parameters, max_rpm: f64) -> Result<Self> {
        let s = FRAC_1_SQRT_2;
        Self::new(
            parameters,
            max_rpm,
            [
                Rotor::new(-s, -s, 1.),
                Rotor::new(s, s, 1.),
                Rotor::new(s, -s, -1.),
                Rotor::new(-s, s, -1.),
            ],
        )
    }

    /// A 3DR Iris class quad with estimated constants.
    pub fn iris() -> Self {
        let s = FRAC_1_SQRT_2;
        Self {
            parameters: Parameters::iris(),
            max_rpm: 15000.,
            rotors: [
                Rotor::new(-s, -s, 1.),
                Rotor::new(s, s, 1.),
                Rotor::new(s, -s, -1.),
                Rotor::new(-s, s, -1.),
            ],
        }
    }
}

impl<const N: usize> Airframe<N> for Multirotor<N> {
    fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    fn forces(&self, motors: &[f64; N]) -> ForceTerms {
        let mut terms = ForceTerms::default();
        for (rotor, &motor) in self.rotors.iter().zip(motors) {
            let omega = rps(motor, self.max_rpm);
            let omega_squared = omega * omega;

            terms.u1 += omega_squared;
            terms.u2 += rotor.factor.x * omega_squared;
            terms.u3 += rotor.factor.y * omega_squared;
            terms.u4 += rotor.factor.z * omega_squared;
            terms.omega += rotor.factor.z * omega;
        }
        terms
    }
}
