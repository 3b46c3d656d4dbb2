//! Fixed-step rigid-body integration for multirotors.
//!
//! The equations of motion follow Bouabdallah, Murrieri and Siegwart,
//! "Design and Control of an Indoor Micro Quadrotor" (ICRA 2004), eqn. 12.

use super::SimulationState;
use crate::{airframe::ForceTerms, Parameters};
use nalgebra::Vector3;
use num_traits::Float;

/// Standard gravity in m/s^2.
pub const G: f64 = 9.80665;

/// Force terms scaled by the thrust and drag coefficients (eqn. 5).
pub fn scale(terms: ForceTerms, params: &Parameters) -> ForceTerms {
    ForceTerms {
        u1: terms.u1 * params.b(),
        u2: terms.u2 * params.b(),
        u3: terms.u3 * params.b(),
        u4: terms.u4 * params.d(),
        omega: terms.omega,
    }
}

/// Calculate the translational and angular accelerations
/// for a state under already scaled force terms.
pub fn accelerations(
    state: &SimulationState,
    scaled: &ForceTerms,
    params: &Parameters,
) -> (Vector3<f64>, Vector3<f64>) {
    let (sin_phi, cos_phi) = Float::sin_cos(state.euler.x);
    let (sin_theta, cos_theta) = Float::sin_cos(state.euler.y);
    let (sin_psi, cos_psi) = Float::sin_cos(state.euler.z);

    // Thrust acts along body z, rotated into the world frame
    let thrust = scaled.u1 / params.m();
    let linear = Vector3::new(
        (cos_phi * sin_theta * cos_psi + sin_phi * sin_psi) * thrust,
        (cos_phi * sin_theta * sin_psi - sin_phi * cos_psi) * thrust,
        cos_phi * cos_theta * thrust - G,
    );

    let (ix, iy, iz, jr) = (params.ix(), params.iy(), params.iz(), params.jr());
    let rates = state.euler_rates;
    let (phid, thetad, psid) = (rates.x, rates.y, rates.z);

    let angular = Vector3::new(
        thetad * psid * (iy - iz) / ix - jr / ix * thetad * scaled.omega
            + params.l() / ix * scaled.u2,
        phid * psid * (iz - ix) / iy + jr / iy * phid * scaled.omega + params.l() / iy * scaled.u3,
        phid * thetad * (ix - iy) / iz + scaled.u4 / iz,
    );

    (linear, angular)
}

/// Advance `state` by `dt` seconds with one explicit Euler step.
///
/// Derivatives are evaluated at the start of the step, so position moves with
/// the pre-step velocity and the Euler angles with the pre-step rates.
pub fn step(state: &mut SimulationState, terms: ForceTerms, params: &Parameters, dt: f64) {
    let scaled = scale(terms, params);
    let (linear, angular) = accelerations(state, &scaled, params);

    state.position += state.velocity * dt;
    state.velocity += linear * dt;
    state.acceleration = linear;

    state.euler += state.euler_rates * dt;
    state.euler_rates += angular * dt;
    state.euler_accel = angular;
}

#[cfg(test)]
mod tests {
    use super::{accelerations, scale, step, G};
    use crate::{airframe::ForceTerms, dynamics::SimulationState, Parameters};
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use core::f64::consts::FRAC_PI_2;
    use nalgebra::Vector3;

    fn params() -> Parameters {
        Parameters::new(1e-5, 1e-6, 2., 0.5, 0.02, 0.03, 0.04, 1e-3).unwrap()
    }

    #[test]
    fn scales_by_thrust_and_drag() {
        let terms = ForceTerms {
            u1: 10.,
            u2: 20.,
            u3: 30.,
            u4: 40.,
            omega: 5.,
        };
        let scaled = scale(terms, &params());
        assert_relative_eq!(scaled.u1, 1e-4);
        assert_relative_eq!(scaled.u2, 2e-4);
        assert_relative_eq!(scaled.u3, 3e-4);
        assert_relative_eq!(scaled.u4, 4e-5);
        assert_eq!(scaled.omega, 5.);
    }

    #[test]
    fn free_fall() {
        let mut state = SimulationState::at_rest(Vector3::new(0., 0., 10.), Vector3::zeros(), true);
        step(&mut state, ForceTerms::default(), &params(), 0.01);

        assert_eq!(state.acceleration, Vector3::new(0., 0., -G));
        assert_abs_diff_eq!(state.velocity.z, -G * 0.01, epsilon = 1e-15);
        // Explicit Euler moves position with the pre-step velocity
        assert_eq!(state.position.z, 10.);
    }

    #[test]
    fn pitched_thrust_accelerates_forward() {
        let state = SimulationState::at_rest(
            Vector3::zeros(),
            Vector3::new(0., FRAC_PI_2, 0.),
            true,
        );
        let scaled = ForceTerms {
            u1: 4.,
            ..ForceTerms::default()
        };
        let (linear, _) = accelerations(&state, &scaled, &params());
        assert_relative_eq!(linear.x, 2., epsilon = 1e-12);
        assert_abs_diff_eq!(linear.y, 0., epsilon = 1e-12);
        assert_abs_diff_eq!(linear.z, -G, epsilon = 1e-12);
    }

    #[test]
    fn rolled_thrust_accelerates_right() {
        let state = SimulationState::at_rest(
            Vector3::zeros(),
            Vector3::new(FRAC_PI_2, 0., 0.),
            true,
        );
        let scaled = ForceTerms {
            u1: 4.,
            ..ForceTerms::default()
        };
        let (linear, _) = accelerations(&state, &scaled, &params());
        assert_relative_eq!(linear.y, -2., epsilon = 1e-12);
    }

    #[test]
    fn torques_scale_with_arm_and_inertia() {
        let params = params();
        let state = SimulationState::default();
        let scaled = ForceTerms {
            u2: 0.1,
            u3: 0.2,
            u4: 0.3,
            ..ForceTerms::default()
        };
        let (_, angular) = accelerations(&state, &scaled, &params);
        assert_relative_eq!(angular.x, 0.5 * 0.1 / 0.02, max_relative = 1e-12);
        assert_relative_eq!(angular.y, 0.5 * 0.2 / 0.03, max_relative = 1e-12);
        assert_relative_eq!(angular.z, 0.3 / 0.04, max_relative = 1e-12);
    }

    #[test]
    fn gyroscopic_coupling() {
        let params = params();
        let mut state = SimulationState::default();
        state.euler_rates = Vector3::new(0., 2., 0.);
        let scaled = ForceTerms {
            omega: 100.,
            ..ForceTerms::default()
        };

        // A pitching vehicle with net rotor momentum picks up roll acceleration
        let (_, angular) = accelerations(&state, &scaled, &params);
        assert_relative_eq!(angular.x, -1e-3 / 0.02 * 2. * 100., max_relative = 1e-12);
        assert_eq!(angular.y, 0.);
        assert_eq!(angular.z, 0.);

        // And a rolling one picks up pitch acceleration with the opposite sign
        state.euler_rates = Vector3::new(2., 0., 0.);
        let (_, angular) = accelerations(&state, &scaled, &params);
        assert_eq!(angular.x, 0.);
        assert_relative_eq!(angular.y, 1e-3 / 0.03 * 2. * 100., max_relative = 1e-12);
        assert_eq!(angular.z, 0.);
    }
}
