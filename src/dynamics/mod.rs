use crate::{
    airframe::{Airframe, ForceTerms},
    Error, Result,
};
use nalgebra::Vector3;

pub mod integrator;
pub use integrator::G;

mod state;
pub use state::{SimulationState, Telemetry};

/// Flight dynamics for one vehicle.
///
/// `Dynamics` owns the airframe, its [`SimulationState`] and the most recent
/// motor command. The host calls [`Dynamics::set_motors`] and
/// [`Dynamics::update`] once per fixed tick, then reads the result back with
/// [`Dynamics::telemetry`].
///
/// ```
/// use multirotor_dynamics::{Dynamics, Multirotor};
///
/// let mut dynamics = Dynamics::new(Multirotor::iris()).unwrap();
/// dynamics.init([0., 0., 0.], [0., 0., 0.], true).unwrap();
///
/// dynamics.set_motors([0.6; 4]).unwrap();
/// for _ in 0..100 {
///     dynamics.update(0.001).unwrap();
/// }
///
/// let telemetry = dynamics.telemetry();
/// assert!(telemetry.velocity.z > 0.);
/// ```
#[derive(Clone, Debug)]
pub struct Dynamics<A, const N: usize> {
    airframe: A,
    state: SimulationState,
    motors: [f64; N],
}

impl<A, const N: usize> Dynamics<A, N>
where
    A: Airframe<N>,
{
    /// Create a grounded vehicle at the origin with its motors stopped.
    pub fn new(airframe: A) -> Result<Self> {
        airframe.parameters().validate()?;
        Ok(Self {
            airframe,
            state: SimulationState::default(),
            motors: [0.; N],
        })
    }

    /// Reset the pose, zeroing every velocity and acceleration.
    ///
    /// `airborne` starts the vehicle in free flight instead of resting on the
    /// ground. The motor command is kept.
    pub fn init(&mut self, position: [f64; 3], rotation: [f64; 3], airborne: bool) -> Result<()> {
        if position.iter().any(|v| !v.is_finite()) {
            return Err(Error::NonFinite("initial position"));
        }
        if rotation.iter().any(|v| !v.is_finite()) {
            return Err(Error::NonFinite("initial rotation"));
        }

        self.state = SimulationState::at_rest(position.into(), rotation.into(), airborne);
        log::debug!(
            "init at {:?} rotation {:?} airborne={}",
            position,
            rotation,
            airborne
        );
        Ok(())
    }

    /// Set the motor command used by following updates.
    ///
    /// Every value must lie in [0, 1]. On error the previous command is kept.
    pub fn set_motors(&mut self, motors: [f64; N]) -> Result<()> {
        for (index, &value) in motors.iter().enumerate() {
            // NaN fails the range check as well
            if !(0. ..=1.).contains(&value) {
                log::warn!("rejected motor {} value {}", index, value);
                return Err(Error::MotorOutOfRange { index, value });
            }
        }
        self.motors = motors;
        Ok(())
    }

    /// Advance the simulation by one fixed step of `dt` seconds.
    ///
    /// A grounded vehicle keeps its pose with every rate and acceleration at
    /// zero until the net vertical acceleration becomes positive, at which
    /// point it lifts off. If the step would produce a non-finite state the
    /// state is left untouched.
    pub fn update(&mut self, dt: f64) -> Result<()> {
        if !dt.is_finite() || dt <= 0. {
            log::warn!("rejected time step {}", dt);
            return Err(Error::InvalidTimeStep(dt));
        }

        let terms = self.forces();
        let mut next = self.state;
        integrator::step(&mut next, terms, self.airframe.parameters(), dt);

        if !next.airborne {
            if next.acceleration.z > 0. {
                next.airborne = true;
                log::debug!("liftoff at {:?}", next.position);
            } else {
                // resting on the ground holds the whole pose
                next = SimulationState::at_rest(self.state.position, self.state.euler, false);
            }
        }

        if !is_finite(&next) {
            log::warn!("update produced a non-finite state, keeping previous state");
            return Err(Error::NonFinite("state"));
        }

        log::trace!(
            "dt={} position={:?} euler={:?}",
            dt,
            next.position,
            next.euler
        );
        self.state = next;
        Ok(())
    }

    /// The unscaled force terms for the current motor command.
    pub fn forces(&self) -> ForceTerms {
        self.airframe.forces(&self.motors)
    }

    /// Angular velocity, Euler angles, velocity and position of the vehicle.
    pub fn telemetry(&self) -> Telemetry {
        self.state.telemetry()
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn airframe(&self) -> &A {
        &self.airframe
    }

    pub fn motors(&self) -> &[f64; N] {
        &self.motors
    }

    pub fn is_airborne(&self) -> bool {
        self.state.airborne
    }
}

fn is_finite(state: &SimulationState) -> bool {
    let vectors: [&Vector3<f64>; 6] = [
        &state.position,
        &state.velocity,
        &state.acceleration,
        &state.euler,
        &state.euler_rates,
        &state.euler_accel,
    ];
    vectors
        .iter()
        .all(|vector| vector.iter().all(|value| value.is_finite()))
}
