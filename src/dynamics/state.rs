use nalgebra::Vector3;

/// Pose and its derivatives for one vehicle.
///
/// Translation is in the world frame with `z` up. Rotation is stored as roll,
/// pitch and yaw Euler angles in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationState {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
    pub acceleration: Vector3<f64>,
    /// Roll, pitch, yaw.
    pub euler: Vector3<f64>,
    pub euler_rates: Vector3<f64>,
    pub euler_accel: Vector3<f64>,
    /// Whether the vehicle has left the ground.
    pub airborne: bool,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
            acceleration: Vector3::zeros(),
            euler: Vector3::zeros(),
            euler_rates: Vector3::zeros(),
            euler_accel: Vector3::zeros(),
            airborne: false,
        }
    }
}

impl SimulationState {
    /// Create a state at rest with the given pose.
    pub fn at_rest(position: Vector3<f64>, euler: Vector3<f64>, airborne: bool) -> Self {
        Self {
            position,
            euler,
            airborne,
            ..Self::default()
        }
    }

    pub fn telemetry(&self) -> Telemetry {
        Telemetry {
            angular_velocity: self.euler_rates,
            euler_angles: self.euler,
            velocity: self.velocity,
            position: self.position,
        }
    }
}

/// The read-back view of a [`SimulationState`] polled by renderers and
/// collision layers after every update.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Telemetry {
    /// Euler angle rates in rad/s.
    pub angular_velocity: Vector3<f64>,
    pub euler_angles: Vector3<f64>,
    pub velocity: Vector3<f64>,
    pub position: Vector3<f64>,
}

impl Telemetry {
    /// Angular velocity, Euler angles, velocity and position as plain arrays.
    pub fn to_arrays(&self) -> [[f64; 3]; 4] {
        [
            self.angular_velocity.into(),
            self.euler_angles.into(),
            self.velocity.into(),
            self.position.into(),
        ]
    }
}
