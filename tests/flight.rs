use approx::assert_abs_diff_eq;
use multirotor_dynamics::{
    control::{Correction, PidController},
    Airframe, Dynamics, Multirotor, Parameters, SimulationState, G,
};
use nalgebra::Vector3;

fn iris() -> Dynamics<Multirotor<4>, 4> {
    Dynamics::new(Multirotor::iris()).unwrap()
}

fn run(motors: &[[f64; 4]], dts: &[f64]) -> Vec<SimulationState> {
    let mut dynamics = iris();
    dynamics.init([0., 0., 5.], [0.05, -0.02, 0.1], true).unwrap();

    let mut trajectory = Vec::new();
    for (&command, &dt) in motors.iter().zip(dts) {
        dynamics.set_motors(command).unwrap();
        dynamics.update(dt).unwrap();
        trajectory.push(*dynamics.state());
    }
    trajectory
}

#[test]
fn zero_input_on_ground_is_stable() {
    let mut dynamics = iris();
    dynamics.init([3., 4., 0.], [0., 0., 1.], false).unwrap();
    dynamics.set_motors([0.; 4]).unwrap();

    for _ in 0..10_000 {
        dynamics.update(0.001).unwrap();
    }

    let telemetry = dynamics.telemetry();
    assert_eq!(telemetry.position.x, 3.);
    assert_eq!(telemetry.position.y, 4.);
    assert_eq!(telemetry.velocity.x, 0.);
    assert_eq!(telemetry.velocity.y, 0.);
}

#[test]
fn free_fall_accelerates_at_g() {
    let mut dynamics = iris();
    dynamics.init([0., 0., 50.], [0., 0., 0.], true).unwrap();
    dynamics.update(0.001).unwrap();

    assert_abs_diff_eq!(dynamics.state().acceleration.z, -G, epsilon = 1e-9);
}

#[test]
fn trajectories_are_deterministic() {
    let motors: Vec<[f64; 4]> = (0..500)
        .map(|i| {
            let wobble = (i % 7) as f64 * 0.01;
            [0.55 + wobble, 0.56, 0.57 - wobble, 0.55]
        })
        .collect();
    let dts: Vec<f64> = (0..500).map(|i| 0.001 + (i % 3) as f64 * 0.0005).collect();

    assert_eq!(run(&motors, &dts), run(&motors, &dts));
}

#[test]
fn climbs_straight_up_with_symmetric_thrust() {
    let mut dynamics = iris();
    dynamics.init([0., 0., 0.], [0., 0., 0.], true).unwrap();
    dynamics.set_motors([0.6; 4]).unwrap();

    let forces = dynamics.forces();
    assert_eq!((forces.u2, forces.u3, forces.u4), (0., 0., 0.));

    for _ in 0..100 {
        dynamics.update(0.001).unwrap();
    }

    // Net vertical acceleration from thrust and gravity
    let params = dynamics.airframe().parameters();
    let expected = forces.u1 * params.b() / params.m() - G;
    assert!(expected > 0.);

    let telemetry = dynamics.telemetry();
    assert_abs_diff_eq!(telemetry.velocity.z, expected * 0.1, epsilon = 1e-9);
    assert!(telemetry.position.z > 0.);
    assert_eq!(telemetry.position.x, 0.);
    assert_eq!(telemetry.position.y, 0.);
    assert_eq!(telemetry.angular_velocity, Vector3::zeros());
    assert_eq!(telemetry.euler_angles, Vector3::zeros());
}

#[test]
fn pid_holds_altitude() {
    let params = Parameters::iris();
    let quad = Multirotor::quad_x(params, 15000.).unwrap();
    let mut dynamics = Dynamics::new(quad).unwrap();
    dynamics.init([0., 0., 0.], [0., 0., 0.], false).unwrap();

    let dt = 0.001;
    let mut controller = PidController::<1>::new(0.4, 0.6, 0., dt);
    let hover = 0.5625;
    for _ in 0..20_000 {
        let z = dynamics.state().position.z;
        let [correction] = controller.correction(&[2.], &[z]);
        let motor = (hover + correction).clamp(0., 1.);
        dynamics.set_motors([motor; 4]).unwrap();
        dynamics.update(dt).unwrap();
    }

    // Proportional-derivative control settles slightly above the target
    // because the feed-forward hover command is a little high
    assert!(dynamics.is_airborne());
    assert_abs_diff_eq!(dynamics.state().position.z, 2., epsilon = 0.1);
}

#[cfg(feature = "serde")]
#[test]
fn parameters_round_trip_through_json() {
    let params = Parameters::iris();
    let json = serde_json::to_string(&params).unwrap();
    let decoded: Parameters = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, params);
}

#[cfg(feature = "serde")]
#[test]
fn rejects_invalid_parameters_from_json() {
    let json = r#"{"b":5e-5,"d":2e-6,"m":0.0,"l":0.6,"ix":2.0,"iy":2.0,"iz":3.0,"jr":3e-4}"#;
    let err = serde_json::from_str::<Parameters>(json).unwrap_err();
    assert!(err.to_string().contains("`m`"));
}
