//! # multirotor-dynamics
//! A `#![no_std]` rigid-body flight dynamics library for multirotor aircraft,
//! independent of any renderer or game engine.
//!
//! # Vehicles
//! [`Parameters`] holds the physical constants of an airframe.
//!
//! [`Airframe`](airframe::Airframe) is a trait for turning motor values into force terms
//! (see [`Multirotor`] for rotor-table implementations such as the Iris quad).
//!
//! # Simulation
//! [`Dynamics`] owns a vehicle's state and integrates it at a fixed timestep.
//!
//! [`scheduler`] drives a vehicle at a fixed loop rate from a clock.
//!
//! [`control`] contains controllers that produce corrections from target and actual state.
//!
//! ```
//! use multirotor_dynamics::{Dynamics, Multirotor, G};
//!
//! let mut dynamics = Dynamics::new(Multirotor::iris()).unwrap();
//! dynamics.init([0., 0., 10.], [0., 0., 0.], true).unwrap();
//! dynamics.update(0.001).unwrap();
//!
//! assert_eq!(dynamics.state().acceleration.z, -G);
//! ```

#![no_std]

pub mod airframe;
pub use airframe::{Airframe, ForceTerms, Multirotor, Rotor};

pub mod control;

pub mod dynamics;
pub use dynamics::{Dynamics, SimulationState, Telemetry, G};

mod error;
pub use error::{Error, ErrorKind, Result};

pub mod filter;

mod params;
pub use params::{Parameters, ParametersBuilder};

pub mod scheduler;
pub use scheduler::Scheduler;
