//! # Perihelion
//!
//! Perihelion is a crate computing first-order post-Newtonian (1PN) general-relativistic
//! corrections to the gravitational accelerations of an N-body simulation.
//!
//! ## Goals
//!
//! The main goal of this crate is to provide simulations with relativistic corrections that
//! can easily be integrated into existing N-body engines: a [correction model](correction::Correction)
//! is called once per integration step, after Newtonian gravity has been accumulated, and adds
//! its correction to the acceleration of each body in place. It does not include numerical
//! integration or Newtonian force computation and instead only focuses on the corrections.
//!
//! Three models are provided:
//! - [`explicit::TwoBody`](correction::explicit::TwoBody): closed-form correction assuming a
//!   dominant central mass, with third-law reaction.
//! - [`explicit::Potential`](correction::explicit::Potential): closed-form modified-potential
//!   correction, also central-mass-only.
//! - [`implicit::NBody`](correction::implicit::NBody): pairwise relativistic interactions
//!   among all bodies, solved with a fixed-point iteration. The model of choice when no
//!   single body dominates.
//!
//! The corrections are first order in 1/c² and assume velocities well below the speed of
//! light. Perihelion does not evolve a spacetime metric and does not resolve close encounters.
//!
//! The O(N³) constant-term phase of the implicit model can be computed on multiple CPU
//! threads thanks to [rayon](https://github.com/rayon-rs/rayon). Enable the "parallel"
//! feature to use it.
//!
//! # Using Perihelion
//!
//! ## Implementing the [`Particle`](particle::Particle) trait
//!
//! #### Deriving:
//!
//! Used in most cases, when the type has fields named `position`, `velocity`, `mass` and
//! `acceleration`:
//!
//! ```
//! # use perihelion::prelude::*;
//! # use glam::DVec3;
//! #
//! #[derive(Particle)]
//! struct Body {
//!     position: DVec3,
//!     velocity: DVec3,
//!     mass: f64,
//!     acceleration: DVec3,
//! //  ...
//! }
//! ```
//! #### Manual implementation:
//!
//! Used when the type has more complex fields and cannot directly provide the required
//! accessors. See [`Particle`](particle::Particle) for an example.
//!
//! ## Applying a correction model
//!
//! Create the model with the gravitational constant and the speed of light of your
//! simulation — in units consistent with your masses and positions — and keep it alive
//! for as long as the simulation, then call [`apply`](correction::Correction::apply)
//! every step once the Newtonian accelerations are known:
//!
//! ```
//! # use perihelion::prelude::*;
//! # use glam::DVec3;
//! #
//! # #[derive(Particle)]
//! # struct Body {
//! #     position: DVec3,
//! #     velocity: DVec3,
//! #     mass: f64,
//! #     acceleration: DVec3,
//! # }
//! # const DT: f64 = 1.0 / 60.0;
//! # let mut bodies: Vec<Body> = Vec::new();
//! let mut model = implicit::NBody::new(1.0, 1E4);
//!
//! // ... every step, after the host has accumulated Newtonian gravity:
//! model.apply(&mut bodies);
//!
//! for body in &mut bodies {
//!     body.velocity += body.acceleration * DT;
//!     body.position += body.velocity * DT;
//! }
//! ```
//!
//! Hosts that pass raw state instead of particle types can call the lower-level
//! [`correct`](correction::Correction::correct) with a slice of
//! [`BodyState`](correction::BodyState) and the matching accelerations.

#![warn(missing_docs)]

/// Trait for correction models and types implementing it for the user to choose from.
pub mod correction;

/// Trait to implement on types representing bodies of the simulation.
pub mod particle;

/// Internal representation of vectors used for the computations.
pub mod vector;

/// Derive macro for types representing bodies.
pub mod perihelion_derive {
    pub use perihelion_derive::Particle;
}

/// Everything needed to use the crate.
pub mod prelude {
    pub use crate::correction::*;
    pub use crate::particle::Particle;
    pub use crate::perihelion_derive::*;
}
