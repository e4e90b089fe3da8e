/// Explicit correction models assuming a dominant central mass.
pub mod explicit;

/// Implicit correction model accounting for pairwise relativistic interactions among all bodies.
pub mod implicit;

use crate::particle::{IntoBodyState, Particle};
use crate::vector::Vector;

use glam::DVec3;

/// A snapshot of the dynamical state of a body, read by [correction models](Correction).
///
/// The identity of a body is its index in the slice passed to
/// [`correct`](Correction::correct); by convention index 0 is the dominant
/// central body for the [explicit](crate::correction::explicit) models.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BodyState {
    /// Position of the body.
    pub position: DVec3,
    /// Velocity of the body.
    pub velocity: DVec3,
    /// Mass of the body. Non-negative.
    pub mass: f64,
}

/// Trait for models computing the first-order post-Newtonian correction to the
/// acceleration of bodies.
///
/// A correction model is meant to be invoked once per integration step, after the
/// Newtonian accelerations have been computed by the host simulation. Models mutate
/// the accelerations in place and return nothing, so they can be registered as an
/// "additional force" callback of the host.
///
/// Models take `&mut self` because some of them (like [`implicit::NBody`]) own
/// scratch buffers that persist for the lifetime of the simulation.
pub trait Correction {
    /// Adds the relativistic correction of this model to the accelerations.
    ///
    /// `accelerations` must hold the Newtonian acceleration of each body in `bodies`,
    /// in the same order. Only the first `bodies.len()` accelerations are read and
    /// mutated, so variational or otherwise non-physical entries can be kept past the
    /// end of `bodies`.
    ///
    /// Bodies are required to have pairwise distinct positions: a vanishing separation
    /// makes the correction of the bodies involved non-finite.
    ///
    /// # Panics
    ///
    /// Panics if `accelerations` is shorter than `bodies`.
    fn correct(&mut self, bodies: &[BodyState], accelerations: &mut [DVec3]);

    /// Applies this model to the given [`Particles`](Particle), reading their state and
    /// adding the correction of the model to their acceleration.
    ///
    /// # Example
    /// ```
    /// # use perihelion::prelude::*;
    /// # use glam::DVec3;
    /// #
    /// # #[derive(Particle)]
    /// # struct Body {
    /// #     position: DVec3,
    /// #     velocity: DVec3,
    /// #     mass: f64,
    /// #     acceleration: DVec3,
    /// # }
    /// # let mut bodies: Vec<Body> = Vec::new();
    /// let mut model = implicit::NBody::new(1.0, 1E4);
    ///
    /// // Once the host has accumulated the Newtonian accelerations:
    /// model.apply(&mut bodies);
    /// ```
    #[inline]
    fn apply<P>(&mut self, particles: &mut [P])
    where
        Self: Sized,
        P: Particle,
        P::Vector: Vector,
    {
        let bodies: Vec<_> = particles.iter().map(IntoBodyState::body_state).collect();
        let mut accelerations: Vec<_> = particles
            .iter()
            .map(|particle| particle.acceleration().into_internal())
            .collect();

        self.correct(&bodies, &mut accelerations);

        for (particle, acceleration) in particles.iter_mut().zip(accelerations) {
            particle.set_acceleration(Vector::from_internal(acceleration));
        }
    }
}
