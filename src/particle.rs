use crate::correction::BodyState;
use crate::vector::Vector;

/// Trait to describe a body of the simulation, consisting of a [position](Particle::position),
/// a [velocity](Particle::velocity), a [mass](Particle::mass) and a mutable
/// [acceleration](Particle::acceleration) accumulator.
///
/// The acceleration accumulator is expected to hold the Newtonian acceleration of the body
/// when a [correction model](crate::correction::Correction) is applied; the model adds its
/// relativistic correction to it through [`set_acceleration`](Particle::set_acceleration).
///
/// #### Deriving:
///
/// Used when the type has fields named `position`, `velocity`, `mass` and `acceleration`:
///
/// ```
/// # use perihelion::prelude::*;
/// # use glam::DVec3;
/// #
/// #[derive(Particle)]
/// struct Body {
///     position: DVec3,
///     velocity: DVec3,
///     mass: f64,
///     acceleration: DVec3,
/// //  ...
/// }
/// ```
/// #### Manual implementation:
///
/// Used when the type cannot directly provide the fields above.
///
/// ```
/// # use perihelion::prelude::*;
/// # use glam::DVec3;
/// #
/// struct Body {
///     state: [DVec3; 3],
///     mass: f64,
/// //  ...
/// }
///
/// impl Particle for Body {
///     type Vector = DVec3;
///
///     fn position(&self) -> DVec3 {
///         self.state[0]
///     }
///
///     fn velocity(&self) -> DVec3 {
///         self.state[1]
///     }
///
///     fn mass(&self) -> f64 {
///         self.mass
///     }
///
///     fn acceleration(&self) -> DVec3 {
///         self.state[2]
///     }
///
///     fn set_acceleration(&mut self, acceleration: DVec3) {
///         self.state[2] = acceleration;
///     }
/// }
/// ```
///
/// If you can't implement [`Particle`] on a type, you can use the fact that it is implemented
/// for tuples of three vectors and a scalar instead of creating an intermediate type.
///
/// ```
/// # use perihelion::prelude::*;
/// # use glam::DVec3;
/// let particle = (DVec3::ONE, DVec3::X, 5.0, DVec3::ZERO);
///
/// assert_eq!(particle.position(), DVec3::ONE);
/// assert_eq!(particle.velocity(), DVec3::X);
/// assert_eq!(particle.mass(), 5.0);
/// ```
pub trait Particle {
    /// Type of the [position](Particle::position), [velocity](Particle::velocity) and
    /// [acceleration](Particle::acceleration) vectors.
    type Vector;

    /// The position of the body in space.
    fn position(&self) -> Self::Vector;

    /// The velocity of the body.
    fn velocity(&self) -> Self::Vector;

    /// The mass of the body. Non-negative.
    fn mass(&self) -> f64;

    /// The accumulated acceleration of the body.
    fn acceleration(&self) -> Self::Vector;

    /// Overwrites the accumulated acceleration of the body.
    fn set_acceleration(&mut self, acceleration: Self::Vector);
}

/// Conversion to a [`BodyState`], the per-call snapshot correction models read from.
pub(crate) trait IntoBodyState: Particle
where
    Self::Vector: Vector,
{
    #[inline]
    fn body_state(&self) -> BodyState {
        BodyState {
            position: self.position().into_internal(),
            velocity: self.velocity().into_internal(),
            mass: self.mass(),
        }
    }
}

impl<P> IntoBodyState for P
where
    P: Particle,
    P::Vector: Vector,
{
}

impl<V: Clone> Particle for (V, V, f64, V) {
    type Vector = V;

    #[inline]
    fn position(&self) -> Self::Vector {
        self.0.clone()
    }

    #[inline]
    fn velocity(&self) -> Self::Vector {
        self.1.clone()
    }

    #[inline]
    fn mass(&self) -> f64 {
        self.2
    }

    #[inline]
    fn acceleration(&self) -> Self::Vector {
        self.3.clone()
    }

    #[inline]
    fn set_acceleration(&mut self, acceleration: Self::Vector) {
        self.3 = acceleration;
    }
}
