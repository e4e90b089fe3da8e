use super::{BodyState, Correction};

use glam::DVec3;

/// Cap on the number of fixed-point rounds per call.
const MAX_ROUNDS: usize = 10;

/// Squared relative residual below which the iteration is considered converged.
const RESIDUAL_TOLERANCE: f64 = 1E-30;

/// Scratch buffers of the [`NBody`] model, one entry per body.
///
/// Growth is monotonic: buffers are reallocated when a call sees more bodies
/// than ever before and never shrink, so a simulation with a stable body count
/// allocates exactly once. The first `n` entries of every buffer are recomputed
/// from scratch on each call; contents do not survive growth.
#[derive(Default)]
struct CorrectionBuffers {
    allocated: usize,
    constant: Vec<DVec3>,
    newtonian: Vec<DVec3>,
    new_iterate: Vec<DVec3>,
    old_iterate: Vec<DVec3>,
}

impl CorrectionBuffers {
    fn ensure(&mut self, n: usize) {
        if n > self.allocated {
            self.constant.resize(n, DVec3::ZERO);
            self.newtonian.resize(n, DVec3::ZERO);
            self.new_iterate.resize(n, DVec3::ZERO);
            self.old_iterate.resize(n, DVec3::ZERO);
            self.allocated = n;
        }
    }
}

/// Implicit N-body 1PN [correction model](Correction), following the
/// Einstein–Infeld–Hoffmann equations of motion (see e.g.
/// [Newhall et al. 1983](https://ui.adsabs.harvard.edu/abs/1983A%26A...125..150N)).
///
/// Accounts for the pairwise relativistic interaction of every pair of bodies, with no
/// assumption on their masses. The 1PN acceleration of a body depends on the total
/// acceleration of every other body, so the model solves for all corrections at once
/// with a fixed-point iteration seeded by the Newtonian accelerations.
///
/// Each call costs O(N³) in the constant-term phase and O(N²) per iteration round,
/// which is the accepted price of correctness at the body counts this model targets
/// (tens of bodies). With the `parallel` feature enabled, the constant-term phase is
/// computed on multiple threads with identical results.
///
/// # Example
/// ```
/// # use perihelion::prelude::*;
/// # use glam::DVec3;
/// let bodies = [
///     BodyState { position: DVec3::ZERO, velocity: DVec3::ZERO, mass: 1.0 },
///     BodyState { position: DVec3::X, velocity: DVec3::Y, mass: 1E-6 },
/// ];
/// // Newtonian accelerations, usually computed by the host simulation.
/// let mut accelerations = [DVec3::X * 1E-6, DVec3::NEG_X];
///
/// let mut model = implicit::NBody::new(1.0, 1E4);
/// model.correct(&bodies, &mut accelerations);
///
/// assert!(model.converged());
/// ```
pub struct NBody {
    /// Gravitational constant of the simulation.
    pub g: f64,
    /// Speed of light in simulation units. Must be positive and consistent with
    /// the units of `g`, the masses and the positions.
    pub c: f64,
    /// Set when the host's gravity solver omits the direct Newtonian term between
    /// bodies 0 and 1 from the accelerations, as some symplectic integrators do when
    /// that pair is handled by their Kepler step. The model then reconstructs the
    /// term internally so the iteration sees the true Newtonian baseline.
    pub missing_front_pair: bool,
    buffers: CorrectionBuffers,
    converged: bool,
}

impl NBody {
    /// Creates a new [`NBody`] model with the given gravitational constant and speed
    /// of light.
    ///
    /// The returned model allocates nothing until its first call and is meant to live
    /// as long as the simulation it corrects.
    pub fn new(g: f64, c: f64) -> Self {
        Self {
            g,
            c,
            missing_front_pair: false,
            buffers: CorrectionBuffers::default(),
            converged: false,
        }
    }

    /// Whether the fixed-point iteration of the last call reached the residual
    /// tolerance before the round cap.
    ///
    /// A non-converged call is not an error: the last iterate is used as the best
    /// available approximation. This accessor exists for diagnostics only.
    pub const fn converged(&self) -> bool {
        self.converged
    }
}

impl Correction for NBody {
    fn correct(&mut self, bodies: &[BodyState], accelerations: &mut [DVec3]) {
        let n = bodies.len();
        let accelerations = &mut accelerations[..n];

        let (g, c) = (self.g, self.c);
        let c2_inv = 1.0 / (c * c);

        let buffers = &mut self.buffers;
        buffers.ensure(n);

        buffers.newtonian[..n].copy_from_slice(accelerations);
        if self.missing_front_pair && n > 1 {
            // Direct 0-1 Newtonian term, suppressed by the host's own solver.
            let dr = bodies[0].position - bodies[1].position;
            let r2 = dr.length_squared();
            let prefac = -g / (r2 * r2.sqrt());

            buffers.newtonian[0] += prefac * bodies[1].mass * dr;
            buffers.newtonian[1] -= prefac * bodies[0].mass * dr;
        }

        accumulate_constant_terms(&mut buffers.constant[..n], bodies, g, c2_inv);

        buffers.new_iterate[..n].fill(DVec3::ZERO);
        buffers.old_iterate[..n].fill(DVec3::ZERO);

        self.converged = false;
        for _ in 0..MAX_ROUNDS {
            std::mem::swap(&mut buffers.old_iterate, &mut buffers.new_iterate);
            buffers.new_iterate[..n].fill(DVec3::ZERO);

            for i in 0..n {
                let a_i = buffers.newtonian[i] + buffers.constant[i] + buffers.old_iterate[i];

                for j in (i + 1)..n {
                    let a_j = buffers.newtonian[j] + buffers.constant[j] + buffers.old_iterate[j];

                    let dr = bodies[i].position - bodies[j].position;
                    let r2 = dr.length_squared();
                    let r = r2.sqrt();

                    let prefac1 = g * c2_inv / (2.0 * r2 * r);
                    let prefac2 = 3.5 * g * c2_inv / r;

                    let da_i = dr.dot(a_i);
                    let da_j = dr.dot(a_j);

                    buffers.new_iterate[i] += bodies[j].mass * (prefac1 * da_j * dr + prefac2 * a_j);
                    buffers.new_iterate[j] -= bodies[i].mass * (prefac1 * da_i * dr + prefac2 * a_i);
                }
            }

            // Non-finite residuals from degenerate pairs are excluded so they cannot
            // mask convergence of the remaining bodies.
            let mut residual = 0.0;
            for i in 0..n {
                let delta = buffers.new_iterate[i] - buffers.old_iterate[i];
                let d = delta.length_squared() / buffers.new_iterate[i].length_squared();

                if d.is_finite() && d > residual {
                    residual = d;
                }
            }
            if residual < RESIDUAL_TOLERANCE {
                self.converged = true;
                break;
            }
        }

        // The Newtonian snapshot is already present in the accelerations, so only the
        // correction itself is added.
        for (i, acceleration) in accelerations.iter_mut().enumerate() {
            *acceleration += buffers.constant[i] + buffers.new_iterate[i];
        }
    }
}

/// Constant part of the 1PN correction of body `i`: every term of its pairwise
/// interactions that does not depend on the accelerations being solved for.
fn constant_term(i: usize, bodies: &[BodyState], g: f64, c2_inv: f64) -> DVec3 {
    let body = bodies[i];
    let mut term = DVec3::ZERO;

    for (j, other) in bodies.iter().enumerate() {
        if j == i {
            continue;
        }

        // Potential sums over all companions of i and j, recomputed for every pair.
        let mut a1 = 0.0;
        let mut a2 = 0.0;
        for (k, third) in bodies.iter().enumerate() {
            if k != i {
                a1 += g * third.mass / (body.position - third.position).length();
            }
            if k != j {
                a2 += g * third.mass / (third.position - other.position).length();
            }
        }

        let dr = body.position - other.position;
        let r2 = dr.length_squared();
        let r = r2.sqrt();
        let r3_inv = 1.0 / (r2 * r);

        let vi2 = body.velocity.length_squared();
        let vj2 = other.velocity.length_squared();
        let vij = body.velocity.dot(other.velocity);
        let projection = dr.dot(other.velocity);

        let factor1 =
            c2_inv * (4.0 * a1 + a2 - vi2 - 2.0 * vj2 + 4.0 * vij + 1.5 * projection * projection / r2);
        let factor2 = c2_inv * dr.dot(4.0 * body.velocity - 3.0 * other.velocity);

        let dv = body.velocity - other.velocity;
        term += g * other.mass * r3_inv * (factor1 * dr + factor2 * dv);
    }

    term
}

#[cfg(not(feature = "parallel"))]
fn accumulate_constant_terms(constant: &mut [DVec3], bodies: &[BodyState], g: f64, c2_inv: f64) {
    for (i, term) in constant.iter_mut().enumerate() {
        *term = constant_term(i, bodies, g, c2_inv);
    }
}

#[cfg(feature = "parallel")]
fn accumulate_constant_terms(constant: &mut [DVec3], bodies: &[BodyState], g: f64, c2_inv: f64) {
    use rayon::iter::{IndexedParallelIterator, IntoParallelRefMutIterator, ParallelIterator};

    constant
        .par_iter_mut()
        .enumerate()
        .for_each(|(i, term)| *term = constant_term(i, bodies, g, c2_inv));
}
