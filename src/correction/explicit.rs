use super::{BodyState, Correction};

use glam::DVec3;

/// Two-body 1PN [correction model](Correction), following
/// [Benitez & Gallardo (2008)](https://doi.org/10.1007/s10569-008-9154-5).
///
/// Assumes the body at index 0 is far more massive than all others and treats every
/// other body as a perturbed two-body problem around it. The third-law reaction of
/// each correction is applied to the central body, so the mass-weighted sum of the
/// corrections vanishes.
///
/// Cheap and accurate whenever a single body dominates the dynamics, e.g. planetary
/// systems. For comparable masses, use [`implicit::NBody`](super::implicit::NBody).
pub struct TwoBody {
    /// Gravitational constant of the simulation.
    pub g: f64,
    /// Speed of light in simulation units. Must be positive and consistent with
    /// the units of `g`, the masses and the positions.
    pub c: f64,
}

impl Correction for TwoBody {
    fn correct(&mut self, bodies: &[BodyState], accelerations: &mut [DVec3]) {
        let Some((&central, orbiters)) = bodies.split_first() else {
            return;
        };
        let accelerations = &mut accelerations[..bodies.len()];

        let gm = self.g * central.mass;
        let c2 = self.c * self.c;

        for (i, body) in orbiters.iter().enumerate() {
            let dr = body.position - central.position;
            let dv = body.velocity - central.velocity;
            let r2 = dr.length_squared();
            let r = r2.sqrt();

            let alpha = gm / (r2 * r * c2);
            let beta = 4.0 * gm / r - dv.length_squared();
            let gamma = 4.0 * dr.dot(dv);

            let correction = alpha * (beta * dr + gamma * dv);

            accelerations[i + 1] += correction;
            accelerations[0] -= body.mass / central.mass * correction;
        }
    }
}

/// Modified-potential 1PN [correction model](Correction), following
/// [Nobili & Roxburgh (1986)](https://ui.adsabs.harvard.edu/abs/1986IAUS..114..105N).
///
/// Assumes the body at index 0 is the dominant central mass. Models the relativistic
/// correction as a modification of the central potential, which reproduces the secular
/// apsidal precession of the orbiters at a fraction of the cost of the velocity-dependent
/// models. No reaction is applied to the central body: the model describes a
/// potential-energy modification, not a pairwise force.
pub struct Potential {
    /// Gravitational constant of the simulation.
    pub g: f64,
    /// Speed of light in simulation units. Must be positive and consistent with
    /// the units of `g`, the masses and the positions.
    pub c: f64,
}

impl Correction for Potential {
    fn correct(&mut self, bodies: &[BodyState], accelerations: &mut [DVec3]) {
        let Some((&central, orbiters)) = bodies.split_first() else {
            return;
        };
        let accelerations = &mut accelerations[..bodies.len()];

        let gm = self.g * central.mass;
        let prefac = 6.0 * gm * gm / (self.c * self.c);

        for (i, body) in orbiters.iter().enumerate() {
            let dr = body.position - central.position;
            let r2 = dr.length_squared();

            accelerations[i + 1] -= prefac / (r2 * r2) * dr;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests;
    use super::*;

    #[test]
    fn two_body_single_body_unchanged() {
        tests::single_body_unchanged(TwoBody { g: 1.0, c: 1E4 });
    }

    #[test]
    fn potential_single_body_unchanged() {
        tests::single_body_unchanged(Potential { g: 1.0, c: 1E4 });
    }

    #[test]
    fn two_body_matches_closed_form() {
        let (g, c) = (1.0, 1E3);
        let bodies = tests::circular_orbit(1.0, 1E-6, 1.0, g);
        let mut accelerations = [DVec3::ZERO; 2];

        TwoBody { g, c }.correct(&bodies, &mut accelerations);

        // Circular orbit: dr.dot(dv) = 0, so the correction reduces to
        // gm/(r³c²)(4gm/r − v²)dr with v² = gm/r.
        let expected = 3.0 / (c * c) * DVec3::X;

        assert!((accelerations[1] - expected).length() < 1E-15 * expected.length());
        assert!((accelerations[0] + 1E-6 * expected).length() < 1E-20 * expected.length());
    }

    #[test]
    fn two_body_momentum_conserved() {
        let (g, c) = (0.5, 2E3);
        let bodies = [
            BodyState {
                position: DVec3::new(0.01, -0.02, 0.005),
                velocity: DVec3::new(-0.001, 0.002, 0.0),
                mass: 2.5,
            },
            BodyState {
                position: DVec3::new(1.3, 0.2, -0.1),
                velocity: DVec3::new(-0.3, 1.1, 0.05),
                mass: 1E-3,
            },
            BodyState {
                position: DVec3::new(-2.0, 1.5, 0.4),
                velocity: DVec3::new(0.5, -0.6, 0.2),
                mass: 4E-4,
            },
            BodyState {
                position: DVec3::new(0.3, -3.2, 1.8),
                velocity: DVec3::new(0.8, 0.1, -0.4),
                mass: 7E-5,
            },
        ];
        let mut accelerations = vec![DVec3::ZERO; bodies.len()];

        TwoBody { g, c }.correct(&bodies, &mut accelerations);

        let momentum_rate: DVec3 = bodies
            .iter()
            .zip(&accelerations)
            .map(|(body, &acceleration)| body.mass * acceleration)
            .sum();
        let scale: f64 = bodies
            .iter()
            .zip(&accelerations)
            .map(|(body, acceleration)| body.mass * acceleration.length())
            .sum();

        assert!(momentum_rate.length() < 1E-14 * scale);
    }

    #[test]
    fn potential_leaves_central_body_unchanged() {
        let (g, c) = (1.0, 1E4);
        let bodies = tests::circular_orbit(1.0, 1E-6, 2.0, g);
        let mut accelerations = [DVec3::ZERO; 2];

        Potential { g, c }.correct(&bodies, &mut accelerations);

        // −6(gm)²/(c²r⁴)·dr with gm = 1, r = 2.
        let expected = -6.0 / (c * c * 16.0) * (2.0 * DVec3::X);

        assert_eq!(accelerations[0], DVec3::ZERO);
        // Correction points towards the central body.
        assert!(accelerations[1].x < 0.0);
        assert!((accelerations[1] - expected).length() < 1E-15 * expected.length());
    }
}
