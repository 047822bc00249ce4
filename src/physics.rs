use nalgebra::Vector2;

/// Inputs of a head-on collision between car 1 and car 2.
/// Velocities are signed, positive pointing right.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionParameters {
    pub mass1: f64,
    pub mass2: f64,
    pub initial_velocity1: f64,
    pub initial_velocity2: f64,
    pub restitution: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionOutcome {
    pub final_velocity1: f64,
    pub final_velocity2: f64,
    pub kinetic_energy_loss: f64,
}

impl CollisionParameters {
    pub fn masses(&self) -> Vector2<f64> {
        Vector2::new(self.mass1, self.mass2)
    }

    pub fn initial_velocities(&self) -> Vector2<f64> {
        Vector2::new(self.initial_velocity1, self.initial_velocity2)
    }
}

impl CollisionOutcome {
    pub fn final_velocities(&self) -> Vector2<f64> {
        Vector2::new(self.final_velocity1, self.final_velocity2)
    }
}

pub fn momentum(masses: &Vector2<f64>, velocities: &Vector2<f64>) -> f64 {
    masses.dot(velocities)
}

pub fn kinetic_energy(masses: &Vector2<f64>, velocities: &Vector2<f64>) -> f64 {
    0.5 * masses.dot(&velocities.component_mul(velocities))
}

/// One dimensional restitution model.
/// Restitution outside [0, 1] is not rejected; it yields a negative loss.
pub fn solve(params: &CollisionParameters) -> CollisionOutcome {
    let (m1, m2) = (params.mass1, params.mass2);
    let (v1, v2) = (params.initial_velocity1, params.initial_velocity2);
    let e = params.restitution;
    let total_mass = m1 + m2;

    let final_velocity1 = ((m1 - e * m2) * v1 + (1. + e) * m2 * v2) / total_mass;
    let final_velocity2 = ((m2 - e * m1) * v2 + (1. + e) * m1 * v1) / total_mass;

    let masses = params.masses();
    let before = kinetic_energy(&masses, &params.initial_velocities());
    let after = kinetic_energy(&masses, &Vector2::new(final_velocity1, final_velocity2));

    CollisionOutcome {
        final_velocity1,
        final_velocity2,
        kinetic_energy_loss: before - after,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params(mass1: f64, mass2: f64, v1: f64, v2: f64, restitution: f64) -> CollisionParameters {
        CollisionParameters {
            mass1,
            mass2,
            initial_velocity1: v1,
            initial_velocity2: v2,
            restitution,
        }
    }

    fn reference() -> CollisionParameters {
        params(1200., 1000., 15., -10., 0.3)
    }

    #[test]
    fn test_reference_crash() {
        let outcome = solve(&reference());
        assert_relative_eq!(outcome.final_velocity1, 500. / 2200., epsilon = 1e-12);
        assert_relative_eq!(outcome.final_velocity2, 17000. / 2200., epsilon = 1e-12);
        assert_eq!(format!("{:.2}", outcome.final_velocity1), "0.23");
        assert_eq!(format!("{:.2}", outcome.final_velocity2), "7.73");
        assert!(outcome.kinetic_energy_loss > 0.);
        assert_relative_eq!(outcome.kinetic_energy_loss, 155113.636363, epsilon = 1e-3);
    }

    #[test]
    fn test_momentum_conserved() {
        let cases = [
            params(1200., 1000., 15., -10., 0.3),
            params(1., 1., 3., 0., 0.),
            params(5., 0.5, -2., 7., 1.),
            params(800., 2500., 30., 12., 0.65),
            params(0.1, 1e4, 100., -0.5, 0.9),
        ];
        for p in cases.iter() {
            let outcome = solve(p);
            let before = momentum(&p.masses(), &p.initial_velocities());
            let after = momentum(&p.masses(), &outcome.final_velocities());
            assert_relative_eq!(before, after, epsilon = 1e-9 * before.abs().max(1.));
        }
    }

    #[test]
    fn test_energy_never_gained_for_physical_restitution() {
        for step in 0..=10 {
            let e = step as f64 / 10.;
            let outcome = solve(&params(1200., 1000., 15., -10., e));
            assert!(
                outcome.kinetic_energy_loss >= -1e-6,
                "restitution {} gained energy: {}",
                e,
                outcome.kinetic_energy_loss
            );
        }
    }

    #[test]
    fn test_elastic_keeps_energy() {
        let outcome = solve(&params(1200., 1000., 15., -10., 1.));
        assert_relative_eq!(outcome.kinetic_energy_loss, 0., epsilon = 1e-6);

        // Equal masses swap velocities.
        let outcome = solve(&params(2., 2., 4., -1., 1.));
        assert_relative_eq!(outcome.final_velocity1, -1., epsilon = 1e-12);
        assert_relative_eq!(outcome.final_velocity2, 4., epsilon = 1e-12);
    }

    #[test]
    fn test_perfectly_inelastic_moves_together() {
        let outcome = solve(&params(1200., 1000., 15., -10., 0.));
        assert_relative_eq!(outcome.final_velocity1, outcome.final_velocity2, epsilon = 1e-12);
        assert_relative_eq!(outcome.final_velocity1, 8000. / 2200., epsilon = 1e-12);
    }

    #[test]
    fn test_restitution_above_one_gains_energy() {
        let outcome = solve(&params(1200., 1000., 15., -10., 1.5));
        assert!(outcome.kinetic_energy_loss < 0.);
    }
}
