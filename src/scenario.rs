use crate::{error::CrashError, physics::CollisionParameters};
use log::warn;
use nalgebra::{Vector2, Vector3};
use std::path::PathBuf;
use std::time::Duration;

/// Everything needed to run one crash: physics inputs, starting layout, look and pacing.
#[derive(Clone, Debug, PartialEq)]
pub struct Scenario {
    pub parameters: CollisionParameters,
    /// Left edges of the cars at t = 0.
    pub start_positions: Vector2<f64>,
    /// Bottom edges of the cars.
    pub lanes: Vector2<f64>,
    /// Car length and height.
    pub car_size: Vector2<f64>,
    pub liveries: [Vector3<f32>; 2],
    pub flash_color: Vector3<f32>,
    /// Scene is [0, extent.x] by [0, extent.y].
    pub extent: Vector2<f64>,
    pub time_delta: f64,
    pub frame_count: u32,
    pub frame_interval: Duration,
    pub sound: PathBuf,
}

impl Default for Scenario {
    fn default() -> Self {
        Scenario {
            parameters: CollisionParameters {
                mass1: 1200.,
                mass2: 1000.,
                initial_velocity1: 15.,
                initial_velocity2: -10.,
                restitution: 0.3,
            },
            start_positions: Vector2::new(10., 80.),
            lanes: Vector2::new(2.5, 5.5),
            car_size: Vector2::new(5., 1.5),
            liveries: [Vector3::new(0., 0., 1.), Vector3::new(1., 0., 0.)],
            flash_color: Vector3::new(1., 1., 0.),
            extent: Vector2::new(100., 10.),
            time_delta: 0.1,
            frame_count: 200,
            frame_interval: Duration::from_millis(50),
            sound: PathBuf::from("crash_sound.mp3"),
        }
    }
}

impl Scenario {
    /// Rejects inputs for which the crash is undefined.
    pub fn validate(&self) -> Result<(), CrashError> {
        let p = &self.parameters;
        for (car, mass) in [(1, p.mass1), (2, p.mass2)] {
            if !(mass.is_finite() && mass > 0.) {
                return Err(CrashError::InvalidMass { car, mass });
            }
        }
        let finite = [
            ("initial velocity of car 1", p.initial_velocity1),
            ("initial velocity of car 2", p.initial_velocity2),
            ("restitution", p.restitution),
            ("start position of car 1", self.start_positions.x),
            ("start position of car 2", self.start_positions.y),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(CrashError::NonFinite { name, value });
            }
        }
        if !(0.0..=1.0).contains(&p.restitution) {
            warn!(
                "Restitution {} is outside [0, 1], the crash will not conserve energy",
                p.restitution
            );
        }
        self.impact_time().map(|_| ())
    }

    /// Elapsed time at which the two cars' positions coincide.
    pub fn impact_time(&self) -> Result<f64, CrashError> {
        let p = &self.parameters;
        let gap = self.start_positions.y - self.start_positions.x;
        let closing_speed = p.initial_velocity1 - p.initial_velocity2;
        if closing_speed == 0. {
            return Err(CrashError::NoClosingSpeed {
                velocity: p.initial_velocity1,
            });
        }
        if gap * closing_speed < 0. {
            return Err(CrashError::Diverging { gap, closing_speed });
        }
        Ok((gap / closing_speed).abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_impact_time() {
        let scenario = Scenario::default();
        assert!(scenario.validate().is_ok());
        assert_relative_eq!(scenario.impact_time().unwrap(), 2.8, epsilon = 1e-12);
    }

    #[test]
    fn test_impact_time_positive_on_convergent_course() {
        let mut scenario = Scenario::default();
        for (x1, x2, v1, v2) in [
            (10., 80., 15., -10.),
            (10., 80., 15., 5.),
            (80., 10., -3., 4.),
            (0., 0.5, 0.1, -0.1),
        ] {
            scenario.start_positions = Vector2::new(x1, x2);
            scenario.parameters.initial_velocity1 = v1;
            scenario.parameters.initial_velocity2 = v2;
            let t = scenario.impact_time().unwrap();
            assert!(t > 0. && t.is_finite());
            assert_relative_eq!(x1 + v1 * t, x2 + v2 * t, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_equal_velocities_rejected() {
        let mut scenario = Scenario::default();
        scenario.parameters.initial_velocity2 = 15.;
        assert_eq!(
            scenario.impact_time(),
            Err(CrashError::NoClosingSpeed { velocity: 15. })
        );
        assert!(scenario.validate().is_err());
    }

    #[test]
    fn test_diverging_rejected() {
        let mut scenario = Scenario::default();
        scenario.parameters.initial_velocity1 = -15.;
        scenario.parameters.initial_velocity2 = 10.;
        assert!(matches!(
            scenario.impact_time(),
            Err(CrashError::Diverging { .. })
        ));
    }

    #[test]
    fn test_bad_masses_rejected() {
        let mut scenario = Scenario::default();
        scenario.parameters.mass2 = 0.;
        assert_eq!(
            scenario.validate(),
            Err(CrashError::InvalidMass { car: 2, mass: 0. })
        );
        scenario.parameters.mass2 = 1000.;
        scenario.parameters.mass1 = f64::NAN;
        assert!(matches!(
            scenario.validate(),
            Err(CrashError::InvalidMass { car: 1, .. })
        ));
    }

    #[test]
    fn test_non_finite_velocity_rejected() {
        let mut scenario = Scenario::default();
        scenario.parameters.initial_velocity1 = f64::INFINITY;
        assert!(matches!(
            scenario.validate(),
            Err(CrashError::NonFinite { name: "initial velocity of car 1", .. })
        ));
    }

    #[test]
    fn test_restitution_outside_unit_interval_accepted() {
        let mut scenario = Scenario::default();
        scenario.parameters.restitution = 1.4;
        assert!(scenario.validate().is_ok());
    }
}
