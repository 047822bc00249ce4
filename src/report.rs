use crate::physics::CollisionOutcome;

pub fn results(outcome: &CollisionOutcome) -> String {
    format!(
        "\n=== Results ===\n\
         Final velocity of car 1: {:.2} m/s\n\
         Final velocity of car 2: {:.2} m/s\n\
         Kinetic energy lost: {:.2} J\n",
        outcome.final_velocity1, outcome.final_velocity2, outcome.kinetic_energy_loss
    )
}

pub fn velocity_label(v1: f64, v2: f64) -> String {
    format!("v1: {:.2} m/s, v2: {:.2} m/s", v1, v2)
}

pub fn energy_label(kinetic_energy_loss: f64) -> String {
    format!("KE lost: {:.2} J", kinetic_energy_loss)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{physics::solve, scenario::Scenario};

    #[test]
    fn test_reference_report() {
        let outcome = solve(&Scenario::default().parameters);
        let report = results(&outcome);
        let lines = report.lines().collect::<Vec<_>>();
        assert_eq!(
            lines,
            vec![
                "",
                "=== Results ===",
                "Final velocity of car 1: 0.23 m/s",
                "Final velocity of car 2: 7.73 m/s",
                "Kinetic energy lost: 155113.64 J",
            ]
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(velocity_label(15., -10.), "v1: 15.00 m/s, v2: -10.00 m/s");
        assert_eq!(energy_label(155113.636), "KE lost: 155113.64 J");
    }
}
