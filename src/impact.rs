use crate::{simulation::SimulationData, sound::SoundChannel};
use legion::*;
use log::info;

/// Precomputed elapsed time of the crash.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImpactSchedule {
    pub time: f64,
}

/// Set once, the first frame at or after the impact time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImpactEvent {
    fired: bool,
}

impl ImpactEvent {
    pub fn fired(&self) -> bool {
        self.fired
    }

    /// Returns true only on the call that sets the flag.
    pub fn fire(&mut self) -> bool {
        !std::mem::replace(&mut self.fired, true)
    }
}

#[system]
pub fn detect_impact(
    #[resource] simulation_data: &SimulationData,
    #[resource] impact: &ImpactSchedule,
    #[resource] impact_event: &mut ImpactEvent,
    #[resource] sound: &SoundChannel,
) {
    if simulation_data.time >= impact.time && impact_event.fire() {
        info!(
            "Impact at t = {:.2} (frame {})",
            impact.time, simulation_data.frame
        );
        sound.trigger();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_once() {
        let mut event = ImpactEvent::default();
        assert!(!event.fired());
        assert!(event.fire());
        assert!(event.fired());
        assert!(!event.fire());
        assert!(!event.fire());
        assert!(event.fired());
    }
}
