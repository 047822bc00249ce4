use legion::systems::Builder;
use legion::*;
use log::debug;
use std::time::{Duration, Instant};

use crate::{advance::advance_cars_system, impact::detect_impact_system};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationData {
    pub frame: u32,
    /// Elapsed simulated time of `frame`.
    pub time: f64,
    pub last_simulated: Instant,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationConfig {
    pub time_delta: f64,
    pub frame_count: u32,
    /// Minimum wall-clock time between frames.
    pub frame_interval: Duration,
}

pub fn init_simulation(resources: &mut Resources, simulation_config: SimulationConfig) {
    resources.insert(SimulationData {
        frame: 0,
        time: 0.0,
        last_simulated: Instant::now(),
    });
    resources.insert(simulation_config);
}

/// Systems that move the crash forward by one frame. Rendering is added by the caller.
pub fn schedule_builder() -> Builder {
    let mut builder = Schedule::builder();
    builder
        .add_system(advance_cars_system())
        .add_system(detect_impact_system())
        .add_system(advance_time_system());
    builder
}

#[system]
pub fn advance_time(
    #[resource] simulation_data: &mut SimulationData,
    #[resource] simulation_config: &SimulationConfig,
) {
    simulation_data.frame += 1;
    simulation_data.time = simulation_data.frame as f64 * simulation_config.time_delta;

    let elapsed = simulation_data.last_simulated.elapsed();
    debug!("Frame time: {} ms", elapsed.as_millis());
    if let Some(remaining) = simulation_config.frame_interval.checked_sub(elapsed) {
        std::thread::sleep(remaining);
    }
    simulation_data.last_simulated = Instant::now();
}

pub fn finished(resources: &Resources) -> bool {
    match (
        resources.get::<SimulationData>(),
        resources.get::<SimulationConfig>(),
    ) {
        (Some(data), Some(config)) => data.frame >= config.frame_count,
        _ => true,
    }
}
