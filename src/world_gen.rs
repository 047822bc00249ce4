use crate::{
    car::{Car, Paint, Trail},
    physics::CollisionOutcome,
    scenario::Scenario,
};
use legion::World;
use nalgebra::{Vector2, Vector3};

pub struct GenerationConfig {
    pub start_positions: Vector2<f64>,
    pub initial_velocities: Vector2<f64>,
    pub lanes: Vector2<f64>,
    pub car_size: Vector2<f64>,
    pub liveries: [Vector3<f32>; 2],
}

impl From<&Scenario> for GenerationConfig {
    fn from(scenario: &Scenario) -> Self {
        GenerationConfig {
            start_positions: scenario.start_positions,
            initial_velocities: scenario.parameters.initial_velocities(),
            lanes: scenario.lanes,
            car_size: scenario.car_size,
            liveries: scenario.liveries,
        }
    }
}

pub fn init_world(world: &mut World, config: &GenerationConfig, outcome: &CollisionOutcome) {
    let final_velocities = outcome.final_velocities();
    let cars = (0..2)
        .map(|i| {
            (
                Car {
                    number: i as u8 + 1,
                    start_position: config.start_positions[i],
                    lane: config.lanes[i],
                    size: config.car_size,
                    initial_velocity: config.initial_velocities[i],
                    final_velocity: final_velocities[i],
                    livery: config.liveries[i],
                    position: config.start_positions[i],
                    velocity: config.initial_velocities[i],
                    paint: Paint::Livery,
                },
                Trail::default(),
            )
        })
        .collect::<Vec<_>>();
    world.extend(cars);
}
