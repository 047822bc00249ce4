use legion::*;

use crate::{
    car::{Car, Paint, Trail},
    impact::ImpactSchedule,
    simulation::{SimulationConfig, SimulationData},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    PreImpact,
    PostImpact,
}

impl Phase {
    pub fn at(t: f64, impact_time: f64) -> Phase {
        if t < impact_time {
            Phase::PreImpact
        } else {
            Phase::PostImpact
        }
    }
}

/// Position is a function of elapsed time only, never accumulated frame to frame.
pub fn position_at(car: &Car, t: f64, impact_time: f64) -> f64 {
    match Phase::at(t, impact_time) {
        Phase::PreImpact => car.start_position + car.initial_velocity * t,
        Phase::PostImpact => {
            car.start_position
                + car.initial_velocity * impact_time
                + car.final_velocity * (t - impact_time)
        }
    }
}

pub fn velocity_at(car: &Car, t: f64, impact_time: f64) -> f64 {
    match Phase::at(t, impact_time) {
        Phase::PreImpact => car.initial_velocity,
        Phase::PostImpact => car.final_velocity,
    }
}

/// Flash within one time step of the impact, on either side.
pub fn paint_at(t: f64, impact_time: f64, time_delta: f64) -> Paint {
    if (t - impact_time).abs() < time_delta {
        Paint::ImpactFlash
    } else {
        Paint::Livery
    }
}

#[system(par_for_each)]
pub fn advance_cars(
    car: &mut Car,
    trail: &mut Trail,
    #[resource] simulation_data: &SimulationData,
    #[resource] simulation_config: &SimulationConfig,
    #[resource] impact: &ImpactSchedule,
) {
    advance_single_car(
        car,
        trail,
        simulation_data.time,
        impact.time,
        simulation_config.time_delta,
    );
}

pub fn advance_single_car(car: &mut Car, trail: &mut Trail, t: f64, impact_time: f64, dt: f64) {
    car.position = position_at(car, t, impact_time);
    car.velocity = velocity_at(car, t, impact_time);
    car.paint = paint_at(t, impact_time, dt);
    trail.history.push(car.center().x);
}
