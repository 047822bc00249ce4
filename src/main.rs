extern crate sdl2;

pub mod advance;
pub mod car;
pub mod error;
pub mod impact;
pub mod logging;
pub mod physics;
pub mod render;
pub mod report;
pub mod scenario;
pub mod simulation;
pub mod sound;
pub mod world_gen;

use error::CrashError;
use impact::{ImpactEvent, ImpactSchedule};
use legion::*;
use log::{error, info, LevelFilter};
use nalgebra::Vector2;
use render::{render_cars_system, DisplayConfig};
use scenario::Scenario;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use simulation::SimulationConfig;
use sound::{CrashSound, SoundChannel};
use world_gen::GenerationConfig;

const WIDTH: u32 = 1000;
const HEIGHT: u32 = 490;

fn run() -> Result<(), CrashError> {
    logging::init_logging(LevelFilter::Info)?;

    let scenario = Scenario::default();
    scenario.validate()?;
    let impact_time = scenario.impact_time()?;
    let outcome = physics::solve(&scenario.parameters);
    print!("{}", report::results(&outcome));
    info!("Cars collide at t = {:.2}", impact_time);

    // Setup.
    let graphics = render::init_graphics(DisplayConfig {
        width: WIDTH,
        height: HEIGHT,
        title: "Car Crash Simulation".to_string(),
        extent: scenario.extent,
        grid_step: Vector2::new(10., 2.),
        flash_color: scenario.flash_color,
    })?;
    let mut event_pump = graphics
        .sdl_context
        .event_pump()
        .map_err(CrashError::Display)?;
    let mut world = World::default();

    // Initialize world.
    world_gen::init_world(&mut world, &GenerationConfig::from(&scenario), &outcome);
    let mut resources = Resources::default();
    resources.insert(graphics);
    resources.insert(outcome);
    resources.insert(ImpactSchedule { time: impact_time });
    resources.insert(ImpactEvent::default());
    resources.insert(SoundChannel::new(CrashSound::new(&scenario.sound)));
    simulation::init_simulation(
        &mut resources,
        SimulationConfig {
            time_delta: scenario.time_delta,
            frame_count: scenario.frame_count,
            frame_interval: scenario.frame_interval,
        },
    );

    // Initialize schedulers. Once the frames run out the last one stays on screen.
    let mut animation = simulation::schedule_builder()
        .add_thread_local(render_cars_system())
        .build();
    let mut still = Schedule::builder()
        .add_thread_local(render_cars_system())
        .build();

    let mut done = false;
    'running: loop {
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'running,
                _ => {}
            }
        }

        if simulation::finished(&resources) {
            if !done {
                info!("Animation finished, close the window to exit");
                done = true;
            }
            still.execute(&mut world, &mut resources);
            std::thread::sleep(scenario.frame_interval);
        } else {
            animation.execute(&mut world, &mut resources);
        }
    }
    Ok(())
}

pub fn main() {
    if let Err(err) = run() {
        match err {
            CrashError::Logging(_) => eprintln!("car_crash: {}", err),
            _ => error!("{}", err),
        }
        std::process::exit(1);
    }
}
