use crate::{
    car::{Car, Paint, Trail},
    error::CrashError,
    physics::CollisionOutcome,
    report::{energy_label, velocity_label},
};
use legion::IntoQuery;
use legion::{system, world::SubWorld};
use log::warn;
use nalgebra::{Vector2, Vector3};
use sdl2::{gfx::primitives::DrawRenderer, pixels::Color, render::WindowCanvas};

const MARGIN_LEFT: f64 = 70.;
const MARGIN_RIGHT: f64 = 30.;
const MARGIN_TOP: f64 = 40.;
const MARGIN_BOTTOM: f64 = 50.;
// gfx strings use an 8x8 font.
const GLYPH: i16 = 8;
const DASH_ON: f64 = 6.;
const DASH_OFF: f64 = 4.;

pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// Scene is [0, extent.x] by [0, extent.y].
    pub extent: Vector2<f64>,
    pub grid_step: Vector2<f64>,
    pub flash_color: Vector3<f32>,
}

/// Maps scene coordinates (y up) to window pixels (y down).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    origin: Vector2<f64>,
    scale: Vector2<f64>,
}

impl Viewport {
    pub fn fit(width: u32, height: u32, extent: Vector2<f64>) -> Viewport {
        let plot = Vector2::new(
            width as f64 - MARGIN_LEFT - MARGIN_RIGHT,
            height as f64 - MARGIN_TOP - MARGIN_BOTTOM,
        );
        Viewport {
            origin: Vector2::new(MARGIN_LEFT, height as f64 - MARGIN_BOTTOM),
            scale: Vector2::new(plot.x / extent.x, -plot.y / extent.y),
        }
    }

    pub fn to_screen(&self, p: Vector2<f64>) -> Vector2<f64> {
        self.origin + p.component_mul(&self.scale)
    }

    pub fn pixel(&self, p: Vector2<f64>) -> (i16, i16) {
        let s = self.to_screen(p);
        (s.x.round() as i16, s.y.round() as i16)
    }
}

/// Splits a path walked along one axis into dash segments of `on` length separated
/// by `off` gaps. The dash pattern carries over from one step to the next.
pub fn dashes(path: &[f64], on: f64, off: f64) -> Vec<(f64, f64)> {
    let period = on + off;
    let mut phase = 0.;
    let mut segments = Vec::new();
    for step in path.windows(2) {
        let (mut start, end) = (step[0], step[1]);
        let direction = (end - start).signum();
        let mut remaining = (end - start).abs();
        while remaining > 0. {
            let drawing = phase < on;
            let span = if drawing { on - phase } else { period - phase }.min(remaining);
            if drawing {
                segments.push((start, start + direction * span));
            }
            start += direction * span;
            remaining -= span;
            phase = (phase + span) % period;
        }
    }
    segments
}

fn to_color(color: &Vector3<f32>) -> Color {
    let channel = |c: f32| (c.clamp(0., 1.) * 255.).round() as u8;
    Color::RGB(channel(color.x), channel(color.y), channel(color.z))
}

pub struct Graphics {
    pub sdl_context: sdl2::Sdl,
    pub config: DisplayConfig,
    canvas: WindowCanvas,
    viewport: Viewport,
}

pub fn init_graphics(display_config: DisplayConfig) -> Result<Graphics, CrashError> {
    let sdl_context = sdl2::init().map_err(CrashError::Display)?;
    let video_subsystem = sdl_context.video().map_err(CrashError::Display)?;

    let window = video_subsystem
        .window(
            &display_config.title,
            display_config.width,
            display_config.height,
        )
        .position_centered()
        .build()
        .map_err(|e| CrashError::Display(e.to_string()))?;
    let canvas = window
        .into_canvas()
        .build()
        .map_err(|e| CrashError::Display(e.to_string()))?;

    Ok(Graphics {
        sdl_context,
        viewport: Viewport::fit(
            display_config.width,
            display_config.height,
            display_config.extent,
        ),
        config: display_config,
        canvas,
    })
}

impl Graphics {
    fn paint(&self, car: &Car) -> Color {
        match car.paint {
            Paint::Livery => to_color(&car.livery),
            Paint::ImpactFlash => to_color(&self.config.flash_color),
        }
    }

    fn draw_axes(&mut self) -> Result<(), String> {
        let extent = self.config.extent;
        let grid = Color::RGB(220, 220, 220);
        let ink = Color::RGB(0, 0, 0);
        let (left, top) = self.viewport.pixel(Vector2::new(0., extent.y));
        let (right, bottom) = self.viewport.pixel(Vector2::new(extent.x, 0.));

        let mut x = 0.;
        while x <= extent.x {
            let (px, _) = self.viewport.pixel(Vector2::new(x, 0.));
            self.canvas.vline(px, top, bottom, grid)?;
            let tick = format!("{}", x);
            self.canvas.string(
                px - GLYPH * tick.len() as i16 / 2,
                bottom + 6,
                &tick,
                ink,
            )?;
            x += self.config.grid_step.x;
        }
        let mut y = 0.;
        while y <= extent.y {
            let (_, py) = self.viewport.pixel(Vector2::new(0., y));
            self.canvas.hline(left, right, py, grid)?;
            let tick = format!("{}", y);
            self.canvas.string(
                left - 6 - GLYPH * tick.len() as i16,
                py - GLYPH / 2,
                &tick,
                ink,
            )?;
            y += self.config.grid_step.y;
        }
        self.canvas.rectangle(left, top, right, bottom, ink)?;

        let title = self.config.title.clone();
        let center = (left + right) / 2;
        self.canvas.string(
            center - GLYPH * title.len() as i16 / 2,
            top - 2 * GLYPH,
            &title,
            ink,
        )?;
        let x_label = "Position (m)";
        self.canvas.string(
            center - GLYPH * x_label.len() as i16 / 2,
            bottom + 2 * GLYPH + 6,
            x_label,
            ink,
        )?;
        self.canvas.string(4, (top + bottom) / 2, "Lanes", ink)?;
        Ok(())
    }

    fn draw_trail(&mut self, car: &Car, trail: &Trail) -> Result<(), String> {
        let color = to_color(&car.livery);
        let y = car.center().y;
        let path = trail
            .history
            .iter()
            .map(|x| self.viewport.to_screen(Vector2::new(*x, y)).x)
            .collect::<Vec<_>>();
        let (_, py) = self.viewport.pixel(Vector2::new(0., y));
        for (x0, x1) in dashes(&path, DASH_ON, DASH_OFF) {
            self.canvas
                .hline(x0.round() as i16, x1.round() as i16, py, color)?;
        }
        Ok(())
    }

    fn draw_car(&mut self, car: &Car) -> Result<(), String> {
        let corner = Vector2::new(car.position, car.lane);
        let (x0, y0) = self.viewport.pixel(corner);
        let (x1, y1) = self.viewport.pixel(corner + car.size);
        let color = self.paint(car);
        self.canvas.box_(x0, y1, x1, y0, color)
    }

    fn draw_text(&mut self, at: Vector2<f64>, text: &str) -> Result<(), String> {
        let (x, y) = self.viewport.pixel(at);
        self.canvas
            .string(x, y - GLYPH, text, Color::RGB(0, 0, 0))
    }

    pub fn draw(
        &mut self,
        cars: &[(&Car, &Trail)],
        outcome: &CollisionOutcome,
    ) -> Result<(), String> {
        self.canvas.set_draw_color(Color::RGB(255, 255, 255));
        self.canvas.clear();
        self.draw_axes()?;
        for (car, trail) in cars {
            self.draw_trail(car, trail)?;
        }
        for (car, _) in cars {
            self.draw_car(car)?;
        }
        if let [(car1, _), (car2, _)] = cars {
            let extent = self.config.extent;
            self.draw_text(
                Vector2::new(0.05 * extent.x, 0.95 * extent.y),
                &velocity_label(car1.velocity, car2.velocity),
            )?;
            self.draw_text(
                Vector2::new(0.05 * extent.x, 0.9 * extent.y),
                &energy_label(outcome.kinetic_energy_loss),
            )?;
        }
        self.canvas.present();
        Ok(())
    }
}

#[system]
#[read_component(Car)]
#[read_component(Trail)]
pub fn render_cars(
    world: &mut SubWorld,
    #[resource] graphics: &mut Graphics,
    #[resource] outcome: &CollisionOutcome,
) {
    let mut cars = <(&Car, &Trail)>::query().iter(world).collect::<Vec<_>>();
    cars.sort_by_key(|(car, _)| car.number);
    if let Err(err) = graphics.draw(&cars, outcome) {
        warn!("Failed to draw frame: {}", err);
    }
}
