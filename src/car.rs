use nalgebra::{Vector2, Vector3};

/// How a car is painted on a given frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Paint {
    Livery,
    ImpactFlash,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Car {
    /// 1 or 2, used to order labels.
    pub number: u8,
    pub start_position: f64,
    pub lane: f64,
    pub size: Vector2<f64>,
    pub initial_velocity: f64,
    pub final_velocity: f64,
    pub livery: Vector3<f32>,
    // Recomputed every frame.
    pub position: f64,
    pub velocity: f64,
    pub paint: Paint,
}

impl Car {
    pub fn center(&self) -> Vector2<f64> {
        Vector2::new(self.position, self.lane) + self.size * 0.5
    }
}

/// Past centre positions, appended once per frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trail {
    pub history: Vec<f64>,
}
