use thiserror::Error;

/// Errors that stop the program before or while setting up the animation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CrashError {
    #[error("mass of car {car} must be finite and positive, got {mass}")]
    InvalidMass { car: u8, mass: f64 },

    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    /// Equal velocities: the gap between the cars never closes.
    #[error("cars move at the same velocity ({velocity} m/s), impact time is undefined")]
    NoClosingSpeed { velocity: f64 },

    #[error("cars are moving apart (gap {gap} m, closing speed {closing_speed} m/s) and never meet")]
    Diverging { gap: f64, closing_speed: f64 },

    #[error("display error: {0}")]
    Display(String),

    #[error("failed to configure logging: {0}")]
    Logging(String),
}

/// Errors from the impact sound worker. These are logged, never propagated to the animation.
#[derive(Debug, Error)]
pub enum SoundError {
    #[error("no audio output: {0}")]
    Device(#[from] rodio::StreamError),

    #[error("cannot start playback: {0}")]
    Playback(#[from] rodio::PlayError),

    #[error("cannot read sound file: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot decode sound file: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),
}
