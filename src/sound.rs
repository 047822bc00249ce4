use crate::error::SoundError;
use log::{info, warn};
use rand::Rng;
use rand_pcg::Pcg64;
use rayon::{ThreadPool, ThreadPoolBuilder};
use rodio::{buffer::SamplesBuffer, Decoder, OutputStream, Sink};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const SAMPLE_RATE: u32 = 44100;
const CRASH_DURATION_MS: u32 = 600;

/// Something that can be played when the cars collide. Must not block the caller.
pub trait ImpactSound: Send + Sync {
    fn play(&self);
}

/// Resource through which the animation reaches the impact sound.
#[derive(Clone)]
pub struct SoundChannel {
    sound: Arc<dyn ImpactSound>,
}

impl SoundChannel {
    pub fn new(sound: impl ImpactSound + 'static) -> Self {
        SoundChannel {
            sound: Arc::new(sound),
        }
    }

    pub fn trigger(&self) {
        self.sound.play();
    }
}

/// Plays an audio file on its own rayon pool, falling back to a synthesized crash if the
/// file cannot be read. Playback blocks a worker of that pool, never the animation's.
pub struct CrashSound {
    path: PathBuf,
    pool: Option<ThreadPool>,
}

impl CrashSound {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let pool = ThreadPoolBuilder::new()
            .num_threads(1)
            .thread_name(|_| "crash-sound".to_string())
            .build();
        let pool = match pool {
            Ok(pool) => Some(pool),
            Err(err) => {
                warn!("No dedicated sound thread ({}), using the global pool", err);
                None
            }
        };
        CrashSound {
            path: path.into(),
            pool,
        }
    }
}

impl ImpactSound for CrashSound {
    fn play(&self) {
        let path = self.path.clone();
        let job = move || {
            if let Err(err) = play_crash(&path) {
                warn!("Crash sound not played: {}", err);
            }
        };
        match &self.pool {
            Some(pool) => pool.spawn(job),
            None => rayon::spawn(job),
        }
    }
}

fn play_crash(path: &Path) -> Result<(), SoundError> {
    let (_stream, stream_handle) = OutputStream::try_default()?;
    let sink = Sink::try_new(&stream_handle)?;
    match open_sound_file(path) {
        Ok(decoder) => sink.append(decoder),
        Err(err) => {
            warn!("{}: {}, using synthesized crash", path.display(), err);
            sink.append(SamplesBuffer::new(1, SAMPLE_RATE, crash_samples()));
        }
    }
    info!("Playing crash sound");
    sink.sleep_until_end();
    Ok(())
}

fn open_sound_file(path: &Path) -> Result<Decoder<BufReader<File>>, SoundError> {
    let file = File::open(path)?;
    Ok(Decoder::new(BufReader::new(file))?)
}

/// Decaying, lightly smoothed noise burst.
pub fn crash_samples() -> Vec<f32> {
    let mut rng = Pcg64::new(0xcafef00dd15ea5e5, 0xa02bdbf7bb3c0a7ac28fa16a64abf96);
    let n_samples = (SAMPLE_RATE * CRASH_DURATION_MS / 1000) as usize;
    let mut previous = 0f32;
    (0..n_samples)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            let noise: f32 = rng.gen_range(-1.0..1.0);
            previous = 0.6 * previous + 0.4 * noise;
            previous * (-t * 8.).exp() * 0.8
        })
        .collect()
}
