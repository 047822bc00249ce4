use crate::error::CrashError;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
};

const PATTERN: &str = "{d(%H:%M:%S%.3f)} {h({l:<5})} {t} - {m}{n}";

/// Logs go to stderr so they never mix with the results report on stdout.
pub fn init_logging(level: LevelFilter) -> Result<(), CrashError> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))
        .map_err(|e| CrashError::Logging(e.to_string()))?;
    log4rs::init_config(config).map_err(|e| CrashError::Logging(e.to_string()))?;
    Ok(())
}
