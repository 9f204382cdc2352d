use std::{env, path::PathBuf, time::Duration};

// Runtime settings (gameplay tuning is in `tuning`).

const DEFAULT_FPS: u32 = 60;
const MAX_FPS: u32 = 240;

/// Frames per second, from `TARGET_RANGE_FPS` (1..=240, default 60).
pub fn frames_per_second() -> u32 {
    parse_fps(env::var("TARGET_RANGE_FPS").ok().as_deref())
}

pub fn frame_interval() -> Duration {
    Duration::from_secs(1) / frames_per_second()
}

/// Log file from `TARGET_RANGE_LOG`; logging stays off when unset because
/// the terminal itself is busy drawing the game.
pub fn log_file() -> Option<PathBuf> {
    env::var_os("TARGET_RANGE_LOG")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

pub fn log_json() -> bool {
    matches!(env::var("LOG_FORMAT").as_deref(), Ok("json"))
}

/// Unparseable or out-of-range values fall back to the default.
pub fn parse_fps(raw: Option<&str>) -> u32 {
    raw.and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|fps| (1..=MAX_FPS).contains(fps))
        .unwrap_or(DEFAULT_FPS)
}
