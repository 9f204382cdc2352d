/// Gameplay tuning: every rule constant lives here.
///
/// Distances and speeds are in arena units (see `entities::Arena`); speeds are
/// per simulation frame.

use std::time::Duration;

// ── Session ───────────────────────────────────────────────────────────────────

pub const INITIAL_AMMUNITION: u32 = 15;
pub const INITIAL_TIME_SECS: u32 = 60;
pub const SCORE_PER_HIT: u32 = 10;

/// How long the hit flash stays on after a confirmed hit.
pub const HIT_FLASH: Duration = Duration::from_millis(300);

/// HUD warning thresholds.
pub const LOW_AMMUNITION: u32 = 3;
pub const LOW_TIME_SECS: u32 = 10;

// ── Difficulty ────────────────────────────────────────────────────────────────

/// Points needed per difficulty level.
pub const DIFFICULTY_INTERVAL: u32 = 30;
pub const TARGET_BASE_SPEED: f32 = 2.0;
pub const TARGET_SPEED_STEP: f32 = 0.8;
pub const TARGET_INITIAL_SIZE: f32 = 120.0;
pub const TARGET_MIN_SIZE: f32 = 60.0;
pub const TARGET_SIZE_STEP: f32 = 15.0;

// ── Target motion ─────────────────────────────────────────────────────────────

pub const TARGET_START_Y: f32 = 200.0;
pub const TARGET_MIN_Y: f32 = 60.0;
/// Space kept free below the target for the launcher.
pub const LAUNCHER_MARGIN: f32 = 80.0;

// ── Projectile ────────────────────────────────────────────────────────────────

pub const PROJECTILE_SPEED: f32 = 12.0;
pub const PROJECTILE_LENGTH: f32 = 50.0;
pub const PROJECTILE_THICKNESS: f32 = 6.0;
