/// All game entity types: pure data plus trivial read accessors.

use std::time::Duration;

use crate::tuning::{
    INITIAL_AMMUNITION, INITIAL_TIME_SECS, LOW_AMMUNITION, LOW_TIME_SECS, PROJECTILE_LENGTH,
    PROJECTILE_THICKNESS, TARGET_BASE_SPEED, TARGET_INITIAL_SIZE, TARGET_START_Y,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Playing,
    GameOver,
}

/// Player intent, already translated from raw key/mouse input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Fire,
}

// ── Geometry ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Axis-aligned rectangle; `y` grows downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn mid_y(&self) -> f32 {
        self.top + self.height / 2.0
    }
}

/// Play-area layout supplied by the presentation side.
///
/// The core only ever reads geometry from here, so any renderer can drive it
/// as long as it agrees on these numbers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    /// Left edge of the target column.
    pub target_left: f32,
    /// Where a fired projectile's left/top edges start.
    pub launcher: Point,
    pub projectile_length: f32,
    pub projectile_thickness: f32,
}

impl Arena {
    /// Standard layout for a play area of the given size: launcher on the
    /// left at mid-height, target column three quarters of the way across.
    pub fn new(width: f32, height: f32) -> Self {
        Arena {
            width,
            height,
            target_left: width * 0.75,
            launcher: Point {
                x: width / 20.0,
                y: height / 2.0 - PROJECTILE_THICKNESS / 2.0,
            },
            projectile_length: PROJECTILE_LENGTH,
            projectile_thickness: PROJECTILE_THICKNESS,
        }
    }
}

impl Default for Arena {
    fn default() -> Self {
        Arena::new(800.0, 500.0)
    }
}

// ── Target & projectile ───────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Target {
    /// Top edge.
    pub y: f32,
    /// +1.0 moving down, -1.0 moving up.
    pub direction: f32,
    pub speed: f32,
    /// Edge length of the square target.
    pub size: f32,
}

impl Default for Target {
    fn default() -> Self {
        Target {
            y: TARGET_START_Y,
            direction: 1.0,
            speed: TARGET_BASE_SPEED,
            size: TARGET_INITIAL_SIZE,
        }
    }
}

/// The single projectile slot.  `y` is fixed for the whole flight.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Projectile {
    pub active: bool,
    pub x: f32,
    pub y: f32,
}

/// Difficulty tier derived from score; never stored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Difficulty {
    pub level: u32,
    pub speed: f32,
    pub size: f32,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game session.  Cloneable so the update functions in
/// `compute` can return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSession {
    pub arena: Arena,
    pub phase: Phase,
    pub score: u32,
    pub ammunition: u32,
    pub time_remaining: u32,
    pub target: Target,
    pub projectile: Projectile,
    /// Remaining hit-flash time; zero when the flash is off.
    pub hit_flash: Duration,
    /// Bumped on every start so ticks from a discarded countdown are ignored.
    pub clock_epoch: u64,
}

impl GameSession {
    /// A fresh session waiting for the first start command.
    pub fn new(arena: Arena) -> Self {
        GameSession {
            arena,
            phase: Phase::NotStarted,
            score: 0,
            ammunition: INITIAL_AMMUNITION,
            time_remaining: INITIAL_TIME_SECS,
            target: Target::default(),
            projectile: Projectile::default(),
            hit_flash: Duration::ZERO,
            clock_epoch: 0,
        }
    }

    pub fn ammo_low(&self) -> bool {
        self.ammunition <= LOW_AMMUNITION
    }

    pub fn time_low(&self) -> bool {
        self.time_remaining <= LOW_TIME_SECS
    }

    pub fn hit_flash_active(&self) -> bool {
        !self.hit_flash.is_zero()
    }

    pub fn target_rect(&self) -> Rect {
        Rect {
            left: self.arena.target_left,
            top: self.target.y,
            width: self.target.size,
            height: self.target.size,
        }
    }

    pub fn projectile_rect(&self) -> Rect {
        Rect {
            left: self.projectile.x,
            top: self.projectile.y,
            width: self.arena.projectile_length,
            height: self.arena.projectile_thickness,
        }
    }
}
