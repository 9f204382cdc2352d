/// Pure game-logic functions.
///
/// Every session-level function takes an immutable reference to the current
/// `GameSession` and returns a brand-new `GameSession`.  Nothing here reads a
/// clock or touches the terminal; time enters only as the `dt` / epoch
/// arguments supplied by the caller.

use std::time::Duration;

use tracing::{debug, info, trace};

use crate::entities::{
    Arena, Command, Difficulty, GameSession, Phase, Point, Projectile, Rect, Target,
};
use crate::tuning::{
    DIFFICULTY_INTERVAL, HIT_FLASH, LAUNCHER_MARGIN, PROJECTILE_SPEED, SCORE_PER_HIT,
    TARGET_BASE_SPEED, TARGET_INITIAL_SIZE, TARGET_MIN_SIZE, TARGET_MIN_Y, TARGET_SIZE_STEP,
    TARGET_SPEED_STEP,
};

// ── Difficulty scaler ────────────────────────────────────────────────────────

/// Difficulty tier for a cumulative score: one level per 30 points, each
/// level making the target faster and smaller (size floors at 60).
pub fn difficulty_for(score: u32) -> Difficulty {
    let level = score / DIFFICULTY_INTERVAL;
    Difficulty {
        level,
        speed: TARGET_BASE_SPEED + level as f32 * TARGET_SPEED_STEP,
        size: (TARGET_INITIAL_SIZE - level as f32 * TARGET_SIZE_STEP).max(TARGET_MIN_SIZE),
    }
}

// ── Target motion ────────────────────────────────────────────────────────────

/// Vertical travel range `(min_y, max_y)` for the target's top edge.
///
/// A target too large for the arena would give `max_y < min_y`; both bounds
/// then collapse onto the centred position so the target simply stays put.
pub fn target_bounds(target: &Target, arena: &Arena) -> (f32, f32) {
    let min_y = TARGET_MIN_Y;
    let max_y = arena.height - target.size - LAUNCHER_MARGIN;
    if max_y < min_y {
        let centre = ((arena.height - target.size) / 2.0).max(0.0);
        return (centre, centre);
    }
    (min_y, max_y)
}

/// Move the target one frame, reflecting at the bounds.  The position is
/// clamped onto the bound on the frame it would cross it.
pub fn advance_target(target: &Target, arena: &Arena) -> Target {
    let (min_y, max_y) = target_bounds(target, arena);
    let mut y = target.y + target.speed * target.direction;
    let mut direction = target.direction;

    if y >= max_y {
        y = max_y;
        direction = -1.0;
    }
    if y <= min_y {
        y = min_y;
        direction = 1.0;
    }

    Target {
        y,
        direction,
        ..*target
    }
}

// ── Projectile ───────────────────────────────────────────────────────────────

pub fn launch_projectile(origin: Point) -> Projectile {
    Projectile {
        active: true,
        x: origin.x,
        y: origin.y,
    }
}

/// Constant-velocity horizontal flight; inactive projectiles stay where they are.
pub fn advance_projectile(projectile: &Projectile) -> Projectile {
    if !projectile.active {
        return *projectile;
    }
    Projectile {
        x: projectile.x + PROJECTILE_SPEED,
        ..*projectile
    }
}

pub fn deactivate(projectile: &Projectile) -> Projectile {
    Projectile {
        active: false,
        ..*projectile
    }
}

/// True once the projectile's left edge has passed the right side of the arena.
pub fn projectile_out_of_bounds(projectile: &Projectile, arena: &Arena) -> bool {
    projectile.x > arena.width
}

// ── Collision ────────────────────────────────────────────────────────────────

/// Hit test between the projectile's tip and the target.
///
/// Only a single point is tested: the leading edge at the projectile's
/// vertical midpoint.  All comparisons are inclusive.
pub fn collides(projectile: &Rect, target: &Rect) -> bool {
    let tip_x = projectile.right();
    let tip_y = projectile.mid_y();
    tip_x >= target.left
        && tip_x <= target.right()
        && tip_y >= target.top
        && tip_y <= target.bottom()
}

// ── Session transitions ──────────────────────────────────────────────────────

/// Reset everything to the initial constants and begin playing.
///
/// Valid from any phase; issued while playing it acts as a restart.  The
/// clock epoch moves on so ticks from the previous countdown are discarded.
pub fn start(session: &GameSession) -> GameSession {
    let clock_epoch = session.clock_epoch + 1;
    info!(
        epoch = clock_epoch,
        restart = session.phase == Phase::Playing,
        "game started"
    );
    GameSession {
        phase: Phase::Playing,
        clock_epoch,
        ..GameSession::new(session.arena)
    }
}

/// Launch a projectile from the launcher.  Silently ignored unless playing,
/// the slot is free and ammunition remains.
pub fn fire(session: &GameSession) -> GameSession {
    if session.phase != Phase::Playing
        || session.projectile.active
        || session.ammunition == 0
    {
        debug!(
            phase = ?session.phase,
            in_flight = session.projectile.active,
            ammunition = session.ammunition,
            "fire ignored"
        );
        return session.clone();
    }

    GameSession {
        projectile: launch_projectile(session.arena.launcher),
        ammunition: session.ammunition - 1,
        ..session.clone()
    }
}

/// Advance the simulation by one frame of length `dt`.
///
/// Order within a frame: target motion, projectile motion, collision, then
/// difficulty rescaling.  The collision test therefore always uses the
/// target size that was on screen for this frame.
pub fn frame_tick(session: &GameSession, dt: Duration) -> GameSession {
    // The flash is presentation-only and keeps fading after the game ends.
    let hit_flash = session.hit_flash.saturating_sub(dt);

    if session.phase != Phase::Playing {
        return GameSession {
            hit_flash,
            ..session.clone()
        };
    }

    let mut next = GameSession {
        target: advance_target(&session.target, &session.arena),
        hit_flash,
        ..session.clone()
    };

    if !next.projectile.active {
        return next;
    }

    next.projectile = advance_projectile(&next.projectile);

    if collides(&next.projectile_rect(), &next.target_rect()) {
        next.projectile = deactivate(&next.projectile);
        next.score += SCORE_PER_HIT;
        next.hit_flash = HIT_FLASH;

        let difficulty = difficulty_for(next.score);
        next.target.speed = difficulty.speed;
        next.target.size = difficulty.size;
        debug!(score = next.score, level = difficulty.level, "hit");
    } else if projectile_out_of_bounds(&next.projectile, &next.arena) {
        next.projectile = deactivate(&next.projectile);
        debug!(ammunition = next.ammunition, "miss");
    } else {
        return next;
    }

    // The arrow just landed, hit or miss; with none left the run is over.
    if next.ammunition == 0 {
        return end_game(next, "out of ammunition");
    }
    next
}

/// One second of the countdown.  Ignored unless playing and `epoch` matches
/// the countdown started by the most recent `start`.
pub fn second_elapsed(session: &GameSession, epoch: u64) -> GameSession {
    if session.phase != Phase::Playing || epoch != session.clock_epoch {
        trace!(epoch, current = session.clock_epoch, "stale clock tick");
        return session.clone();
    }

    let time_remaining = session.time_remaining.saturating_sub(1);
    trace!(time_remaining, "clock tick");
    let next = GameSession {
        time_remaining,
        ..session.clone()
    };

    if time_remaining == 0 {
        return end_game(next, "time expired");
    }
    next
}

pub fn apply_command(session: &GameSession, command: Command) -> GameSession {
    match command {
        Command::Start => start(session),
        Command::Fire => fire(session),
    }
}

fn end_game(session: GameSession, cause: &str) -> GameSession {
    info!(score = session.score, cause, "game over");
    GameSession {
        phase: Phase::GameOver,
        ..session
    }
}
