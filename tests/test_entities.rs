use std::time::Duration;

use target_range::entities::*;
use target_range::tuning::*;

#[test]
fn new_session_waits_for_start() {
    let s = GameSession::new(Arena::default());
    assert_eq!(s.phase, Phase::NotStarted);
    assert_eq!(s.score, 0);
    assert_eq!(s.ammunition, INITIAL_AMMUNITION);
    assert_eq!(s.time_remaining, INITIAL_TIME_SECS);
    assert_eq!(s.target.y, TARGET_START_Y);
    assert_eq!(s.target.direction, 1.0);
    assert!(!s.projectile.active);
    assert!(!s.hit_flash_active());
    assert_eq!(s.clock_epoch, 0);
}

#[test]
fn default_arena_layout() {
    let a = Arena::default();
    assert_eq!(a.width, 800.0);
    assert_eq!(a.height, 500.0);
    assert_eq!(a.target_left, 600.0);
    assert_eq!(a.launcher.x, 40.0);
    // Projectile midpoint sits on the arena's horizontal centre line
    assert_eq!(a.launcher.y + a.projectile_thickness / 2.0, 250.0);
}

#[test]
fn low_warnings() {
    let mut s = GameSession::new(Arena::default());
    assert!(!s.ammo_low());
    assert!(!s.time_low());

    s.ammunition = 4;
    s.time_remaining = 11;
    assert!(!s.ammo_low());
    assert!(!s.time_low());

    s.ammunition = 3;
    s.time_remaining = 10;
    assert!(s.ammo_low());
    assert!(s.time_low());
}

#[test]
fn hit_flash_flag_follows_duration() {
    let mut s = GameSession::new(Arena::default());
    s.hit_flash = Duration::from_millis(1);
    assert!(s.hit_flash_active());
    s.hit_flash = Duration::ZERO;
    assert!(!s.hit_flash_active());
}

#[test]
fn rects_follow_state() {
    let mut s = GameSession::new(Arena::default());
    s.target.y = 150.0;
    s.target.size = 90.0;
    s.projectile = Projectile { active: true, x: 100.0, y: 40.0 };

    let t = s.target_rect();
    assert_eq!(t.left, 600.0);
    assert_eq!(t.top, 150.0);
    assert_eq!(t.right(), 690.0);
    assert_eq!(t.bottom(), 240.0);

    let p = s.projectile_rect();
    assert_eq!(p.right(), 100.0 + PROJECTILE_LENGTH);
    assert_eq!(p.mid_y(), 40.0 + PROJECTILE_THICKNESS / 2.0);
}

#[test]
fn session_clone_is_independent() {
    let original = GameSession::new(Arena::default());
    let mut cloned = original.clone();

    cloned.score = 999;
    cloned.target.y = 1.0;
    cloned.projectile.active = true;

    assert_eq!(original.score, 0);
    assert_eq!(original.target.y, TARGET_START_Y);
    assert!(!original.projectile.active);
}
