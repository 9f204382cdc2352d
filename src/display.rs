/// Rendering layer: all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game session.  No game logic is performed; this module only translates
/// arena coordinates into terminal cells and queues crossterm commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::compute::difficulty_for;
use crate::entities::{GameSession, Phase, Rect};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_BORDER_FLASH: Color = Color::Yellow;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_NORMAL: Color = Color::White;
const C_HUD_LOW: Color = Color::Red;
const C_LEVEL: Color = Color::Cyan;
const C_TARGET: Color = Color::Red;
const C_BULLSEYE: Color = Color::White;
const C_LAUNCHER: Color = Color::DarkYellow;
const C_PROJECTILE: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;

const MIN_COLS: u16 = 30;
const MIN_ROWS: u16 = 10;

/// Terminal-cell view of the play area: row 0 is the HUD, row 1 and
/// `rows - 2` are borders, the last row holds the controls hint.
#[derive(Clone, Copy, Debug)]
struct Viewport {
    cols: u16,
    rows: u16,
    scale_x: f32,
    scale_y: f32,
}

impl Viewport {
    fn new(session: &GameSession, cols: u16, rows: u16) -> Self {
        let inner_w = cols.saturating_sub(2) as f32;
        let inner_h = rows.saturating_sub(4) as f32;
        Viewport {
            cols,
            rows,
            scale_x: inner_w / session.arena.width.max(1.0),
            scale_y: inner_h / session.arena.height.max(1.0),
        }
    }

    /// Unclipped column for an arena x coordinate.
    fn col(&self, x: f32) -> i32 {
        1 + (x * self.scale_x).floor() as i32
    }

    fn row(&self, y: f32) -> i32 {
        2 + (y * self.scale_y).floor() as i32
    }

    fn inside(&self, col: i32, row: i32) -> bool {
        col >= 1
            && col < self.cols as i32 - 1
            && row >= 2
            && row < self.rows as i32 - 2
    }

    /// Cell range covered by an arena rectangle, clipped to the play area.
    fn cells(&self, rect: &Rect) -> (i32, i32, i32, i32) {
        let left = self.col(rect.left).max(1);
        let right = self.col(rect.right()).min(self.cols as i32 - 2);
        let top = self.row(rect.top).max(2);
        let bottom = self.row(rect.bottom()).min(self.rows as i32 - 3);
        (left, right, top, bottom)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame into a `cols` × `rows` terminal.
pub fn render<W: Write>(
    out: &mut W,
    session: &GameSession,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    if cols < MIN_COLS || rows < MIN_ROWS {
        out.queue(cursor::MoveTo(0, 0))?;
        out.queue(style::SetForegroundColor(C_HUD_LOW))?;
        out.queue(Print("Terminal too small"))?;
        out.queue(style::ResetColor)?;
        out.flush()?;
        return Ok(());
    }

    let view = Viewport::new(session, cols, rows);

    draw_border(out, session, &view)?;
    draw_hud(out, session, &view)?;
    draw_launcher(out, session, &view)?;
    draw_target(out, session, &view)?;

    if session.projectile.active {
        draw_projectile(out, session, &view)?;
    }
    if session.hit_flash_active() {
        draw_hit_flash(out, session, &view)?;
    }

    draw_controls_hint(out, &view)?;

    match session.phase {
        Phase::NotStarted => draw_start_screen(out, &view)?,
        Phase::GameOver => draw_game_over(out, session, &view)?,
        Phase::Playing => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(
    out: &mut W,
    session: &GameSession,
    view: &Viewport,
) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    let color = if session.hit_flash_active() {
        C_BORDER_FLASH
    } else {
        C_BORDER
    };
    out.queue(style::SetForegroundColor(color))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, session: &GameSession, view: &Viewport) -> std::io::Result<()> {
    // Score, left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:>4}", session.score)))?;

    // Level, centre
    let level_str = format!("[ LEVEL {} ]", difficulty_for(session.score).level + 1);
    let lx = (view.cols / 2).saturating_sub(level_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_LEVEL))?;
    out.queue(Print(&level_str))?;

    // Time and ammunition, right; red when running low
    let time_text = format!("Time: {:>2}s", session.time_remaining);
    let ammo_text = format!("Arrows: {:>2}", session.ammunition);
    let total = time_text.len() + 2 + ammo_text.len();
    let rx = view.cols.saturating_sub(total as u16 + 1);

    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(low_color(session.time_low())))?;
    out.queue(Print(&time_text))?;
    out.queue(Print("  "))?;
    out.queue(style::SetForegroundColor(low_color(session.ammo_low())))?;
    out.queue(Print(&ammo_text))?;

    Ok(())
}

fn low_color(low: bool) -> Color {
    if low {
        C_HUD_LOW
    } else {
        C_HUD_NORMAL
    }
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_launcher<W: Write>(
    out: &mut W,
    session: &GameSession,
    view: &Viewport,
) -> std::io::Result<()> {
    // Sprite (3 rows) centred on the launch line:
    //   \
    //   )
    //   /
    let launcher = session.arena.launcher;
    let col = view.col(launcher.x);
    let mid = view.row(launcher.y + session.arena.projectile_thickness / 2.0);

    out.queue(style::SetForegroundColor(C_LAUNCHER))?;
    for (dy, glyph) in [(-1, "\\"), (0, ")"), (1, "/")] {
        if view.inside(col, mid + dy) {
            out.queue(cursor::MoveTo(col as u16, (mid + dy) as u16))?;
            out.queue(Print(glyph))?;
        }
    }
    Ok(())
}

fn draw_target<W: Write>(
    out: &mut W,
    session: &GameSession,
    view: &Viewport,
) -> std::io::Result<()> {
    let rect = session.target_rect();
    let (left, right, top, bottom) = view.cells(&rect);
    if left > right || top > bottom {
        return Ok(());
    }

    let width = (right - left + 1) as usize;
    out.queue(style::SetForegroundColor(C_TARGET))?;
    for row in top..=bottom {
        out.queue(cursor::MoveTo(left as u16, row as u16))?;
        out.queue(Print("█".repeat(width)))?;
    }

    // Bullseye
    let cx = view.col(rect.left + rect.width / 2.0);
    let cy = view.row(rect.mid_y());
    if view.inside(cx, cy) {
        out.queue(cursor::MoveTo(cx as u16, cy as u16))?;
        out.queue(style::SetForegroundColor(C_BULLSEYE))?;
        out.queue(Print("◎"))?;
    }
    Ok(())
}

fn draw_projectile<W: Write>(
    out: &mut W,
    session: &GameSession,
    view: &Viewport,
) -> std::io::Result<()> {
    let rect = session.projectile_rect();
    let row = view.row(rect.mid_y());
    let tail = view.col(rect.left);
    let tip = view.col(rect.right());

    out.queue(style::SetForegroundColor(C_PROJECTILE))?;
    for col in tail..=tip {
        if !view.inside(col, row) {
            continue;
        }
        let glyph = if col == tip { ">" } else { "─" };
        out.queue(cursor::MoveTo(col as u16, row as u16))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

fn draw_hit_flash<W: Write>(
    out: &mut W,
    session: &GameSession,
    view: &Viewport,
) -> std::io::Result<()> {
    let msg = " HIT! ";
    let rect = session.target_rect();
    let row = (view.row(rect.top) - 1).max(2);
    let col = view
        .col(rect.left)
        .min(view.cols as i32 - 1 - msg.len() as i32)
        .max(1);

    out.queue(cursor::MoveTo(col as u16, row as u16))?;
    out.queue(style::SetForegroundColor(C_BORDER_FLASH))?;
    out.queue(Print(msg))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("SPACE / click : Fire   R : Restart   Q : Quit"))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_start_screen<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Cyan),
        ("║   TARGET RANGE   ║", Color::Cyan),
        ("╚══════════════════╝", Color::Cyan),
        ("Hit the moving target before time runs out", Color::White),
        ("SPACE / click - Start   Q - Quit", Color::Yellow),
    ];
    draw_centred(out, view, lines)
}

fn draw_game_over<W: Write>(
    out: &mut W,
    session: &GameSession,
    view: &Viewport,
) -> std::io::Result<()> {
    let score_line = format!("Final Score: {}", session.score);
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Red),
        ("║    GAME  OVER    ║", Color::Red),
        ("╚══════════════════╝", Color::Red),
        (&score_line, Color::Yellow),
        ("R - Play Again  Q - Quit", Color::White),
    ];
    draw_centred(out, view, lines)
}

fn draw_centred<W: Write>(
    out: &mut W,
    view: &Viewport,
    lines: &[(&str,
    Color)],
) -> std::io::Result<()> {
    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
