use std::fs::OpenOptions;
use std::io::{stdout, BufWriter, Write};
use std::sync::{mpsc, Mutex};
use std::thread;

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal, ExecutableCommand,
};
use tracing::{debug, info};

use target_range::clock::{Ticker, COUNTDOWN_PERIOD};
use target_range::compute::{apply_command, frame_tick, second_elapsed};
use target_range::config;
use target_range::display;
use target_range::entities::{Arena, Command, GameSession, Phase};

/// Everything the main loop reacts to, from all three producers.
enum LoopEvent {
    Input(Event),
    Frame,
    Second { epoch: u64 },
}

enum Action {
    Command(Command),
    Quit,
}

// ── Logging ───────────────────────────────────────────────────────────────────

fn init_tracing() -> std::io::Result<()> {
    // The terminal belongs to the game, so logs only go to a file.
    let Some(path) = config::log_file() else {
        return Ok(());
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if config::log_json() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .compact()
            .init();
    }

    Ok(())
}

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!(%info, "panic");
        // Give the user their terminal back before the message is printed.
        let _ = terminal::disable_raw_mode();
        let _ = stdout().execute(terminal::LeaveAlternateScreen);
        default_hook(info);
    }));
}

// ── Input mapping ─────────────────────────────────────────────────────────────

/// Space and left click start a fresh game or fire; R / Enter always
/// (re)start; Q, Esc and Ctrl-C quit.
fn translate(event: &Event, phase: Phase) -> Option<Action> {
    let fire_or_start = if phase == Phase::NotStarted {
        Command::Start
    } else {
        Command::Fire
    };

    match event {
        Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            modifiers,
            ..
        }) => match code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
            KeyCode::Char(' ') => Some(Action::Command(fire_or_start)),
            KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => {
                Some(Action::Command(Command::Start))
            }
            _ => None,
        },
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            ..
        }) => Some(Action::Command(fire_or_start)),
        _ => None,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Single consumer: every event is applied to completion before the next
/// one is taken off the channel.
fn game_loop<W: Write>(
    out: &mut W,
    tx: &mpsc::Sender<LoopEvent>,
    rx: &mpsc::Receiver<LoopEvent>,
) -> std::io::Result<()> {
    let frame = config::frame_interval();
    // At most one frame is ever queued; a slow render skips frames instead
    // of delaying input behind a backlog.
    let (_frames, frame_pending) = Ticker::spawn_coalescing(frame, tx.clone(), || LoopEvent::Frame);
    let mut countdown: Option<Ticker> = None;

    let mut session = GameSession::new(Arena::default());
    let (cols, rows) = terminal::size()?;
    display::render(out, &session, cols, rows)?;

    while let Ok(event) = rx.recv() {
        match event {
            LoopEvent::Input(ev) => match translate(&ev, session.phase) {
                Some(Action::Quit) => break,
                Some(Action::Command(command)) => {
                    session = apply_command(&session, command);
                    if command == Command::Start {
                        // Replacing the old ticker drops (cancels) it.
                        let epoch = session.clock_epoch;
                        countdown = Some(Ticker::spawn(COUNTDOWN_PERIOD, tx.clone(), move || {
                            LoopEvent::Second { epoch }
                        }));
                    }
                }
                None => {}
            },
            LoopEvent::Frame => {
                session = frame_tick(&session, frame);
                let (cols, rows) = terminal::size()?;
                display::render(out, &session, cols, rows)?;
                frame_pending.ack();
            }
            LoopEvent::Second { epoch } => {
                session = second_elapsed(&session, epoch);
            }
        }

        if session.phase != Phase::Playing && countdown.take().is_some() {
            debug!(phase = ?session.phase, "countdown cancelled");
        }
    }

    info!(score = session.score, "quit");
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    init_tracing()?;
    install_panic_hook();
    info!(fps = config::frames_per_second(), "target range starting");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through the same channel the tickers use.
    let (tx, rx) = mpsc::channel::<LoopEvent>();
    let input_tx = tx.clone();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if input_tx.send(LoopEvent::Input(ev)).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &tx, &rx);

    // Always restore the terminal
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
