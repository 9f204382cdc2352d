/// Periodic event producers.
///
/// A `Ticker` owns a background thread that posts one event per period onto
/// an `mpsc` channel.  The game runs two of them, the 1 Hz countdown and the
/// frame tick, and both feed the same channel as the input thread so every
/// event is applied serially by one consumer.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::trace;

pub const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);

pub struct Ticker {
    stop: Arc<AtomicBool>,
}

/// Back-pressure handle for a coalescing ticker.
///
/// Set by the producer when it posts, cleared by the consumer with `ack` once
/// the event has been handled.  While set, further ticks are skipped, so at
/// most one such event sits in the channel however slow the consumer is.
#[derive(Clone, Debug)]
pub struct Pending(Arc<AtomicBool>);

impl Pending {
    pub fn ack(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Ticker {
    /// Start posting `make()` onto `tx` every `period`, first one a full
    /// period from now.  The thread ends once the ticker is cancelled or
    /// dropped, or when the receiver hangs up.
    ///
    /// Cancellation is checked before each send, but an event already in the
    /// channel stays there; consumers that care tag events (see
    /// `GameSession::clock_epoch`).
    pub fn spawn<E, F>(period: Duration, tx: Sender<E>, make: F) -> Self
    where
        E: Send + 'static,
        F: FnMut() -> E + Send + 'static,
    {
        Self::run(period, tx, make, None)
    }

    /// Like `spawn`, but a tick is only posted once the previous one has been
    /// acknowledged through the returned `Pending`.
    pub fn spawn_coalescing<E, F>(period: Duration, tx: Sender<E>, make: F) -> (Self, Pending)
    where
        E: Send + 'static,
        F: FnMut() -> E + Send + 'static,
    {
        let pending = Pending(Arc::new(AtomicBool::new(false)));
        let ticker = Self::run(period, tx, make, Some(pending.clone()));
        (ticker, pending)
    }

    fn run<E, F>(period: Duration, tx: Sender<E>, mut make: F, pending: Option<Pending>) -> Self
    where
        E: Send + 'static,
        F: FnMut() -> E + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);

        thread::spawn(move || {
            let mut deadline = Instant::now() + period;
            loop {
                // Sleep towards a fixed deadline so the period does not drift.
                let now = Instant::now();
                if deadline > now {
                    thread::sleep(deadline - now);
                }
                deadline += period;

                // Missed deadlines are dropped, never replayed in a burst.
                let now = Instant::now();
                if deadline < now {
                    deadline = now + period;
                }

                if flag.load(Ordering::Acquire) {
                    break;
                }
                if let Some(Pending(busy)) = &pending {
                    if busy.swap(true, Ordering::AcqRel) {
                        continue; // previous tick not handled yet
                    }
                }
                if tx.send(make()).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            trace!(?period, "ticker stopped");
        });

        Ticker { stop }
    }

    pub fn cancel(&self) {
        self.stop.store(true, Ordering::Release);
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}
