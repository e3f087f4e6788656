//! Background repaint loop shared by spinners and effects.

use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// What a tick callback wants the loop to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickFlow {
    Continue,
    Break,
}

/// A named thread calling `tick` every `interval` until stopped.
///
/// Sleeping happens on a channel receive so a stop request wakes the
/// loop immediately instead of after the current interval. The loop
/// never sends on its completion channel; dropping the sender on exit
/// (including during unwinding) is the signal.
#[derive(Debug)]
pub(crate) struct Ticker {
    stop_tx: Mutex<Option<Sender<()>>>,
    done_rx: Mutex<Receiver<()>>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Ticker {
    /// Start the loop. The first tick runs immediately.
    ///
    /// With a `deadline`, the loop also ends once that much time has
    /// passed since spawn.
    pub(crate) fn spawn<F>(
        name: &str,
        interval: Duration,
        deadline: Option<Duration>,
        mut tick: F,
    ) -> io::Result<Self>
    where
        F: FnMut(usize) -> TickFlow + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let (done_tx, done_rx) = mpsc::channel::<()>();

        let handle = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                let _done = done_tx;
                let started = Instant::now();
                let mut tick_index = 0usize;
                loop {
                    if deadline.is_some_and(|d| started.elapsed() >= d) {
                        break;
                    }
                    if tick(tick_index) == TickFlow::Break {
                        break;
                    }
                    tick_index = tick_index.wrapping_add(1);

                    let wait = match deadline {
                        Some(d) => interval.min(d.saturating_sub(started.elapsed())),
                        None => interval,
                    };
                    match stop_rx.recv_timeout(wait) {
                        Err(RecvTimeoutError::Timeout) => {}
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            })?;

        Ok(Self {
            stop_tx: Mutex::new(Some(stop_tx)),
            done_rx: Mutex::new(done_rx),
            handle: Mutex::new(Some(handle)),
        })
    }

    /// Ask the loop to exit and wait at most `bound` for it.
    ///
    /// Returns false if the loop was still running when the bound
    /// expired; the thread is then left detached.
    pub(crate) fn halt(&self, bound: Duration) -> bool {
        drop(self.stop_tx.lock().take());
        let exited = match self.done_rx.try_lock_for(bound) {
            Some(rx) => !matches!(rx.recv_timeout(bound), Err(RecvTimeoutError::Timeout)),
            None => false,
        };
        if exited {
            self.join();
        }
        exited
    }

    /// Block until the loop ends on its own (deadline or `Break`).
    pub(crate) fn wait(&self) {
        {
            let rx = self.done_rx.lock();
            // Only ever returns Err: the loop never sends.
            let _ = rx.recv();
        }
        self.join();
    }

    fn join(&self) {
        if let Some(handle) = self.handle.lock().take() {
            if handle.join().is_err() {
                tracing::warn!("animation thread panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_first_tick_is_immediate() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ticks);
        let ticker = Ticker::spawn("test-tick", Duration::from_secs(60), None, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            TickFlow::Continue
        })
        .unwrap();
        thread::sleep(Duration::from_millis(50));
        assert!(ticker.halt(Duration::from_millis(500)));
        assert_eq!(ticks.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_halt_wakes_a_sleeping_loop() {
        let ticker = Ticker::spawn("test-halt", Duration::from_secs(60), None, |_| {
            TickFlow::Continue
        })
        .unwrap();
        let started = Instant::now();
        assert!(ticker.halt(Duration::from_millis(500)));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_break_ends_loop() {
        let ticker = Ticker::spawn("test-break", Duration::from_millis(1), None, |i| {
            if i >= 3 {
                TickFlow::Break
            } else {
                TickFlow::Continue
            }
        })
        .unwrap();
        ticker.wait();
    }

    #[test]
    fn test_deadline_ends_loop() {
        let ticker = Ticker::spawn(
            "test-deadline",
            Duration::from_millis(5),
            Some(Duration::from_millis(30)),
            |_| TickFlow::Continue,
        )
        .unwrap();
        let started = Instant::now();
        ticker.wait();
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_halt_gives_up_on_stuck_tick() {
        let ticker = Ticker::spawn("test-stuck", Duration::from_millis(1), None, |_| {
            thread::sleep(Duration::from_millis(400));
            TickFlow::Continue
        })
        .unwrap();
        thread::sleep(Duration::from_millis(20));
        assert!(!ticker.halt(Duration::from_millis(10)));
    }

    #[test]
    fn test_halt_twice_is_harmless() {
        let ticker =
            Ticker::spawn("test-twice", Duration::from_millis(5), None, |_| TickFlow::Continue)
                .unwrap();
        assert!(ticker.halt(Duration::from_millis(500)));
        assert!(ticker.halt(Duration::from_millis(10)));
    }
}
