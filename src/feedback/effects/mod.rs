//! Full-screen cellular animations.
//!
//! An effect is a grid simulation ([`CellularEffect`]) driven by an
//! [`EffectSession`], which owns the background loop, the deadline and the
//! terminal cleanup. Sessions follow the same lifecycle as spinners.

mod fire;
mod matrix;

pub use fire::{heat_glyph, heat_key, FireEffect, FireOptions, FIRE_GLYPHS, MAX_HEAT};
pub use matrix::{MatrixRain, MatrixRainOptions};

use std::io;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Condvar, Mutex};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::session::{SessionId, SessionState, SessionStatus, SpeedFactor};
use super::ticker::{TickFlow, Ticker};
use super::{AnimationError, STOP_JOIN_BOUND};
use crate::lifecycle::{ActiveSessions, Stoppable};
use crate::terminal::{best_effort, Renderer};

/// Default time between effect frames at speed 1.0.
pub const DEFAULT_EFFECT_INTERVAL: Duration = Duration::from_millis(100);

/// A grid simulation that can be advanced and drawn.
pub trait CellularEffect: Send + 'static {
    /// Short name for logs and thread names.
    fn name(&self) -> &'static str;

    /// Advance the simulation by one tick.
    fn step(&mut self, rng: &mut StdRng);

    /// Paint the current state.
    fn draw(&self, renderer: &dyn Renderer) -> io::Result<()>;
}

/// Random source for an effect: seeded when reproducibility matters.
pub fn effect_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

/// Timing for an effect run, before speed scaling.
#[derive(Debug, Clone, Copy)]
pub struct EffectTiming {
    /// Wall time the effect runs for.
    pub duration: Duration,
    /// Time between frames.
    pub interval: Duration,
    /// Divides both `duration` and `interval`.
    pub speed: SpeedFactor,
}

impl EffectTiming {
    /// Run for `duration` at the default frame rate and speed.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            interval: DEFAULT_EFFECT_INTERVAL,
            speed: SpeedFactor::default(),
        }
    }

    /// Same timing at a different speed.
    pub fn with_speed(mut self, speed: SpeedFactor) -> Self {
        self.speed = speed;
        self
    }
}

struct EffectCore {
    id: SessionId,
    name: &'static str,
    status: SessionStatus,
    renderer: Arc<dyn Renderer>,
    sessions: Arc<ActiveSessions>,
    ticker: Mutex<Option<Arc<Ticker>>>,
    settled: Mutex<()>,
    stopped: Condvar,
}

impl EffectCore {
    /// Block until whichever thread is stopping the session has finished.
    fn wait_stopped(&self) {
        let mut settled = self.settled.lock();
        while self.status.get() != SessionState::Stopped {
            self.stopped.wait(&mut settled);
        }
    }

    fn shutdown(&self) {
        if self.status.advance(SessionState::Created, SessionState::Stopped) {
            return;
        }
        if !self.status.advance(SessionState::Running, SessionState::Stopping) {
            return;
        }

        let ticker = self.ticker.lock().take();
        if let Some(ticker) = ticker {
            if !ticker.halt(STOP_JOIN_BOUND) {
                tracing::warn!(id = %self.id, effect = self.name, "effect thread did not stop in time, detaching");
            }
        }

        best_effort("show_cursor", self.renderer.show_cursor());
        best_effort("clear_screen", self.renderer.clear_screen());
        best_effort("flush", self.renderer.flush());
        self.sessions.deregister(self.id);
        {
            let _settled = self.settled.lock();
            self.status.advance(SessionState::Stopping, SessionState::Stopped);
            self.stopped.notify_all();
        }
        tracing::debug!(id = %self.id, effect = self.name, "effect stopped");
    }
}

impl Stoppable for EffectCore {
    fn session_id(&self) -> SessionId {
        self.id
    }

    fn stop(&self) {
        self.shutdown();
    }

    fn kind(&self) -> &'static str {
        self.name
    }
}

/// Runs a [`CellularEffect`] until its deadline or until stopped.
///
/// Dropping the session stops it and clears the screen.
pub struct EffectSession {
    core: Arc<EffectCore>,
    pending: Mutex<Option<(Box<dyn CellularEffect>, StdRng)>>,
    deadline: Duration,
    interval: Duration,
}

impl EffectSession {
    /// Prepare a run. Nothing is drawn until [`EffectSession::start`].
    pub fn new(
        effect: impl CellularEffect,
        rng: StdRng,
        timing: EffectTiming,
        renderer: Arc<dyn Renderer>,
        sessions: Arc<ActiveSessions>,
    ) -> Self {
        Self {
            core: Arc::new(EffectCore {
                id: SessionId::next(),
                name: effect.name(),
                status: SessionStatus::new(),
                renderer,
                sessions,
                ticker: Mutex::new(None),
                settled: Mutex::new(()),
                stopped: Condvar::new(),
            }),
            pending: Mutex::new(Some((Box::new(effect), rng))),
            deadline: timing.speed.scale(timing.duration),
            interval: timing.speed.scale(timing.interval),
        }
    }

    /// Hide the cursor and start the background loop.
    ///
    /// Same rules as [`crate::feedback::Spinner::start`]: a no-op unless
    /// freshly created, refused during shutdown.
    ///
    /// # Errors
    ///
    /// Returns [`AnimationError::Spawn`] if the thread cannot be created.
    pub fn start(&self) -> Result<(), AnimationError> {
        let core = &self.core;
        if !core.status.advance(SessionState::Created, SessionState::Running) {
            return Ok(());
        }
        let Some((mut effect, mut rng)) = self.pending.lock().take() else {
            return Ok(());
        };
        if !core.sessions.register(Arc::clone(core) as Arc<dyn Stoppable>) {
            tracing::debug!(id = %core.id, "shutdown in progress, effect not started");
            core.status.advance(SessionState::Running, SessionState::Stopped);
            return Ok(());
        }

        best_effort("hide_cursor", core.renderer.hide_cursor());

        let mut slot = core.ticker.lock();
        if !core.status.is_running() {
            drop(slot);
            tracing::debug!(id = %core.id, effect = core.name, "effect stopped while starting");
            best_effort("show_cursor", core.renderer.show_cursor());
            best_effort("flush", core.renderer.flush());
            return Ok(());
        }
        let looped = Arc::clone(core);
        let spawned = Ticker::spawn(
            &format!("termglow-{}", core.name),
            self.interval,
            Some(self.deadline),
            move |tick| {
                if !looped.status.is_running() {
                    return TickFlow::Break;
                }
                tracing::trace!(tick, "effect frame");
                effect.step(&mut rng);
                best_effort("draw", effect.draw(looped.renderer.as_ref()));
                best_effort("flush", looped.renderer.flush());
                TickFlow::Continue
            },
        );

        match spawned {
            Ok(ticker) => {
                *slot = Some(Arc::new(ticker));
                tracing::debug!(id = %core.id, effect = core.name, deadline = ?self.deadline, "effect started");
                Ok(())
            }
            Err(e) => {
                drop(slot);
                best_effort("show_cursor", core.renderer.show_cursor());
                core.sessions.deregister(core.id);
                core.status.advance(SessionState::Running, SessionState::Stopped);
                Err(e.into())
            }
        }
    }

    /// Start, block until the deadline passes or the session is stopped
    /// from elsewhere, then clean up.
    ///
    /// Returns only once the terminal has been restored, even when the
    /// cleanup is running on another thread.
    ///
    /// # Errors
    ///
    /// Returns [`AnimationError::Spawn`] if the thread cannot be created.
    pub fn run(&self) -> Result<(), AnimationError> {
        self.start()?;
        let ticker = self.core.ticker.lock().clone();
        if let Some(ticker) = ticker {
            ticker.wait();
        }
        self.stop();
        self.core.wait_stopped();
        Ok(())
    }

    /// Stop the loop, restore the cursor and clear the screen. Idempotent.
    pub fn stop(&self) {
        self.core.shutdown();
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.core.status.get()
    }

    /// Session identity.
    pub fn id(&self) -> SessionId {
        self.core.id
    }

    /// Effective run time after speed scaling.
    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Effective frame interval after speed scaling.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Drop for EffectSession {
    fn drop(&mut self) {
        self.core.shutdown();
    }
}
