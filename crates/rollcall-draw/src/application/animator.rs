//! Timed driver that animates draws on the tokio runtime.
//!
//! The animator owns the `DrawSession` and the timer of the draw in flight.
//! Every mutation happens under the session mutex, which is never held
//! across an await point; the events it produces are broadcast before the
//! lock is released so subscribers observe them in sequence order.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use rollcall_core::clock::Clock;
use rollcall_core::error::DomainError;
use rollcall_core::rng::DeterministicRng;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::domain::aggregates::{BeginDraw, DrawSession, TickOutcome};
use crate::domain::animation::AnimationConfig;
use crate::domain::events::DrawEvent;

/// Capacity of the broadcast channel carrying domain events.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// RNG shared between the animator and stateless sampling.
pub type SharedRng = Arc<Mutex<dyn DeterministicRng + Send>>;

/// The committed outcome of a draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettledDraw {
    /// The draw identifier.
    pub draw_id: Uuid,
    /// Drawn names in selection order.
    pub names: Vec<String>,
    /// When the draw completed.
    pub completed_at: DateTime<Utc>,
}

/// One item of the per-draw update stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawUpdate {
    /// A tick replaced the displayed selection.
    Tick {
        /// 1-based tick number.
        tick: u32,
        /// The selection now on display.
        selection: Vec<String>,
    },
    /// The draw settled. Always the last update of a completed draw.
    Settled(SettledDraw),
    /// The draw was cancelled. Always the last update of a cancelled draw.
    Cancelled {
        /// Ticks that fired before cancellation.
        ticks_elapsed: u32,
    },
}

/// Receiving end of a started draw.
#[derive(Debug)]
pub struct DrawHandle {
    draw_id: Uuid,
    updates: mpsc::UnboundedReceiver<DrawUpdate>,
}

impl DrawHandle {
    /// Identifier of the draw this handle follows.
    #[must_use]
    pub fn draw_id(&self) -> Uuid {
        self.draw_id
    }

    /// Waits for the next update; `None` once the stream has ended.
    pub async fn next_update(&mut self) -> Option<DrawUpdate> {
        self.updates.recv().await
    }

    /// Drains the stream and returns the settled result, or `None` if the
    /// draw was cancelled.
    pub async fn settled(mut self) -> Option<SettledDraw> {
        while let Some(update) = self.updates.recv().await {
            match update {
                DrawUpdate::Tick { .. } => {}
                DrawUpdate::Settled(settled) => return Some(settled),
                DrawUpdate::Cancelled { .. } => return None,
            }
        }
        None
    }
}

/// Outcome of a start request.
#[derive(Debug)]
pub enum StartOutcome {
    /// A new draw is animating.
    Started(DrawHandle),
    /// A draw was already running; nothing changed.
    Ignored,
}

/// The timer resource of the draw in flight.
#[derive(Debug)]
struct ActiveDraw {
    draw_id: Uuid,
    stop: oneshot::Sender<()>,
    /// Resolves to `true` if the task cancelled its draw.
    task: JoinHandle<bool>,
}

/// What one tick produced, captured under the session lock.
struct TickReport {
    tick: u32,
    selection: Vec<String>,
    settled: Option<SettledDraw>,
}

/// Shared state cloned into the timer task.
#[derive(Clone)]
struct Driver {
    session: Arc<Mutex<DrawSession>>,
    clock: Arc<dyn Clock>,
    rng: SharedRng,
    events: broadcast::Sender<DrawEvent>,
    config: AnimationConfig,
}

fn lock<'a, T: ?Sized>(
    mutex: &'a Mutex<T>,
    what: &str,
) -> Result<MutexGuard<'a, T>, DomainError> {
    mutex
        .lock()
        .map_err(|e| DomainError::Infrastructure(format!("{what} mutex poisoned: {e}")))
}

impl Driver {
    fn apply<R>(
        &self,
        f: impl FnOnce(&mut DrawSession, &dyn Clock) -> Result<R, DomainError>,
    ) -> Result<R, DomainError> {
        let mut session = lock(&self.session, "session")?;
        let result = f(&mut session, self.clock.as_ref());
        for event in session.take_uncommitted_events() {
            // An error only means nobody is subscribed right now.
            let _ = self.events.send(event);
        }
        result
    }

    /// Ticks `draw_id`. `None` means the session is no longer running that
    /// draw and the caller's timer is stale.
    fn tick(&self, draw_id: Uuid) -> Result<Option<TickReport>, DomainError> {
        self.apply(|session, clock| {
            if session.current_draw_id() != Some(draw_id) {
                return Ok(None);
            }
            let outcome = {
                let mut rng = lock(&self.rng, "RNG")?;
                session.tick(&mut *rng, clock)?
            };
            let selection: Vec<String> = session.displayed_names().map(str::to_owned).collect();
            Ok(Some(match outcome {
                TickOutcome::Continuing { tick } => TickReport {
                    tick,
                    selection,
                    settled: None,
                },
                TickOutcome::Settled => TickReport {
                    tick: self.config.total_ticks(),
                    settled: Some(SettledDraw {
                        draw_id,
                        names: selection.clone(),
                        completed_at: session.last_draw_at().unwrap_or_else(|| clock.now()),
                    }),
                    selection,
                },
            }))
        })
    }

    /// Cancels `draw_id` if it is still the running draw, returning the
    /// ticks it had fired.
    fn cancel(&self, draw_id: Uuid) -> Result<Option<u32>, DomainError> {
        self.apply(|session, clock| {
            if session.current_draw_id() != Some(draw_id) {
                return Ok(None);
            }
            let ticks_elapsed = session.ticks_elapsed().unwrap_or_default();
            session.cancel_draw(clock);
            Ok(Some(ticks_elapsed))
        })
    }
}

/// Drives `draw_id` to completion. Returns `true` if the draw was cancelled.
async fn run_draw(
    driver: Driver,
    draw_id: Uuid,
    updates: mpsc::UnboundedSender<DrawUpdate>,
    mut stop: oneshot::Receiver<()>,
) -> bool {
    let period = driver.config.tick_interval();
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = &mut stop => return cancel_draw(&driver, draw_id, &updates),
            _ = ticker.tick() => {
                let report = match driver.tick(draw_id) {
                    Ok(Some(report)) => report,
                    Ok(None) => {
                        debug!(%draw_id, "draw no longer running; timer exits");
                        return false;
                    }
                    Err(e) => {
                        error!(%draw_id, error = %e, "draw tick failed; cancelling");
                        return cancel_draw(&driver, draw_id, &updates);
                    }
                };
                debug!(%draw_id, tick = report.tick, "draw ticked");
                let _ = updates.send(DrawUpdate::Tick {
                    tick: report.tick,
                    selection: report.selection,
                });
                if let Some(settled) = report.settled {
                    info!(%draw_id, drawn = settled.names.len(), "draw settled");
                    let _ = updates.send(DrawUpdate::Settled(settled));
                    return false;
                }
            }
        }
    }
}

fn cancel_draw(
    driver: &Driver,
    draw_id: Uuid,
    updates: &mpsc::UnboundedSender<DrawUpdate>,
) -> bool {
    match driver.cancel(draw_id) {
        Ok(Some(ticks_elapsed)) => {
            info!(%draw_id, ticks_elapsed, "draw cancelled");
            let _ = updates.send(DrawUpdate::Cancelled { ticks_elapsed });
            true
        }
        Ok(None) => false,
        Err(e) => {
            error!(%draw_id, error = %e, "failed to cancel draw");
            false
        }
    }
}

/// Owns a draw session and runs its animation timer.
pub struct DrawAnimator {
    driver: Driver,
    active: Mutex<Option<ActiveDraw>>,
}

impl fmt::Debug for DrawAnimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawAnimator")
            .field("config", &self.driver.config)
            .finish_non_exhaustive()
    }
}

impl DrawAnimator {
    /// Creates an animator driving `session`.
    #[must_use]
    pub fn new(
        session: DrawSession,
        config: AnimationConfig,
        clock: Arc<dyn Clock>,
        rng: SharedRng,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            driver: Driver {
                session: Arc::new(Mutex::new(session)),
                clock,
                rng,
                events,
                config,
            },
            active: Mutex::new(None),
        }
    }

    /// The animation timing in use.
    #[must_use]
    pub fn config(&self) -> AnimationConfig {
        self.driver.config
    }

    /// The RNG used for sampling.
    #[must_use]
    pub fn rng(&self) -> &SharedRng {
        &self.driver.rng
    }

    /// Subscribes to every domain event the session produces from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DrawEvent> {
        self.driver.events.subscribe()
    }

    /// Runs `f` against a read-only view of the session.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the session mutex is poisoned.
    pub fn with_session<R>(&self, f: impl FnOnce(&DrawSession) -> R) -> Result<R, DomainError> {
        let session = lock(&self.driver.session, "session")?;
        Ok(f(&session))
    }

    /// Mutates the session and broadcasts the resulting events.
    pub(crate) fn apply<R>(
        &self,
        f: impl FnOnce(&mut DrawSession, &dyn Clock) -> Result<R, DomainError>,
    ) -> Result<R, DomainError> {
        self.driver.apply(f)
    }

    /// Starts a draw and spawns its animation timer.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyRoster` if the roster is empty, or
    /// `DomainError::Infrastructure` if a mutex is poisoned.
    pub fn start_draw(&self, correlation_id: Uuid) -> Result<StartOutcome, DomainError> {
        // Held until the timer is registered so `stop` never sees a running
        // draw without its timer.
        let mut active = lock(&self.active, "active draw")?;

        let total_ticks = self.driver.config.total_ticks();
        let begin = self.apply(|session, clock| {
            session.begin_draw(correlation_id, total_ticks, clock)
        })?;

        let BeginDraw::Started { draw_id, .. } = begin else {
            warn!(%correlation_id, "draw already running; start ignored");
            return Ok(StartOutcome::Ignored);
        };

        let (updates_tx, updates_rx) = mpsc::unbounded_channel();
        let (stop_tx, stop_rx) = oneshot::channel();
        let task = tokio::spawn(run_draw(self.driver.clone(), draw_id, updates_tx, stop_rx));

        // A previous entry belongs to a draw that already finished.
        *active = Some(ActiveDraw {
            draw_id,
            stop: stop_tx,
            task,
        });

        info!(%draw_id, total_ticks, "draw started");
        Ok(StartOutcome::Started(DrawHandle {
            draw_id,
            updates: updates_rx,
        }))
    }

    /// Stops the draw in flight, if any, and waits for its timer to exit.
    ///
    /// Returns `true` if a running draw was cancelled.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if a mutex is poisoned.
    pub async fn stop(&self) -> Result<bool, DomainError> {
        let Some(active) = lock(&self.active, "active draw")?.take() else {
            return Ok(false);
        };

        let _ = active.stop.send(());
        match active.task.await {
            Ok(cancelled) => Ok(cancelled),
            Err(e) => {
                error!(draw_id = %active.draw_id, error = %e, "draw task ended abnormally");
                // Only this draw is torn down; a newer one is left alone.
                Ok(self.driver.cancel(active.draw_id)?.is_some())
            }
        }
    }
}

impl Drop for DrawAnimator {
    fn drop(&mut self) {
        let slot = self.active.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(active) = slot.take() {
            active.task.abort();
        }
    }
}
