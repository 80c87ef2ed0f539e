//! Aggregate root for the Draw context.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use rollcall_core::clock::Clock;
use rollcall_core::error::DomainError;
use rollcall_core::event::EventMetadata;
use rollcall_core::rng::DeterministicRng;
use rollcall_core::roster::Roster;
use serde::Serialize;
use uuid::Uuid;

use super::events::{
    DrawCancelled, DrawEvent, DrawEventKind, DrawSettled, DrawStarted, HideModeChanged,
    NameRevealed, PickCountChanged, SelectionTicked,
};
use super::sampler::sample_indices;

/// Externally visible lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawStatus {
    /// No draw has settled yet.
    Idle,
    /// The animation is in progress.
    Running,
    /// A draw has completed and its result is on display.
    Settled,
}

/// Bookkeeping for the draw currently animating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RunningDraw {
    pub draw_id: Uuid,
    pub correlation_id: Uuid,
    pub effective_count: usize,
    pub ticks_elapsed: u32,
    pub total_ticks: u32,
}

/// Internal phase state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DrawPhase {
    Idle,
    Running(RunningDraw),
    Settled,
}

/// Result of asking a session to begin a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeginDraw {
    /// A new draw entered the running phase.
    Started {
        /// Identifier of the new draw.
        draw_id: Uuid,
        /// Ticks the animation must run.
        total_ticks: u32,
    },
    /// A draw was already running; the request was ignored.
    AlreadyRunning,
}

/// Result of a single animation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// More ticks remain.
    Continuing {
        /// 1-based number of the tick that just fired.
        tick: u32,
    },
    /// This tick was the last one and the result is committed.
    Settled,
}

/// The aggregate root holding all state of one drawing session.
///
/// Selections are stored as roster positions so that duplicate names remain
/// distinct entries.
#[derive(Debug)]
pub struct DrawSession {
    /// Session identifier.
    pub id: Uuid,
    roster: Roster,
    pick_count: usize,
    hide_names: bool,
    pub(crate) phase: DrawPhase,
    displayed: Vec<usize>,
    committed: Vec<usize>,
    revealed: BTreeSet<String>,
    last_draw_at: Option<DateTime<Utc>>,
    draws_completed: u64,
    sequence: i64,
    uncommitted_events: Vec<DrawEvent>,
}

impl DrawSession {
    /// Creates an idle session over `roster`; `pick_count` is clamped.
    #[must_use]
    pub fn new(id: Uuid, roster: Roster, pick_count: usize, hide_names: bool) -> Self {
        let pick_count = roster.clamp_pick_count(pick_count);
        Self {
            id,
            roster,
            pick_count,
            hide_names,
            phase: DrawPhase::Idle,
            displayed: Vec::new(),
            committed: Vec::new(),
            revealed: BTreeSet::new(),
            last_draw_at: None,
            draws_completed: 0,
            sequence: 0,
            uncommitted_events: Vec::new(),
        }
    }

    fn record(&mut self, kind: DrawEventKind, correlation_id: Uuid, clock: &dyn Clock) {
        self.sequence += 1;
        let event = DrawEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: kind.event_type().to_owned(),
                session_id: self.id,
                sequence_number: self.sequence,
                correlation_id,
                occurred_at: clock.now(),
            },
            kind,
        };
        self.uncommitted_events.push(event);
    }

    fn names_at(&self, positions: &[usize]) -> Vec<String> {
        positions
            .iter()
            .map(|&i| self.roster.names()[i].clone())
            .collect()
    }

    /// Starts a new draw.
    ///
    /// Clears the reveal set and captures `min(pick_count, roster size)` as
    /// the count every tick samples. A start while a draw is running is
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyRoster` if there is nothing to draw from.
    pub fn begin_draw(
        &mut self,
        correlation_id: Uuid,
        total_ticks: u32,
        clock: &dyn Clock,
    ) -> Result<BeginDraw, DomainError> {
        if self.roster.is_empty() {
            return Err(DomainError::EmptyRoster);
        }
        if matches!(self.phase, DrawPhase::Running(_)) {
            return Ok(BeginDraw::AlreadyRunning);
        }

        let total_ticks = total_ticks.max(1);
        let draw_id = Uuid::new_v4();
        let effective_count = self.effective_count();
        self.revealed.clear();
        self.phase = DrawPhase::Running(RunningDraw {
            draw_id,
            correlation_id,
            effective_count,
            ticks_elapsed: 0,
            total_ticks,
        });
        self.record(
            DrawEventKind::DrawStarted(DrawStarted {
                draw_id,
                effective_count,
                total_ticks,
            }),
            correlation_id,
            clock,
        );
        Ok(BeginDraw::Started {
            draw_id,
            total_ticks,
        })
    }

    /// Fires one animation tick: re-samples and overwrites the displayed
    /// selection, settling the draw on the final tick.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if no draw is running.
    pub fn tick(
        &mut self,
        rng: &mut dyn DeterministicRng,
        clock: &dyn Clock,
    ) -> Result<TickOutcome, DomainError> {
        let DrawPhase::Running(mut running) = self.phase else {
            return Err(DomainError::Validation("no draw is running".to_owned()));
        };

        self.displayed = sample_indices(self.roster.len(), running.effective_count, rng);
        running.ticks_elapsed += 1;
        let tick = running.ticks_elapsed;
        self.record(
            DrawEventKind::SelectionTicked(SelectionTicked {
                draw_id: running.draw_id,
                tick,
                selection: self.names_at(&self.displayed),
            }),
            running.correlation_id,
            clock,
        );

        if tick < running.total_ticks {
            self.phase = DrawPhase::Running(running);
            return Ok(TickOutcome::Continuing { tick });
        }

        let completed_at = clock.now();
        self.committed.clone_from(&self.displayed);
        self.last_draw_at = Some(completed_at);
        self.draws_completed += 1;
        self.phase = DrawPhase::Settled;
        let names = self.names_at(&self.committed);
        self.record(
            DrawEventKind::DrawSettled(DrawSettled {
                draw_id: running.draw_id,
                drawn_count: names.len(),
                names,
                completed_at,
            }),
            running.correlation_id,
            clock,
        );
        Ok(TickOutcome::Settled)
    }

    /// Tears down a running draw, restoring the previously committed result.
    ///
    /// The session returns to `Settled` when an earlier draw left a result,
    /// and to `Idle` otherwise. Returns `false` when no draw was running.
    pub fn cancel_draw(&mut self, clock: &dyn Clock) -> bool {
        let DrawPhase::Running(running) = self.phase else {
            return false;
        };

        self.displayed.clone_from(&self.committed);
        self.phase = if self.committed.is_empty() {
            DrawPhase::Idle
        } else {
            DrawPhase::Settled
        };
        self.record(
            DrawEventKind::DrawCancelled(DrawCancelled {
                draw_id: running.draw_id,
                ticks_elapsed: running.ticks_elapsed,
            }),
            running.correlation_id,
            clock,
        );
        true
    }

    /// Sets the pick count for future draws, clamped to `[1, roster size]`.
    ///
    /// A draw already running keeps the count it started with.
    pub fn set_pick_count(
        &mut self,
        requested: usize,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> usize {
        let effective = self.roster.clamp_pick_count(requested);
        self.pick_count = effective;
        self.record(
            DrawEventKind::PickCountChanged(PickCountChanged {
                requested,
                effective,
            }),
            correlation_id,
            clock,
        );
        effective
    }

    /// Switches hide mode. Any change clears the reveal set.
    ///
    /// Returns `false` when the mode already had the requested value.
    pub fn set_hide_mode(
        &mut self,
        hide_names: bool,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> bool {
        if self.hide_names == hide_names {
            return false;
        }
        self.hide_names = hide_names;
        self.revealed.clear();
        self.record(
            DrawEventKind::HideModeChanged(HideModeChanged { hide_names }),
            correlation_id,
            clock,
        );
        true
    }

    /// Unmasks a drawn name while hide mode is on.
    ///
    /// Returns `true` the first time a name is revealed and `false` after.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if hide mode is off or the session
    /// is not settled, and `DomainError::NameNotDrawn` if `name` is not part
    /// of the committed result.
    pub fn reveal(
        &mut self,
        name: &str,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<bool, DomainError> {
        if !self.hide_names {
            return Err(DomainError::Validation(
                "names can only be revealed in hide mode".to_owned(),
            ));
        }
        if self.phase != DrawPhase::Settled {
            return Err(DomainError::Validation(
                "names can only be revealed after a draw settles".to_owned(),
            ));
        }
        if !self.committed_names().any(|drawn| drawn == name) {
            return Err(DomainError::NameNotDrawn(name.to_owned()));
        }
        if !self.revealed.insert(name.to_owned()) {
            return Ok(false);
        }
        self.record(
            DrawEventKind::NameRevealed(NameRevealed {
                name: name.to_owned(),
            }),
            correlation_id,
            clock,
        );
        Ok(true)
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub fn status(&self) -> DrawStatus {
        match self.phase {
            DrawPhase::Idle => DrawStatus::Idle,
            DrawPhase::Running(_) => DrawStatus::Running,
            DrawPhase::Settled => DrawStatus::Settled,
        }
    }

    /// Returns `true` while the animation is in progress.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        matches!(self.phase, DrawPhase::Running(_))
    }

    /// Identifier of the running draw, if any.
    #[must_use]
    pub fn current_draw_id(&self) -> Option<Uuid> {
        match self.phase {
            DrawPhase::Running(running) => Some(running.draw_id),
            _ => None,
        }
    }

    /// Ticks fired so far by the running draw, if any.
    #[must_use]
    pub fn ticks_elapsed(&self) -> Option<u32> {
        match self.phase {
            DrawPhase::Running(running) => Some(running.ticks_elapsed),
            _ => None,
        }
    }

    /// The roster this session draws from.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The configured pick count.
    #[must_use]
    pub fn pick_count(&self) -> usize {
        self.pick_count
    }

    /// How many names a draw started now would yield.
    #[must_use]
    pub fn effective_count(&self) -> usize {
        self.roster.effective_count(self.pick_count)
    }

    /// Whether hide mode is on.
    #[must_use]
    pub fn hide_names(&self) -> bool {
        self.hide_names
    }

    /// Names currently on display, in selection order.
    pub fn displayed_names(&self) -> impl Iterator<Item = &str> {
        self.displayed
            .iter()
            .map(|&i| self.roster.names()[i].as_str())
    }

    /// Names of the last committed draw, in selection order.
    pub fn committed_names(&self) -> impl Iterator<Item = &str> {
        self.committed
            .iter()
            .map(|&i| self.roster.names()[i].as_str())
    }

    /// Names revealed since the last draw or hide mode change.
    #[must_use]
    pub fn revealed(&self) -> &BTreeSet<String> {
        &self.revealed
    }

    /// When the last draw completed.
    #[must_use]
    pub fn last_draw_at(&self) -> Option<DateTime<Utc>> {
        self.last_draw_at
    }

    /// Number of draws that have settled in this session.
    #[must_use]
    pub fn draws_completed(&self) -> u64 {
        self.draws_completed
    }

    /// Returns events recorded since the last drain.
    #[must_use]
    pub fn uncommitted_events(&self) -> &[DrawEvent] {
        &self.uncommitted_events
    }

    /// Removes and returns events recorded since the last drain.
    pub fn take_uncommitted_events(&mut self) -> Vec<DrawEvent> {
        std::mem::take(&mut self.uncommitted_events)
    }
}
