//! Query handlers for the Draw context.
//!
//! This module contains query handlers that read the session owned by the
//! `DrawAnimator` and return read-only view DTOs.

use chrono::{DateTime, Utc};
use rollcall_core::error::DomainError;
use serde::Serialize;
use uuid::Uuid;

use crate::application::animator::DrawAnimator;
use crate::domain::aggregates::{DrawSession, DrawStatus};
use crate::domain::sampler;

/// One slot of the displayed selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionEntryView {
    /// The name, or `None` while masked in hide mode.
    pub name: Option<String>,
    /// Whether the name is currently masked.
    pub masked: bool,
}

/// Read-only view of a draw session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrawView {
    /// The session identifier.
    pub session_id: Uuid,
    /// Current lifecycle status.
    pub status: DrawStatus,
    /// The running draw, if any.
    pub draw_id: Option<Uuid>,
    /// Ticks fired by the running draw, if any.
    pub ticks_elapsed: Option<u32>,
    /// Configured pick count.
    pub pick_count: usize,
    /// Names the next draw would yield.
    pub effective_count: usize,
    /// Number of roster entries.
    pub roster_size: usize,
    /// Whether hide mode is on.
    pub hide_names: bool,
    /// The selection on display, in selection order.
    pub selection: Vec<SelectionEntryView>,
    /// Names revealed in hide mode.
    pub revealed: Vec<String>,
    /// When the last draw completed.
    pub last_draw_at: Option<DateTime<Utc>>,
    /// Number of settled draws.
    pub draws_completed: u64,
}

/// One roster preview entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterEntryView {
    /// The name.
    pub name: String,
    /// Set when the name is on display and hide mode is off.
    pub highlighted: bool,
}

/// Read-only view of the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterView {
    /// Number of roster entries.
    pub size: usize,
    /// Entries in roster order.
    pub entries: Vec<RosterEntryView>,
}

fn to_draw_view(session: &DrawSession) -> DrawView {
    let hide = session.hide_names();
    let selection = session
        .displayed_names()
        .map(|name| {
            let masked = hide && !session.revealed().contains(name);
            SelectionEntryView {
                name: (!masked).then(|| name.to_owned()),
                masked,
            }
        })
        .collect();

    DrawView {
        session_id: session.id,
        status: session.status(),
        draw_id: session.current_draw_id(),
        ticks_elapsed: session.ticks_elapsed(),
        pick_count: session.pick_count(),
        effective_count: session.effective_count(),
        roster_size: session.roster().len(),
        hide_names: hide,
        selection,
        revealed: session.revealed().iter().cloned().collect(),
        last_draw_at: session.last_draw_at(),
        draws_completed: session.draws_completed(),
    }
}

fn to_roster_view(session: &DrawSession) -> RosterView {
    let show_highlight = !session.hide_names();
    let displayed: Vec<&str> = session.displayed_names().collect();
    let entries = session
        .roster()
        .names()
        .iter()
        .map(|name| RosterEntryView {
            name: name.clone(),
            highlighted: show_highlight && displayed.contains(&name.as_str()),
        })
        .collect();

    RosterView {
        size: session.roster().len(),
        entries,
    }
}

/// Retrieves the current view of the draw session.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if session state is unavailable.
pub fn get_draw_view(animator: &DrawAnimator) -> Result<DrawView, DomainError> {
    animator.with_session(to_draw_view)
}

/// Retrieves the roster preview.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if session state is unavailable.
pub fn get_roster_view(animator: &DrawAnimator) -> Result<RosterView, DomainError> {
    animator.with_session(to_roster_view)
}

/// Samples `count` names from the roster without touching session state.
///
/// An empty roster or a zero count yields an empty list.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if session or RNG state is
/// unavailable.
pub fn sample_names(animator: &DrawAnimator, count: usize) -> Result<Vec<String>, DomainError> {
    let roster = animator.with_session(|session| session.roster().clone())?;
    let mut rng = animator
        .rng()
        .lock()
        .map_err(|e| DomainError::Infrastructure(format!("RNG mutex poisoned: {e}")))?;
    Ok(sampler::sample(roster.names(), count, &mut *rng))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rollcall_core::roster::Roster;
    use rollcall_test_support::{FixedClock, MockRng, lettered_roster};

    use super::*;
    use crate::application::animator::{SharedRng, StartOutcome};
    use crate::domain::animation::AnimationConfig;

    fn animator(roster: Roster, hide_names: bool) -> DrawAnimator {
        let session = DrawSession::new(Uuid::new_v4(), roster, 2, hide_names);
        let rng: SharedRng = Arc::new(Mutex::new(MockRng));
        DrawAnimator::new(
            session,
            AnimationConfig::default(),
            Arc::new(FixedClock::reference()),
            rng,
        )
    }

    async fn settle(animator: &DrawAnimator) {
        let StartOutcome::Started(handle) = animator.start_draw(Uuid::new_v4()).unwrap() else {
            panic!("expected Started");
        };
        handle.settled().await.unwrap();
    }

    #[test]
    fn test_draw_view_of_fresh_session_is_idle() {
        let animator = animator(lettered_roster(5), false);

        let view = get_draw_view(&animator).unwrap();

        assert_eq!(view.status, DrawStatus::Idle);
        assert_eq!(view.pick_count, 2);
        assert_eq!(view.effective_count, 2);
        assert_eq!(view.roster_size, 5);
        assert!(view.selection.is_empty());
        assert!(view.last_draw_at.is_none());
        assert_eq!(view.draws_completed, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_draw_view_after_settle_shows_names() {
        let animator = animator(lettered_roster(5), false);
        settle(&animator).await;

        let view = get_draw_view(&animator).unwrap();

        assert_eq!(view.status, DrawStatus::Settled);
        let names: Vec<_> = view.selection.iter().map(|e| e.name.as_deref()).collect();
        assert_eq!(names, [Some("A"), Some("E")]);
        assert_eq!(view.last_draw_at, Some(FixedClock::reference().0));
        assert_eq!(view.draws_completed, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_draw_view_masks_unrevealed_names_in_hide_mode() {
        let animator = animator(lettered_roster(5), true);
        settle(&animator).await;
        animator
            .apply(|session, clock| session.reveal("E", Uuid::new_v4(), clock))
            .unwrap();

        let view = get_draw_view(&animator).unwrap();

        assert_eq!(
            view.selection,
            [
                SelectionEntryView {
                    name: None,
                    masked: true,
                },
                SelectionEntryView {
                    name: Some("E".to_owned()),
                    masked: false,
                },
            ]
        );
        assert_eq!(view.revealed, ["E"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_roster_view_highlights_drawn_names() {
        let animator = animator(lettered_roster(5), false);
        settle(&animator).await;

        let view = get_roster_view(&animator).unwrap();

        let highlighted: Vec<&str> = view
            .entries
            .iter()
            .filter(|e| e.highlighted)
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(view.size, 5);
        assert_eq!(highlighted, ["A", "E"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_roster_view_hides_highlights_in_hide_mode() {
        let animator = animator(lettered_roster(5), true);
        settle(&animator).await;

        let view = get_roster_view(&animator).unwrap();

        assert!(view.entries.iter().all(|e| !e.highlighted));
    }

    #[test]
    fn test_sample_names_leaves_session_untouched() {
        let animator = animator(lettered_roster(5), false);

        let names = sample_names(&animator, 3).unwrap();

        assert_eq!(names, ["A", "E", "D"]);
        let view = get_draw_view(&animator).unwrap();
        assert_eq!(view.status, DrawStatus::Idle);
        assert!(view.selection.is_empty());
    }

    #[test]
    fn test_sample_names_on_empty_roster_is_empty() {
        let animator = animator(Roster::empty(), false);

        assert!(sample_names(&animator, 3).unwrap().is_empty());
    }
}
