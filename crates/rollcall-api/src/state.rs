//! Shared application state.

use std::sync::Arc;

use rollcall_core::clock::Clock;
use rollcall_core::roster::RosterSource;
use rollcall_draw::application::animator::{DrawAnimator, SharedRng};
use rollcall_draw::domain::aggregates::DrawSession;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::AppError;

/// Application state shared across all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Owner of the draw session and its animation timer.
    pub animator: Arc<DrawAnimator>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(animator: Arc<DrawAnimator>) -> Self {
        Self { animator }
    }

    /// Loads the roster from `source` and builds a fresh draw session
    /// configured by `config`.
    ///
    /// An empty roster is accepted; draws on it are rejected later.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Roster` if the roster cannot be loaded.
    pub async fn load(
        source: &dyn RosterSource,
        config: &AppConfig,
        clock: Arc<dyn Clock>,
        rng: SharedRng,
    ) -> Result<Self, AppError> {
        let roster = source.load_roster().await?;
        if roster.is_empty() {
            tracing::warn!("roster is empty; draws will be rejected");
        } else {
            tracing::info!(size = roster.len(), "roster loaded");
        }

        let session = DrawSession::new(
            Uuid::new_v4(),
            roster,
            config.pick_count,
            config.hide_names,
        );
        let animator = DrawAnimator::new(session, config.animation, clock, rng);
        Ok(Self::new(Arc::new(animator)))
    }
}
