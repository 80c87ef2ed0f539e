//! Command handlers for the Draw context.
//!
//! Each handler logs the command, hands it to the `DrawAnimator`, and
//! returns the outcome. Events are broadcast by the animator itself.

use rollcall_core::command::Command;
use rollcall_core::error::DomainError;
use tracing::info;

use crate::application::animator::{DrawAnimator, StartOutcome};
use crate::domain::commands::{RevealName, SetHideMode, SetPickCount, StartDraw, StopDraw};

/// Handles the `StartDraw` command: begins a draw and spawns its animation.
///
/// A start while a draw is running yields `StartOutcome::Ignored`.
///
/// # Errors
///
/// Returns `DomainError::EmptyRoster` if the roster is empty, or
/// `DomainError::Infrastructure` if session state is unavailable.
pub fn handle_start_draw(
    command: &StartDraw,
    animator: &DrawAnimator,
) -> Result<StartOutcome, DomainError> {
    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        "handling command"
    );
    animator.start_draw(command.correlation_id)
}

/// Handles the `StopDraw` command: cancels the draw in flight and releases
/// its timer.
///
/// Returns `true` if a running draw was cancelled.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if session state is unavailable.
pub async fn handle_stop_draw(
    command: &StopDraw,
    animator: &DrawAnimator,
) -> Result<bool, DomainError> {
    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        "handling command"
    );
    animator.stop().await
}

/// Handles the `SetPickCount` command. Returns the clamped count.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if session state is unavailable.
pub fn handle_set_pick_count(
    command: &SetPickCount,
    animator: &DrawAnimator,
) -> Result<usize, DomainError> {
    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        requested = command.pick_count,
        "handling command"
    );
    animator.apply(|session, clock| {
        Ok(session.set_pick_count(command.pick_count, command.correlation_id, clock))
    })
}

/// Handles the `SetHideMode` command. Returns `true` if the mode changed.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if session state is unavailable.
pub fn handle_set_hide_mode(
    command: &SetHideMode,
    animator: &DrawAnimator,
) -> Result<bool, DomainError> {
    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        hide_names = command.hide_names,
        "handling command"
    );
    animator.apply(|session, clock| {
        Ok(session.set_hide_mode(command.hide_names, command.correlation_id, clock))
    })
}

/// Handles the `RevealName` command. Returns `true` if the name was newly
/// revealed.
///
/// # Errors
///
/// Returns `DomainError::Validation` outside hide mode or before the draw
/// settles, and `DomainError::NameNotDrawn` for a name not in the result.
pub fn handle_reveal_name(
    command: &RevealName,
    animator: &DrawAnimator,
) -> Result<bool, DomainError> {
    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        "handling command"
    );
    animator.apply(|session, clock| session.reveal(&command.name, command.correlation_id, clock))
}
