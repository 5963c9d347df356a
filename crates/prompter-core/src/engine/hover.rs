//! Hover-pause state machine
//!
//! ```text
//!             enter, playing                      exit
//!   Idle ────────────────────────► HoveringWhilePlaying ───► Idle (play resumes)
//!     │        (play forced off)
//!     │       enter, paused                       exit
//!     └───────────────────────────► HoveringWhilePaused ────► Idle
//! ```
//!
//! Transitions return the playback value the caller must apply, if any.

use tracing::debug;

use crate::config::HoverTogglePolicy;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HoverState {
    #[default]
    Idle,
    /// Pointer is over the prompter and hover paused a running prompter
    HoveringWhilePlaying,
    /// Pointer is over the prompter, hover did not change playback
    HoveringWhilePaused,
}

impl HoverState {
    #[inline]
    pub fn is_hovering(&self) -> bool {
        !matches!(self, HoverState::Idle)
    }

    /// Whether leaving the prompter will resume playback
    #[inline]
    pub fn owns_pause(&self) -> bool {
        matches!(self, HoverState::HoveringWhilePlaying)
    }

    /// Pointer entered the prompter. Returns `Some(false)` when playback must stop.
    pub fn enter(&mut self, is_playing: bool) -> Option<bool> {
        match self {
            HoverState::Idle if is_playing => {
                debug!("hover enter: pausing playback");
                *self = HoverState::HoveringWhilePlaying;
                Some(false)
            }
            HoverState::Idle => {
                debug!("hover enter: already paused");
                *self = HoverState::HoveringWhilePaused;
                None
            }
            // Duplicate enter events keep the state captured at the first one
            _ => None,
        }
    }

    /// Pointer left the prompter. Returns `Some(true)` when playback must resume.
    pub fn exit(&mut self) -> Option<bool> {
        let resume = match self {
            HoverState::HoveringWhilePlaying => {
                debug!("hover exit: resuming playback");
                Some(true)
            }
            _ => None,
        };
        *self = HoverState::Idle;
        resume
    }

    /// The user toggled play/pause by hand while hovering
    pub fn manual_toggle(&mut self, policy: HoverTogglePolicy) {
        if policy == HoverTogglePolicy::FollowManual && self.is_hovering() {
            debug!("manual toggle during hover: hover releases playback");
            *self = HoverState::HoveringWhilePaused;
        }
    }

    /// Forget any hover tracking (pause-on-hover was switched off)
    pub fn clear(&mut self) {
        *self = HoverState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_while_playing_pauses() {
        let mut state = HoverState::Idle;
        assert_eq!(state.enter(true), Some(false));
        assert_eq!(state, HoverState::HoveringWhilePlaying);
        assert_eq!(state.exit(), Some(true));
        assert_eq!(state, HoverState::Idle);
    }

    #[test]
    fn test_enter_while_paused_is_passive() {
        let mut state = HoverState::Idle;
        assert_eq!(state.enter(false), None);
        assert_eq!(state, HoverState::HoveringWhilePaused);
        assert_eq!(state.exit(), None);
        assert_eq!(state, HoverState::Idle);
    }

    #[test]
    fn test_repeated_enter_keeps_first_capture() {
        let mut state = HoverState::Idle;
        state.enter(true);
        // playback is now forced off; a second enter must not forget that hover owns it
        assert_eq!(state.enter(false), None);
        assert_eq!(state, HoverState::HoveringWhilePlaying);
    }

    #[test]
    fn test_exit_without_enter_is_noop() {
        let mut state = HoverState::Idle;
        assert_eq!(state.exit(), None);
        assert_eq!(state, HoverState::Idle);
    }

    #[test]
    fn test_manual_toggle_policies() {
        let mut state = HoverState::Idle;
        state.enter(true);
        state.manual_toggle(HoverTogglePolicy::KeepEntrySnapshot);
        assert!(state.owns_pause());

        state.manual_toggle(HoverTogglePolicy::FollowManual);
        assert_eq!(state, HoverState::HoveringWhilePaused);
        assert_eq!(state.exit(), None);
    }

    #[test]
    fn test_manual_toggle_when_idle_is_noop() {
        let mut state = HoverState::Idle;
        state.manual_toggle(HoverTogglePolicy::FollowManual);
        assert_eq!(state, HoverState::Idle);
    }
}
