//! Prompter scroll engine
//!
//! - `scroll` - looping offset advanced by ticks
//! - `hover` - hover-pause state machine
//! - `timing` - tick deltas from wall-clock time
//! - `state` - the prompter state tying them to the user's settings
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use prompter_core::PrompterState;
//!
//! let mut state = PrompterState::default();
//! state.set_text("Good evening, and welcome.");
//!
//! // layout reports the height of one copy of the text
//! state.on_content_height_measured(120.0);
//!
//! // on every frame
//! state.tick(Duration::from_millis(16));
//! assert!(state.offset() > 0.0);
//! ```

pub mod hover;
pub mod scroll;
pub mod state;
pub mod timing;

pub use hover::HoverState;
pub use scroll::ScrollEngine;
pub use state::{PrompterState, PLACEHOLDER_TEXT};
pub use timing::TickClock;
