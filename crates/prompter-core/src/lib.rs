pub mod config;
pub mod engine;
pub mod error;
pub mod settings;
pub mod source;

pub use config::{AppConfig, HoverTogglePolicy, PrompterConfig};
pub use engine::{HoverState, PrompterState, ScrollEngine, TickClock};
pub use error::{Error, Result};
pub use settings::{Bounds, Setting};
