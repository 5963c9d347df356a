mod popup;
mod prompter;
mod settings;
mod status_bar;

pub use popup::PopupWidget;
pub use prompter::PrompterWidget;
pub use settings::{SettingsLayout, SettingsWidget};
pub use status_bar::StatusBarWidget;
