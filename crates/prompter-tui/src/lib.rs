pub mod app;
pub mod editor;
pub mod event;
pub mod input;
pub mod keymap;
pub mod layout;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use theme::{load_theme, Theme};
