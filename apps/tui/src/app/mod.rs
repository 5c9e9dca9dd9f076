// Application context, background loading and input handling

pub mod actions;
pub mod input;
pub mod loader;
pub mod radar_view;
pub mod state;

pub use input::{handle_click, handle_input};
pub use state::App;
