pub mod app;
pub mod game_ui;
pub mod layers;
pub mod location_modal;
pub mod login_screen;
pub mod map_container;

pub use app::App;
