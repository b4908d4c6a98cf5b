pub mod use_auth;
pub mod use_geo_data;
pub mod use_keyboard_navigation;
pub mod use_map_controls;
pub mod use_map_layer;

pub use use_auth::{use_auth, AuthState, UseAuthHandle};
pub use use_geo_data::{use_geo_data, GeoDataState, UseGeoDataHandle};
pub use use_keyboard_navigation::use_keyboard_navigation;
pub use use_map_controls::{use_map_controls, UseMapControlsHandle};
pub use use_map_layer::use_map_layer;
