pub mod ffi;
pub mod layer_binding;
pub mod layer_specs;
pub mod markers;
pub mod navigation;
pub mod viewport;

pub use ffi::{to_js, MapHandle};
pub use layer_binding::{LayerBinding, LayerEventHandlers};
pub use layer_specs::{CityFilter, DistrictVisibility, LayerSpec};
pub use markers::MarkerSet;
pub use navigation::{Effect, NavigationState, SettleKind, ViewMode};
