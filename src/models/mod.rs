pub mod auth;
pub mod geojson;
pub mod location;

pub use auth::{LoginRequest, LoginResponse, TokenClaims, User};
pub use geojson::{Feature, FeatureCollection, Properties};
pub use location::Location;
