pub mod api_client;
pub mod auth_service;
pub mod cache_service;
pub mod geo_service;

pub use api_client::ApiClient;
pub use auth_service::{clear_auth, is_token_expired, perform_login, restore_session};
pub use cache_service::{ttl_long, ttl_medium, CacheStats, DataCache};
pub use geo_service::{fetch_geo_data, GeoResource};
