use std::fmt;

/// Application error taxonomy.
///
/// Data-fetch errors are recovered at the hook boundary and surfaced to the
/// UI; map-mutation errors are logged where they happen and never bubble into
/// component render.
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Network or HTTP failure fetching GeoJSON or facility data.
    Fetch(String),
    /// Response parsed but had an unexpected shape.
    MalformedData(String),
    /// Login rejected or token expired.
    Auth(String),
    /// Exception while mutating a map source or layer.
    LayerBinding(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Fetch(msg) => write!(f, "Fetch error: {}", msg),
            AppError::MalformedData(msg) => write!(f, "Malformed data: {}", msg),
            AppError::Auth(msg) => write!(f, "Authentication error: {}", msg),
            AppError::LayerBinding(msg) => write!(f, "Layer binding error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
