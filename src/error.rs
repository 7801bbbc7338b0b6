//! Error types
//!
//! Only session setup can fail. A running tick never returns an error.

/// Rejected configuration, fatal at session init
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{field} must be positive and finite (got {value})")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{field} must be zero or positive and finite (got {value})")]
    Negative { field: &'static str, value: f32 },

    #[error("{field} must be within {min}..={max} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("{field} must be below {limit} (got {value})")]
    NotBelow {
        field: &'static str,
        value: f32,
        limit: f32,
    },

    #[error("{field} of {size}px does not fit in a {extent}px playfield")]
    DoesNotFit {
        field: &'static str,
        size: f32,
        extent: f32,
    },

    #[error("initial life must be at least 1 (got {0})")]
    InvalidLife(i32),

    #[error("winning score must be at least 1")]
    ZeroWinningScore,

    #[error("item count {0} exceeds the supported maximum")]
    TooManyItems(usize),
}

/// Asset failures are reported upward and never stop the simulation
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    #[error("asset `{name}` failed to load: {reason}")]
    LoadFailed { name: String, reason: String },

    #[error("unknown asset `{0}`")]
    Unknown(String),
}

/// Session lifecycle errors
#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("assets still loading: {}", .0.join(", "))]
    AssetsPending(Vec<String>),

    #[error("session already started")]
    AlreadyStarted,
}
