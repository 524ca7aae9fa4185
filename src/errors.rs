use std::fmt;

/// Errors returned by the core route-store operations.
///
/// The facade maps each variant onto an HTTP status without needing to
/// inspect the message text: [`StoreError::InvalidPrefix`],
/// [`StoreError::InvalidNextHop`], [`StoreError::InvalidMetric`] and
/// [`StoreError::InvalidMode`] are 400s, [`StoreError::NotFound`] is a
/// 404, and [`StoreError::LoadError`]/[`StoreError::ConfigError`] are
/// fatal at startup.
#[derive(Debug, PartialEq, Eq)]
pub enum StoreError {
    /// The string does not parse as a CIDR prefix.
    InvalidPrefix(String),
    /// The string does not parse as an IP address.
    InvalidNextHop(String),
    /// The metric is outside `[1, 32768]`.
    InvalidMetric(i64),
    /// The match mode is neither `exact` nor `orlonger`.
    InvalidMode(String),
    /// The lookup or update matched no route.
    NotFound,
    /// The routes file could not be read or a line failed to parse.
    LoadError(String),
    /// An environment variable holds a value of the wrong shape.
    ConfigError(String),
}

impl std::error::Error for StoreError {}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::InvalidPrefix(s) => {
                write!(f, "invalid prefix: {s}")
            }
            StoreError::InvalidNextHop(s) => {
                write!(f, "invalid next hop: {s}")
            }
            StoreError::InvalidMetric(m) => {
                write!(f, "metric must be between 1 and 32768, got {m}")
            }
            StoreError::InvalidMode(s) => {
                write!(f, "match mode must be 'exact' or 'orlonger', got '{s}'")
            }
            StoreError::NotFound => write!(f, "no route is found"),
            StoreError::LoadError(s) => write!(f, "failed to load routes: {s}"),
            StoreError::ConfigError(s) => write!(f, "invalid configuration: {s}"),
        }
    }
}
