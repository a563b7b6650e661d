use thiserror::Error;

/// Rejected command-line values. Raised while parsing, before the show exists.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ConfigError {
    #[error("invalid size '{0}': expected WIDTHxHEIGHT (e.g. 120x40) or 'auto'")]
    InvalidSize(String),

    #[error("invalid interval '{0}': expected a non-negative number of seconds")]
    InvalidInterval(String),
}
