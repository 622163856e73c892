use thiserror::Error;

/// Errors reported by the map, its cursors and its configuration.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The requested key is not stored in the map.
    #[error("key not found")]
    KeyNotFound,

    /// A cursor already positioned at the end was advanced.
    #[error("invalid iterator: cannot advance past the end")]
    InvalidIterator,

    /// A [`Config`](crate::Config) parameter was rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    /// The requested capacity does not fit in memory addressable by `usize`.
    #[error("capacity overflow")]
    CapacityOverflow,
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(Error::KeyNotFound.to_string(), "key not found");
        assert_eq!(
            Error::InvalidIterator.to_string(),
            "invalid iterator: cannot advance past the end"
        );
        assert_eq!(
            Error::InvalidConfig("neighborhood must be at least 1").to_string(),
            "invalid configuration: neighborhood must be at least 1"
        );
        assert_eq!(Error::CapacityOverflow.to_string(), "capacity overflow");
    }
}
