use thiserror::Error;

/// Errors reported by [`PathSet`](crate::PathSet) operations.
///
/// A key that is simply not stored is never an error; lookups and removals
/// report that through their return value.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Keys and prefixes must be non-empty byte strings.
    #[error("key must not be empty")]
    EmptyKey,

    /// A result sink limit was hit while appending enumeration results.
    #[error("result sink capacity exceeded (limit: {limit} bytes)")]
    CapacityExceeded { limit: usize },
}
