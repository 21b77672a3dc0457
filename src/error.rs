use thiserror::Error;

/// Errors reported by tree mutations.
///
/// Both variants describe a legitimate outcome of a lookup, never an internal inconsistency. A
/// broken invariant is a bug and panics instead.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// The value passed to `insert` compares equal to a value already in the tree.
    #[error("value is already present in the tree")]
    DuplicateValue,

    /// The value passed to `try_remove` is not in the tree.
    #[error("value is not present in the tree")]
    ValueNotFound,
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
