//! Error types for the `probe-map` crate

/// Errors that can occur while allocating or growing a table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The allocator could not provide a block for the requested layout.
    #[error("allocation failed for the table's slot buffer")]
    AllocFailed,

    /// Growing the table would exceed the largest supported slot count, or
    /// the size of the combined buffer would overflow `usize`.
    ///
    /// The table remains usable at its current capacity.
    #[error("table capacity limit reached")]
    CapacityLimit,
}
