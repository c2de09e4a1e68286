//! Sealed trait marker for Transport implementations.
//!
//! Prevents external implementations of the `Transport` trait so the
//! credential-attachment contract cannot be bypassed outside this crate.

pub(crate) mod private {
    /// Sealed trait marker.
    pub trait Sealed {}
}
