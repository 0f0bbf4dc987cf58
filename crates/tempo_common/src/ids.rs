//! Opaque handles into the host design graph.
//!
//! A [`WireId`] names a wire without owning it. Equality and hashing are by
//! identity only, so a handle stays valid as a lookup key even if the host
//! graph is rebuilt around it.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            /// Creates a handle from a raw `u32` index.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// Returns the raw `u32` index.
            pub fn as_raw(self) -> u32 {
                self.0
            }

            /// Returns the handle as a `usize`, for indexing host arenas.
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

define_id!(
    /// Non-owning handle to a wire in the host design graph.
    WireId,
    "w"
);

define_id!(
    /// Non-owning handle to a cell instance in the host design graph.
    CellId,
    "c"
);
