//! Typed identifiers for aircraft and layout elements.
//!
//! Node and edge ids are dense indices into the layout's arrays, assigned in
//! ascending document key order, so "lowest id wins" ties follow the keys.
//! Aircraft ids are handed out sequentially by the fleet at spawn.

use std::fmt;

/// Generate an id wrapper around a `u32` that displays with a short tag
/// (`AC7`, `N3`, `E12`) in log fields.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty) = $tag:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Placeholder for "not yet assigned", e.g. a reroute request with
            /// no current leg.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Position in the owning `Vec`.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($tag, "{}"), self.0)
            }
        }
    };
}

typed_id! {
    /// Sequential aircraft identifier.  Never reused within a run.
    pub struct AircraftId(u32) = "AC";
}

typed_id! {
    /// Index of a layout node.
    pub struct NodeId(u32) = "N";
}

typed_id! {
    /// Index of a layout edge.  Both traversals of a two-way edge share it.
    pub struct EdgeId(u32) = "E";
}
