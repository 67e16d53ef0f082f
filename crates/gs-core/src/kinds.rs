//! Small closed vocabularies shared across the simulator.
//!
//! Every enum parses from and prints as its lowercase document name
//! (`"small"`, `"departure"`, `"bad"`, `"taxiway"`).

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

macro_rules! named_enum {
    ($(#[$attr:meta])* $vis:vis enum $name:ident : $kind:literal { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
        $vis enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;
            fn from_str(s: &str) -> Result<Self, CoreError> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(CoreError::UnknownName { kind: $kind, value: s.to_owned() }),
                }
            }
        }
    };
}

named_enum! {
    /// Aircraft size class.  Declaration order is the size order.
    pub enum SizeClass: "size class" {
        Small  => "small",
        Medium => "medium",
        Large  => "large",
    }
}

impl SizeClass {
    /// 0 for small, 1 for medium, 2 for large.
    #[inline]
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// `true` if an aircraft of this size fits a resource whose ceiling is `limit`.
    #[inline]
    pub fn fits(self, limit: SizeClass) -> bool {
        self <= limit
    }
}

named_enum! {
    pub enum MovementType: "movement type" {
        Arrival   => "arrival",
        Departure => "departure",
    }
}

impl MovementType {
    #[inline]
    pub fn is_departure(self) -> bool {
        self == MovementType::Departure
    }
}

named_enum! {
    /// Weather category.  Declaration order is severity order.
    pub enum Weather: "weather" {
        Good => "good",
        Mild => "mild",
        Bad  => "bad",
    }
}

named_enum! {
    /// Operational area an edge belongs to, for speed and separation lookup.
    pub enum Area: "area" {
        Runway  => "runway",
        Taxiway => "taxiway",
        Apron   => "apron",
    }
}
