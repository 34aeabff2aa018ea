//! Type-safe identifier wrappers around [`Uuid`].
//!
//! Machines and fruit batches carry strongly-typed IDs so the two can
//! never be mixed up at a call site. IDs use UUID v7 (time-ordered) so
//! a fruit's ID also encodes the order it entered the line.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a juicer machine.
    MachineId
}

define_id! {
    /// Unique identifier for a single fruit fed into the machine.
    FruitId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_types() {
        let machine = MachineId::new();
        let fruit = FruitId::new();
        // These are different types -- the compiler enforces no mixing.
        assert_ne!(machine.into_inner(), Uuid::nil());
        assert_ne!(fruit.into_inner(), Uuid::nil());
    }

    #[test]
    fn display_matches_inner_uuid() {
        let id = FruitId::new();
        assert_eq!(id.to_string(), id.into_inner().to_string());
    }
}
