//! Strongly typed identifiers for the entities flowing through the pipeline.
//!
//! Every input entity carries a caller-assigned `u64` identifier that is
//! unique within its kind. Wrapping the raw integer in one newtype per kind
//! keeps a talus id from being passed where a courbe id is expected, and
//! gives every diagnostic a stable, printable handle on the offending entity.

use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        #[repr(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw identifier.
            #[inline]
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Returns the raw identifier.
            #[inline]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.0).finish()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a talus line, unique among LOW and HIGH lines together.
    TalusId
);
entity_id!(
    /// Identifier of a building footprint.
    BuildingId
);
entity_id!(
    /// Identifier of a contour line; trimmed fragments keep it as provenance.
    CourbeId
);

/// Reference to any input entity, used to attach diagnostics to their source.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum EntityRef {
    Talus(TalusId),
    Building(BuildingId),
    Courbe(CourbeId),
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityRef::Talus(id) => write!(f, "talus #{id}"),
            EntityRef::Building(id) => write!(f, "building #{id}"),
            EntityRef::Courbe(id) => write!(f, "courbe #{id}"),
        }
    }
}

impl From<TalusId> for EntityRef {
    fn from(id: TalusId) -> Self {
        EntityRef::Talus(id)
    }
}

impl From<BuildingId> for EntityRef {
    fn from(id: BuildingId) -> Self {
        EntityRef::Building(id)
    }
}

impl From<CourbeId> for EntityRef {
    fn from(id: CourbeId) -> Self {
        EntityRef::Courbe(id)
    }
}
