//! Unique identifiers.
//!
//! A `Uid` pairs a source name with a fresh number so that distinct binders
//! with the same spelling never collide. α-conversion and the typechecker
//! both draw from the same process-wide counter. `id == 0` is reserved for
//! canonical identifiers: the primitive type names and the unresolved state
//! the parser emits before α-conversion runs.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::intern::Symbol;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Uid {
    pub name: Symbol,
    pub id: u32,
}

static UID_COUNTER: AtomicU32 = AtomicU32::new(1);

impl Uid {
    /// A canonical identifier: a name with no fresh number.
    pub const fn canonical(name: Symbol) -> Uid {
        Uid { name, id: 0 }
    }

    /// Allocate a new identifier, incrementing the global counter.
    pub fn fresh(name: Symbol) -> Uid {
        Uid {
            name,
            id: UID_COUNTER.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub fn is_canonical(self) -> bool {
        self.id == 0
    }

    /// True for the canonical primitive type names (`int`, `bool`, …).
    pub fn is_primitive(self) -> bool {
        self.id == 0 && self.name.is_primitive_type()
    }
}

/// Rewind the counter for deterministic single-threaded runs.
pub fn reset_uid_counter() {
    UID_COUNTER.store(1, Ordering::Relaxed);
}
