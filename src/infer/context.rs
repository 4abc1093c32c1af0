//! The ordered algorithmic context.
//!
//! Γ is a sequence of entries in dependency order: every entry may refer
//! only to entries to its *left*, and solutions recorded for existential
//! variables mention only earlier entries. The ordering is load-bearing:
//! `InstLSolve` decides solvability by asking whether a type is well formed
//! in the prefix left of the variable, so the context is a vector, never a
//! map.
//!
//! Contexts are values: operations take `&self` and return the modified
//! context, so a failed rule simply drops its copy and the caller's
//! context is untouched.

use crate::ast::types::Type;
use crate::ast::uid::Uid;

#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// A universal variable in scope.
    Universal(Uid),
    /// An existential variable, optionally solved to a monotype.
    Exists { uid: Uid, solution: Option<Type> },
    /// Scope boundary introduced by ∀-elimination rules.
    Marker(Uid),
    /// A program variable with its type.
    Binding { uid: Uid, ty: Type },
}

impl Entry {
    pub fn unsolved(uid: Uid) -> Entry {
        Entry::Exists { uid, solution: None }
    }

    pub fn solved(uid: Uid, ty: Type) -> Entry {
        Entry::Exists { uid, solution: Some(ty) }
    }

    pub fn binding(uid: Uid, ty: Type) -> Entry {
        Entry::Binding { uid, ty }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Context {
    entries: Vec<Entry>,
    pub(crate) trace: bool,
}

impl PartialEq for Context {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Context {
    pub fn new() -> Self {
        Context { entries: Vec::new(), trace: false }
    }

    /// A context that narrates every rule application on stderr.
    pub fn with_trace(trace: bool) -> Self {
        Context { entries: Vec::new(), trace }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    // ------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------

    /// The type of the nearest (rightmost) binding for `uid`.
    pub fn lookup_binding(&self, uid: Uid) -> Option<&Type> {
        self.entries.iter().rev().find_map(|entry| match entry {
            Entry::Binding { uid: bound, ty } if *bound == uid => Some(ty),
            _ => None,
        })
    }

    /// The solution of `uid`, if it is a solved existential.
    pub fn solution(&self, uid: Uid) -> Option<&Type> {
        self.entries.iter().find_map(|entry| match entry {
            Entry::Exists { uid: existing, solution } if *existing == uid => solution.as_ref(),
            _ => None,
        })
    }

    pub fn has_universal(&self, uid: Uid) -> bool {
        self.entries
            .iter()
            .any(|entry| matches!(entry, Entry::Universal(u) if *u == uid))
    }

    /// Whether `uid` appears as an existential, solved or not.
    pub fn has_existential(&self, uid: Uid) -> bool {
        self.entries
            .iter()
            .any(|entry| matches!(entry, Entry::Exists { uid: u, .. } if *u == uid))
    }

    pub fn has_unsolved(&self, uid: Uid) -> bool {
        self.entries.iter().any(
            |entry| matches!(entry, Entry::Exists { uid: u, solution: None } if *u == uid),
        )
    }

    // ------------------------------------------------------------------
    // Well-formedness
    // ------------------------------------------------------------------

    /// Every universal in the type must be in scope (the canonical
    /// primitives always are), every existential present; ∀ extends the
    /// scope locally.
    pub fn is_well_formed(&self, ty: &Type) -> bool {
        match ty {
            Type::Unit => true,
            Type::Var(uid) => uid.is_primitive() || self.has_universal(*uid),
            Type::Exists(uid) => self.has_existential(*uid),
            Type::Forall(uid, body) => {
                let mut extended = self.clone();
                extended.push(Entry::Universal(*uid));
                extended.is_well_formed(body)
            }
            Type::Arrow(a, b) | Type::Sum(a, b) | Type::Product(a, b) => {
                self.is_well_formed(a) && self.is_well_formed(b)
            }
        }
    }

    // ------------------------------------------------------------------
    // Surgery
    // ------------------------------------------------------------------

    /// Append an entry at the right (newest) end.
    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn pushed(&self, entry: Entry) -> Context {
        let mut next = self.clone();
        next.push(entry);
        next
    }

    /// Replace the first entry equal to `target` with `replacement`,
    /// preserving everything around it. Callers guarantee presence; a miss
    /// is a broken invariant, not a user error.
    pub fn splice(&self, target: &Entry, replacement: Vec<Entry>) -> Context {
        let index = self
            .position(target)
            .unwrap_or_else(|| panic!("context splice: target entry not present"));
        let mut entries = Vec::with_capacity(self.entries.len() + replacement.len());
        entries.extend_from_slice(&self.entries[..index]);
        entries.extend(replacement);
        entries.extend_from_slice(&self.entries[index + 1..]);
        Context { entries, trace: self.trace }
    }

    /// Split into (strict prefix, target and everything after). `None`
    /// when the target is absent, which callers treat as rule failure.
    pub fn split_at(&self, target: &Entry) -> Option<(Context, Context)> {
        let index = self.position(target)?;
        let left = Context {
            entries: self.entries[..index].to_vec(),
            trace: self.trace,
        };
        let right = Context {
            entries: self.entries[index..].to_vec(),
            trace: self.trace,
        };
        Some((left, right))
    }

    /// Remove `target` and everything to its right: scope restoration for
    /// rules that introduced it. Absent target leaves the context as is.
    pub fn drop_from(&self, target: &Entry) -> Context {
        match self.position(target) {
            Some(index) => Context {
                entries: self.entries[..index].to_vec(),
                trace: self.trace,
            },
            None => self.clone(),
        }
    }

    fn position(&self, target: &Entry) -> Option<usize> {
        self.entries.iter().position(|entry| entry == target)
    }

    // ------------------------------------------------------------------
    // Context as substitution
    // ------------------------------------------------------------------

    /// Replace every solved existential with its solution, transitively:
    /// solutions may themselves mention solved variables further left.
    pub fn apply(&self, ty: &Type) -> Type {
        match ty {
            Type::Unit | Type::Var(_) => ty.clone(),
            Type::Exists(uid) => match self.solution(*uid) {
                Some(solution) => self.apply(solution),
                None => ty.clone(),
            },
            Type::Forall(uid, body) => Type::Forall(*uid, Box::new(self.apply(body))),
            Type::Arrow(a, b) => Type::Arrow(Box::new(self.apply(a)), Box::new(self.apply(b))),
            Type::Sum(a, b) => Type::Sum(Box::new(self.apply(a)), Box::new(self.apply(b))),
            Type::Product(a, b) => {
                Type::Product(Box::new(self.apply(a)), Box::new(self.apply(b)))
            }
        }
    }
}
