//! String interning.
//!
//! Identifiers (member names, type-parameter names, field names) are interned
//! into copyable `Atom` ids so that signature comparison and rename maps work
//! on `u32` equality instead of string equality. The interner is shared
//! read-mostly state: interning uses a concurrent map, resolution goes through
//! an append-only table.

use dashmap::DashMap;
use std::sync::Arc;
use std::sync::RwLock;

/// Interned string identifier.
///
/// `Atom` equality is identity equality: two atoms compare equal iff they were
/// interned from the same string in the same [`Interner`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Atom(pub u32);

impl Atom {
    /// Sentinel value for "no name".
    pub const INVALID: Self = Self(u32::MAX);

    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }
}

/// Append-only string interner.
///
/// Safe for concurrent interning and resolution; atoms are never invalidated.
#[derive(Debug, Default)]
pub struct Interner {
    map: DashMap<Arc<str>, Atom>,
    strings: RwLock<Vec<Arc<str>>>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a string, returning its stable atom.
    pub fn intern(&self, text: &str) -> Atom {
        if let Some(existing) = self.map.get(text) {
            return *existing;
        }
        let arc: Arc<str> = Arc::from(text);
        let mut strings = self.strings.write().unwrap_or_else(|e| e.into_inner());
        // Re-check under the write lock so concurrent interns of the same
        // string agree on one atom.
        if let Some(existing) = self.map.get(text) {
            return *existing;
        }
        let atom = Atom(strings.len() as u32);
        strings.push(arc.clone());
        self.map.insert(arc, atom);
        atom
    }

    /// Resolve an atom back to its string.
    pub fn resolve(&self, atom: Atom) -> Arc<str> {
        let strings = self.strings.read().unwrap_or_else(|e| e.into_inner());
        strings[atom.0 as usize].clone()
    }

    pub fn len(&self) -> usize {
        self.strings
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_is_idempotent() {
        let interner = Interner::new();
        let a = interner.intern("Dispose");
        let b = interner.intern("Dispose");
        assert_eq!(a, b);
        assert_eq!(&*interner.resolve(a), "Dispose");
    }

    #[test]
    fn distinct_strings_get_distinct_atoms() {
        let interner = Interner::new();
        let a = interner.intern("T");
        let b = interner.intern("T1");
        assert_ne!(a, b);
    }
}
