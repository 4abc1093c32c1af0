//! String interning.
//!
//! Identifiers and lexemes are interned once and carried around as `Symbol`
//! values: `Copy`, cheap to compare, and hashable. The canonical names of
//! the primitive types are interned at construction time so that the
//! typechecker can refer to them as constants without holding an interner.

use std::collections::HashMap;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Symbol(u32);

impl Symbol {
    pub const EMPTY: Symbol = Symbol(0);

    // Canonical primitive type names, pre-interned by `Interner::new`.
    pub const INT: Symbol = Symbol(1);
    pub const FLOAT: Symbol = Symbol(2);
    pub const COMPLEX: Symbol = Symbol(3);
    pub const BOOL: Symbol = Symbol(4);
    pub const STRING: Symbol = Symbol(5);
    pub const RUNE: Symbol = Symbol(6);
    pub const UNIT: Symbol = Symbol(7);
    pub const UNDERSCORE: Symbol = Symbol(8);

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// True for the canonical primitive type names.
    pub fn is_primitive_type(self) -> bool {
        matches!(
            self,
            Symbol::INT
                | Symbol::FLOAT
                | Symbol::COMPLEX
                | Symbol::BOOL
                | Symbol::STRING
                | Symbol::RUNE
        )
    }

    /// The spelling of a pre-interned symbol, available without an interner.
    pub fn canonical_str(self) -> Option<&'static str> {
        match self {
            Symbol::INT => Some("int"),
            Symbol::FLOAT => Some("float"),
            Symbol::COMPLEX => Some("complex"),
            Symbol::BOOL => Some("bool"),
            Symbol::STRING => Some("string"),
            Symbol::RUNE => Some("rune"),
            Symbol::UNIT => Some("unit"),
            Symbol::UNDERSCORE => Some("_"),
            _ => None,
        }
    }
}

impl Default for Symbol {
    fn default() -> Self {
        Self::EMPTY
    }
}

pub struct Interner {
    map: HashMap<String, Symbol>,
    vec: Vec<String>,
}

impl Interner {
    /// Create an interner with the canonical names already present, at the
    /// indices promised by the `Symbol` constants.
    pub fn new() -> Self {
        let mut interner = Interner {
            map: HashMap::new(),
            vec: Vec::new(),
        };
        interner.vec.push(String::new());
        for name in ["int", "float", "complex", "bool", "string", "rune", "unit", "_"] {
            let sym = Symbol(interner.vec.len() as u32);
            interner.vec.push(name.to_string());
            interner.map.insert(name.to_string(), sym);
        }
        interner
    }

    pub fn intern(&mut self, s: &str) -> Symbol {
        if let Some(&sym) = self.map.get(s) {
            return sym;
        }
        let sym = Symbol(self.vec.len() as u32);
        self.vec.push(s.to_string());
        self.map.insert(s.to_string(), sym);
        sym
    }

    pub fn resolve(&self, sym: Symbol) -> &str {
        &self.vec[sym.0 as usize]
    }

    /// Look up an existing symbol without creating one.
    pub fn lookup(&self, s: &str) -> Option<Symbol> {
        self.map.get(s).copied()
    }

    pub fn len(&self) -> usize {
        self.vec.len()
    }

    pub fn is_empty(&self) -> bool {
        // The empty string and the canonical names are always present.
        self.vec.len() <= 9
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}
