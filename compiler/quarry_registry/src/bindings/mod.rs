//! Name → symbol storage shared by all symbol kinds.
//!
//! Bindings are keyed jointly by symbol kind and name, so a function and a
//! constant may share a name without colliding. Typed access goes through
//! [`Bindable`]: `get::<FunctionEntry>("concat")` only ever sees functions.

use std::collections::BTreeMap;

use quarry_ir::Value;
use rustc_hash::FxHashMap;

use crate::FunctionEntry;

/// Kind of a bound symbol.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SymbolKind {
    Function,
    Constant,
}

/// A bound symbol.
#[derive(Clone, Debug)]
pub enum Symbol {
    /// A native function with its overload set.
    Function(FunctionEntry),
    /// A named constant value.
    Constant(Value),
}

impl Symbol {
    /// The kind this symbol is stored under.
    pub fn kind(&self) -> SymbolKind {
        match self {
            Symbol::Function(_) => SymbolKind::Function,
            Symbol::Constant(_) => SymbolKind::Constant,
        }
    }
}

/// A type that can be stored in [`Bindings`].
pub trait Bindable: Sized {
    /// The symbol kind this type is stored under.
    const KIND: SymbolKind;

    fn into_symbol(self) -> Symbol;

    fn from_symbol(symbol: &Symbol) -> Option<&Self>;

    fn from_symbol_mut(symbol: &mut Symbol) -> Option<&mut Self>;
}

impl Bindable for FunctionEntry {
    const KIND: SymbolKind = SymbolKind::Function;

    fn into_symbol(self) -> Symbol {
        Symbol::Function(self)
    }

    fn from_symbol(symbol: &Symbol) -> Option<&Self> {
        match symbol {
            Symbol::Function(entry) => Some(entry),
            Symbol::Constant(_) => None,
        }
    }

    fn from_symbol_mut(symbol: &mut Symbol) -> Option<&mut Self> {
        match symbol {
            Symbol::Function(entry) => Some(entry),
            Symbol::Constant(_) => None,
        }
    }
}

impl Bindable for Value {
    const KIND: SymbolKind = SymbolKind::Constant;

    fn into_symbol(self) -> Symbol {
        Symbol::Constant(self)
    }

    fn from_symbol(symbol: &Symbol) -> Option<&Self> {
        match symbol {
            Symbol::Constant(value) => Some(value),
            Symbol::Function(_) => None,
        }
    }

    fn from_symbol_mut(symbol: &mut Symbol) -> Option<&mut Self> {
        match symbol {
            Symbol::Constant(value) => Some(value),
            Symbol::Function(_) => None,
        }
    }
}

/// Symbol table keyed by (kind, name).
#[derive(Clone, Debug, Default)]
pub struct Bindings {
    tables: FxHashMap<SymbolKind, FxHashMap<Box<str>, Symbol>>,
}

impl Bindings {
    /// Create an empty symbol table.
    pub fn new() -> Self {
        Bindings {
            tables: FxHashMap::default(),
        }
    }

    /// Look up a symbol of kind `T` by name.
    #[inline]
    pub fn get<T: Bindable>(&self, name: &str) -> Option<&T> {
        self.tables
            .get(&T::KIND)
            .and_then(|table| table.get(name))
            .and_then(T::from_symbol)
    }

    /// Look up a symbol of kind `T` by name for in-place update.
    #[inline]
    pub fn get_mut<T: Bindable>(&mut self, name: &str) -> Option<&mut T> {
        self.tables
            .get_mut(&T::KIND)
            .and_then(|table| table.get_mut(name))
            .and_then(T::from_symbol_mut)
    }

    /// Bind `value` under `name`, replacing any previous symbol of the same kind.
    pub fn set<T: Bindable>(&mut self, name: impl Into<Box<str>>, value: T) {
        self.tables
            .entry(T::KIND)
            .or_default()
            .insert(name.into(), value.into_symbol());
    }

    /// Check whether a symbol of kind `T` is bound under `name`.
    #[inline]
    pub fn contains<T: Bindable>(&self, name: &str) -> bool {
        self.get::<T>(name).is_some()
    }

    /// All symbols of kind `T`, in name order.
    pub fn get_all<T: Bindable>(&self) -> BTreeMap<&str, &T> {
        self.tables
            .get(&T::KIND)
            .into_iter()
            .flat_map(|table| table.iter())
            .filter_map(|(name, symbol)| T::from_symbol(symbol).map(|value| (&**name, value)))
            .collect()
    }

    /// Total number of bound symbols across all kinds.
    pub fn len(&self) -> usize {
        self.tables.values().map(FxHashMap::len).sum()
    }

    /// Check if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
