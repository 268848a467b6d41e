//! Function registry: names to native overload sets.
//!
//! Libraries expose explicit registration tables instead of being scanned.
//! `register_library` keeps the public, type-level rows that pass the
//! [`SignatureFilter`](crate::SignatureFilter), groups them by name into
//! [`FunctionEntry`]s, and then runs the library's optional registration
//! callback for anything a table cannot express.
//!
//! Entries live in a [`Bindings`] store under [`SymbolKind::Function`], so the
//! same table can hold other symbol kinds without name collisions.

use std::collections::BTreeMap;
use std::fmt;

use quarry_ir::{Receiver, Value, Visibility};

use crate::{
    Bindable, Bindings, CallError, CallableSignature, NativeCandidate, RegistryError, SymbolKind,
};

/// A named overload set.
///
/// Never empty: an entry is created with its first signature.
#[derive(Clone, Debug)]
pub struct FunctionEntry {
    name: Box<str>,
    signatures: Vec<CallableSignature>,
}

impl FunctionEntry {
    /// Create an entry holding a single signature.
    pub fn new(name: impl Into<Box<str>>, signature: CallableSignature) -> Self {
        FunctionEntry {
            name: name.into(),
            signatures: vec![signature],
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Overloads in registration order.
    #[inline]
    pub fn signatures(&self) -> &[CallableSignature] {
        &self.signatures
    }

    /// Add an overload.
    ///
    /// Returns `false` if an overload with the same parameter kinds already
    /// exists; the earlier one is kept.
    pub fn add_signature(&mut self, signature: CallableSignature) -> bool {
        if self
            .signatures
            .iter()
            .any(|existing| existing.params() == signature.params())
        {
            return false;
        }
        self.signatures.push(signature);
        true
    }

    /// Select the overload for `args`.
    ///
    /// Fixed-arity overloads win over variadic ones; ties go to the earliest
    /// registration.
    pub fn resolve(&self, args: &[Value]) -> Option<&CallableSignature> {
        let mut matching = self.signatures.iter().filter(|sig| sig.accepts(args));
        let first = matching.next()?;
        if !first.is_variadic() {
            return Some(first);
        }
        Some(matching.find(|sig| !sig.is_variadic()).unwrap_or(first))
    }

    /// Resolve and invoke the overload for `args`.
    pub fn call(&self, args: &[Value]) -> Result<Value, CallError> {
        let signature = self
            .resolve(args)
            .ok_or_else(|| CallError::NoMatchingSignature {
                name: self.name.to_string(),
                arity: args.len(),
            })?;
        signature.invoke(args).map_err(|message| CallError::Native {
            name: self.name.to_string(),
            message,
        })
    }
}

impl fmt::Display for FunctionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, signature) in self.signatures.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}{signature}", self.name)?;
        }
        Ok(())
    }
}

/// Hook for registration logic beyond a plain table.
pub trait RegistrationCallback {
    fn register_functions(&self, registry: &mut FunctionRegistry) -> Result<(), RegistryError>;
}

/// A container of native implementations.
pub trait FunctionLibrary {
    /// Library name, used in diagnostics.
    fn name(&self) -> &str;

    /// The registration table.
    fn candidates(&self) -> &[NativeCandidate];

    /// Callback to run after the table has been registered.
    fn callback(&self) -> Option<&dyn RegistrationCallback> {
        None
    }
}

/// Lookup and registration over one symbol kind of a [`Bindings`] store.
pub trait Registry {
    type Entry: Bindable;

    fn bindings(&self) -> &Bindings;

    fn bindings_mut(&mut self) -> &mut Bindings;

    /// Look up an entry. `None` is a lookup miss, not an error.
    fn find(&self, name: &str) -> Option<&Self::Entry> {
        self.bindings().get(name)
    }

    /// Bind `entry` under `name`, replacing any entry of the same kind.
    fn register(&mut self, name: &str, entry: Self::Entry) {
        self.bindings_mut().set(name, entry);
    }

    /// All entries in name order.
    fn entries(&self) -> BTreeMap<&str, &Self::Entry> {
        self.bindings().get_all()
    }
}

/// Registry of native functions.
#[derive(Clone, Debug, Default)]
pub struct FunctionRegistry {
    bindings: Bindings,
}

impl FunctionRegistry {
    /// Create a registry with an empty store.
    pub fn new() -> Self {
        Self::with_bindings(Bindings::new())
    }

    /// Create a registry over an existing store.
    pub fn with_bindings(bindings: Bindings) -> Self {
        FunctionRegistry { bindings }
    }

    /// Give the store back, e.g. to hand it to the next bootstrap stage.
    pub fn into_bindings(self) -> Bindings {
        self.bindings
    }

    /// Register every eligible implementation of `library`, then run its callback.
    ///
    /// Returns the number of signatures added from the table. Signatures
    /// committed before a failing callback stay registered.
    #[tracing::instrument(level = "debug", skip_all, fields(library = library.name()))]
    pub fn register_library(
        &mut self,
        library: &dyn FunctionLibrary,
    ) -> Result<usize, RegistryError> {
        let mut added = 0;
        for candidate in library.candidates() {
            if candidate.visibility != Visibility::Public || candidate.receiver != Receiver::Static
            {
                tracing::trace!(
                    name = candidate.name,
                    "skipping hidden or instance implementation"
                );
                continue;
            }
            let Some(signature) = CallableSignature::from_candidate(candidate) else {
                tracing::trace!(name = candidate.name, "skipping incompatible signature");
                continue;
            };
            if self.add_signature(candidate.name, signature) {
                added += 1;
            }
        }

        if let Some(callback) = library.callback() {
            callback.register_functions(self)?;
        }

        tracing::debug!(added, "library registered");
        Ok(added)
    }

    /// Register a single implementation.
    ///
    /// Returns `false` if an overload of the same shape was already bound.
    pub fn register_native(
        &mut self,
        candidate: &NativeCandidate,
    ) -> Result<bool, RegistryError> {
        let signature = CallableSignature::from_candidate(candidate).ok_or_else(|| {
            RegistryError::IncompatibleSignature {
                name: candidate.name.to_string(),
            }
        })?;
        Ok(self.add_signature(candidate.name, signature))
    }

    /// Register `entry` under its own name.
    pub fn register_entry(&mut self, entry: FunctionEntry) {
        let name = entry.name.clone();
        self.bindings.set(name, entry);
    }

    /// Append `signature` to the entry for `name`, creating it if needed.
    fn add_signature(&mut self, name: &str, signature: CallableSignature) -> bool {
        if let Some(entry) = self.bindings.get_mut::<FunctionEntry>(name) {
            let added = entry.add_signature(signature);
            if !added {
                tracing::trace!(name, "duplicate overload ignored");
            }
            return added;
        }
        tracing::debug!(name, kind = ?SymbolKind::Function, "new function");
        self.bindings.set(name, FunctionEntry::new(name, signature));
        true
    }
}

impl Registry for FunctionRegistry {
    type Entry = FunctionEntry;

    fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    fn bindings_mut(&mut self) -> &mut Bindings {
        &mut self.bindings
    }
}

impl fmt::Display for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in self.entries().values() {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}
