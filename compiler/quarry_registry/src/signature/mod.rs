//! Native implementations and the overload compatibility rule.
//!
//! A library describes its native implementations with a static table of
//! [`NativeCandidate`]s. Only candidates whose declared shape is expressible
//! over the value type become [`CallableSignature`]s:
//!
//! ```text
//! (value) -> value             fixed
//! (value, int) -> value        fixed, any value class allowed
//! (value, value...) -> value   trailing variadic
//! (value[]) -> value           catch-all array
//! ```
//!
//! Everything else (host primitives, arrays outside the last position,
//! non-value returns) is filtered out at registration time.

use std::fmt;

use quarry_ir::{DeclaredType, Receiver, Value, ValueClass, Visibility};

/// Entry point of a native implementation.
///
/// Variadic and catch-all array arguments arrive flattened in the slice.
pub type NativeFn = fn(&[Value]) -> Result<Value, String>;

/// One row of a library's registration table.
#[derive(Clone, Copy, Debug)]
pub struct NativeCandidate {
    /// Name the implementation is registered under.
    pub name: &'static str,
    /// Declared parameter types.
    pub params: &'static [DeclaredType],
    /// Declared return type.
    pub returns: DeclaredType,
    /// Last parameter is an array collected from trailing arguments.
    pub variadic: bool,
    pub visibility: Visibility,
    pub receiver: Receiver,
    pub entry: NativeFn,
}

impl NativeCandidate {
    /// Create a public, type-level, non-variadic candidate.
    pub const fn new(
        name: &'static str,
        params: &'static [DeclaredType],
        returns: DeclaredType,
        entry: NativeFn,
    ) -> Self {
        NativeCandidate {
            name,
            params,
            returns,
            variadic: false,
            visibility: Visibility::Public,
            receiver: Receiver::Static,
            entry,
        }
    }

    /// Mark the last parameter as variadic.
    #[must_use]
    pub const fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    /// Hide the candidate from registry scans.
    #[must_use]
    pub const fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }

    /// Require an instance of the library to invoke the candidate.
    #[must_use]
    pub const fn instance(mut self) -> Self {
        self.receiver = Receiver::Instance;
        self
    }
}

/// Registration-time filter for overloads of the value type.
pub struct SignatureFilter;

impl SignatureFilter {
    /// Check whether `candidate` is a legal overload of the value type.
    pub fn is_compatible(candidate: &NativeCandidate) -> bool {
        if candidate.returns.value_class().is_none() {
            return false;
        }

        // Catch-all array form skips the per-parameter rule.
        if let [only] = candidate.params {
            if only.array_element_class().is_some() {
                return true;
            }
        }

        let last = candidate.params.len().saturating_sub(1);
        candidate.params.iter().enumerate().all(|(index, param)| {
            param.value_class().is_some()
                || (index == last && candidate.variadic && param.array_element_class().is_some())
        })
    }

    /// Keep only the compatible candidates.
    pub fn compatible<'a>(
        candidates: impl IntoIterator<Item = &'a NativeCandidate>,
    ) -> impl Iterator<Item = &'a NativeCandidate> {
        candidates
            .into_iter()
            .filter(|candidate| Self::is_compatible(candidate))
    }
}

/// Kind of one accepted parameter.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// Exactly one argument of the class.
    Fixed(ValueClass),
    /// Zero or more trailing arguments of the class.
    Variadic(ValueClass),
}

impl ParamKind {
    /// The class every matching argument must belong to.
    #[inline]
    pub fn class(self) -> ValueClass {
        match self {
            ParamKind::Fixed(class) | ParamKind::Variadic(class) => class,
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKind::Fixed(class) => write!(f, "{class}"),
            ParamKind::Variadic(class) => write!(f, "{class}..."),
        }
    }
}

/// An accepted overload: parameter kinds, return class, and entry point.
///
/// At most one parameter is variadic, and only in last position.
#[derive(Clone, Debug)]
pub struct CallableSignature {
    params: Vec<ParamKind>,
    returns: ValueClass,
    entry: NativeFn,
}

impl CallableSignature {
    /// Build a signature from explicit parameter kinds.
    ///
    /// Returns `None` if a variadic parameter is not the last one.
    pub fn new(params: Vec<ParamKind>, returns: ValueClass, entry: NativeFn) -> Option<Self> {
        let misplaced = params
            .iter()
            .rev()
            .skip(1)
            .any(|param| matches!(param, ParamKind::Variadic(_)));
        if misplaced {
            return None;
        }
        Some(CallableSignature {
            params,
            returns,
            entry,
        })
    }

    /// Convert a compatible candidate, or `None` if the filter rejects it.
    pub fn from_candidate(candidate: &NativeCandidate) -> Option<Self> {
        if !SignatureFilter::is_compatible(candidate) {
            return None;
        }
        let returns = candidate.returns.value_class()?;
        let params = candidate
            .params
            .iter()
            .map(|param| match (param.value_class(), param.array_element_class()) {
                (Some(class), _) => Some(ParamKind::Fixed(class)),
                (None, Some(element)) => Some(ParamKind::Variadic(element)),
                (None, None) => None,
            })
            .collect::<Option<Vec<_>>>()?;
        Self::new(params, returns, candidate.entry)
    }

    #[inline]
    pub fn params(&self) -> &[ParamKind] {
        &self.params
    }

    #[inline]
    pub fn returns(&self) -> ValueClass {
        self.returns
    }

    /// Check whether the last parameter is variadic.
    #[inline]
    pub fn is_variadic(&self) -> bool {
        matches!(self.params.last(), Some(ParamKind::Variadic(_)))
    }

    /// Number of fixed parameters.
    pub fn fixed_arity(&self) -> usize {
        if self.is_variadic() {
            self.params.len() - 1
        } else {
            self.params.len()
        }
    }

    /// Check whether this overload accepts `args`.
    pub fn accepts(&self, args: &[Value]) -> bool {
        let fixed = self.fixed_arity();
        let arity_ok = if self.is_variadic() {
            args.len() >= fixed
        } else {
            args.len() == fixed
        };
        if !arity_ok {
            return false;
        }

        let (head, tail) = args.split_at(fixed);
        let fixed_ok = self.params[..fixed]
            .iter()
            .zip(head)
            .all(|(param, arg)| arg.is_instance_of(param.class()));
        let rest_ok = match self.params.last() {
            Some(ParamKind::Variadic(class)) => tail.iter().all(|arg| arg.is_instance_of(*class)),
            _ => true,
        };
        fixed_ok && rest_ok
    }

    /// Invoke the entry point without checking `args`.
    #[inline]
    pub fn invoke(&self, args: &[Value]) -> Result<Value, String> {
        (self.entry)(args)
    }
}

impl fmt::Display for CallableSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{param}")?;
        }
        write!(f, ") -> {}", self.returns)
    }
}

#[cfg(test)]
mod tests;
