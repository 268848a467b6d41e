//! Registry and dispatch errors.
//!
//! Only configuration mistakes are errors. An incompatible candidate found
//! while scanning a library is filtered out silently, and a lookup miss is an
//! ordinary `None`.

use thiserror::Error;

/// A configuration error raised while populating a registry.
///
/// Registration is not retried: the caller is expected to abort bootstrap.
/// Whatever was committed before the error stays committed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Two operators resolved to the same name in one registry.
    #[error("duplicate operator `{name}`")]
    DuplicateOperator { name: String },

    /// Two properties of one operator resolved to the same name.
    #[error("duplicate property `{property}` on operator `{operator}`")]
    DuplicateProperty { operator: String, property: String },

    /// A directly registered implementation is not an overload of the value type.
    #[error("`{name}` has no signature compatible with the value type")]
    IncompatibleSignature { name: String },

    /// A library's registration callback gave up.
    #[error("registration callback of `{library}` failed: {message}")]
    Callback { library: String, message: String },
}

impl RegistryError {
    /// Create a callback failure for `library`.
    pub fn callback(library: impl Into<String>, message: impl Into<String>) -> Self {
        RegistryError::Callback {
            library: library.into(),
            message: message.into(),
        }
    }
}

/// Failure to invoke a registered function.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CallError {
    /// No overload accepts the given arguments.
    #[error("no overload of `{name}` accepts {arity} argument(s) of these classes")]
    NoMatchingSignature { name: String, arity: usize },

    /// The native entry point reported an error.
    #[error("`{name}` failed: {message}")]
    Native { name: String, message: String },
}
