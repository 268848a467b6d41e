//! Symbol binding for the Quarry query language.
//!
//! Maps identifiers used in queries to the implementations that realize them:
//!
//! - **Functions**: native overload sets, discovered from explicit registration
//!   tables and filtered down to signatures over the value type
//! - **Operators**: structural operator types, named from role-tagged candidates
//!
//! # Architecture
//!
//! ```text
//! FunctionRegistry ──► SignatureFilter
//!        └──► Bindings (name × symbol kind)
//! OperatorRegistry ──► NameChooser
//! ```
//!
//! # Lifecycle
//!
//! Registries are populated during a single-writer bootstrap phase (`&mut self`)
//! and only read afterwards (`&self`). The I/O registry is built with
//! [`OperatorRegistry::io`], which registers `Sink` and `Source` before it is
//! handed to any consumer.

mod bindings;
mod error;
mod function;
pub mod io;
mod naming;
mod operator;
mod signature;

use std::sync::Once;

pub use bindings::{Bindable, Bindings, Symbol, SymbolKind};
pub use error::{CallError, RegistryError};
pub use function::{
    FunctionEntry, FunctionLibrary, FunctionRegistry, RegistrationCallback, Registry,
};
pub use naming::{DefaultNameChooser, NameChooser, NameRole, NameRoles};
pub use operator::{
    Operator, OperatorInfo, OperatorRegistry, OperatorType, PropertyDef, PropertyInfo,
};
pub use signature::{CallableSignature, NativeCandidate, NativeFn, ParamKind, SignatureFilter};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=quarry_registry=debug` or `RUST_LOG=quarry_registry=trace`.
/// A global subscriber installed by the host process is left in place.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let installed = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
            if let Err(err) = installed {
                tracing::debug!(%err, "keeping existing global subscriber");
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registries_are_shareable_after_bootstrap() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FunctionRegistry>();
        assert_send_sync::<OperatorRegistry>();
        assert_send_sync::<Bindings>();
    }

    #[test]
    fn init_tracing_is_idempotent() {
        init_tracing();
        init_tracing();
    }
}
