//! Built-in I/O operators.
//!
//! `Source` and `Sink` are registered in every I/O registry before it is handed
//! out. Their reading and writing behavior belongs to the execution layer;
//! here they only carry their names and properties.

use crate::{NameRoles, Operator, OperatorRegistry, PropertyDef, RegistryError};

/// Reads records into a query.
#[derive(Copy, Clone, Debug, Default)]
pub struct Source;

/// Writes the records of a query.
#[derive(Copy, Clone, Debug, Default)]
pub struct Sink;

const SOURCE_PROPERTIES: &[PropertyDef] = &[
    PropertyDef::new("input_path").with_roles(NameRoles::new().with_prepositions(&["from"])),
    PropertyDef::new("format").with_roles(NameRoles::new().with_nouns(&["format"])),
];

const SINK_PROPERTIES: &[PropertyDef] = &[
    PropertyDef::new("output_path").with_roles(NameRoles::new().with_prepositions(&["to"])),
    PropertyDef::new("format").with_roles(NameRoles::new().with_nouns(&["format"])),
];

impl Operator for Source {
    const IDENT: &'static str = "Source";

    fn properties() -> &'static [PropertyDef] {
        SOURCE_PROPERTIES
    }
}

impl Operator for Sink {
    const IDENT: &'static str = "Sink";

    fn properties() -> &'static [PropertyDef] {
        SINK_PROPERTIES
    }
}

impl OperatorRegistry {
    /// Create the I/O registry with `Sink` and `Source` already registered.
    ///
    /// Build it once during bootstrap and pass it by reference to consumers.
    pub fn io() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        registry.add::<Sink>()?;
        registry.add::<Source>()?;
        Ok(registry)
    }
}
