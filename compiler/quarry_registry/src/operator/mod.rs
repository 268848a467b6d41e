//! Registry for operator types.
//!
//! Each operator type is registered under exactly one name, derived from its
//! role-tagged candidates by the registry's operator [`NameChooser`]. An
//! operator without candidates (or whose candidates resolve to nothing) is
//! registered under its bare identifier.
//!
//! # Design
//!
//! - Dual indexing: `BTreeMap` by name for sorted iteration, `FxHashMap` by
//!   `TypeId` for lookup by type
//! - A name is never overwritten; a collision is a configuration error
//! - Property names are resolved once, when the descriptor is built

use std::any::TypeId;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHashMap;

use crate::{DefaultNameChooser, NameChooser, NameRoles, RegistryError};

/// A structural operator of the query language.
pub trait Operator: 'static {
    /// Bare identifier, used when no role-tagged name resolves.
    const IDENT: &'static str;

    /// Role-tagged name candidates for the operator itself.
    fn roles() -> Option<NameRoles> {
        None
    }

    /// Configurable properties of the operator.
    fn properties() -> &'static [PropertyDef] {
        &[]
    }
}

/// A configurable property of an operator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PropertyDef {
    /// Field identifier, used when no role-tagged name resolves.
    pub field: &'static str,
    pub roles: NameRoles,
}

impl PropertyDef {
    pub const fn new(field: &'static str) -> Self {
        PropertyDef {
            field,
            roles: NameRoles::new(),
        }
    }

    #[must_use]
    pub const fn with_roles(mut self, roles: NameRoles) -> Self {
        self.roles = roles;
        self
    }
}

/// Handle to an operator type.
///
/// Equality and hashing use the type identity only.
#[derive(Copy, Clone, Debug)]
pub struct OperatorType {
    id: TypeId,
    ident: &'static str,
    properties: &'static [PropertyDef],
}

impl OperatorType {
    /// The handle for `O`.
    pub fn of<O: Operator>() -> Self {
        OperatorType {
            id: TypeId::of::<O>(),
            ident: O::IDENT,
            properties: O::properties(),
        }
    }

    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    #[inline]
    pub fn ident(&self) -> &'static str {
        self.ident
    }

    #[inline]
    pub fn properties(&self) -> &'static [PropertyDef] {
        self.properties
    }

    /// Check whether this handle refers to `O`.
    #[inline]
    pub fn is<O: Operator>(&self) -> bool {
        self.id == TypeId::of::<O>()
    }
}

impl PartialEq for OperatorType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for OperatorType {}

impl Hash for OperatorType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// A resolved operator property.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PropertyInfo {
    /// Name used in queries.
    pub name: &'static str,
    /// Field identifier on the operator.
    pub field: &'static str,
}

/// Descriptor of a registered operator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OperatorInfo {
    name: &'static str,
    operator: OperatorType,
    properties: BTreeMap<&'static str, PropertyInfo>,
}

impl OperatorInfo {
    /// Build a descriptor, resolving property names with `chooser`.
    pub fn new(
        name: &'static str,
        operator: OperatorType,
        chooser: &dyn NameChooser,
    ) -> Result<Self, RegistryError> {
        let mut properties = BTreeMap::new();
        for def in operator.properties() {
            let property_name = chooser.choose_roles(&def.roles).unwrap_or(def.field);
            let info = PropertyInfo {
                name: property_name,
                field: def.field,
            };
            if properties.insert(property_name, info).is_some() {
                return Err(RegistryError::DuplicateProperty {
                    operator: name.to_string(),
                    property: property_name.to_string(),
                });
            }
        }
        Ok(OperatorInfo {
            name,
            operator,
            properties,
        })
    }

    /// The resolved operator name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn operator(&self) -> OperatorType {
        self.operator
    }

    /// Look up a property by its resolved name.
    #[inline]
    pub fn property(&self, name: &str) -> Option<&PropertyInfo> {
        self.properties.get(name)
    }

    /// Resolved properties in name order.
    pub fn properties(&self) -> impl Iterator<Item = &PropertyInfo> {
        self.properties.values()
    }
}

/// Registry of operator descriptors.
#[derive(Debug)]
pub struct OperatorRegistry {
    operator_chooser: Box<dyn NameChooser>,
    property_chooser: Box<dyn NameChooser>,

    /// Descriptors by resolved name (`BTreeMap` for deterministic iteration).
    operators_by_name: BTreeMap<&'static str, OperatorInfo>,

    /// Type identity -> resolved name.
    operators_by_type: FxHashMap<TypeId, &'static str>,
}

impl OperatorRegistry {
    /// Create an empty registry using the default chooser for operators and properties.
    pub fn new() -> Self {
        Self::with_choosers(
            Box::new(DefaultNameChooser::new()),
            Box::new(DefaultNameChooser::new()),
        )
    }

    /// Create an empty registry with custom choosers.
    pub fn with_choosers(
        operator_chooser: Box<dyn NameChooser>,
        property_chooser: Box<dyn NameChooser>,
    ) -> Self {
        OperatorRegistry {
            operator_chooser,
            property_chooser,
            operators_by_name: BTreeMap::new(),
            operators_by_type: FxHashMap::default(),
        }
    }

    /// Register `O` with its own role-tagged names.
    pub fn add<O: Operator>(&mut self) -> Result<&OperatorInfo, RegistryError> {
        self.add_operator(OperatorType::of::<O>(), O::roles())
    }

    /// Register an operator type.
    ///
    /// Fails without touching the registry if the resolved name is taken.
    #[tracing::instrument(level = "debug", skip_all, fields(operator = operator.ident()))]
    pub fn add_operator(
        &mut self,
        operator: OperatorType,
        roles: Option<NameRoles>,
    ) -> Result<&OperatorInfo, RegistryError> {
        let name = self.resolve_name(operator, roles.as_ref());
        if self.operators_by_name.contains_key(name) {
            return Err(RegistryError::DuplicateOperator {
                name: name.to_string(),
            });
        }

        let info = OperatorInfo::new(name, operator, self.property_chooser.as_ref())?;
        self.operators_by_type.entry(operator.id()).or_insert(name);
        tracing::debug!(name, "operator registered");
        Ok(self.operators_by_name.entry(name).or_insert(info))
    }

    fn resolve_name(&self, operator: OperatorType, roles: Option<&NameRoles>) -> &'static str {
        roles
            .and_then(|roles| self.operator_chooser.choose_roles(roles))
            .unwrap_or(operator.ident())
    }

    /// Look up a descriptor by resolved name.
    #[inline]
    pub fn operator_info(&self, name: &str) -> Option<&OperatorInfo> {
        self.operators_by_name.get(name)
    }

    /// Look up a descriptor by operator type.
    pub fn operator_info_by_type(&self, operator: OperatorType) -> Option<&OperatorInfo> {
        let name = self.operators_by_type.get(&operator.id())?;
        self.operators_by_name.get(name)
    }

    /// Look up the descriptor of `O`.
    pub fn operator_info_of<O: Operator>(&self) -> Option<&OperatorInfo> {
        self.operator_info_by_type(OperatorType::of::<O>())
    }

    /// All descriptors by resolved name.
    #[inline]
    pub fn operator_infos(&self) -> &BTreeMap<&'static str, OperatorInfo> {
        &self.operators_by_name
    }

    /// Number of registered operators.
    #[inline]
    pub fn len(&self) -> usize {
        self.operators_by_name.len()
    }

    /// Check if the registry is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.operators_by_name.is_empty()
    }
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
