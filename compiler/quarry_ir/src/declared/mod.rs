//! Declared host types of native implementations.
//!
//! A native implementation declares the types of its parameters and its
//! return in terms of `DeclaredType`. Only shapes built from value classes
//! are legal overloads; host primitives exist so that registration tables can
//! describe (and the filter can reject) implementations that take raw host
//! scalars.

use std::fmt;

use crate::ValueClass;

/// Host scalar types that are not part of the value lattice.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    Bool,
    Int,
    Float,
    Str,
    Unit,
}

impl Primitive {
    /// Host spelling of the primitive.
    pub const fn name(self) -> &'static str {
        match self {
            Primitive::Bool => "bool",
            Primitive::Int => "i64",
            Primitive::Float => "f64",
            Primitive::Str => "str",
            Primitive::Unit => "()",
        }
    }
}

/// A declared parameter or return type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DeclaredType {
    /// A value class (the value type or one of its subtypes).
    Value(ValueClass),
    /// A host array of some declared element type.
    Array(&'static DeclaredType),
    /// A host scalar.
    Primitive(Primitive),
}

impl DeclaredType {
    /// The value type itself.
    pub const VALUE: DeclaredType = DeclaredType::Value(ValueClass::Any);

    /// An array of the value type.
    pub const VALUE_ARRAY: DeclaredType = DeclaredType::Array(&DeclaredType::VALUE);

    /// The value class, if this is a value type.
    #[inline]
    pub const fn value_class(self) -> Option<ValueClass> {
        match self {
            DeclaredType::Value(class) => Some(class),
            DeclaredType::Array(_) | DeclaredType::Primitive(_) => None,
        }
    }

    /// The element class, if this is an array whose elements are value types.
    #[inline]
    pub const fn array_element_class(self) -> Option<ValueClass> {
        match self {
            DeclaredType::Array(element) => element.value_class(),
            DeclaredType::Value(_) | DeclaredType::Primitive(_) => None,
        }
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclaredType::Value(class) => write!(f, "{class}"),
            DeclaredType::Array(element) => write!(f, "{element}[]"),
            DeclaredType::Primitive(prim) => f.write_str(prim.name()),
        }
    }
}

/// Visibility of a native implementation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Visible to the registry.
    #[default]
    Public,
    /// Internal helper of its library.
    Private,
}

/// How a native implementation is invoked.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Receiver {
    /// Type-level implementation, callable without an instance.
    #[default]
    Static,
    /// Requires an instance of its library.
    Instance,
}
