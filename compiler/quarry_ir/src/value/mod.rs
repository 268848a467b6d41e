//! Runtime values and the value class lattice.
//!
//! Every native function accepts and returns `Value`s. The class lattice is
//! only consulted when checking declared signatures and when dispatching a
//! call to an overload; the binding layer never inspects value contents.
//!
//! ```text
//! Any
//!  ├── Null
//!  ├── Bool
//!  ├── Number
//!  │    ├── Int
//!  │    └── Float
//!  ├── Text
//!  ├── Array
//!  └── Object
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Runtime value of the query language.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Missing or explicit null.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// UTF-8 text.
    Text(Arc<str>),
    /// Ordered sequence of values.
    Array(Vec<Value>),
    /// Record with sorted field names.
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// Create a text value.
    pub fn text(s: impl Into<Arc<str>>) -> Self {
        Value::Text(s.into())
    }

    /// Create an array value.
    pub fn array(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Array(items.into_iter().collect())
    }

    /// Create an object value from field/value pairs.
    pub fn object<K: Into<String>>(fields: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Object(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// The most specific class of this value.
    pub fn class(&self) -> ValueClass {
        match self {
            Value::Null => ValueClass::Null,
            Value::Bool(_) => ValueClass::Bool,
            Value::Int(_) => ValueClass::Int,
            Value::Float(_) => ValueClass::Float,
            Value::Text(_) => ValueClass::Text,
            Value::Array(_) => ValueClass::Array,
            Value::Object(_) => ValueClass::Object,
        }
    }

    /// Check whether this value is an instance of `class`.
    #[inline]
    pub fn is_instance_of(&self, class: ValueClass) -> bool {
        self.class().is_subclass_of(class)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => write!(f, "{s:?}"),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Object(fields) => {
                write!(f, "{{")?;
                for (i, (key, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key:?}: {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// Class of a value in the subtype lattice.
///
/// `Any` is the value type itself; every other class is a subtype of it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueClass {
    /// The value type (top of the lattice).
    Any,
    Null,
    Bool,
    /// Supertype of `Int` and `Float`.
    Number,
    Int,
    Float,
    Text,
    Array,
    Object,
}

impl ValueClass {
    /// The direct supertype, or `None` for `Any`.
    pub const fn parent(self) -> Option<ValueClass> {
        match self {
            ValueClass::Any => None,
            ValueClass::Int | ValueClass::Float => Some(ValueClass::Number),
            ValueClass::Null
            | ValueClass::Bool
            | ValueClass::Number
            | ValueClass::Text
            | ValueClass::Array
            | ValueClass::Object => Some(ValueClass::Any),
        }
    }

    /// Check whether `self` is `other` or one of its subtypes.
    pub fn is_subclass_of(self, other: ValueClass) -> bool {
        let mut current = Some(self);
        while let Some(class) = current {
            if class == other {
                return true;
            }
            current = class.parent();
        }
        false
    }

    /// Name as it appears in signatures and diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            ValueClass::Any => "value",
            ValueClass::Null => "null",
            ValueClass::Bool => "bool",
            ValueClass::Number => "number",
            ValueClass::Int => "int",
            ValueClass::Float => "float",
            ValueClass::Text => "text",
            ValueClass::Array => "array",
            ValueClass::Object => "object",
        }
    }
}

impl fmt::Display for ValueClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
