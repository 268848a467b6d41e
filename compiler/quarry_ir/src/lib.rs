//! Quarry IR - shared vocabulary for symbol binding
//!
//! This crate contains the data types the binding layer reasons about:
//! - `Value`, the single runtime value abstraction of the query language
//! - `ValueClass`, the subtype lattice below the value type
//! - `DeclaredType`, the parameter and return types a host implementation declares
//! - `Visibility` and `Receiver`, the markers used to restrict registration tables
//!
//! # Design Philosophy
//!
//! - **No registry logic**: registries live in `quarry_registry`
//! - **Const-friendly**: declared types are `Copy` so registration tables can be
//!   written as `static` slices

mod declared;
mod value;

pub use declared::{DeclaredType, Primitive, Receiver, Visibility};
pub use value::{Value, ValueClass};
